use tracing::debug;

use crate::aggregate::{count_by_gender, count_by_sentiment_bucket, province_value};
use crate::colors::{build_domain, ColorScale, ColorTheme, DefaultTheme};
use crate::error::Result;
use crate::filter::{self, FilterSelection};
use crate::model::{Comment, ProvinceSummary, SentimentBucket};
use crate::view::{
    BarEntry, BarViewModel, Dashboard, MapLegend, MapRegion, MapViewModel, PieSlice, PieViewModel,
};

pub const DEFAULT_COLOR_STEPS: usize = 5;

/// Turns comments, province summaries and a selection into chart-ready
/// view models.
pub struct Pipeline {
    theme: Box<dyn ColorTheme>,
    color_steps: usize,
}

impl Pipeline {
    pub fn new(theme: Box<dyn ColorTheme>, color_steps: usize) -> Self {
        Self { theme, color_steps }
    }

    pub fn with_defaults() -> Self {
        Self::new(Box::new(DefaultTheme), DEFAULT_COLOR_STEPS)
    }

    pub fn run(
        &self,
        comments: &[Comment],
        provinces: &[ProvinceSummary],
        selection: FilterSelection,
    ) -> Result<Dashboard> {
        let filtered = filter::apply(comments, selection);
        let bar = self.bar(&filtered);
        let pie = self.pie(comments, selection)?;
        let map = self.map(provinces, selection);
        let color_bar = map.scale().color_bar(self.color_steps);

        debug!(
            selection = %selection,
            filtered = filtered.len(),
            provinces = map.regions.len(),
            domain_max = map.domain.max,
            "built dashboard"
        );

        Ok(Dashboard {
            selection,
            caption: format!("Now displaying: {}", selection.label()),
            bar,
            pie,
            map,
            color_bar,
        })
    }

    pub fn bar(&self, rows: &[Comment]) -> BarViewModel {
        let entries = count_by_gender(rows)
            .into_iter()
            .map(|c| BarEntry {
                gender: c.gender,
                label: c.gender.to_string(),
                count: c.count,
            })
            .collect();
        BarViewModel { entries }
    }

    /// Always counts every comment; `selection` only picks the highlight.
    pub fn pie(&self, all_rows: &[Comment], selection: FilterSelection) -> Result<PieViewModel> {
        let counts = count_by_sentiment_bucket(all_rows)?;
        let slices = SentimentBucket::all()
            .iter()
            .map(|&bucket| PieSlice {
                bucket,
                label: bucket.label(),
                count: counts[bucket.index()],
                fill: self.theme.bucket_fill(bucket, selection),
                stroke: self.theme.bucket_stroke(bucket, selection),
                highlighted: selection.bucket() == Some(bucket),
            })
            .collect();
        Ok(PieViewModel { counts, slices })
    }

    /// Builds the render's single color scale; the legend and region fills
    /// are read from it.
    pub fn map(&self, provinces: &[ProvinceSummary], selection: FilterSelection) -> MapViewModel {
        let values: Vec<f64> = provinces
            .iter()
            .map(|p| province_value(p, selection))
            .collect();
        let scale = ColorScale::new(build_domain(&values), self.theme.as_ref());

        let regions = provinces
            .iter()
            .zip(values)
            .map(|(p, value)| MapRegion {
                province: p.province.clone(),
                value,
                fill: scale.color_for(value),
            })
            .collect();

        let legend = MapLegend {
            domain: scale.domain(),
            low_label: "low",
            high_label: "high",
            low_color: scale.low_color(),
            high_color: scale.high_color(),
        };

        MapViewModel {
            regions,
            domain: scale.domain(),
            legend,
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{ColorDomain, Hsl, Rgb};
    use crate::model::Gender;

    fn province(name: &str, counts: [u64; 5], total: u64, avg: f64) -> ProvinceSummary {
        ProvinceSummary {
            province: name.into(),
            avg_sentiment: avg,
            sentiment_counts: counts,
            total_comments: total,
        }
    }

    #[test]
    fn empty_input_produces_empty_charts() {
        let dash = Pipeline::with_defaults()
            .run(&[], &[], FilterSelection::General)
            .unwrap();
        assert!(dash.bar.entries.is_empty());
        assert_eq!(dash.pie.counts, [0; 5]);
        assert_eq!(dash.pie.slices.len(), 5);
        assert!(dash.map.regions.is_empty());
        assert_eq!(dash.map.domain, ColorDomain::default());
        assert_eq!(dash.caption, "Now displaying: General");
    }

    #[test]
    fn bar_reacts_to_filter_but_pie_does_not() {
        let rows = vec![
            Comment::new(1, 0.15, 1),
            Comment::new(2, 0.15, 2),
            Comment::new(3, 0.9, 1),
        ];
        let pipeline = Pipeline::with_defaults();
        let general = pipeline.run(&rows, &[], FilterSelection::General).unwrap();
        let filtered = pipeline
            .run(&rows, &[], FilterSelection::Bucket(SentimentBucket::Delighted))
            .unwrap();

        assert_eq!(general.bar.pairs(), vec![(Gender::Male, 2), (Gender::Female, 1)]);
        assert_eq!(filtered.bar.pairs(), vec![(Gender::Male, 1)]);
        assert_eq!(general.pie.counts, filtered.pie.counts);
        assert_eq!(filtered.caption, "Now displaying: Delighted");
    }

    #[test]
    fn only_selected_slice_is_highlighted() {
        let pipeline = Pipeline::with_defaults();
        let pie = pipeline
            .pie(&[], FilterSelection::Bucket(SentimentBucket::Satisfied))
            .unwrap();
        let highlighted: Vec<_> = pie.slices.iter().filter(|s| s.highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].bucket, SentimentBucket::Satisfied);
        assert_eq!(highlighted[0].fill.to_hex(), "#ffcc80");

        let none = pipeline.pie(&[], FilterSelection::General).unwrap();
        assert!(none.slices.iter().all(|s| !s.highlighted));
    }

    #[test]
    fn map_fill_legend_and_color_bar_agree() {
        let provinces = vec![
            province("A", [1, 2, 3, 4, 0], 10, 0.5),
            province("B", [0, 0, 1, 8, 1], 10, 0.7),
            province("C", [0; 5], 0, 0.0),
        ];
        let dash = Pipeline::with_defaults()
            .run(&[], &provinces, FilterSelection::Bucket(SentimentBucket::Satisfied))
            .unwrap();

        assert_eq!(dash.map.domain, ColorDomain { min: 0.0, max: 0.8 });
        assert_eq!(dash.map.legend.domain, dash.map.domain);
        assert_eq!(dash.color_bar.domain, dash.map.domain);

        let b = dash.map.region("B").unwrap();
        assert_eq!(b.fill, dash.map.legend.high_color);
        assert_eq!(b.fill, dash.color_bar.stops.last().unwrap().color);

        let c = dash.map.region("C").unwrap();
        assert_eq!(c.value, 0.0);
        assert_eq!(c.fill, dash.map.legend.low_color);
        assert_eq!(c.fill, dash.color_bar.stops[0].color);
    }

    #[test]
    fn custom_theme_flows_through_every_map_color() {
        struct Mono;
        impl ColorTheme for Mono {
            fn gradient_low(&self) -> Hsl {
                Hsl::new(0.0, 0.0, 0.0)
            }
            fn gradient_high(&self) -> Hsl {
                Hsl::new(0.0, 0.0, 1.0)
            }
            fn sequential(&self, _t: f64) -> Rgb {
                Rgb::new(1, 2, 3)
            }
            fn highlight_fill(&self) -> Rgb {
                Rgb::new(9, 9, 9)
            }
            fn highlight_stroke(&self) -> Rgb {
                Rgb::new(8, 8, 8)
            }
            fn default_stroke(&self) -> Rgb {
                Rgb::new(7, 7, 7)
            }
        }

        let pipeline = Pipeline::new(Box::new(Mono), 3);
        let dash = pipeline
            .run(&[], &[province("A", [0; 5], 1, 0.5)], FilterSelection::General)
            .unwrap();
        assert_eq!(dash.map.legend.low_color, Rgb::new(0, 0, 0));
        assert_eq!(dash.map.legend.high_color, Rgb::new(255, 255, 255));
        assert_eq!(dash.map.regions[0].fill, Rgb::new(255, 255, 255));
        assert_eq!(dash.color_bar.stops.len(), 3);
        assert_eq!(dash.pie.slices[0].fill, Rgb::new(1, 2, 3));
    }
}
