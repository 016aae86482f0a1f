use serde::Serialize;

use crate::colors::{ColorBar, ColorDomain, ColorScale, Rgb};
use crate::filter::FilterSelection;
use crate::model::{Gender, SentimentBucket};

/// One bar of the gender chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub gender: Gender,
    pub label: String,
    pub count: usize,
}

impl BarEntry {
    pub fn tooltip(&self) -> String {
        format!("{}: {}", self.label, self.count)
    }
}

/// Gender counts over the filtered comments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarViewModel {
    pub entries: Vec<BarEntry>,
}

impl BarViewModel {
    pub fn pairs(&self) -> Vec<(Gender, usize)> {
        self.entries.iter().map(|e| (e.gender, e.count)).collect()
    }

    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).max().unwrap_or(0)
    }
}

/// A pie wedge and its legend row; both are drawn from the same entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub bucket: SentimentBucket,
    pub label: &'static str,
    pub count: usize,
    pub fill: Rgb,
    pub stroke: Rgb,
    pub highlighted: bool,
}

/// Sentiment distribution over all comments. The selection only changes
/// which slice is highlighted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieViewModel {
    pub counts: [usize; SentimentBucket::COUNT],
    pub slices: Vec<PieSlice>,
}

impl PieViewModel {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Share of all comments in `bucket`; 0 when there are no comments.
    pub fn share(&self, bucket: SentimentBucket) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.counts[bucket.index()] as f64 / total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRegion {
    pub province: String,
    pub value: f64,
    pub fill: Rgb,
}

impl MapRegion {
    /// Hover text. A zero value reads as missing data.
    pub fn tooltip(&self) -> String {
        if self.value == 0.0 || !self.value.is_finite() {
            format!("{}: no data", self.province)
        } else {
            format!("{}: {:.2}", self.province, self.value)
        }
    }
}

/// Continuous legend attached to the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLegend {
    pub domain: ColorDomain,
    pub low_label: &'static str,
    pub high_label: &'static str,
    pub low_color: Rgb,
    pub high_color: Rgb,
}

/// Choropleth series plus the scale that colored it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapViewModel {
    pub regions: Vec<MapRegion>,
    pub domain: ColorDomain,
    pub legend: MapLegend,
    #[serde(skip)]
    pub(crate) scale: ColorScale,
}

impl MapViewModel {
    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn region(&self, province: &str) -> Option<&MapRegion> {
        self.regions.iter().find(|r| r.province == province)
    }
}

/// Everything the rendering layer needs for one render cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub selection: FilterSelection,
    pub caption: String,
    pub bar: BarViewModel,
    pub pie: PieViewModel,
    pub map: MapViewModel,
    pub color_bar: ColorBar,
}
