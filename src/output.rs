use crate::view::Dashboard;

/// Output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Text,
    Json,
}

/// Format a dashboard as JSON.
pub fn format_json(dashboard: &Dashboard) -> serde_json::Result<String> {
    serde_json::to_string_pretty(dashboard)
}

/// Format a dashboard as plain text (no colors).
pub fn format_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", dashboard.caption));

    out.push_str("\nGender:\n");
    if dashboard.bar.entries.is_empty() {
        out.push_str("  (no comments)\n");
    }
    for entry in &dashboard.bar.entries {
        out.push_str(&format!("  {:<8} {}\n", entry.label, entry.count));
    }

    out.push_str("\nSentiment:\n");
    for slice in &dashboard.pie.slices {
        let marker = if slice.highlighted { "*" } else { " " };
        out.push_str(&format!(
            " {}{:<13} {:<11} {:>6} {:>5.1}% {}\n",
            marker,
            slice.label,
            slice.bucket.interval(),
            slice.count,
            dashboard.pie.share(slice.bucket) * 100.0,
            slice.fill,
        ));
    }

    let map = &dashboard.map;
    out.push_str(&format!(
        "\nProvinces (domain {:.2}..{:.2}):\n",
        map.domain.min, map.domain.max
    ));
    for region in &map.regions {
        out.push_str(&format!("  {:<24} {}\n", region.tooltip(), region.fill));
    }

    out.push_str("\nColor bar:\n");
    for stop in &dashboard.color_bar.stops {
        out.push_str(&format!("  {:>6.3} {}\n", stop.value, stop.color));
    }

    out
}

/// Format a dashboard with terminal colors. Swatches use the exact scale
/// colors as 24-bit escapes.
#[cfg(feature = "cli")]
pub fn format_pretty(dashboard: &Dashboard) -> String {
    use colored::Colorize;

    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        "Now displaying:".bold(),
        dashboard.selection.label().bold()
    ));

    out.push_str(&format!("\n{}\n", "Gender:".bold()));
    let max = dashboard.bar.max_count().max(1);
    for entry in &dashboard.bar.entries {
        let bar_len = entry.count * 30 / max;
        out.push_str(&format!(
            "  {:<8} {} {}\n",
            entry.label,
            "█".repeat(bar_len).truecolor(70, 130, 180),
            entry.count
        ));
    }
    if dashboard.bar.entries.is_empty() {
        out.push_str(&format!("  {}\n", "no comments".dimmed()));
    }

    out.push_str(&format!("\n{}\n", "Sentiment:".bold()));
    for slice in &dashboard.pie.slices {
        let bar_len = wedge_len(slice.count, dashboard.pie.share(slice.bucket));
        let label = format!("{:<13}", slice.label);
        let label = if slice.highlighted {
            label.bold()
        } else {
            label.normal()
        };
        let (r, g, b) = slice.fill.components();
        out.push_str(&format!(
            "  {} {} {}\n",
            label,
            "█".repeat(bar_len).truecolor(r, g, b),
            slice.count
        ));
    }

    let map = &dashboard.map;
    out.push_str(&format!(
        "\n{} {}\n",
        "Provinces:".bold(),
        format!("{:.2}..{:.2}", map.domain.min, map.domain.max).dimmed()
    ));
    for region in &map.regions {
        let (r, g, b) = region.fill.components();
        out.push_str(&format!(
            "  {} {}\n",
            "■".truecolor(r, g, b),
            region.tooltip()
        ));
    }

    let swatches: String = dashboard
        .color_bar
        .stops
        .iter()
        .map(|s| {
            let (r, g, b) = s.color.components();
            "██".truecolor(r, g, b).to_string()
        })
        .collect();
    out.push_str(&format!(
        "\n{} {} {} {}\n",
        map.legend.low_label.dimmed(),
        swatches,
        map.legend.high_label.dimmed(),
        format!("({:.2})", map.domain.max).dimmed()
    ));

    out
}

/// Blocks drawn for a pie slice in the terminal view. Non-empty slices get
/// at least one block so small shares stay visible; empty ones get none.
#[cfg_attr(not(feature = "cli"), allow(dead_code))]
fn wedge_len(count: usize, share: f64) -> usize {
    if count == 0 {
        return 0;
    }
    ((share * 30.0) as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterSelection;
    use crate::model::{Comment, ProvinceSummary, SentimentBucket};
    use crate::pipeline::Pipeline;

    fn dashboard(selection: FilterSelection) -> Dashboard {
        let rows = vec![Comment::new(1, 0.1, 1), Comment::new(2, 0.7, 2)];
        let provinces = vec![ProvinceSummary {
            province: "Guangdong".into(),
            avg_sentiment: 0.42,
            sentiment_counts: [1, 0, 0, 1, 0],
            total_comments: 2,
        }];
        Pipeline::with_defaults()
            .run(&rows, &provinces, selection)
            .unwrap()
    }

    #[test]
    fn text_lists_every_section() {
        let out = format_text(&dashboard(FilterSelection::General));
        assert!(out.starts_with("Now displaying: General"));
        assert!(out.contains("Gender:"));
        assert!(out.contains("Male"));
        assert!(out.contains("Delighted"));
        assert!(out.contains("Guangdong: 0.42"));
        assert!(out.contains("Color bar:"));
    }

    #[test]
    fn text_marks_highlighted_slice() {
        let out = format_text(&dashboard(FilterSelection::Bucket(SentimentBucket::Satisfied)));
        assert!(out.contains("*Satisfied"));
        assert!(!out.contains("*Delighted"));
    }

    #[test]
    fn text_handles_empty_filter_result() {
        let out = format_text(&dashboard(FilterSelection::Bucket(SentimentBucket::Indifferent)));
        assert!(out.contains("(no comments)"));
    }

    #[test]
    fn json_is_valid() {
        let json = format_json(&dashboard(FilterSelection::General)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["selection"]["kind"], "general");
        assert_eq!(value["pie"]["counts"].as_array().unwrap().len(), 5);
        assert_eq!(value["map"]["legend"]["high_color"], "#ff0000");
    }

    #[test]
    fn empty_slices_draw_no_blocks() {
        assert_eq!(wedge_len(0, 0.0), 0);
        assert_eq!(wedge_len(1, 0.001), 1);
        assert_eq!(wedge_len(5, 0.5), 15);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn pretty_draws_nothing_for_empty_buckets() {
        let out = format_pretty(&dashboard(FilterSelection::General));
        let indifferent = out
            .lines()
            .find(|l| l.contains("Indifferent"))
            .expect("every bucket gets a row");
        assert!(!indifferent.contains('█'), "row was: {indifferent}");
        let disgusted = out.lines().find(|l| l.contains("Disgusted")).unwrap();
        assert!(disgusted.contains('█'));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn pretty_shows_selection_and_regions() {
        let out = format_pretty(&dashboard(FilterSelection::Bucket(SentimentBucket::Disgusted)));
        assert!(out.contains("Disgusted"));
        assert!(out.contains("Guangdong"));
        assert!(out.contains("Provinces:"));
    }
}
