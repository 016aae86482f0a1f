pub mod aggregate;
pub mod bucket;
pub mod colors;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod view;

use std::path::Path;

use dataset::Dataset;
use error::Result;
use filter::FilterSelection;
use pipeline::Pipeline;
use view::Dashboard;

/// Build every chart view model for `dataset` under `selection`.
pub fn render(dataset: &Dataset, selection: FilterSelection) -> Result<Dashboard> {
    let pipeline = Pipeline::with_defaults();
    pipeline.run(dataset.comments(), dataset.provinces(), selection)
}

/// Load the JSON inputs at the given paths and render them.
pub fn render_files(
    comments: &Path,
    provinces: Option<&Path>,
    selection: FilterSelection,
) -> Result<Dashboard> {
    let dataset = Dataset::load(comments, provinces)?;
    render(&dataset, selection)
}
