//! End-to-end runs: open inputs, fold, close outputs, report.

pub mod dedup;
pub mod screen;

pub use dedup::run_dedup;
pub use screen::{load_reference, run_screen, ReferenceSource};

/// Where and how to write the JSON run report
#[derive(Clone, Debug, Default)]
pub struct StatsOptions {
    pub path: Option<String>,
    pub append: bool,
}
