use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};

use crate::dedup::DedupCounters;
use crate::screen::ScreenCounters;

/// Reference summary included in screening reports
#[derive(Clone, Debug, Serialize)]
pub struct ReferenceSummary {
    pub sequences: usize,
    pub total_bases: u64,
    pub unique_kmers: usize,
    pub k: usize,
}

/// Report for one deduplication run
#[derive(Clone, Debug, Serialize)]
pub struct DedupReport {
    pub program: String,
    pub elapsed_secs: f64,
    #[serde(flatten)]
    pub counters: DedupCounters,
}

/// Report for one screening run
#[derive(Clone, Debug, Serialize)]
pub struct ScreenReport {
    pub program: String,
    pub elapsed_secs: f64,
    #[serde(flatten)]
    pub counters: ScreenCounters,
    pub reference: ReferenceSummary,
}

/// Writes the report to `path`, appending to any earlier reports when asked
pub fn write_stats<T: Serialize>(path: &str, report: &T, append: bool) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;
    writeln!(file, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}
