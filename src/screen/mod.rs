//! Contaminant screening against a reference k-mer set.

pub mod reference;

pub use reference::{ReferenceBuilder, ReferenceSet};

use serde::Serialize;
use std::io;
use tracing::info;

use crate::io::sink::ReadSink;
use crate::io::ReadSet;

const PROGRESS_INTERVAL: u64 = 100_000;

/// Counters reported by the screening pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScreenCounters {
    pub input: u64,
    pub output: u64,
    /// Read sets called as contaminants
    pub screened: u64,
    pub single_end: u64,
    pub paired_end: u64,
}

/// Screening parameters
#[derive(Clone, Debug)]
pub struct ScreenConfig {
    /// K-mer size (1..=32)
    pub k: usize,
    /// Hit fraction a read set must exceed to be called a contaminant
    pub percentage_hits: f64,
    /// Write only contaminants instead of dropping them
    pub inverse: bool,
    /// Write every read set and only count contaminants
    pub record_only: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            k: 12,
            percentage_hits: 0.01,
            inverse: false,
            record_only: false,
        }
    }
}

impl ScreenConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.k == 0 || self.k > crate::kmer::MAX_K {
            return Err(format!("k-mer size must be between 1 and 32, got {}", self.k));
        }
        if !(0.0..=1.0).contains(&self.percentage_hits) {
            return Err(format!(
                "percentage of hits must be between 0 and 1, got {}",
                self.percentage_hits
            ));
        }
        if self.inverse && self.record_only {
            return Err("inverse and record-only modes are mutually exclusive".to_string());
        }
        Ok(())
    }

    /// Whether a read set with the given verdict goes to the output
    pub fn keeps(&self, contaminant: bool) -> bool {
        if self.record_only {
            true
        } else {
            contaminant == self.inverse
        }
    }
}

/// Hits and screenable windows summed over the mates of a read set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenScore {
    pub hits: usize,
    pub windows: usize,
}

impl ScreenScore {
    pub fn fraction(&self) -> f64 {
        if self.windows == 0 {
            0.0
        } else {
            self.hits as f64 / self.windows as f64
        }
    }

    /// Contaminant when the hit fraction is strictly above the threshold
    pub fn is_contaminant(&self, percentage_hits: f64) -> bool {
        self.windows > 0 && self.fraction() > percentage_hits
    }
}

/// Scores every mate of a read set against the reference
pub fn score_read_set(reference: &ReferenceSet, reads: &ReadSet) -> ScreenScore {
    reads.mates().fold(ScreenScore::default(), |acc, mate| {
        let seq = mate.sequence.as_bytes();
        ScreenScore {
            hits: acc.hits + reference.score(seq),
            windows: acc.windows + reference.screenable(seq),
        }
    })
}

/// Scores each read set once and routes it according to the output mode
pub fn screen_reads<I, S>(
    reads: I,
    sink: &mut S,
    reference: &ReferenceSet,
    config: &ScreenConfig,
) -> io::Result<ScreenCounters>
where
    I: IntoIterator<Item = io::Result<ReadSet>>,
    S: ReadSink + ?Sized,
{
    let mut counters = ScreenCounters::default();

    for read in reads {
        let read = read?;
        counters.input += 1;
        if read.is_paired() {
            counters.paired_end += 1;
        } else {
            counters.single_end += 1;
        }

        let contaminant = score_read_set(reference, &read).is_contaminant(config.percentage_hits);
        if contaminant {
            counters.screened += 1;
        }
        if config.keeps(contaminant) {
            sink.write_read(&read)?;
            counters.output += 1;
        }

        if counters.input % PROGRESS_INTERVAL == 0 {
            info!(
                "Screened {} read sets, {} flagged so far...",
                counters.input, counters.screened
            );
        }
    }

    Ok(counters)
}
