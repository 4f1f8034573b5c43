use std::error::Error;
use std::io;
use std::time::Instant;
use tracing::{info, warn};

use crate::io::fasta::open_reference;
use crate::io::sink::ReadOutputs;
use crate::io::ReadInputs;
use crate::pipeline::dedup::percent;
use crate::pipeline::StatsOptions;
use crate::screen::{screen_reads, ReferenceBuilder, ReferenceSet, ScreenConfig, ScreenCounters};
use crate::stats::{write_stats, ReferenceSummary, ScreenReport};

/// Where the contaminant reference comes from
#[derive(Clone, Debug)]
pub enum ReferenceSource {
    /// FASTA file, optionally gzipped
    Fasta(String),
    /// A single sequence given directly
    Sequence(String),
}

/// Builds the reference set to completion before any read is screened
pub fn load_reference(source: &ReferenceSource, k: usize) -> Result<ReferenceSet, Box<dyn Error>> {
    let start_time = Instant::now();
    let mut builder = ReferenceBuilder::new(k)?;
    match source {
        ReferenceSource::Fasta(path) => {
            info!("Building k={} reference set from {}", k, path);
            builder.add_records(open_reference(path)?)?;
        }
        ReferenceSource::Sequence(seq) => {
            info!("Building k={} reference set from a {} bp sequence", k, seq.len());
            let record: io::Result<(String, Vec<u8>)> = Ok(("inline".to_string(), seq.as_bytes().to_vec()));
            builder.add_records(std::iter::once(record))?;
        }
    }
    let reference = builder.finish();

    if reference.is_empty() {
        warn!("Reference produced no k-mers; no read will be flagged");
    }
    info!(
        "Reference ready: {} sequences, {} bases, {} unique canonical k-mers in {:.2?}",
        reference.sequences(),
        reference.total_bases(),
        reference.len(),
        start_time.elapsed()
    );
    Ok(reference)
}

/// Screens every input against the reference and writes the kept read sets
pub fn run_screen(
    inputs: &ReadInputs,
    outputs: &ReadOutputs,
    reference: &ReferenceSource,
    config: &ScreenConfig,
    stats: &StatsOptions,
) -> Result<ScreenCounters, Box<dyn Error>> {
    inputs.validate()?;
    config.validate()?;

    let reference = load_reference(reference, config.k)?;
    let start_time = Instant::now();

    let reads = inputs.open()?;
    let mut sink = outputs.open()?;
    let counters = screen_reads(reads, sink.as_mut(), &reference, config)?;
    sink.finish()?;

    let elapsed = start_time.elapsed();
    info!(
        "Screening complete: {}/{} read sets flagged ({:.1}%), {} written in {:.2?}",
        counters.screened,
        counters.input,
        percent(counters.screened, counters.input),
        counters.output,
        elapsed
    );

    if let Some(path) = &stats.path {
        let report = ScreenReport {
            program: "screen".to_string(),
            elapsed_secs: elapsed.as_secs_f64(),
            counters,
            reference: ReferenceSummary {
                sequences: reference.sequences(),
                total_bases: reference.total_bases(),
                unique_kmers: reference.len(),
                k: reference.k(),
            },
        };
        write_stats(path, &report, stats.append)?;
        info!("Wrote statistics to {}", path);
    }

    Ok(counters)
}
