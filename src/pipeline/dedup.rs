use std::error::Error;
use std::time::Instant;
use tracing::info;

use crate::dedup::{deduplicate, DedupConfig, DedupCounters};
use crate::io::sink::ReadOutputs;
use crate::io::ReadInputs;
use crate::pipeline::StatsOptions;
use crate::stats::{write_stats, DedupReport};

/// Removes duplicate read sets from every input and writes the survivors
pub fn run_dedup(
    inputs: &ReadInputs,
    outputs: &ReadOutputs,
    config: &DedupConfig,
    stats: &StatsOptions,
) -> Result<DedupCounters, Box<dyn Error>> {
    inputs.validate()?;
    config.validate()?;

    info!(
        "Deduplicating on bases {}..{} (write quality {}, discard quality {})",
        config.start,
        config.start + config.length,
        config.write_quality,
        config.discard_quality
    );
    let start_time = Instant::now();

    let reads = inputs.open()?;
    let mut sink = outputs.open()?;
    let counters = deduplicate(reads, sink.as_mut(), config)?;
    sink.finish()?;

    let elapsed = start_time.elapsed();
    info!(
        "Deduplication complete: {}/{} read sets kept ({:.1}%), {} duplicates, {} ignored in {:.2?}",
        counters.output,
        counters.input,
        percent(counters.output, counters.input),
        counters.replaced,
        counters.ignored,
        elapsed
    );

    if let Some(path) = &stats.path {
        let report = DedupReport {
            program: "dedup".to_string(),
            elapsed_secs: elapsed.as_secs_f64(),
            counters,
        };
        write_stats(path, &report, stats.append)?;
        info!("Wrote statistics to {}", path);
    }

    Ok(counters)
}

pub(crate) fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
