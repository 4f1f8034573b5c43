//! PCR/optical duplicate removal keyed on a fixed read region.

pub mod map;

pub use map::{DedupCounters, DedupMap, DupEntry, Offer};

use std::io;
use tracing::{debug, info};

use crate::io::sink::ReadSink;
use crate::io::ReadSet;
use crate::kmer::MAX_K;

const PROGRESS_INTERVAL: u64 = 100_000;

/// Deduplication parameters
#[derive(Clone, Debug)]
pub struct DedupConfig {
    /// First base of the key region (0-based; the command line takes it 1-based)
    pub start: usize,
    /// Key region length per mate (1..=32)
    pub length: usize,
    /// Average quality at or above which a read is written on first sight
    pub write_quality: f64,
    /// Average quality below which a read is ignored
    pub discard_quality: f64,
    /// Write reads still held at end of input
    pub flush_held: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            start: 9,
            length: 10,
            write_quality: 30.0,
            discard_quality: 5.0,
            flush_held: true,
        }
    }
}

impl DedupConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.length == 0 || self.length > MAX_K {
            return Err(format!(
                "key length must be between 1 and {}, got {}",
                MAX_K, self.length
            ));
        }
        if self.discard_quality > self.write_quality {
            return Err(format!(
                "discard quality ({}) must not exceed write quality ({})",
                self.discard_quality, self.write_quality
            ));
        }
        Ok(())
    }
}

/// Single pass over the stream: writes representatives as they qualify and,
/// if configured, the remaining held reads at the end.
///
/// A stream or sink error stops the fold immediately and is returned as is.
pub fn deduplicate<I, S>(reads: I, sink: &mut S, config: &DedupConfig) -> io::Result<DedupCounters>
where
    I: IntoIterator<Item = io::Result<ReadSet>>,
    S: ReadSink + ?Sized,
{
    let mut map: DedupMap<ReadSet> = DedupMap::new(config.write_quality, config.discard_quality);

    for read in reads {
        let read = read?;
        let key = read.dup_key(config.start, config.length);
        let quality = read.avg_quality();
        if let Offer::Write(record) = map.offer(key, read, quality) {
            sink.write_read(&record)?;
        }

        let seen = map.counters().input;
        if seen % PROGRESS_INTERVAL == 0 {
            info!(
                "Processed {} read sets ({} keys, {} held)...",
                seen,
                map.len(),
                map.held()
            );
        }
    }

    debug!("End of input with {} distinct keys", map.len());
    let (held, counters) = map.finish(config.flush_held);
    if config.flush_held {
        debug!("Flushing {} held read sets", held.len());
    }
    for record in &held {
        sink.write_read(record)?;
    }
    Ok(counters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::fastq::FastqRecord;
    use crate::io::sink::VecSink;

    fn single(id: &str, seq: &str, qual_char: char) -> io::Result<ReadSet> {
        let qual: String = std::iter::repeat(qual_char).take(seq.len()).collect();
        Ok(ReadSet::Single(FastqRecord::new(id, seq, &qual)))
    }

    fn config() -> DedupConfig {
        DedupConfig { start: 0, length: 8, ..Default::default() }
    }

    #[test]
    fn test_duplicates_collapse_to_one() {
        // '?' = 30 (written immediately), '5' = 20, 'I' = 40
        let reads = vec![
            single("a", "ACGTACGTAA", '?'),
            single("b", "ACGTACGTCC", 'I'),
            single("c", "ACGTACGTGG", '5'),
            single("d", "TTTTACGTAA", '5'),
        ];
        let mut sink = VecSink::default();
        let counters = deduplicate(reads, &mut sink, &config()).unwrap();

        let ids: Vec<&str> = sink
            .reads
            .iter()
            .flat_map(|r| r.mates().map(|m| m.id()))
            .collect();
        assert_eq!(ids, vec!["a", "d"]);
        assert_eq!(counters, DedupCounters { input: 4, output: 2, ignored: 0, replaced: 2 });
    }

    #[test]
    fn test_stream_error_stops_the_fold() {
        let reads = vec![
            single("a", "ACGTACGTAA", '?'),
            Err(io::Error::new(io::ErrorKind::InvalidData, "truncated")),
            single("b", "TTTTACGTAA", '?'),
        ];
        let mut sink = VecSink::default();
        assert!(deduplicate(reads, &mut sink, &config()).is_err());
        assert_eq!(sink.reads.len(), 1);
    }

    #[test]
    fn test_held_reads_flushed_only_when_configured() {
        let reads = || vec![single("a", "ACGTACGTAA", '5'), single("b", "CCCCACGTAA", '5')];

        let mut sink = VecSink::default();
        let counters = deduplicate(reads(), &mut sink, &config()).unwrap();
        assert_eq!(sink.reads.len(), 2);
        assert_eq!(counters.output, 2);

        let mut sink = VecSink::default();
        let no_flush = DedupConfig { flush_held: false, ..config() };
        let counters = deduplicate(reads(), &mut sink, &no_flush).unwrap();
        assert!(sink.reads.is_empty());
        assert_eq!(counters.ignored, 2);
        assert!(counters.is_balanced());
    }

    #[test]
    fn test_config_validation() {
        assert!(DedupConfig::default().validate().is_ok());
        assert!(DedupConfig { length: 0, ..Default::default() }.validate().is_err());
        assert!(DedupConfig { length: 33, ..Default::default() }.validate().is_err());
        assert!(DedupConfig { discard_quality: 40.0, ..Default::default() }
            .validate()
            .is_err());
    }
}
