use crate::io::fastq::FastqRecord;

/// Fingerprint key spanning a fixed region of one or both mates
pub type DupKey = u128;

/// One unit of input: a single-end read or a mate pair
#[derive(Debug, Clone, PartialEq)]
pub enum ReadSet {
    Single(FastqRecord),
    Paired(FastqRecord, FastqRecord),
}

impl ReadSet {
    pub fn is_paired(&self) -> bool {
        matches!(self, ReadSet::Paired(..))
    }

    pub fn mates(&self) -> impl Iterator<Item = &FastqRecord> {
        let (first, second) = match self {
            ReadSet::Single(r) => (r, None),
            ReadSet::Paired(r1, r2) => (r1, Some(r2)),
        };
        std::iter::once(first).chain(second)
    }

    /// Mean phred score across all bases of all mates
    pub fn avg_quality(&self) -> f64 {
        match self {
            ReadSet::Single(r) => r.avg_quality(),
            ReadSet::Paired(r1, r2) => {
                let len = r1.quality.len() + r2.quality.len();
                if len == 0 {
                    return 0.0;
                }
                (r1.quality_sum() + r2.quality_sum()) as f64 / len as f64
            }
        }
    }

    /// Duplicate key over `[start, start + length)` of each mate.
    ///
    /// Pairs put the smaller mate fingerprint in the high half, so a pair and
    /// its mate-swapped twin share a key. Returns None when any mate is too
    /// short or has a non-ACGT base in the region.
    pub fn dup_key(&self, start: usize, length: usize) -> Option<DupKey> {
        match self {
            ReadSet::Single(r) => r.region_fingerprint(start, length).map(DupKey::from),
            ReadSet::Paired(r1, r2) => {
                let a = r1.region_fingerprint(start, length)?;
                let b = r2.region_fingerprint(start, length)?;
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                Some(((lo as DupKey) << 64) | hi as DupKey)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(seq: &str, qual: &str) -> FastqRecord {
        FastqRecord::new("r", seq, qual)
    }

    #[test]
    fn test_pair_key_ignores_mate_order() {
        let a = rec("ACGTACGTAA", "IIIIIIIIII");
        let b = rec("TTTTGGGGCC", "IIIIIIIIII");
        let fwd = ReadSet::Paired(a.clone(), b.clone());
        let swapped = ReadSet::Paired(b, a);
        assert_eq!(fwd.dup_key(0, 8), swapped.dup_key(0, 8));
        assert!(fwd.dup_key(0, 8).is_some());
    }

    #[test]
    fn test_pair_key_needs_both_mates() {
        let pair = ReadSet::Paired(rec("ACGTACGT", "IIIIIIII"), rec("ACGNACGT", "IIIIIIII"));
        assert!(pair.dup_key(0, 6).is_none());
        assert!(pair.dup_key(4, 4).is_some());
    }

    #[test]
    fn test_single_key_is_raw_fingerprint() {
        let single = ReadSet::Single(rec("AAAACCCC", "IIIIIIII"));
        let other = ReadSet::Single(rec("GGGGTTTT", "IIIIIIII"));
        // Reverse complements are distinct keys
        assert_ne!(single.dup_key(0, 8), other.dup_key(0, 8));
    }

    #[test]
    fn test_pair_quality_pools_bases() {
        // 4 bases at 40 and 2 bases at 10
        let pair = ReadSet::Paired(rec("ACGT", "IIII"), rec("AC", "++"));
        assert!((pair.avg_quality() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_quality_is_record_quality() {
        // 'I' = 40, '#' = 2
        let r = rec("ACGT", "II##");
        assert_eq!(ReadSet::Single(r.clone()).avg_quality(), r.avg_quality());
        assert_eq!(ReadSet::Single(rec("", "")).avg_quality(), 0.0);
    }
}
