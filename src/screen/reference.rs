// src/screen/reference.rs
//! Canonical k-mer set built from reference sequences.
//!
//! A [`ReferenceBuilder`] accumulates windows; [`ReferenceBuilder::finish`]
//! freezes it into a [`ReferenceSet`], the only type that can score reads.

use ahash::AHashSet;
use std::io;
use tracing::debug;

use crate::kmer::kmer::MAX_K;
use crate::kmer::rolling::{CanonicalKmers, RollingKmer};

/// Reference set under construction
pub struct ReferenceBuilder {
    k: usize,
    kmers: AHashSet<u64>,
    total_bases: u64,
    sequences: usize,
}

impl ReferenceBuilder {
    pub fn new(k: usize) -> Result<Self, String> {
        if k == 0 || k > MAX_K {
            return Err(format!("k-mer size must be between 1 and {}, got {}", MAX_K, k));
        }
        Ok(Self {
            k,
            kmers: AHashSet::new(),
            total_bases: 0,
            sequences: 0,
        })
    }

    /// Inserts the canonical form of every fully encodable window
    pub fn add_sequence(&mut self, seq: &[u8]) {
        self.kmers
            .extend(CanonicalKmers::new(seq, self.k).map(|(_, kmer)| kmer));
        self.total_bases += seq.len() as u64;
        self.sequences += 1;
    }

    /// Consumes `(id, sequence)` records; the first stream error aborts the build
    pub fn add_records<I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = io::Result<(String, Vec<u8>)>>,
    {
        for record in records {
            let (id, seq) = record?;
            debug!("Adding reference sequence {} ({} bp)", id, seq.len());
            self.add_sequence(&seq);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.kmers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kmers.is_empty()
    }

    pub fn finish(self) -> ReferenceSet {
        ReferenceSet {
            k: self.k,
            kmers: self.kmers,
            total_bases: self.total_bases,
            sequences: self.sequences,
        }
    }
}

/// Immutable set of canonical reference k-mers
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    k: usize,
    kmers: AHashSet<u64>,
    total_bases: u64,
    sequences: usize,
}

impl ReferenceSet {
    /// Builds a set from a record stream in one go
    pub fn build<I>(records: I, k: usize) -> Result<Self, Box<dyn std::error::Error>>
    where
        I: IntoIterator<Item = io::Result<(String, Vec<u8>)>>,
    {
        let mut builder = ReferenceBuilder::new(k)?;
        builder.add_records(records)?;
        Ok(builder.finish())
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.kmers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kmers.is_empty()
    }

    /// Sum of the lengths of every reference sequence
    pub fn total_bases(&self) -> u64 {
        self.total_bases
    }

    pub fn sequences(&self) -> usize {
        self.sequences
    }

    /// Membership test for an already-canonical fingerprint
    #[inline]
    pub fn contains(&self, canonical: u64) -> bool {
        self.kmers.contains(&canonical)
    }

    /// Counts read positions whose k-window hits the set.
    ///
    /// The forward and reverse-complement accumulators advance together, so
    /// each window is tested once in canonical form whichever strand the
    /// reference came from. Windows over a non-ACGT base never hit.
    pub fn score(&self, read: &[u8]) -> usize {
        let Some(mut roller) = RollingKmer::new(self.k) else {
            return 0;
        };
        read.iter()
            .filter_map(|&base| roller.push(base))
            .filter(|kmer| self.contains(*kmer))
            .count()
    }

    /// Number of windows in the read that could possibly hit
    pub fn screenable(&self, read: &[u8]) -> usize {
        crate::kmer::rolling::count_windows(read, self.k)
    }
}
