// src/dedup/map.rs
//! Duplicate-key map with quality-aware replacement.
//!
//! Each key moves through `unseen -> Holding -> (Holding | Emitted)`.
//! `Emitted` is terminal: every later read with that key is a duplicate.

use ahash::AHashMap;
use serde::Serialize;

use crate::io::read_set::DupKey;

/// Value stored per duplicate key
#[derive(Debug)]
pub enum DupEntry<R> {
    /// Best read seen so far, not yet written
    Holding {
        record: R,
        quality: f64,
        /// Arrival index of the first read with this key
        arrival: u64,
    },
    /// A representative has been written out
    Emitted,
}

/// What the caller must do with the record it just offered
#[derive(Debug, PartialEq)]
pub enum Offer<R> {
    /// Write this record now
    Write(R),
    /// The map kept the record as the best candidate for its key
    Held,
    /// Duplicate of a written or better held read, dropped
    Duplicate,
    /// No usable key or too low quality, dropped
    Ignored,
}

/// Per-run disposition counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DedupCounters {
    pub input: u64,
    pub output: u64,
    pub ignored: u64,
    pub replaced: u64,
}

impl DedupCounters {
    /// Every input read accounted for exactly once
    pub fn is_balanced(&self) -> bool {
        self.input == self.output + self.ignored + self.replaced
    }
}

pub struct DedupMap<R> {
    entries: AHashMap<DupKey, DupEntry<R>>,
    write_quality: f64,
    discard_quality: f64,
    arrivals: u64,
    counters: DedupCounters,
}

impl<R> DedupMap<R> {
    pub fn new(write_quality: f64, discard_quality: f64) -> Self {
        Self {
            entries: AHashMap::new(),
            write_quality,
            discard_quality,
            arrivals: 0,
            counters: DedupCounters::default(),
        }
    }

    /// Applies the replacement policy to one record.
    ///
    /// `key` is None when the read had no encodable key region.
    pub fn offer(&mut self, key: Option<DupKey>, record: R, quality: f64) -> Offer<R> {
        self.counters.input += 1;
        let arrival = self.arrivals;
        self.arrivals += 1;

        let Some(key) = key else {
            self.counters.ignored += 1;
            return Offer::Ignored;
        };
        if quality < self.discard_quality {
            self.counters.ignored += 1;
            return Offer::Ignored;
        }

        let Some(entry) = self.entries.get_mut(&key) else {
            if quality >= self.write_quality {
                self.entries.insert(key, DupEntry::Emitted);
                self.counters.output += 1;
                return Offer::Write(record);
            }
            self.entries.insert(
                key,
                DupEntry::Holding {
                    record,
                    quality,
                    arrival,
                },
            );
            return Offer::Held;
        };

        self.counters.replaced += 1;
        let held_quality = match &*entry {
            DupEntry::Emitted => return Offer::Duplicate,
            DupEntry::Holding { quality: q, .. } => *q,
        };
        if quality <= held_quality {
            return Offer::Duplicate;
        }

        if quality >= self.write_quality {
            *entry = DupEntry::Emitted;
            self.counters.output += 1;
            return Offer::Write(record);
        }
        if quality > self.discard_quality {
            if let DupEntry::Holding {
                record: held,
                quality: held_q,
                ..
            } = &mut *entry
            {
                *held = record;
                *held_q = quality;
            }
            return Offer::Held;
        }
        // Better than the held read but not above the discard line
        Offer::Duplicate
    }

    /// Ends the run.
    ///
    /// With `flush_held` the never-promoted reads are returned in the order
    /// their keys first arrived and counted as output; otherwise they are
    /// dropped and counted as ignored.
    pub fn finish(mut self, flush_held: bool) -> (Vec<R>, DedupCounters) {
        let mut held: Vec<(u64, R)> = self
            .entries
            .drain()
            .filter_map(|(_, entry)| match entry {
                DupEntry::Holding { record, arrival, .. } => Some((arrival, record)),
                DupEntry::Emitted => None,
            })
            .collect();

        if !flush_held {
            self.counters.ignored += held.len() as u64;
            return (Vec::new(), self.counters);
        }

        held.sort_unstable_by_key(|(arrival, _)| *arrival);
        self.counters.output += held.len() as u64;
        (held.into_iter().map(|(_, r)| r).collect(), self.counters)
    }

    pub fn counters(&self) -> &DedupCounters {
        &self.counters
    }

    /// Distinct keys seen so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, key: DupKey) -> Option<&DupEntry<R>> {
        self.entries.get(&key)
    }

    pub fn held(&self) -> usize {
        self.entries
            .values()
            .filter(|e| matches!(e, DupEntry::Holding { .. }))
            .count()
    }
}
