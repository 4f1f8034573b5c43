// src/kmer/rolling.rs
//! Rolling 2-bit k-mer encoder.
//!
//! Keeps the forward fingerprint and its reverse complement in step while
//! sliding one base at a time, so each window costs O(1) instead of O(k).
//! A non-ACGT symbol empties the window; nothing is reported again until
//! k valid bases have been seen after it.

use super::kmer::{base_code, kmer_mask, MAX_K};

/// Rolling state for one strand pair
#[derive(Clone, Debug)]
pub struct RollingKmer {
    k: usize,
    mask: u64,
    /// Shift that places a base code in the most significant used slot
    rc_shift: u32,
    forward: u64,
    reverse: u64,
    /// Valid bases in the current window, saturates at k
    filled: usize,
}

impl RollingKmer {
    /// Returns None unless 1 <= k <= 32
    pub fn new(k: usize) -> Option<Self> {
        if k == 0 || k > MAX_K {
            return None;
        }
        Some(Self {
            k,
            mask: kmer_mask(k),
            rc_shift: (2 * (k - 1)) as u32,
            forward: 0,
            reverse: 0,
            filled: 0,
        })
    }

    /// Feeds one base. Returns the canonical fingerprint once the window
    /// holds k consecutive valid bases.
    #[inline]
    pub fn push(&mut self, base: u8) -> Option<u64> {
        let Some(code) = base_code(base) else {
            self.reset();
            return None;
        };

        self.forward = ((self.forward << 2) | code) & self.mask;
        self.reverse = (self.reverse >> 2) | ((3 - code) << self.rc_shift);

        if self.filled < self.k {
            self.filled += 1;
        }
        if self.is_full() {
            Some(self.canonical())
        } else {
            None
        }
    }

    /// Clears the window
    #[inline]
    pub fn reset(&mut self) {
        self.forward = 0;
        self.reverse = 0;
        self.filled = 0;
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled == self.k
    }

    #[inline]
    pub fn canonical(&self) -> u64 {
        self.forward.min(self.reverse)
    }

    #[inline]
    pub fn forward(&self) -> u64 {
        self.forward
    }

    #[inline]
    pub fn reverse(&self) -> u64 {
        self.reverse
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

/// Iterator over `(start, canonical)` for every fully encodable window of a sequence
pub struct CanonicalKmers<'a> {
    seq: &'a [u8],
    roller: Option<RollingKmer>,
    pos: usize,
}

impl<'a> CanonicalKmers<'a> {
    /// An invalid k yields an empty iterator
    pub fn new(seq: &'a [u8], k: usize) -> Self {
        Self {
            seq,
            roller: RollingKmer::new(k),
            pos: 0,
        }
    }
}

impl<'a> Iterator for CanonicalKmers<'a> {
    type Item = (usize, u64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let roller = self.roller.as_mut()?;
        while self.pos < self.seq.len() {
            let base = self.seq[self.pos];
            self.pos += 1;
            if let Some(canonical) = roller.push(base) {
                return Some((self.pos - roller.k(), canonical));
            }
        }
        None
    }
}

/// Number of k-length windows in `seq` that contain only ACGT
pub fn count_windows(seq: &[u8], k: usize) -> usize {
    CanonicalKmers::new(seq, k).count()
}
