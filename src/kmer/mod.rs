//! K-mer fingerprinting: 2-bit packing, reverse complements, canonical forms
//! and the rolling window used by screening.

pub mod kmer;
pub mod rolling;

pub use kmer::{canonical_kmer, decode_kmer, encode_kmer, reverse_complement_kmer, MAX_K};
pub use rolling::{count_windows, CanonicalKmers, RollingKmer};
