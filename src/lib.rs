//! Streaming deduplication and contaminant screening for sequencing reads.
//!
//! Reads are fingerprinted with a 2-bit k-mer encoding ([`kmer`]). The
//! fingerprints key a quality-aware duplicate map ([`dedup`]) or are tested
//! against a strand-symmetric reference k-mer set ([`screen`]).

pub mod dedup;
pub mod io;
pub mod kmer;
pub mod pipeline;
pub mod screen;
pub mod stats;
