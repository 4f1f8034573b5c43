// src/io/fasta.rs
use bio::io::fasta;
use std::io::{self, Read};

use crate::io::open_input;

/// Reference records as `(id, sequence)` pairs, consumed lazily
pub fn reference_records<R: Read>(
    reader: R,
) -> impl Iterator<Item = io::Result<(String, Vec<u8>)>> {
    fasta::Reader::new(reader)
        .records()
        .map(|rec| rec.map(|r| (r.id().to_string(), r.seq().to_vec())))
}

/// Opens a (possibly gzipped) FASTA reference
pub fn open_reference(
    path: &str,
) -> io::Result<impl Iterator<Item = io::Result<(String, Vec<u8>)>>> {
    Ok(reference_records(open_input(path)?))
}
