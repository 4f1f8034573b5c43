// src/kmer/kmer.rs
//! 2-bit k-mer fingerprints.
//!
//! Bases are packed most-significant first (A=00, C=01, G=10, T=11), so
//! comparing two fingerprints as integers is the same as comparing the
//! underlying k-mers lexicographically.

/// Largest k that fits in a `u64` fingerprint
pub const MAX_K: usize = 32;

/// Maps a nucleotide to its 2-bit code, `None` for anything outside ACGT
#[inline]
pub fn base_code(b: u8) -> Option<u64> {
    match b {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' => Some(3),
        _ => None,
    }
}

/// Bit mask covering the low `2 * k` bits
#[inline]
pub fn kmer_mask(k: usize) -> u64 {
    if k >= MAX_K {
        u64::MAX
    } else {
        (1u64 << (2 * k)) - 1
    }
}

/// Encodes a DNA k-mer to a 64-bit integer (2 bits per nucleotide, max 32-mer)
pub fn encode_kmer(seq: &[u8]) -> Option<u64> {
    if seq.is_empty() || seq.len() > MAX_K {
        return None;
    }
    let mut val: u64 = 0;
    for &b in seq {
        val = (val << 2) | base_code(b)?;
    }
    Some(val)
}

/// Decodes a fingerprint back into its bases
pub fn decode_kmer(code: u64, k: usize) -> String {
    (0..k)
        .map(|i| {
            let shift = 2 * (k - 1 - i);
            match (code >> shift) & 0b11 {
                0 => 'A',
                1 => 'C',
                2 => 'G',
                _ => 'T',
            }
        })
        .collect()
}

/// Reverse complement of a packed k-mer.
///
/// Complementing is a bitwise NOT under this encoding (A<->T is 00<->11,
/// C<->G is 01<->10). The 2-bit groups are then reversed across the whole
/// word and the result shifted down so the k groups sit in the low bits.
#[inline]
pub fn reverse_complement_kmer(code: u64, k: usize) -> u64 {
    if k == 0 {
        return 0;
    }
    let mut x = !code;
    x = ((x >> 2) & 0x3333_3333_3333_3333) | ((x & 0x3333_3333_3333_3333) << 2);
    x = ((x >> 4) & 0x0F0F_0F0F_0F0F_0F0F) | ((x & 0x0F0F_0F0F_0F0F_0F0F) << 4);
    x = x.swap_bytes();
    x >> (64 - 2 * k)
}

/// Strand-independent form of a k-mer: the smaller of it and its reverse complement
#[inline]
pub fn canonical_kmer(code: u64, k: usize) -> u64 {
    code.min(reverse_complement_kmer(code, k))
}

/// Returns the reverse complement of a DNA sequence.
/// Symbols other than ACGT (N, IUPAC codes) are kept as-is.
pub fn reverse_complement(seq: &str) -> String {
    seq.bytes()
        .rev()
        .map(|b| match b {
            b'A' => 'T',
            b'C' => 'G',
            b'G' => 'C',
            b'T' => 'A',
            b'a' => 't',
            b'c' => 'g',
            b'g' => 'c',
            b't' => 'a',
            other => other as char,
        })
        .collect()
}
