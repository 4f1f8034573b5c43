use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use readsift::kmer::kmer::reverse_complement;
use readsift::kmer::{canonical_kmer, count_windows, encode_kmer, reverse_complement_kmer, CanonicalKmers};

fn random_seq(rng: &mut StdRng, len: usize, alphabet: &[u8]) -> Vec<u8> {
    (0..len).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect()
}

#[test]
fn test_canonical_symmetry_random_kmers() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..500 {
        let k = rng.gen_range(1..=32);
        let seq = random_seq(&mut rng, k, b"ACGT");
        let code = encode_kmer(&seq).unwrap();
        let rc = reverse_complement_kmer(code, k);
        assert_eq!(canonical_kmer(code, k), canonical_kmer(rc, k));

        let rc_str = reverse_complement(std::str::from_utf8(&seq).unwrap());
        assert_eq!(encode_kmer(rc_str.as_bytes()), Some(rc));
    }
}

#[test]
fn test_rolling_agrees_with_direct_encoding_on_noisy_reads() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let k = rng.gen_range(3..=21);
        let seq = random_seq(&mut rng, 150, b"ACGTACGTACGTN");
        let expected: Vec<(usize, u64)> = (0..=seq.len() - k)
            .filter_map(|i| encode_kmer(&seq[i..i + k]).map(|code| (i, canonical_kmer(code, k))))
            .collect();
        let rolled: Vec<(usize, u64)> = CanonicalKmers::new(&seq, k).collect();
        assert_eq!(rolled, expected);
        assert_eq!(count_windows(&seq, k), expected.len());
    }
}

#[test]
fn test_ambiguous_windows_produce_nothing() {
    for seq in [&b"GAANAAGCVM"[..], b"NNNNNNNNNN", b"ACGTMACGTR"] {
        assert_eq!(CanonicalKmers::new(seq, 5).count(), 0);
    }
}
