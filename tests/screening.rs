use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use readsift::io::fasta::reference_records;
use readsift::kmer::count_windows;
use readsift::screen::{ReferenceBuilder, ReferenceSet};

fn reference_from_fasta_str(fasta: &str, k: usize) -> ReferenceSet {
    ReferenceSet::build(reference_records(fasta.as_bytes()), k).unwrap()
}

#[test]
fn test_fasta_reference_collapses_strands() {
    let fa = ">1\nAGCTAGCT\n>2\nCCGGAATTCC\n";
    let set = reference_from_fasta_str(fa, 5);
    assert_eq!(set.len(), 6);
    assert_eq!(set.total_bases(), 18);
}

#[test]
fn test_self_screen_hits_every_window() {
    let mut builder = ReferenceBuilder::new(5).unwrap();
    builder.add_sequence(b"AAAAAAAGCT");
    let set = builder.finish();
    assert_eq!(set.len(), 4);
    assert_eq!(set.score(b"AAAAAAAGCT"), 6);
}

#[test]
fn test_all_ambiguous_reference_is_empty() {
    let set = reference_from_fasta_str(">amb\nGAANAAGCVM\n", 5);
    assert!(set.is_empty());
    assert_eq!(set.total_bases(), 10);
}

#[test]
fn test_self_screen_random_sequences() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let k = rng.gen_range(4..=16);
        let seq: Vec<u8> = (0..200).map(|_| b"ACGTACGTN"[rng.gen_range(0..9)]).collect();
        let mut builder = ReferenceBuilder::new(k).unwrap();
        builder.add_sequence(&seq);
        let set = builder.finish();
        assert_eq!(set.score(&seq), count_windows(&seq, k));
    }
}

#[test]
fn test_build_from_reader_records() {
    let fa = ">ctrl\nACGTACGTTTGACCA\n";
    let set = ReferenceSet::build(reference_records(fa.as_bytes()), 8).unwrap();
    assert_eq!(set.k(), 8);
    assert_eq!(set.sequences(), 1);
    assert!(set.score(b"TGGTCAAACGTACGT") > 0);
}
