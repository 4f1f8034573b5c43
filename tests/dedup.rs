use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;

use readsift::dedup::{deduplicate, DedupConfig, DedupCounters, DedupMap, Offer};
use readsift::io::fastq::FastqRecord;
use readsift::io::sink::{ReadOutputs, VecSink};
use readsift::io::{ReadInputs, ReadSet};
use readsift::pipeline::{run_dedup, run_screen, ReferenceSource, StatsOptions};
use readsift::screen::ScreenConfig;

#[test]
fn test_written_representative_absorbs_later_duplicates() {
    let mut map = DedupMap::new(0.9, 0.1);
    let key = Some(42);
    assert_eq!(map.offer(key, 1, 0.9), Offer::Write(1));
    assert_eq!(map.offer(key, 2, 0.95), Offer::Duplicate);
    assert_eq!(map.offer(key, 3, 0.85), Offer::Duplicate);
    let (_, counters) = map.finish(true);
    assert_eq!(counters, DedupCounters { input: 3, output: 1, ignored: 0, replaced: 2 });
}

fn fastq(records: &[(&str, &str, char)]) -> String {
    records
        .iter()
        .map(|(id, seq, q)| {
            let qual: String = std::iter::repeat(*q).take(seq.len()).collect();
            format!("@{}\n{}\n+\n{}\n", id, seq, qual)
        })
        .collect()
}

#[test]
fn test_paired_gzip_run_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let r1_path = dir.path().join("in_R1.fastq.gz");
    let r2_path = dir.path().join("in_R2.fastq");

    // p1 and p2 share both key regions; p3 has an N in its key; p4 is unique
    let r1 = fastq(&[
        ("p1", "AAAAAAAAAACCCCCCCCCCGG", '5'),
        ("p2", "TTTTTTTTTACCCCCCCCCCAA", 'I'),
        ("p3", "AAAAAAAAAACCCCNCCCCCGG", 'I'),
        ("p4", "AAAAAAAAAAGGGGGGGGGGTT", '?'),
    ]);
    let r2 = fastq(&[
        ("p1", "GGGGGGGGGGTTTTTTTTTTAA", '5'),
        ("p2", "GGGGGGGGGGTTTTTTTTTTCC", 'I'),
        ("p3", "GGGGGGGGGGTTTTTTTTTTAA", 'I'),
        ("p4", "GGGGGGGGGGAAAAAAAAAACC", '?'),
    ]);
    let mut gz = GzEncoder::new(fs::File::create(&r1_path).unwrap(), Compression::default());
    gz.write_all(r1.as_bytes()).unwrap();
    gz.finish().unwrap();
    fs::write(&r2_path, r2).unwrap();

    let inputs = ReadInputs {
        read1: vec![r1_path.to_string_lossy().to_string()],
        read2: vec![r2_path.to_string_lossy().to_string()],
        ..Default::default()
    };
    let prefix = dir.path().join("out").to_string_lossy().to_string();
    let outputs = ReadOutputs { prefix: prefix.clone(), gzip: false, ..Default::default() };
    let stats_path = dir.path().join("stats.json").to_string_lossy().to_string();
    let stats = StatsOptions { path: Some(stats_path.clone()), append: false };

    let counters = run_dedup(&inputs, &outputs, &DedupConfig::default(), &stats).unwrap();
    assert_eq!(counters, DedupCounters { input: 4, output: 2, ignored: 1, replaced: 1 });

    let out_r1 = fs::read_to_string(format!("{}_R1.fastq", prefix)).unwrap();
    let ids: Vec<&str> = out_r1.lines().filter(|l| l.starts_with('@')).collect();
    // p2 was promoted while the key was held; p4 written on first sight
    assert_eq!(ids, vec!["@p2", "@p4"]);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(stats_path).unwrap()).unwrap();
    assert_eq!(report["program"], "dedup");
    assert_eq!(report["replaced"], 1);
}

#[test]
fn test_counters_balance_over_mixed_stream() {
    let mut reads = Vec::new();
    let qualities = ['#', '+', '5', '?', 'I'];
    for i in 0..200usize {
        let prefix = ["ACGTACGTAC", "TTGGCCAATT", "GGGGGGGGGG", "ACGTNCGTAC"][i % 4];
        let seq = format!("{}{}", prefix, "ACGTACGTAC");
        let qual: String = std::iter::repeat(qualities[i % 5]).take(seq.len()).collect();
        reads.push(Ok(ReadSet::Single(FastqRecord::new(&format!("r{}", i), &seq, &qual))));
    }
    let config = DedupConfig { start: 0, length: 10, ..Default::default() };
    let mut sink = VecSink::default();
    let counters = deduplicate(reads, &mut sink, &config).unwrap();
    assert!(counters.is_balanced());
    assert_eq!(counters.output as usize, sink.reads.len());
    // Three encodable keys, one representative each
    assert_eq!(sink.reads.len(), 3);
}

#[test]
fn test_screen_run_with_inline_reference() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.tab");
    fs::write(
        &input,
        "hit\tAAAAACTGACTGACTGTTTT\tIIIIIIIIIIIIIIIIIIII\nmiss\tGGGGGGGGGGGGGGGGGGGG\tIIIIIIIIIIIIIIIIIIII\n",
    )
    .unwrap();
    let inputs = ReadInputs { tab: vec![input.to_string_lossy().to_string()], ..Default::default() };
    let prefix = dir.path().join("screened").to_string_lossy().to_string();
    let outputs = ReadOutputs {
        prefix: prefix.clone(),
        format: readsift::io::sink::OutputFormat::Tab,
        gzip: false,
        to_stdout: false,
    };
    let source = ReferenceSource::Sequence("ACTGACTGACTGACTGACTGACTGACTG".to_string());
    let config = ScreenConfig { k: 5, inverse: true, ..Default::default() };

    let counters = run_screen(&inputs, &outputs, &source, &config, &StatsOptions::default()).unwrap();
    assert_eq!(counters.input, 2);
    assert_eq!(counters.screened, 1);
    let written = fs::read_to_string(format!("{}.tab6", prefix)).unwrap();
    assert!(written.starts_with("hit\t"));
    assert_eq!(written.lines().count(), 1);
}
