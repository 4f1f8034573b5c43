// src/io/fastq.rs
use crate::io::read_set::ReadSet;
use crate::kmer::kmer::encode_kmer;
use std::io::{self, BufRead, Write};

/// Phred+33 offset used by every supported input
pub const PHRED_OFFSET: u8 = 33;

#[derive(Debug, Clone, PartialEq)]
pub struct FastqRecord {
    pub header: String,
    pub sequence: String,
    pub plus: String,
    pub quality: String,
}

impl FastqRecord {
    /// Builds a record from an id (without the leading `@`)
    pub fn new(id: &str, sequence: &str, quality: &str) -> Self {
        FastqRecord {
            header: format!("@{}", id),
            sequence: sequence.to_string(),
            plus: "+".to_string(),
            quality: quality.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        self.header.strip_prefix('@').unwrap_or(&self.header)
    }

    /// Sum of phred scores over all bases
    pub fn quality_sum(&self) -> u64 {
        self.quality
            .bytes()
            .map(|q| q.saturating_sub(PHRED_OFFSET) as u64)
            .sum()
    }

    /// Mean phred score, 0 for an empty read
    pub fn avg_quality(&self) -> f64 {
        if self.quality.is_empty() {
            return 0.0;
        }
        self.quality_sum() as f64 / self.quality.len() as f64
    }

    /// 2-bit fingerprint of `sequence[start..start + length]`.
    /// None if the region runs past the read or holds a non-ACGT base.
    pub fn region_fingerprint(&self, start: usize, length: usize) -> Option<u64> {
        let end = start.checked_add(length)?;
        let region = self.sequence.as_bytes().get(start..end)?;
        encode_kmer(region)
    }

    pub fn write_fastq<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", self.header)?;
        writeln!(writer, "{}", self.sequence)?;
        writeln!(writer, "{}", self.plus)?;
        writeln!(writer, "{}", self.quality)?;
        Ok(())
    }
}

fn malformed(line: usize, what: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("malformed FASTQ record at line {}: {}", line, what),
    )
}

/// Streams FASTQ records one at a time.
///
/// Truncated records, missing `@`/`+` markers and sequence/quality length
/// mismatches are reported as `InvalidData` errors.
pub struct FastqReader<R: BufRead> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> FastqReader<R> {
    pub fn new(reader: R) -> Self {
        FastqReader {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line.map(|l| l.trim_end_matches('\r').to_string()))
    }

    fn required_line(&mut self, what: &str) -> io::Result<String> {
        match self.next_line() {
            Some(line) => line,
            None => Err(malformed(self.line_no, &format!("truncated before {}", what))),
        }
    }

    fn read_record(&mut self, header: String) -> io::Result<FastqRecord> {
        if !header.starts_with('@') {
            return Err(malformed(self.line_no, "header does not start with '@'"));
        }
        let sequence = self.required_line("sequence")?;
        let plus = self.required_line("separator")?;
        if !plus.starts_with('+') {
            return Err(malformed(self.line_no, "separator does not start with '+'"));
        }
        let quality = self.required_line("quality")?;
        if quality.len() != sequence.len() {
            return Err(malformed(self.line_no, "sequence and quality lengths differ"));
        }
        Ok(FastqRecord {
            header,
            sequence,
            plus,
            quality,
        })
    }
}

impl<R: BufRead> Iterator for FastqReader<R> {
    type Item = io::Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        // Skip blank lines between records and at end of file
        let header = loop {
            match self.next_line()? {
                Ok(line) if line.is_empty() => continue,
                Ok(line) => break line,
                Err(e) => return Some(Err(e)),
            }
        };
        Some(self.read_record(header))
    }
}

/// Single-end FASTQ input
pub struct SingleEndReads<R: BufRead> {
    reader: FastqReader<R>,
}

impl<R: BufRead> SingleEndReads<R> {
    pub fn new(reader: R) -> Self {
        SingleEndReads {
            reader: FastqReader::new(reader),
        }
    }
}

impl<R: BufRead> Iterator for SingleEndReads<R> {
    type Item = io::Result<ReadSet>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.reader.next()?.map(ReadSet::Single))
    }
}

/// Paired-end FASTQ input from two files read in lockstep
pub struct PairedEndReads<R1: BufRead, R2: BufRead> {
    r1: FastqReader<R1>,
    r2: FastqReader<R2>,
}

impl<R1: BufRead, R2: BufRead> PairedEndReads<R1, R2> {
    pub fn new(reader1: R1, reader2: R2) -> Self {
        PairedEndReads {
            r1: FastqReader::new(reader1),
            r2: FastqReader::new(reader2),
        }
    }
}

impl<R1: BufRead, R2: BufRead> Iterator for PairedEndReads<R1, R2> {
    type Item = io::Result<ReadSet>;

    fn next(&mut self) -> Option<Self::Item> {
        match (self.r1.next(), self.r2.next()) {
            (None, None) => None,
            (Some(Ok(r1)), Some(Ok(r2))) => Some(Ok(ReadSet::Paired(r1, r2))),
            (Some(Err(e)), _) | (_, Some(Err(e))) => Some(Err(e)),
            _ => Some(Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "read1 and read2 inputs have different numbers of records",
            ))),
        }
    }
}

/// Interleaved FASTQ: mates alternate within one file
pub struct InterleavedReads<R: BufRead> {
    reader: FastqReader<R>,
}

impl<R: BufRead> InterleavedReads<R> {
    pub fn new(reader: R) -> Self {
        InterleavedReads {
            reader: FastqReader::new(reader),
        }
    }
}

impl<R: BufRead> Iterator for InterleavedReads<R> {
    type Item = io::Result<ReadSet>;

    fn next(&mut self) -> Option<Self::Item> {
        let r1 = match self.reader.next()? {
            Ok(r) => r,
            Err(e) => return Some(Err(e)),
        };
        match self.reader.next() {
            Some(Ok(r2)) => Some(Ok(ReadSet::Paired(r1, r2))),
            Some(Err(e)) => Some(Err(e)),
            None => Some(Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("interleaved input ends with an unpaired record ({})", r1.id()),
            ))),
        }
    }
}
