// src/io/tab.rs
//! Tab-delimited reads, one read set per line:
//! `id  seq  qual` for single-end, `id1  seq1  qual1  id2  seq2  qual2` for pairs.

use crate::io::fastq::FastqRecord;
use crate::io::read_set::ReadSet;
use std::io::{self, BufRead, Write};

pub struct TabReads<R: BufRead> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TabReads<R> {
    pub fn new(reader: R) -> Self {
        TabReads {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

fn parse_line(line: &str, line_no: usize) -> io::Result<ReadSet> {
    let fields: Vec<&str> = line.split('\t').collect();
    let record = |f: &[&str]| -> io::Result<FastqRecord> {
        if f[1].len() != f[2].len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("tab line {}: sequence and quality lengths differ", line_no),
            ));
        }
        Ok(FastqRecord::new(f[0], f[1], f[2]))
    };
    match fields.len() {
        3 => Ok(ReadSet::Single(record(&fields[0..3])?)),
        6 => Ok(ReadSet::Paired(record(&fields[0..3])?, record(&fields[3..6])?)),
        n => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("tab line {}: expected 3 or 6 columns, found {}", line_no, n),
        )),
    }
}

impl<R: BufRead> Iterator for TabReads<R> {
    type Item = io::Result<ReadSet>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            return Some(parse_line(line, self.line_no));
        }
    }
}

/// Writes a read set as one tab-delimited line
pub fn write_tab<W: Write>(writer: &mut W, reads: &ReadSet) -> io::Result<()> {
    let fields: Vec<String> = reads
        .mates()
        .map(|r| format!("{}\t{}\t{}", r.id(), r.sequence, r.quality))
        .collect();
    writeln!(writer, "{}", fields.join("\t"))
}
