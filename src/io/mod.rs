//! Record streams and sinks.
//!
//! Every input format is an iterator of `io::Result<ReadSet>`, every output
//! format implements [`sink::ReadSink`]. The deduplication and screening
//! passes only see those two capabilities and never branch on format.

pub mod fasta;
pub mod fastq;
pub mod read_set;
pub mod sink;
pub mod tab;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Stdout, Write};

pub use read_set::ReadSet;

/// Boxed lazy stream of read sets
pub type ReadStream = Box<dyn Iterator<Item = io::Result<ReadSet>>>;

/// Opens a file for reading, `-` means stdin, `.gz` files are decompressed
pub fn open_input(path: &str) -> io::Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("unable to open {}: {}", path, e)))?;
    if path.ends_with(".gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Output destination, optionally gzip compressed
pub enum OutputFile {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
    Stdout(BufWriter<Stdout>),
}

impl OutputFile {
    pub fn create(path: &str, gzip: bool) -> io::Result<Self> {
        let file = File::create(path)
            .map_err(|e| io::Error::new(e.kind(), format!("unable to create {}: {}", path, e)))?;
        if gzip {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(OutputFile::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(OutputFile::Plain(BufWriter::new(file)))
        }
    }

    pub fn stdout() -> Self {
        OutputFile::Stdout(BufWriter::new(io::stdout()))
    }

    /// Flushes buffers and writes the gzip trailer
    pub fn finish(&mut self) -> io::Result<()> {
        match self {
            OutputFile::Plain(writer) => writer.flush(),
            OutputFile::Compressed(writer) => {
                writer.flush()?;
                writer.get_mut().try_finish()
            }
            OutputFile::Stdout(writer) => writer.flush(),
        }
    }
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputFile::Plain(writer) => writer.write(buf),
            OutputFile::Compressed(writer) => writer.write(buf),
            OutputFile::Stdout(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputFile::Plain(writer) => writer.flush(),
            OutputFile::Compressed(writer) => writer.flush(),
            OutputFile::Stdout(writer) => writer.flush(),
        }
    }
}

/// Input files grouped by format
#[derive(Clone, Debug, Default)]
pub struct ReadInputs {
    pub read1: Vec<String>,
    pub read2: Vec<String>,
    pub single_end: Vec<String>,
    pub interleaved: Vec<String>,
    pub tab: Vec<String>,
    /// Tab-delimited reads on stdin
    pub stdin: bool,
}

impl ReadInputs {
    pub fn validate(&self) -> Result<(), String> {
        if self.read1.len() != self.read2.len() {
            return Err(format!(
                "read1 and read2 inputs must be given in pairs ({} vs {} files)",
                self.read1.len(),
                self.read2.len()
            ));
        }
        if self.is_empty() {
            return Err("no input given".to_string());
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.read1.is_empty()
            && self.single_end.is_empty()
            && self.interleaved.is_empty()
            && self.tab.is_empty()
            && !self.stdin
    }

    /// Opens every input and chains them into one stream: paired files first,
    /// then single-end, interleaved and tab-delimited inputs.
    pub fn open(&self) -> io::Result<ReadStream> {
        let mut streams: Vec<ReadStream> = Vec::new();

        for (r1, r2) in self.read1.iter().zip(&self.read2) {
            let pairs = fastq::PairedEndReads::new(open_input(r1)?, open_input(r2)?);
            streams.push(Box::new(pairs));
        }
        for path in &self.single_end {
            streams.push(Box::new(fastq::SingleEndReads::new(open_input(path)?)));
        }
        for path in &self.interleaved {
            streams.push(Box::new(fastq::InterleavedReads::new(open_input(path)?)));
        }
        for path in &self.tab {
            streams.push(Box::new(tab::TabReads::new(open_input(path)?)));
        }
        if self.stdin {
            streams.push(Box::new(tab::TabReads::new(open_input("-")?)));
        }

        Ok(Box::new(streams.into_iter().flatten()))
    }
}
