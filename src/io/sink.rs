// src/io/sink.rs
use crate::io::read_set::ReadSet;
use crate::io::tab::write_tab;
use crate::io::OutputFile;
use std::io;

/// Anything that accepts read sets for output
pub trait ReadSink {
    fn write_read(&mut self, reads: &ReadSet) -> io::Result<()>;

    /// Flushes and closes the underlying files
    fn finish(&mut self) -> io::Result<()>;
}

/// Output layout chosen on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<prefix>_R1.fastq`, `<prefix>_R2.fastq` and `<prefix>_SE.fastq`
    #[default]
    Fastq,
    /// `<prefix>_INTER.fastq` for pairs and `<prefix>_SE.fastq`
    Interleaved,
    /// `<prefix>.tab6`, one read set per line
    Tab,
}

#[derive(Clone, Debug)]
pub struct ReadOutputs {
    pub prefix: String,
    pub format: OutputFormat,
    pub gzip: bool,
    /// Tab-delimited output on stdout instead of files
    pub to_stdout: bool,
}

impl Default for ReadOutputs {
    fn default() -> Self {
        Self {
            prefix: "readsift".to_string(),
            format: OutputFormat::Fastq,
            gzip: true,
            to_stdout: false,
        }
    }
}

impl ReadOutputs {
    fn path(&self, suffix: &str, extension: &str) -> String {
        let gz = if self.gzip { ".gz" } else { "" };
        format!("{}{}.{}{}", self.prefix, suffix, extension, gz)
    }

    /// Opens the sink for the configured layout
    pub fn open(&self) -> io::Result<Box<dyn ReadSink>> {
        if self.to_stdout {
            return Ok(Box::new(TabSink::new(OutputFile::stdout())));
        }
        let sink: Box<dyn ReadSink> = match self.format {
            OutputFormat::Fastq => Box::new(FastqSink {
                r1: OutputFile::create(&self.path("_R1", "fastq"), self.gzip)?,
                r2: OutputFile::create(&self.path("_R2", "fastq"), self.gzip)?,
                se: OutputFile::create(&self.path("_SE", "fastq"), self.gzip)?,
            }),
            OutputFormat::Interleaved => Box::new(InterleavedSink {
                inter: OutputFile::create(&self.path("_INTER", "fastq"), self.gzip)?,
                se: OutputFile::create(&self.path("_SE", "fastq"), self.gzip)?,
            }),
            OutputFormat::Tab => Box::new(TabSink::new(OutputFile::create(
                &self.path("", "tab6"),
                self.gzip,
            )?)),
        };
        Ok(sink)
    }
}

/// Mates to separate R1/R2 files, single-end reads to their own file
pub struct FastqSink {
    r1: OutputFile,
    r2: OutputFile,
    se: OutputFile,
}

impl ReadSink for FastqSink {
    fn write_read(&mut self, reads: &ReadSet) -> io::Result<()> {
        match reads {
            ReadSet::Single(r) => r.write_fastq(&mut self.se),
            ReadSet::Paired(r1, r2) => {
                r1.write_fastq(&mut self.r1)?;
                r2.write_fastq(&mut self.r2)
            }
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        self.r1.finish()?;
        self.r2.finish()?;
        self.se.finish()
    }
}

pub struct InterleavedSink {
    inter: OutputFile,
    se: OutputFile,
}

impl ReadSink for InterleavedSink {
    fn write_read(&mut self, reads: &ReadSet) -> io::Result<()> {
        match reads {
            ReadSet::Single(r) => r.write_fastq(&mut self.se),
            ReadSet::Paired(r1, r2) => {
                r1.write_fastq(&mut self.inter)?;
                r2.write_fastq(&mut self.inter)
            }
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inter.finish()?;
        self.se.finish()
    }
}

pub struct TabSink {
    out: OutputFile,
}

impl TabSink {
    pub fn new(out: OutputFile) -> Self {
        TabSink { out }
    }
}

impl ReadSink for TabSink {
    fn write_read(&mut self, reads: &ReadSet) -> io::Result<()> {
        write_tab(&mut self.out, reads)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.finish()
    }
}

/// Collects read sets in memory, used by tests and library callers
#[derive(Debug, Default)]
pub struct VecSink {
    pub reads: Vec<ReadSet>,
}

impl ReadSink for VecSink {
    fn write_read(&mut self, reads: &ReadSet) -> io::Result<()> {
        self.reads.push(reads.clone());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}
