use clap::{Args, Parser, Subcommand, ValueEnum};

use readsift::dedup::DedupConfig;
use readsift::io::sink::{OutputFormat, ReadOutputs};
use readsift::io::ReadInputs;
use readsift::pipeline::{ReferenceSource, StatsOptions};
use readsift::screen::ScreenConfig;

#[derive(Parser, Debug)]
#[command(name = "readsift", version, about = "Read deduplication and contaminant screening", long_about = None)]
pub struct Cli {
    /// Log debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove PCR/optical duplicates keyed on a fixed read region
    Dedup {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Start of the key region (1-based)
        #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
        start: u64,

        /// Length of the key region per mate
        #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=32))]
        length: u64,

        /// Average quality at or above which a read is written immediately
        #[arg(short = 'q', long, default_value_t = 30.0)]
        avg_qual_score: f64,

        /// Average quality below which a read is ignored
        #[arg(short = 'x', long, default_value_t = 5.0)]
        inform_avg_qual_score: f64,

        /// Drop reads still held at end of input instead of writing them
        #[arg(long)]
        no_flush_held: bool,
    },

    /// Flag or remove reads matching a contaminant reference
    Screen {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Reference FASTA(.gz) to screen against
        #[arg(short = 's', long, required_unless_present = "sequence", conflicts_with = "sequence")]
        reference: Option<String>,

        /// Reference sequence given directly
        #[arg(long)]
        sequence: Option<String>,

        /// K-mer size
        #[arg(short, long, default_value_t = 12, value_parser = clap::value_parser!(u64).range(1..=32))]
        kmer: u64,

        /// Hit fraction above which a read set is a contaminant
        #[arg(short = 'x', long, default_value_t = 0.01)]
        percentage_hits: f64,

        /// Keep only the contaminant reads
        #[arg(short = 'n', long)]
        inverse: bool,

        /// Keep every read, only count contaminants
        #[arg(short = 'r', long, conflicts_with = "inverse")]
        record: bool,
    },
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Read 1 FASTQ(.gz) input, paired with --read2-input
    #[arg(short = '1', long, num_args = 1.., value_delimiter = ',')]
    pub read1_input: Vec<String>,

    /// Read 2 FASTQ(.gz) input
    #[arg(short = '2', long, num_args = 1.., value_delimiter = ',')]
    pub read2_input: Vec<String>,

    /// Single-end FASTQ(.gz) input
    #[arg(short = 'U', long, num_args = 1.., value_delimiter = ',')]
    pub singleend_input: Vec<String>,

    /// Interleaved FASTQ(.gz) input
    #[arg(short = 'I', long, num_args = 1.., value_delimiter = ',')]
    pub interleaved_input: Vec<String>,

    /// Tab-delimited input
    #[arg(short = 'T', long, num_args = 1.., value_delimiter = ',')]
    pub tab_input: Vec<String>,

    /// Read tab-delimited input from stdin
    #[arg(short = 'S', long)]
    pub stdin_input: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Fastq,
    Interleaved,
    Tab,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Prefix for output files
    #[arg(short, long, default_value = "readsift")]
    pub prefix: String,

    /// Output layout
    #[arg(short = 'f', long, value_enum, default_value_t = FormatArg::Fastq)]
    pub format: FormatArg,

    /// Write uncompressed output
    #[arg(short, long)]
    pub uncompressed: bool,

    /// Write tab-delimited reads to stdout
    #[arg(short = 'O', long)]
    pub to_stdout: bool,

    /// JSON statistics file
    #[arg(short = 'L', long)]
    pub stats_file: Option<String>,

    /// Append to the statistics file instead of overwriting it
    #[arg(short = 'A', long)]
    pub append_stats: bool,
}

impl From<&InputArgs> for ReadInputs {
    fn from(args: &InputArgs) -> Self {
        ReadInputs {
            read1: args.read1_input.clone(),
            read2: args.read2_input.clone(),
            single_end: args.singleend_input.clone(),
            interleaved: args.interleaved_input.clone(),
            tab: args.tab_input.clone(),
            stdin: args.stdin_input,
        }
    }
}

impl From<&OutputArgs> for ReadOutputs {
    fn from(args: &OutputArgs) -> Self {
        ReadOutputs {
            prefix: args.prefix.clone(),
            format: match args.format {
                FormatArg::Fastq => OutputFormat::Fastq,
                FormatArg::Interleaved => OutputFormat::Interleaved,
                FormatArg::Tab => OutputFormat::Tab,
            },
            gzip: !args.uncompressed,
            to_stdout: args.to_stdout,
        }
    }
}

impl From<&OutputArgs> for StatsOptions {
    fn from(args: &OutputArgs) -> Self {
        StatsOptions {
            path: args.stats_file.clone(),
            append: args.append_stats,
        }
    }
}

/// Key region from 1-based command-line coordinates
pub fn dedup_config(
    start: u64,
    length: u64,
    avg_qual_score: f64,
    inform_avg_qual_score: f64,
    no_flush_held: bool,
) -> DedupConfig {
    DedupConfig {
        start: (start - 1) as usize,
        length: length as usize,
        write_quality: avg_qual_score,
        discard_quality: inform_avg_qual_score,
        flush_held: !no_flush_held,
    }
}

pub fn screen_config(kmer: u64, percentage_hits: f64, inverse: bool, record: bool) -> ScreenConfig {
    ScreenConfig {
        k: kmer as usize,
        percentage_hits,
        inverse,
        record_only: record,
    }
}

pub fn reference_source(
    reference: Option<String>,
    sequence: Option<String>,
) -> Result<ReferenceSource, String> {
    match (reference, sequence) {
        (Some(path), _) => Ok(ReferenceSource::Fasta(path)),
        (None, Some(seq)) => Ok(ReferenceSource::Sequence(seq)),
        (None, None) => Err("a reference FASTA or sequence is required".to_string()),
    }
}
