mod cli_main;

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use cli_main::{dedup_config, reference_source, screen_config, Cli, Commands};
use readsift::io::sink::ReadOutputs;
use readsift::io::ReadInputs;
use readsift::pipeline::{run_dedup, run_screen, StatsOptions};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Setting tracing default failed");
    }

    let start = std::time::Instant::now();
    match run(cli.command) {
        Ok(()) => {
            info!("Finished in {:.2}s", start.elapsed().as_secs_f32());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Dedup {
            input,
            output,
            start,
            length,
            avg_qual_score,
            inform_avg_qual_score,
            no_flush_held,
        } => {
            let config = dedup_config(start, length, avg_qual_score, inform_avg_qual_score, no_flush_held);
            run_dedup(
                &ReadInputs::from(&input),
                &ReadOutputs::from(&output),
                &config,
                &StatsOptions::from(&output),
            )?;
        }

        Commands::Screen {
            input,
            output,
            reference,
            sequence,
            kmer,
            percentage_hits,
            inverse,
            record,
        } => {
            let source = reference_source(reference, sequence)?;
            let config = screen_config(kmer, percentage_hits, inverse, record);
            run_screen(
                &ReadInputs::from(&input),
                &ReadOutputs::from(&output),
                &source,
                &config,
                &StatsOptions::from(&output),
            )?;
        }
    }
    Ok(())
}
