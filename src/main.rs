use std::path::PathBuf;
use std::process::exit;

use capmst_results::{
    aggregate::AveragePolicy,
    process::{
        DEFAULT_AVERAGE_OUTPUT, DEFAULT_BEST_OUTPUT, DEFAULT_INPUT, DEFAULT_INSTANCES_DIR,
        ProcessError, ProcessOptions, process,
    },
};
use clap::Parser;

/// Summarises heuristic runs into best-case and average-case reports.
#[derive(Parser)]
#[command(version)]
pub struct Arguments {
    /// Table of run records
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Directory holding one reference file per instance
    #[arg(long, env = "CAPMST_INSTANCES_DIR", default_value = DEFAULT_INSTANCES_DIR)]
    pub instances_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_BEST_OUTPUT)]
    pub best_output: PathBuf,

    #[arg(long, default_value = DEFAULT_AVERAGE_OUTPUT)]
    pub average_output: PathBuf,

    /// Average solutions only over runs that recorded an elapsed time
    #[arg(long)]
    pub timed_runs_only: bool,

    #[arg(short, long)]
    pub quiet: bool,

    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Arguments {
    fn options(&self) -> ProcessOptions {
        ProcessOptions {
            input: self.input.clone(),
            instances_dir: self.instances_dir.clone(),
            best_output: self.best_output.clone(),
            average_output: self.average_output.clone(),
            average_policy: if self.timed_runs_only {
                AveragePolicy::TimedRunsOnly
            } else {
                AveragePolicy::AllSolutions
            },
        }
    }
}

fn main() {
    let args = Arguments::parse();

    if !args.quiet {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(if args.verbose {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            })
            .without_time()
            .init();
    }

    let opts = args.options();
    match process(&opts) {
        Ok(_) => println!(
            "Successfully generated {} and {} from {}",
            opts.best_output.display(),
            opts.average_output.display(),
            opts.input.display()
        ),
        Err(e @ ProcessError::InputNotFound { .. }) => {
            println!("Error: {e}");
            exit(1)
        }
        Err(e) => {
            println!("Error processing file: {e}");
            exit(1)
        }
    }
}
