use std::{
    io::{ErrorKind, Read, Write},
    path::PathBuf,
};

use thiserror::Error;
use tracing::info;

use crate::{
    aggregate::{AveragePolicy, Ingested, ResultTable},
    io::{
        optimal_reader::{OptimalLookup, ReferenceDirectory},
        record_reader::{RecordReader, RecordReaderError},
        report_writer::{ReportWriter, ReportWriterError, write_report_file},
    },
    report::{average_report, best_report},
};

pub const DEFAULT_INPUT: &str = "resultados.csv";
pub const DEFAULT_INSTANCES_DIR: &str = "capmstnew";
pub const DEFAULT_BEST_OUTPUT: &str = "best_results.csv";
pub const DEFAULT_AVERAGE_OUTPUT: &str = "average_results.csv";

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("File '{}' not found.", path.display())]
    InputNotFound { path: PathBuf },

    #[error(transparent)]
    Records(#[from] RecordReaderError),

    #[error(transparent)]
    Report(#[from] ReportWriterError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    pub input: PathBuf,
    pub instances_dir: PathBuf,
    pub best_output: PathBuf,
    pub average_output: PathBuf,
    pub average_policy: AveragePolicy,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.into(),
            instances_dir: DEFAULT_INSTANCES_DIR.into(),
            best_output: DEFAULT_BEST_OUTPUT.into(),
            average_output: DEFAULT_AVERAGE_OUTPUT.into(),
            average_policy: AveragePolicy::default(),
        }
    }
}

/// Counters of a single run, reported once ingestion is done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub instances: usize,
    pub records: usize,
    pub categorized: usize,
    pub without_solution: usize,
    pub uncategorized: usize,
}

/// Reads the run records at `opts.input` and writes both reports.
pub fn process(opts: &ProcessOptions) -> Result<ProcessSummary, ProcessError> {
    let reader = match RecordReader::open(&opts.input) {
        Err(RecordReaderError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            return Err(ProcessError::InputNotFound {
                path: opts.input.clone(),
            });
        }
        result => result?,
    };

    let mut lookup = ReferenceDirectory::new(&opts.instances_dir);
    let (table, summary) = ingest(reader, &mut lookup)?;

    write_report_file(&opts.best_output, &best_report(&table))?;
    write_report_file(
        &opts.average_output,
        &average_report(&table, opts.average_policy),
    )?;
    info!(
        "Wrote {} rows to {:?} and {:?}",
        table.len(),
        opts.best_output,
        opts.average_output
    );

    Ok(summary)
}

/// Same as [`process`], but on arbitrary readers and writers.
pub fn process_from(
    input: impl Read,
    lookup: &mut impl OptimalLookup,
    best_output: impl Write,
    average_output: impl Write,
    policy: AveragePolicy,
) -> Result<ProcessSummary, ProcessError> {
    let (table, summary) = ingest(RecordReader::from_reader(input)?, lookup)?;

    let mut writer = ReportWriter::new(best_output);
    writer.write_report(&best_report(&table))?;
    writer.finish()?;

    let mut writer = ReportWriter::new(average_output);
    writer.write_report(&average_report(&table, policy))?;
    writer.finish()?;

    Ok(summary)
}

fn ingest<R: Read>(
    mut reader: RecordReader<R>,
    lookup: &mut impl OptimalLookup,
) -> Result<(ResultTable, ProcessSummary), ProcessError> {
    let mut table = ResultTable::new();
    let mut summary = ProcessSummary::default();

    for record in reader.records() {
        summary.records += 1;
        match table.ingest(record?, lookup) {
            Ingested::Categorized(_) => summary.categorized += 1,
            Ingested::NoSolution => summary.without_solution += 1,
            Ingested::Uncategorized => summary.uncategorized += 1,
        }
    }
    summary.instances = table.len();

    info!(
        "Read {} records of {} instances ({} without solution, {} uncategorized)",
        summary.records, summary.instances, summary.without_solution, summary.uncategorized
    );

    Ok((table, summary))
}
