use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::parse_decimal;

pub const INSTANCE_COLUMN: &str = "instancia";
pub const ALGORITHM_COLUMN: &str = "algoritmo";
pub const ALPHA_COLUMN: &str = "alpha";
pub const SOLUTION_COLUMN: &str = "melhor_solucao";
pub const TIME_COLUMN: &str = "tempo_segundos";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    INSTANCE_COLUMN,
    ALGORITHM_COLUMN,
    ALPHA_COLUMN,
    SOLUTION_COLUMN,
    TIME_COLUMN,
];

#[derive(Debug, Error)]
pub enum RecordReaderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Input has no column '{column}'")]
    MissingColumn { column: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Greedy,
    Randomized,
    Reactive,
}

impl Algorithm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "guloso" => Some(Self::Greedy),
            "randomizado" => Some(Self::Randomized),
            "reativo" => Some(Self::Reactive),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Greedy => "guloso",
            Self::Randomized => "randomizado",
            Self::Reactive => "reativo",
        }
    }
}

/// One row of the results table, with all optional numeric fields parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub instance: String,
    pub algorithm: Option<Algorithm>,
    pub alpha: Option<f64>,
    pub solution: Option<f64>,
    pub elapsed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "instancia")]
    instance: String,
    #[serde(rename = "algoritmo")]
    algorithm: String,
    alpha: String,
    #[serde(rename = "melhor_solucao")]
    solution: String,
    #[serde(rename = "tempo_segundos")]
    elapsed: String,
}

impl From<RawRecord> for RunRecord {
    fn from(raw: RawRecord) -> Self {
        let algorithm = Algorithm::from_name(&raw.algorithm);
        if algorithm.is_none() {
            debug!(
                "Unknown algorithm '{}' for instance {}",
                raw.algorithm, raw.instance
            );
        }

        Self {
            algorithm,
            alpha: parse_decimal(&raw.alpha),
            solution: parse_decimal(&raw.solution),
            elapsed: parse_decimal(&raw.elapsed),
            instance: raw.instance,
        }
    }
}

/// Reads run records from a CSV table with a header row.
///
/// The header must name every column of [`REQUIRED_COLUMNS`]; further columns are ignored.
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
    headers: csv::StringRecord,
}

impl RecordReader<File> {
    pub fn open(path: &Path) -> Result<Self, RecordReaderError> {
        debug!("Read run records from {path:?}");
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read> RecordReader<R> {
    pub fn from_reader(reader: R) -> Result<Self, RecordReaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();

        if let Some(column) = REQUIRED_COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|h| h == *column))
        {
            return Err(RecordReaderError::MissingColumn { column });
        }

        Ok(Self { reader, headers })
    }

    /// Iterates over the remaining records in input order. A malformed row (wrong number of
    /// fields, invalid UTF-8) is reported as an error.
    pub fn records(
        &mut self,
    ) -> impl Iterator<Item = Result<RunRecord, RecordReaderError>> + '_ {
        let headers = &self.headers;
        self.reader
            .records()
            .map(move |record| -> Result<RunRecord, RecordReaderError> {
                let raw: RawRecord = record?.deserialize(Some(headers))?;
                Ok(raw.into())
            })
    }
}
