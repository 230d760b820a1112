use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;

pub const MODEL_COLUMN: &str = "Model";
pub const ERROR_MARKER: &str = "Error";

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid score table header: {0}")]
    InvalidHeader(String),
    #[error("Invalid score on row {row}: '{value}'")]
    InvalidScore { row: usize, value: String },
    #[error("Row {row} has {found} field(s), expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// The value column of a score table row: a number, or the literal `Error` marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreValue {
    Score(f64),
    Error,
}

impl ScoreValue {
    pub fn as_score(&self) -> Option<f64> {
        match self {
            ScoreValue::Score(v) => Some(*v),
            ScoreValue::Error => None,
        }
    }

    pub(crate) fn to_field(self) -> String {
        match self {
            // Debug formatting keeps full precision and switches to exponent notation for
            // very small residuals.
            ScoreValue::Score(v) => format!("{v:?}"),
            ScoreValue::Error => ERROR_MARKER.to_string(),
        }
    }

    fn from_field(field: &str, row: usize) -> Result<Self, ResultsError> {
        let field = field.trim();
        if field == ERROR_MARKER {
            return Ok(ScoreValue::Error);
        }
        field
            .parse()
            .map(ScoreValue::Score)
            .map_err(|_| ResultsError::InvalidScore {
                row,
                value: field.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub model: String,
    pub value: ScoreValue,
}

/// A two-column table of per-model scores, labelled by the metric that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    pub label: String,
    pub records: Vec<ScoreRecord>,
}

impl ScoreTable {
    pub fn read_from(reader: impl Read) -> Result<Self, ResultsError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.len() < 2 || &headers[0] != MODEL_COLUMN {
            return Err(ResultsError::InvalidHeader(
                headers.iter().collect::<Vec<_>>().join(","),
            ));
        }
        let label = headers[1].to_string();

        let mut records = Vec::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let row = row?;
            let row_num = idx + 1;
            let model = row.get(0).unwrap_or_default().to_string();
            let value = ScoreValue::from_field(row.get(1).unwrap_or_default(), row_num)?;
            records.push(ScoreRecord { model, value });
        }

        Ok(Self { label, records })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ResultsError> {
        Self::read_from(File::open(path)?)
    }

    pub fn write_to(&self, writer: impl Write) -> Result<(), ResultsError> {
        let mut table_writer = ScoreTableWriter::new(writer, &self.label)?;
        for record in &self.records {
            table_writer.write_record(record)?;
        }
        table_writer.finish()
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ResultsError> {
        self.write_to(File::create(path)?)
    }
}

/// Streams score rows to CSV with a `Model,<label>` header.
pub struct ScoreTableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ScoreTableWriter<W> {
    pub fn new(writer: W, label: &str) -> Result<Self, ResultsError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record([MODEL_COLUMN, label])?;
        Ok(Self { writer })
    }

    pub fn write_record(&mut self, record: &ScoreRecord) -> Result<(), ResultsError> {
        self.writer
            .write_record([record.model.as_str(), record.value.to_field().as_str()])?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), ResultsError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// One row of an externally computed metrics file: a model identifier and its raw values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub model: String,
    pub values: Vec<String>,
}

/// A header-less metrics CSV. Column names are supplied by the caller since the file carries none.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    pub columns: Vec<String>,
    pub rows: Vec<MetricsRow>,
}

impl MetricsTable {
    /// Reads rows of `model,value...`; every row must have exactly `columns.len() + 1` fields.
    pub fn read_from(reader: impl Read, columns: Vec<String>) -> Result<Self, ResultsError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let expected = columns.len() + 1;
        let mut rows = Vec::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let row = row?;
            if row.len() != expected {
                return Err(ResultsError::ColumnCount {
                    row: idx + 1,
                    expected,
                    found: row.len(),
                });
            }
            let mut fields = row.iter().map(str::to_string);
            let model = fields.next().unwrap_or_default();
            rows.push(MetricsRow {
                model,
                values: fields.collect(),
            });
        }

        Ok(Self { columns, rows })
    }

    pub fn read_from_path<P: AsRef<Path>>(
        path: P,
        columns: Vec<String>,
    ) -> Result<Self, ResultsError> {
        Self::read_from(File::open(path)?, columns)
    }
}
