use crate::core::io::results::{
    MODEL_COLUMN, MetricsTable, ResultsError, ScoreTable, ScoreValue,
};
use crate::engine::error::EngineError;
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

const NORMALIZED_MARKER: &str = "normalized_";

pub const DEFAULT_METRIC_COLUMNS: [&str; 3] = ["RMSD", "MCQ", "TM-score"];

/// Reduces an external model identifier to the part after the last `normalized_` marker.
///
/// Identifiers without the marker are returned unchanged.
pub fn normalize_identifier(identifier: &str) -> &str {
    identifier
        .rsplit(NORMALIZED_MARKER)
        .next()
        .unwrap_or(identifier)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub model: String,
    pub value: ScoreValue,
    pub metrics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    pub label: String,
    pub columns: Vec<String>,
    pub rows: Vec<MergedRow>,
}

impl MergedTable {
    pub fn write_to(&self, writer: impl Write) -> Result<(), ResultsError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec![MODEL_COLUMN, self.label.as_str()];
        header.extend(self.columns.iter().map(String::as_str));
        csv_writer.write_record(&header)?;

        for row in &self.rows {
            let value = row.value.to_field();
            let mut record = vec![row.model.as_str(), value.as_str()];
            record.extend(row.metrics.iter().map(String::as_str));
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ResultsError> {
        self.write_to(File::create(path)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSummary {
    pub matched: usize,
    pub unmatched_scores: usize,
    pub unmatched_metrics: usize,
}

/// Inner-joins `scores` with `metrics` on the model identifier.
///
/// Rows keep the score table's order. Score rows holding the error marker are joined like any
/// other row. When an identifier appears more than once in the metrics, the first row wins.
pub fn merge(scores: &ScoreTable, metrics: &MetricsTable) -> (MergedTable, MergeSummary) {
    let mut by_model: HashMap<&str, &[String]> = HashMap::with_capacity(metrics.rows.len());
    for row in &metrics.rows {
        let key = normalize_identifier(&row.model);
        if by_model.contains_key(key) {
            warn!("Duplicate metrics entry for model '{}'; keeping the first.", key);
            continue;
        }
        by_model.insert(key, &row.values);
    }

    let mut used = HashSet::with_capacity(by_model.len());
    let mut rows = Vec::new();
    let mut unmatched_scores = 0;
    for record in &scores.records {
        match by_model.get(record.model.as_str()) {
            Some(values) => {
                used.insert(record.model.as_str());
                rows.push(MergedRow {
                    model: record.model.clone(),
                    value: record.value,
                    metrics: values.to_vec(),
                });
            }
            None => unmatched_scores += 1,
        }
    }

    let summary = MergeSummary {
        matched: rows.len(),
        unmatched_scores,
        unmatched_metrics: by_model.len() - used.len(),
    };
    let table = MergedTable {
        label: scores.label.clone(),
        columns: metrics.columns.clone(),
        rows,
    };
    (table, summary)
}

/// Reads both inputs, joins them and writes the merged table to `output`.
#[instrument(skip_all, name = "merge_workflow")]
pub fn run(
    scores_path: &Path,
    metrics_path: &Path,
    output: &Path,
    columns: Vec<String>,
) -> Result<MergeSummary, EngineError> {
    let scores = ScoreTable::read_from_path(scores_path)?;
    let metrics = MetricsTable::read_from_path(metrics_path, columns)?;
    info!(
        "Merging {} score row(s) from {} with {} metrics row(s) from {}.",
        scores.records.len(),
        scores_path.display(),
        metrics.rows.len(),
        metrics_path.display()
    );

    let (table, summary) = merge(&scores, &metrics);
    table.write_to_path(output)?;

    info!(
        matched = summary.matched,
        unmatched_scores = summary.unmatched_scores,
        unmatched_metrics = summary.unmatched_metrics,
        "Merged table written to {}.",
        output.display()
    );
    if summary.unmatched_scores > 0 || summary.unmatched_metrics > 0 {
        warn!(
            "{} score row(s) and {} metrics row(s) had no counterpart and were dropped.",
            summary.unmatched_scores, summary.unmatched_metrics
        );
    }
    Ok(summary)
}

const TABLE_EXTENSION: &str = "csv";
const MERGED_PREFIX: &str = "merged_";

/// Outcome of merging a whole directory of score tables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatasetMergeSummary {
    /// Target identifiers whose merged table was written, in file-name order.
    pub merged: Vec<String>,
    /// Target identifiers skipped because `<metrics_dir>/<id>.csv` does not exist.
    pub missing_metrics: Vec<String>,
}

/// Merges every `<id>.csv` score table in `scores_dir` with `<metrics_dir>/<id>.csv`.
///
/// Each merged table is written to `<output_dir>/merged_<id>.csv`, which must already exist.
/// Targets without a metrics file are skipped with a warning. Score files that are themselves
/// merged outputs are ignored, so the output directory may be the scores directory.
///
/// # Errors
///
/// Returns [`EngineError::Discovery`] if `scores_dir` cannot be listed. Any unreadable input or
/// unwritable output aborts the run.
#[instrument(skip_all, name = "dataset_merge_workflow")]
pub fn run_dataset(
    scores_dir: &Path,
    metrics_dir: &Path,
    output_dir: &Path,
    columns: &[String],
) -> Result<DatasetMergeSummary, EngineError> {
    let targets = collect_score_tables(scores_dir)?;
    info!(
        "Found {} score table(s) in {}.",
        targets.len(),
        scores_dir.display()
    );

    let mut summary = DatasetMergeSummary::default();
    for (id, scores_path) in targets {
        let metrics_path = metrics_dir.join(format!("{id}.{TABLE_EXTENSION}"));
        if !metrics_path.is_file() {
            warn!(
                "Skipping '{}': metrics file {} not found.",
                id,
                metrics_path.display()
            );
            summary.missing_metrics.push(id);
            continue;
        }

        let output = output_dir.join(format!("{MERGED_PREFIX}{id}.{TABLE_EXTENSION}"));
        run(&scores_path, &metrics_path, &output, columns.to_vec())?;
        summary.merged.push(id);
    }

    info!(
        merged = summary.merged.len(),
        missing_metrics = summary.missing_metrics.len(),
        "Dataset merge finished."
    );
    Ok(summary)
}

fn collect_score_tables(dir: &Path) -> Result<Vec<(String, PathBuf)>, EngineError> {
    let discovery_error = |source| EngineError::Discovery {
        path: dir.to_path_buf(),
        source,
    };

    let mut tables = Vec::new();
    for entry in fs::read_dir(dir).map_err(discovery_error)? {
        let path = entry.map_err(discovery_error)?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(TABLE_EXTENSION) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("Skipping file with non UTF-8 name: {:?}", path);
            continue;
        };
        if stem.starts_with(MERGED_PREFIX) {
            continue;
        }
        tables.push((stem.to_string(), path.clone()));
    }

    tables.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(tables)
}
