//! CSV dataset adapter.
//!
//! Reads the factor-score file exported by the screening job. Columns are
//! located by header name; extra columns are ignored.

use crate::domain::asset::{AssetRecord, Dataset};
use crate::domain::error::QuantrankError;
use crate::ports::dataset_port::DatasetPort;
use std::fs;
use std::path::{Path, PathBuf};

pub const ASSET_COLUMN: &str = "ativo";
pub const MOMENTUM_COLUMN: &str = "momentum";
pub const LOW_RISK_COLUMN: &str = "low_risk";
pub const MAGIC_FORMULA_COLUMN: &str = "magic_formula";

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetPort for CsvAdapter {
    fn load_dataset(&self) -> Result<Dataset, QuantrankError> {
        let content = fs::read_to_string(&self.path).map_err(|e| QuantrankError::DatasetRead {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let dataset = parse_dataset(&content)?;
        tracing::info!(
            path = %self.path.display(),
            assets = dataset.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, QuantrankError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| QuantrankError::MissingColumn {
            column: name.to_string(),
        })
}

fn parse_score(
    record: &csv::StringRecord,
    idx: usize,
    column: &str,
    line: u64,
) -> Result<f64, QuantrankError> {
    let raw = record.get(idx).ok_or_else(|| QuantrankError::DatasetParse {
        line,
        reason: format!("missing {} value", column),
    })?;
    let value: f64 = raw.trim().parse().map_err(|e| QuantrankError::DatasetParse {
        line,
        reason: format!("invalid {} value '{}': {}", column, raw, e),
    })?;
    if !value.is_finite() {
        return Err(QuantrankError::DatasetParse {
            line,
            reason: format!("{} value '{}' is not finite", column, raw),
        });
    }
    Ok(value)
}

/// Parses CSV text into a [`Dataset`], keeping file order.
pub fn parse_dataset(content: &str) -> Result<Dataset, QuantrankError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| QuantrankError::DatasetParse {
            line: 1,
            reason: format!("CSV header error: {}", e),
        })?
        .clone();

    let asset_idx = column_index(&headers, ASSET_COLUMN)?;
    let momentum_idx = column_index(&headers, MOMENTUM_COLUMN)?;
    let low_risk_idx = column_index(&headers, LOW_RISK_COLUMN)?;
    let magic_idx = column_index(&headers, MAGIC_FORMULA_COLUMN)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| QuantrankError::DatasetParse {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: format!("CSV parse error: {}", e),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let asset_id = record
            .get(asset_idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| QuantrankError::DatasetParse {
                line,
                reason: "missing asset identifier".into(),
            })?;

        records.push(AssetRecord {
            asset_id: asset_id.to_string(),
            momentum_score: parse_score(&record, momentum_idx, MOMENTUM_COLUMN, line)?,
            low_risk_score: parse_score(&record, low_risk_idx, LOW_RISK_COLUMN, line)?,
            magic_formula_score: parse_score(&record, magic_idx, MAGIC_FORMULA_COLUMN, line)?,
        });
    }

    Dataset::new(records)
}
