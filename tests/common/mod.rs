#![allow(dead_code)]

pub use quantrank::domain::asset::{AssetRecord, Dataset};
use quantrank::domain::error::QuantrankError;
use quantrank::domain::rank_engine::CompositeRankRow;
use quantrank::ports::dataset_port::DatasetPort;
use std::io::Write;

pub struct MockDatasetPort {
    pub records: Vec<AssetRecord>,
    pub error: Option<String>,
}

impl MockDatasetPort {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            error: None,
        }
    }

    pub fn with_record(mut self, record: AssetRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DatasetPort for MockDatasetPort {
    fn load_dataset(&self) -> Result<Dataset, QuantrankError> {
        if let Some(reason) = &self.error {
            return Err(QuantrankError::DatasetRead {
                path: "mock".into(),
                reason: reason.clone(),
            });
        }
        Dataset::new(self.records.clone())
    }
}

pub fn record(id: &str, momentum: f64, low_risk: f64, magic_formula: f64) -> AssetRecord {
    AssetRecord::new(id, momentum, low_risk, magic_formula)
}

/// The three-asset dataset where every composite rank sum ties at 6.
pub fn abc_dataset() -> Dataset {
    Dataset::new(vec![
        record("A", 1.0, 3.0, 2.0),
        record("B", 2.0, 1.0, 3.0),
        record("C", 3.0, 2.0, 1.0),
    ])
    .unwrap()
}

pub fn market_dataset() -> Dataset {
    Dataset::new(vec![
        record("PETR4", 0.42, 18.0, 35.0),
        record("VALE3", 0.15, 9.5, 12.0),
        record("ITUB4", 0.08, 7.0, 80.0),
        record("BBDC4", -0.12, 6.5, 95.0),
        record("WEGE3", 0.31, 11.0, 140.0),
        record("PETR3", 0.40, 17.5, 33.0),
    ])
    .unwrap()
}

pub const MARKET_CSV: &str = "ativo,momentum,low_risk,magic_formula\n\
    PETR4,0.42,18.0,35\n\
    VALE3,0.15,9.5,12\n\
    ITUB4,0.08,7.0,80\n\
    BBDC4,-0.12,6.5,95\n\
    WEGE3,0.31,11.0,140\n\
    PETR3,0.40,17.5,33\n";

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn ids(rows: &[CompositeRankRow]) -> Vec<&str> {
    rows.iter().map(|r| r.asset_id.as_str()).collect()
}
