//! Base dataset: one record per asset with three raw factor scores.
//!
//! The dataset is built once at startup and shared read-only across requests.

use crate::domain::error::QuantrankError;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub asset_id: String,
    pub momentum_score: f64,
    pub low_risk_score: f64,
    pub magic_formula_score: f64,
}

impl AssetRecord {
    pub fn new(
        asset_id: impl Into<String>,
        momentum_score: f64,
        low_risk_score: f64,
        magic_formula_score: f64,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            momentum_score,
            low_risk_score,
            magic_formula_score,
        }
    }
}

/// Ordered collection of assets with unique identifiers.
///
/// Record order is the order of the source file and acts as the tie-breaker
/// for every ranking computed from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<AssetRecord>,
}

impl Dataset {
    pub fn new(records: Vec<AssetRecord>) -> Result<Self, QuantrankError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.asset_id.as_str()) {
                return Err(QuantrankError::DuplicateAsset {
                    asset_id: record.asset_id.clone(),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
