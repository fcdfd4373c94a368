//! Weighted multi-factor ranking.
//!
//! Each factor is ranked independently by `raw_score * weight` (ascending,
//! stable), then the three rank positions are summed per asset and the sum is
//! ranked DESCENDING to give the composite position. The descending polarity on
//! the rank sum is the published contract of the ranking table and must not be
//! flipped.

use crate::domain::asset::{AssetRecord, Dataset};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    Momentum,
    LowRisk,
    MagicFormula,
}

impl Factor {
    pub const ALL: [Factor; 3] = [Factor::Momentum, Factor::LowRisk, Factor::MagicFormula];

    pub fn score(self, record: &AssetRecord) -> f64 {
        match self {
            Factor::Momentum => record.momentum_score,
            Factor::LowRisk => record.low_risk_score,
            Factor::MagicFormula => record.magic_formula_score,
        }
    }
}

/// Integer weights, one per factor. Any sign is allowed; a negative weight
/// flips the direction of that factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorWeights {
    pub momentum: i64,
    pub low_risk: i64,
    pub magic_formula: i64,
}

impl FactorWeights {
    pub fn new(momentum: i64, low_risk: i64, magic_formula: i64) -> Self {
        Self {
            momentum,
            low_risk,
            magic_formula,
        }
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self::new(2, 1, 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorRankEntry {
    pub asset_id: String,
    pub weighted_score: f64,
    pub rank: usize,
}

/// Ranking of every asset in a dataset on a single factor.
#[derive(Debug, Clone)]
pub struct WeightedFactorRank {
    pub factor: Factor,
    pub weight: i64,
    /// Entries in rank order (rank 1 first).
    entries: Vec<FactorRankEntry>,
    index: HashMap<String, usize>,
}

impl WeightedFactorRank {
    pub fn entries(&self) -> &[FactorRankEntry] {
        &self.entries
    }

    pub fn get(&self, asset_id: &str) -> Option<&FactorRankEntry> {
        self.index.get(asset_id).map(|&i| &self.entries[i])
    }

    pub fn rank_of(&self, asset_id: &str) -> Option<usize> {
        self.get(asset_id).map(|e| e.rank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeRankRow {
    pub position: usize,
    pub asset_id: String,
    pub momentum_rank: usize,
    pub low_risk_rank: usize,
    pub magic_formula_rank: usize,
}

impl CompositeRankRow {
    pub fn rank_sum(&self) -> usize {
        self.momentum_rank + self.low_risk_rank + self.magic_formula_rank
    }
}

// Total order over scores that treats -0.0 and 0.0 as equal, so a zero weight
// leaves every asset tied and dataset order decides.
fn cmp_scores(a: f64, b: f64) -> Ordering {
    let norm = |x: f64| if x == 0.0 { 0.0 } else { x };
    norm(a).total_cmp(&norm(b))
}

pub fn rank_by_factor(dataset: &Dataset, factor: Factor, weight: i64) -> WeightedFactorRank {
    let multiplier = weight as f64;
    let mut scored: Vec<(&str, f64)> = dataset
        .records()
        .iter()
        .map(|r| (r.asset_id.as_str(), factor.score(r) * multiplier))
        .collect();

    // sort_by is stable: equal weighted scores keep dataset order
    scored.sort_by(|a, b| cmp_scores(a.1, b.1));

    let entries: Vec<FactorRankEntry> = scored
        .into_iter()
        .enumerate()
        .map(|(i, (asset_id, weighted_score))| FactorRankEntry {
            asset_id: asset_id.to_string(),
            weighted_score,
            rank: i + 1,
        })
        .collect();

    let index = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.asset_id.clone(), i))
        .collect();

    WeightedFactorRank {
        factor,
        weight,
        entries,
        index,
    }
}

pub fn compute_composite(
    dataset: &Dataset,
    momentum_weight: i64,
    low_risk_weight: i64,
    magic_formula_weight: i64,
) -> Vec<CompositeRankRow> {
    let momentum = rank_by_factor(dataset, Factor::Momentum, momentum_weight);
    let low_risk = rank_by_factor(dataset, Factor::LowRisk, low_risk_weight);
    let magic_formula = rank_by_factor(dataset, Factor::MagicFormula, magic_formula_weight);

    let mut rows: Vec<CompositeRankRow> = Vec::with_capacity(dataset.len());
    for record in dataset.records() {
        let id = record.asset_id.as_str();
        // All three tables are built from the same dataset, so every id is present.
        let (Some(m), Some(l), Some(mf)) = (
            momentum.rank_of(id),
            low_risk.rank_of(id),
            magic_formula.rank_of(id),
        ) else {
            continue;
        };
        rows.push(CompositeRankRow {
            position: 0,
            asset_id: record.asset_id.clone(),
            momentum_rank: m,
            low_risk_rank: l,
            magic_formula_rank: mf,
        });
    }

    rows.sort_by(|a, b| b.rank_sum().cmp(&a.rank_sum()));
    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i + 1;
    }
    rows
}

/// [`compute_composite`] taking a [`FactorWeights`] bundle.
pub fn compute_composite_weighted(dataset: &Dataset, weights: FactorWeights) -> Vec<CompositeRankRow> {
    compute_composite(
        dataset,
        weights.momentum,
        weights.low_risk,
        weights.magic_formula,
    )
}
