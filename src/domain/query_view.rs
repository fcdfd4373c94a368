//! Filtering and re-sorting of a composite ranking.
//!
//! Neither operation recomputes `position` or the factor ranks; rows keep the
//! values assigned by the rank engine.

use crate::domain::asset::Dataset;
use crate::domain::rank_engine::{CompositeRankRow, FactorWeights, compute_composite_weighted};

/// Column used to order the final table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CompositePosition,
    Momentum,
    LowRisk,
    MagicFormula,
}

impl SortKey {
    /// Maps the wire code to a key. Codes other than 1, 2 and 3 fall back to
    /// the composite position.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => SortKey::Momentum,
            2 => SortKey::LowRisk,
            3 => SortKey::MagicFormula,
            _ => SortKey::CompositePosition,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            SortKey::CompositePosition => 0,
            SortKey::Momentum => 1,
            SortKey::LowRisk => 2,
            SortKey::MagicFormula => 3,
        }
    }

    fn field(self, row: &CompositeRankRow) -> usize {
        match self {
            SortKey::CompositePosition => row.position,
            SortKey::Momentum => row.momentum_rank,
            SortKey::LowRisk => row.low_risk_rank,
            SortKey::MagicFormula => row.magic_formula_rank,
        }
    }
}

pub fn filter_rows(rows: Vec<CompositeRankRow>, substring: &str) -> Vec<CompositeRankRow> {
    if substring.is_empty() {
        return rows;
    }
    let needle = substring.to_uppercase();
    rows.into_iter()
        .filter(|row| row.asset_id.contains(needle.as_str()))
        .collect()
}

pub fn sort_rows(mut rows: Vec<CompositeRankRow>, sort_key: SortKey) -> Vec<CompositeRankRow> {
    rows.sort_by_key(|row| sort_key.field(row));
    rows
}

/// One ranking request: weights, filter text and sort column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankingQuery {
    pub weights: FactorWeights,
    pub filter: String,
    pub sort: SortKey,
}

impl RankingQuery {
    pub fn new(weights: FactorWeights, filter: impl Into<String>, sort: SortKey) -> Self {
        Self {
            weights,
            filter: filter.into(),
            sort,
        }
    }

    /// Rank, filter, then sort, always in that order.
    pub fn execute(&self, dataset: &Dataset) -> Vec<CompositeRankRow> {
        let ranked = compute_composite_weighted(dataset, self.weights);
        let filtered = filter_rows(ranked, &self.filter);
        sort_rows(filtered, self.sort)
    }
}
