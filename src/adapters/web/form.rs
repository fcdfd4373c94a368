//! Request parameter coercion.
//!
//! Absent fields take their defaults. Fields that are present but cannot be
//! read as an integer reject the request; they are never silently defaulted.

use crate::domain::error::QuantrankError;
use crate::domain::query_view::{RankingQuery, SortKey};
use crate::domain::rank_engine::FactorWeights;

pub fn coerce_int(field: &str, raw: &str) -> Result<i64, QuantrankError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| QuantrankError::InvalidInput {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

fn coerce_opt(field: &str, raw: Option<&str>, default: i64) -> Result<i64, QuantrankError> {
    match raw {
        Some(s) => coerce_int(field, s),
        None => Ok(default),
    }
}

/// Page form and query-string parameters. Everything arrives as text.
///
/// The `peso_*`, `filtro_ativo` and `ordenacao` names are the ones posted by
/// the legacy ranking page and are accepted as aliases.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct RankingForm {
    #[serde(alias = "peso_momentum")]
    pub momentum_weight: Option<String>,
    #[serde(alias = "peso_low_risk")]
    pub low_risk_weight: Option<String>,
    #[serde(alias = "peso_magic_formula")]
    pub magic_formula_weight: Option<String>,
    #[serde(alias = "filtro_ativo")]
    pub filter: Option<String>,
    #[serde(alias = "ordenacao")]
    pub sort: Option<String>,
}

impl RankingForm {
    pub fn into_query(self, defaults: FactorWeights) -> Result<RankingQuery, QuantrankError> {
        let weights = FactorWeights::new(
            coerce_opt(
                "momentum_weight",
                self.momentum_weight.as_deref(),
                defaults.momentum,
            )?,
            coerce_opt(
                "low_risk_weight",
                self.low_risk_weight.as_deref(),
                defaults.low_risk,
            )?,
            coerce_opt(
                "magic_formula_weight",
                self.magic_formula_weight.as_deref(),
                defaults.magic_formula,
            )?,
        );
        let sort = coerce_opt("sort", self.sort.as_deref(), SortKey::default().code())?;
        Ok(RankingQuery::new(
            weights,
            self.filter.unwrap_or_default(),
            SortKey::from_code(sort),
        ))
    }
}

/// A JSON value that should be read as an integer: a number (floats are
/// truncated) or a numeric string.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum IntInput {
    Int(i64),
    Float(f64),
    Text(String),
}

impl IntInput {
    pub fn coerce(&self, field: &str) -> Result<i64, QuantrankError> {
        match self {
            IntInput::Int(v) => Ok(*v),
            IntInput::Float(v) if v.is_finite() => Ok(v.trunc() as i64),
            IntInput::Float(v) => Err(QuantrankError::InvalidInput {
                field: field.to_string(),
                value: v.to_string(),
            }),
            IntInput::Text(s) => coerce_int(field, s),
        }
    }
}

fn coerce_json(field: &str, input: Option<&IntInput>, default: i64) -> Result<i64, QuantrankError> {
    match input {
        Some(v) => v.coerce(field),
        None => Ok(default),
    }
}

/// JSON body of the table update endpoint. Legacy clients send `momentum`,
/// `low_risk`, `magic_formula`, `filtro_ativo` and `ordenacao`.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct RankingPayload {
    #[serde(alias = "momentum")]
    pub momentum_weight: Option<IntInput>,
    #[serde(alias = "low_risk")]
    pub low_risk_weight: Option<IntInput>,
    #[serde(alias = "magic_formula")]
    pub magic_formula_weight: Option<IntInput>,
    #[serde(alias = "filtro_ativo")]
    pub filter: Option<String>,
    #[serde(alias = "ordenacao")]
    pub sort: Option<IntInput>,
}

impl RankingPayload {
    pub fn into_query(self, defaults: FactorWeights) -> Result<RankingQuery, QuantrankError> {
        let weights = FactorWeights::new(
            coerce_json(
                "momentum_weight",
                self.momentum_weight.as_ref(),
                defaults.momentum,
            )?,
            coerce_json(
                "low_risk_weight",
                self.low_risk_weight.as_ref(),
                defaults.low_risk,
            )?,
            coerce_json(
                "magic_formula_weight",
                self.magic_formula_weight.as_ref(),
                defaults.magic_formula,
            )?,
        );
        let sort = coerce_json("sort", self.sort.as_ref(), SortKey::default().code())?;
        Ok(RankingQuery::new(
            weights,
            self.filter.unwrap_or_default(),
            SortKey::from_code(sort),
        ))
    }
}
