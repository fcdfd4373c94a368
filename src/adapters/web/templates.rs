//! HTML templates using Askama.

use askama::Template;

use crate::domain::query_view::RankingQuery;
use crate::domain::rank_engine::CompositeRankRow;

/// The ranking table on its own. Served directly to HTMX requests and
/// embedded in the full page otherwise.
#[derive(Template)]
#[template(path = "ranking_table.html")]
pub struct RankingTableTemplate<'a> {
    pub rows: &'a [CompositeRankRow],
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub table: &'a str,
    pub momentum_weight: i64,
    pub low_risk_weight: i64,
    pub magic_formula_weight: i64,
    pub filter: &'a str,
    pub sort: i64,
}

impl<'a> IndexTemplate<'a> {
    /// Echoes the request values back into the form.
    pub fn new(table: &'a str, query: &'a RankingQuery) -> Self {
        Self {
            table,
            momentum_weight: query.weights.momentum,
            low_risk_weight: query.weights.low_risk,
            magic_formula_weight: query.weights.magic_formula,
            filter: &query.filter,
            sort: query.sort.code(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
