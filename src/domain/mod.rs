//! Core domain types and ranking logic.

pub mod asset;
pub mod rank_engine;
pub mod query_view;
pub mod error;
