//! quantrank: weighted multi-factor asset ranking.
//!
//! Hexagonal architecture: ranking logic in [`domain`], port traits in [`ports`],
//! concrete implementations (CSV dataset, INI config, web server) in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
