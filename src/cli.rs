//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::asset::Dataset;
use crate::domain::error::QuantrankError;
use crate::domain::query_view::{RankingQuery, SortKey};
use crate::domain::rank_engine::{CompositeRankRow, FactorWeights};
use crate::ports::config_port::ConfigPort;
use crate::ports::dataset_port::DatasetPort;

pub const DEFAULT_DATASET_PATH: &str = "ranking_quantbrasil.csv";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:5000";

#[derive(Parser, Debug)]
#[command(name = "quantrank", about = "Weighted multi-factor asset ranking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank the dataset and print the table
    Rank {
        #[arg(short, long)]
        dataset: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, allow_negative_numbers = true)]
        momentum: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        low_risk: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        magic_formula: Option<i64>,
        /// Keep only assets whose identifier contains this text
        #[arg(short, long, default_value = "")]
        filter: String,
        /// 0 = position, 1 = momentum, 2 = low risk, 3 = magic formula
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        sort: i64,
        /// Write CSV instead of an aligned table
        #[arg(long)]
        csv: bool,
    },
    /// Check that a dataset file loads
    Validate {
        #[arg(short, long)]
        dataset: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Rank {
            dataset,
            config,
            momentum,
            low_risk,
            magic_formula,
            filter,
            sort,
            csv,
        } => run_rank(
            dataset.as_ref(),
            config.as_ref(),
            (momentum, low_risk, magic_formula),
            filter,
            sort,
            csv,
        ),
        Command::Validate { dataset, config } => run_validate(dataset.as_ref(), config.as_ref()),
        Command::Serve { config } => run_serve(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = QuantrankError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<Option<FileConfigAdapter>, ExitCode> {
    path.map(load_config).transpose()
}

/// Explicit path first, then `[dataset] path`, then the default file name.
pub fn resolve_dataset_path(explicit: Option<&PathBuf>, config: Option<&dyn ConfigPort>) -> PathBuf {
    if let Some(p) = explicit {
        return p.clone();
    }
    config
        .and_then(|c| c.get_string("dataset", "path"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH))
}

fn config_weight(config: &dyn ConfigPort, key: &str, default: i64) -> Result<i64, QuantrankError> {
    let Some(raw) = config.get_string("ranking", key) else {
        return Ok(default);
    };
    raw.trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| QuantrankError::ConfigInvalid {
            section: "ranking".into(),
            key: key.into(),
            reason: format!("'{}' is not an integer: {}", raw, e),
        })
}

/// Request defaults from `[ranking]`. Absent keys keep the built-in weight; a
/// present key must be an integer.
pub fn build_default_weights(config: &dyn ConfigPort) -> Result<FactorWeights, QuantrankError> {
    let base = FactorWeights::default();
    Ok(FactorWeights::new(
        config_weight(config, "momentum_weight", base.momentum)?,
        config_weight(config, "low_risk_weight", base.low_risk)?,
        config_weight(config, "magic_formula_weight", base.magic_formula)?,
    ))
}

pub fn resolve_listen_addr(config: &dyn ConfigPort) -> Result<SocketAddr, QuantrankError> {
    let raw = config
        .get_string("web", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    raw.trim()
        .parse()
        .map_err(|e: std::net::AddrParseError| QuantrankError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: format!("'{}' is not a socket address: {}", raw, e),
        })
}

pub fn load_dataset(port: &dyn DatasetPort) -> Result<Dataset, ExitCode> {
    port.load_dataset().map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

pub fn render_text_table(rows: &[CompositeRankRow]) -> String {
    let asset_width = rows
        .iter()
        .map(|r| r.asset_id.len())
        .max()
        .unwrap_or(0)
        .max("Asset".len());

    let mut out = format!(
        "{:>8}  {:<w$}  {:>8}  {:>8}  {:>13}\n",
        "Position",
        "Asset",
        "Momentum",
        "Low Risk",
        "Magic Formula",
        w = asset_width
    );
    for row in rows {
        out.push_str(&format!(
            "{:>8}  {:<w$}  {:>8}  {:>8}  {:>13}\n",
            row.position,
            row.asset_id,
            row.momentum_rank,
            row.low_risk_rank,
            row.magic_formula_rank,
            w = asset_width
        ));
    }
    out
}

pub fn write_csv<W: Write>(rows: &[CompositeRankRow], writer: W) -> Result<(), QuantrankError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["position", "asset", "momentum", "low_risk", "magic_formula"])
        .map_err(std::io::Error::from)?;
    for row in rows {
        wtr.write_record([
            row.position.to_string(),
            row.asset_id.clone(),
            row.momentum_rank.to_string(),
            row.low_risk_rank.to_string(),
            row.magic_formula_rank.to_string(),
        ])
        .map_err(std::io::Error::from)?;
    }
    wtr.flush()?;
    Ok(())
}

fn run_rank(
    dataset_path: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
    (momentum, low_risk, magic_formula): (Option<i64>, Option<i64>, Option<i64>),
    filter: String,
    sort: i64,
    csv_output: bool,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config_ref = config.as_ref().map(|c| c as &dyn ConfigPort);

    let defaults = match config_ref.map(build_default_weights).transpose() {
        Ok(d) => d.unwrap_or_default(),
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let adapter = CsvAdapter::new(resolve_dataset_path(dataset_path, config_ref));
    eprintln!("Loading dataset from {}", adapter.path().display());
    let dataset = match load_dataset(&adapter) {
        Ok(d) => d,
        Err(code) => return code,
    };
    let weights = FactorWeights::new(
        momentum.unwrap_or(defaults.momentum),
        low_risk.unwrap_or(defaults.low_risk),
        magic_formula.unwrap_or(defaults.magic_formula),
    );
    let query = RankingQuery::new(weights, filter, SortKey::from_code(sort));

    eprintln!(
        "Ranking {} assets (weights: momentum={}, low_risk={}, magic_formula={})",
        dataset.len(),
        weights.momentum,
        weights.low_risk,
        weights.magic_formula
    );
    let rows = query.execute(&dataset);

    let stdout = std::io::stdout();
    let result = if csv_output {
        write_csv(&rows, stdout.lock())
    } else {
        stdout
            .lock()
            .write_all(render_text_table(&rows).as_bytes())
            .map_err(QuantrankError::from)
    };

    match result {
        Ok(()) => {
            eprintln!("{} rows", rows.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write output: {e}");
            (&e).into()
        }
    }
}

fn run_validate(dataset_path: Option<&PathBuf>, config_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let adapter = CsvAdapter::new(resolve_dataset_path(
        dataset_path,
        config.as_ref().map(|c| c as &dyn ConfigPort),
    ));

    eprintln!("Validating dataset: {}", adapter.path().display());
    match load_dataset(&adapter) {
        Ok(dataset) => {
            eprintln!("Dataset is valid: {} assets", dataset.len());
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router};
        use std::sync::Arc;

        tracing::info!(config = %config_path.display(), "loading config");
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };

        let settings = resolve_listen_addr(&config)
            .and_then(|addr| build_default_weights(&config).map(|weights| (addr, weights)));
        let (addr, defaults) = match settings {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "invalid configuration");
                return (&e).into();
            }
        };

        let path = resolve_dataset_path(None, Some(&config as &dyn ConfigPort));
        let dataset = match load_dataset(&CsvAdapter::new(path)) {
            Ok(d) => Arc::new(d),
            Err(code) => return code,
        };

        let state = AppState { dataset, defaults };
        let router = build_router(state);

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!(error = %e, "failed to start runtime");
                return ExitCode::from(1);
            }
        };

        let served: std::io::Result<()> = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "web server listening");
            axum::serve(listener, router).await
        });

        match served {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(%addr, error = %e, "server failed");
                ExitCode::from(1)
            }
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
