//! CLI integration tests.
//!
//! Tests cover:
//! - Config resolution (dataset path, default weights, listen address)
//! - Dataset loading through the port
//! - `validate` and `rank` commands against real files on disk

mod common;

use clap::Parser;
use common::*;
use quantrank::adapters::file_config_adapter::FileConfigAdapter;
use quantrank::cli::{self, Cli};
use quantrank::domain::error::QuantrankError;
use quantrank::domain::rank_engine::FactorWeights;
use quantrank::ports::config_port::ConfigPort;
use std::path::PathBuf;
use std::process::ExitCode;

const VALID_INI: &str = r#"
[dataset]
path = /srv/quantrank/ranking_quantbrasil.csv

[web]
listen = 0.0.0.0:8080

[ranking]
momentum_weight = 3
low_risk_weight = -1
magic_formula_weight = 0
"#;

// ExitCode has no PartialEq; compare Debug output.
fn same_code(a: ExitCode, b: ExitCode) -> bool {
    format!("{a:?}") == format!("{b:?}")
}

mod config_resolution {
    use super::*;

    #[test]
    fn default_weights_read_from_config() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        assert_eq!(cli::build_default_weights(&adapter).unwrap(), FactorWeights::new(3, -1, 0));
    }

    #[test]
    fn default_weights_fall_back_per_key() {
        let adapter =
            FileConfigAdapter::from_string("[ranking]\nlow_risk_weight = 4\n").unwrap();
        assert_eq!(cli::build_default_weights(&adapter).unwrap(), FactorWeights::new(2, 4, 1));
    }

    #[test]
    fn malformed_default_weight_is_config_error() {
        let adapter = FileConfigAdapter::from_string(
            "[ranking]\nmomentum_weight = 2x\nlow_risk_weight = -3\n",
        )
        .unwrap();
        let result = cli::build_default_weights(&adapter);
        assert!(matches!(
            result,
            Err(QuantrankError::ConfigInvalid { section, key, .. })
                if section == "ranking" && key == "momentum_weight"
        ));
    }

    #[test]
    fn explicit_dataset_path_wins() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let explicit = PathBuf::from("local.csv");
        let path = cli::resolve_dataset_path(Some(&explicit), Some(&adapter as &dyn ConfigPort));
        assert_eq!(path, PathBuf::from("local.csv"));
    }

    #[test]
    fn dataset_path_from_config() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let path = cli::resolve_dataset_path(None, Some(&adapter as &dyn ConfigPort));
        assert_eq!(path, PathBuf::from("/srv/quantrank/ranking_quantbrasil.csv"));
    }

    #[test]
    fn dataset_path_default() {
        let path = cli::resolve_dataset_path(None, None);
        assert_eq!(path, PathBuf::from(cli::DEFAULT_DATASET_PATH));
    }

    #[test]
    fn listen_addr_from_config() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let addr = cli::resolve_listen_addr(&adapter).unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn listen_addr_default() {
        let adapter = FileConfigAdapter::from_string("[web]\n").unwrap();
        let addr = cli::resolve_listen_addr(&adapter).unwrap();
        assert_eq!(addr.to_string(), cli::DEFAULT_LISTEN);
    }

    #[test]
    fn listen_addr_invalid() {
        let adapter = FileConfigAdapter::from_string("[web]\nlisten = localhost\n").unwrap();
        let result = cli::resolve_listen_addr(&adapter);
        assert!(matches!(
            result,
            Err(QuantrankError::ConfigInvalid { section, key, .. }) if section == "web" && key == "listen"
        ));
    }
}

mod dataset_loading {
    use super::*;

    #[test]
    fn load_dataset_from_mock_port() {
        let port = MockDatasetPort::new()
            .with_record(record("PETR4", 1.0, 2.0, 3.0))
            .with_record(record("VALE3", 3.0, 2.0, 1.0));
        let dataset = cli::load_dataset(&port).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn load_dataset_error_maps_to_dataset_exit_code() {
        let port = MockDatasetPort::new().with_error("unreadable");
        let code = cli::load_dataset(&port).unwrap_err();
        assert!(same_code(code, ExitCode::from(3)));
    }
}

mod commands {
    use super::*;

    fn run_args(args: &[&str]) -> ExitCode {
        cli::run(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn validate_accepts_good_file() {
        let file = write_temp_file(MARKET_CSV);
        let path = file.path().to_str().unwrap();
        let code = run_args(&["quantrank", "validate", "--dataset", path]);
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn validate_rejects_duplicate_assets() {
        let file = write_temp_file(
            "ativo,momentum,low_risk,magic_formula\nPETR4,1,2,3\nPETR4,4,5,6\n",
        );
        let path = file.path().to_str().unwrap();
        let code = run_args(&["quantrank", "validate", "--dataset", path]);
        assert!(same_code(code, ExitCode::from(3)));
    }

    #[test]
    fn validate_missing_config_is_config_error() {
        let code = run_args(&[
            "quantrank",
            "validate",
            "--config",
            "/nonexistent/quantrank.ini",
        ]);
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn validate_uses_config_dataset_path() {
        let data = write_temp_file(MARKET_CSV);
        let ini = format!("[dataset]\npath = {}\n", data.path().display());
        let config = write_temp_file(&ini);
        let code = run_args(&[
            "quantrank",
            "validate",
            "--config",
            config.path().to_str().unwrap(),
        ]);
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn rank_with_malformed_config_weight_exits_with_config_code() {
        let data = write_temp_file(MARKET_CSV);
        let config = write_temp_file("[ranking]\nlow_risk_weight = heavy\n");
        let code = run_args(&[
            "quantrank",
            "rank",
            "--dataset",
            data.path().to_str().unwrap(),
            "--config",
            config.path().to_str().unwrap(),
        ]);
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[cfg(feature = "web")]
    #[test]
    fn serve_with_malformed_config_weight_exits_before_binding() {
        let data = write_temp_file(MARKET_CSV);
        let ini = format!(
            "[dataset]\npath = {}\n[web]\nlisten = 127.0.0.1:0\n[ranking]\nmomentum_weight = 2x\n",
            data.path().display()
        );
        let config = write_temp_file(&ini);
        let code = run_args(&["quantrank", "serve", "--config", config.path().to_str().unwrap()]);
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn rank_prints_csv() {
        let file = write_temp_file(MARKET_CSV);
        let path = file.path().to_str().unwrap();
        let code = run_args(&[
            "quantrank",
            "rank",
            "--dataset",
            path,
            "--momentum",
            "-1",
            "--filter",
            "petr",
            "--sort",
            "1",
            "--csv",
        ]);
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn rank_missing_dataset_fails() {
        let code = run_args(&["quantrank", "rank", "--dataset", "/nonexistent/ranking.csv"]);
        assert!(same_code(code, ExitCode::from(3)));
    }

    #[test]
    fn non_integer_weight_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["quantrank", "rank", "--momentum", "two"]);
        assert!(result.is_err());
    }
}
