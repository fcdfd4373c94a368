//! Domain error types.

/// Top-level error type for quantrank.
#[derive(Debug, thiserror::Error)]
pub enum QuantrankError {
    #[error("failed to read dataset {path}: {reason}")]
    DatasetRead { path: String, reason: String },

    #[error("dataset parse error on line {line}: {reason}")]
    DatasetParse { line: u64, reason: String },

    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("duplicate asset identifier: {asset_id}")]
    DuplicateAsset { asset_id: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid value for {field}: '{value}' is not an integer")]
    InvalidInput { field: String, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&QuantrankError> for std::process::ExitCode {
    fn from(err: &QuantrankError) -> Self {
        let code: u8 = match err {
            QuantrankError::Io(_) => 1,
            QuantrankError::ConfigParse { .. } | QuantrankError::ConfigInvalid { .. } => 2,
            QuantrankError::DatasetRead { .. }
            | QuantrankError::DatasetParse { .. }
            | QuantrankError::MissingColumn { .. }
            | QuantrankError::DuplicateAsset { .. } => 3,
            QuantrankError::InvalidInput { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
