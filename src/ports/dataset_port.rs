//! Dataset access port trait.

use crate::domain::asset::Dataset;
use crate::domain::error::QuantrankError;

/// Source of the base factor-score dataset. Called once at startup.
pub trait DatasetPort {
    fn load_dataset(&self) -> Result<Dataset, QuantrankError>;
}
