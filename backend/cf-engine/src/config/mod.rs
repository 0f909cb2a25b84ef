use crate::error::{CfError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound for `decimal_places`; beyond this `10^places` stops being exact in f64.
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Engine configuration
///
/// Loaded from `CF_`-prefixed environment variables:
/// - `CF_NEIGHBORHOOD_SIZE` (default 20)
/// - `CF_DECIMAL_PLACES` (default 3)
/// - `CF_PARALLEL` (default true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfConfig {
    /// Maximum number of neighbors weighting a single prediction
    #[serde(default = "default_neighborhood_size")]
    pub neighborhood_size: usize,

    /// Predictions are truncated toward zero to this many decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,

    /// Run the per-item prediction loop of `recommend` on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_neighborhood_size() -> usize {
    20
}

fn default_decimal_places() -> u32 {
    3
}

fn default_parallel() -> bool {
    true
}

impl Default for CfConfig {
    fn default() -> Self {
        Self {
            neighborhood_size: default_neighborhood_size(),
            decimal_places: default_decimal_places(),
            parallel: default_parallel(),
        }
    }
}

impl CfConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config: CfConfig = envy::prefixed("CF_").from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_neighborhood_size(mut self, neighborhood_size: usize) -> Self {
        self.neighborhood_size = neighborhood_size;
        self
    }

    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.neighborhood_size == 0 {
            return Err(CfError::InvalidConfig(
                "neighborhood_size must be at least 1".to_string(),
            ));
        }

        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(CfError::InvalidConfig(format!(
                "decimal_places must be at most {}, got {}",
                MAX_DECIMAL_PLACES, self.decimal_places
            )));
        }

        Ok(())
    }
}
