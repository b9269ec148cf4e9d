//! Simulation configuration loading.
//!
//! Every key is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! max-rounds = 2000
//! beta = 0.5
//! head-fraction = 0.1
//! epsilon = 0.0001
//! base-rate = 0.01
//! record-history = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::topology::EnergyModel;

/// Name of the config file looked up next to an instance file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Hard cap on executed rounds, independent of the termination checks.
    pub max_rounds: usize,
    /// Weight of distance against energy scarcity in link costs, in `[0, 1]`.
    pub beta: f64,
    /// Share of active motes promoted to cluster head each round.
    pub head_fraction: f64,
    /// Floor added to residual energy in the cost model.
    pub epsilon: f64,
    /// Energy drained per unit of link length.
    pub base_rate: f64,
    /// Keep a per-round snapshot of every battery.
    pub record_history: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let energy = EnergyModel::default();
        Self {
            max_rounds: 2000,
            beta: energy.beta,
            head_fraction: 0.1,
            epsilon: energy.epsilon,
            base_rate: energy.base_rate,
            record_history: false,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a TOML file and validate it.
    ///
    /// # Arguments
    /// * `config_path` - Path to the config.toml file
    ///
    /// # Returns
    /// * `Ok(SimulationConfig)` if the file was read, parsed and validated
    /// * `Err(Error)` describing the first problem otherwise
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path).map_err(|source| Error::Io {
            path: config_path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the model cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.beta) {
            return Err(Error::InvalidConfig(format!("beta {} must be within [0, 1]", self.beta)));
        }
        if !(self.head_fraction > 0.0 && self.head_fraction <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "head-fraction {} must be within (0, 1]",
                self.head_fraction
            )));
        }
        if !(self.base_rate >= 0.0 && self.base_rate.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "base-rate {} must be a non-negative number",
                self.base_rate
            )));
        }
        // Non-positive epsilon is accepted; the cost model re-floors it.
        if !self.epsilon.is_finite() {
            return Err(Error::InvalidConfig(format!("epsilon {} must be finite", self.epsilon)));
        }
        Ok(())
    }

    pub fn energy_model(&self) -> EnergyModel {
        EnergyModel {
            beta: self.beta,
            epsilon: self.epsilon,
            base_rate: self.base_rate,
        }
    }

    /// Derive the config path from an instance file path.
    ///
    /// Replaces the instance filename with "config.toml" in the same directory.
    pub fn config_path_from_instance(instance_path: &Path) -> PathBuf {
        instance_path.parent().unwrap_or(Path::new(".")).join(CONFIG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = SimulationConfig::from_toml_str("max-rounds = 10\nrecord-history = true\n").unwrap();
        assert_eq!(config.max_rounds, 10);
        assert!(config.record_history);
        assert_eq!(config.beta, 0.5);
        assert_eq!(config.head_fraction, 0.1);
        assert_eq!(config.energy_model(), EnergyModel::default());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(SimulationConfig::from_toml_str("beta = 1.5"), Err(Error::InvalidConfig(_))));
        assert!(matches!(SimulationConfig::from_toml_str("head-fraction = 0.0"), Err(Error::InvalidConfig(_))));
        assert!(matches!(SimulationConfig::from_toml_str("base-rate = -1.0"), Err(Error::InvalidConfig(_))));
        assert!(SimulationConfig::from_toml_str("epsilon = -1.0").is_ok());
    }

    #[test]
    fn unknown_keys_and_bad_types_fail_to_parse() {
        assert!(matches!(SimulationConfig::from_toml_str("rounds = 3"), Err(Error::ConfigParse(_))));
        assert!(matches!(SimulationConfig::from_toml_str("beta = \"high\""), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn config_path_sits_next_to_instance() {
        let path = SimulationConfig::config_path_from_instance(Path::new("data/rede50.txt"));
        assert_eq!(path, PathBuf::from("data/config.toml"));
    }
}
