use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Stakes and solicitation limits for an [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    /// How many times a seat is asked for a usable action before the hand
    /// is aborted
    pub max_action_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            small_blind: 50,
            big_blind: 100,
            max_action_attempts: 5,
        }
    }
}

impl EngineConfig {
    pub fn new(small_blind: u32, big_blind: u32) -> Self {
        Self {
            small_blind,
            big_blind,
            ..Self::default()
        }
    }

    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// ```
    /// use holdem_engine::config::EngineConfig;
    ///
    /// let cfg = EngineConfig::from_toml_str("small_blind = 5\nbig_blind = 10").unwrap();
    /// assert_eq!(cfg.big_blind, 10);
    /// assert_eq!(cfg.max_action_attempts, 5);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        let cfg: EngineConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.small_blind == 0 {
            return Err(EngineError::InvalidConfig(
                "small_blind must be positive".into(),
            ));
        }
        if self.big_blind < self.small_blind {
            return Err(EngineError::InvalidConfig(format!(
                "big_blind ({}) is below small_blind ({})",
                self.big_blind, self.small_blind
            )));
        }
        if self.max_action_attempts == 0 {
            return Err(EngineError::InvalidConfig(
                "max_action_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
