use serde::{Deserialize, Serialize};
use crate::account::Pin;
use crate::error::AtmError;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AtmConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub registration: RegistrationConfig,
    #[serde(default = "default_seed_accounts")]
    pub seed_accounts: Vec<SeedAccount>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct RegistrationConfig {
    /// Apply the 4-digit PIN check at registration as well as at PIN change
    #[serde(default)]
    pub enforce_pin_range: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SeedAccount {
    pub username: String,
    pub display_name: String,
    pub balance: f64,
    pub pin: Pin,
}

impl SeedAccount {
    fn new(username: &str, display_name: &str, balance: f64, pin: Pin) -> Self {
        Self {
            username: username.to_string(),
            display_name: display_name.to_string(),
            balance,
            pin,
        }
    }
}

fn default_log_level() -> String {
    "error".to_string()
}

fn default_seed_accounts() -> Vec<SeedAccount> {
    vec![
        SeedAccount::new("jones", "Jones", 5000.0, 1234),
        SeedAccount::new("tom", "Tom", 8000.0, 5678),
        SeedAccount::new("alex", "Alex", 3000.0, 4321),
    ]
}

impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            registration: RegistrationConfig::default(),
            seed_accounts: default_seed_accounts(),
        }
    }
}

impl AtmConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, AtmError> {
        toml::from_str(s).map_err(|e| AtmError::Config(e.to_string()))
    }
}
