//! Driver configuration
//!
//! Only the decoding quirks are configurable. Retry counts and bus delays
//! are fixed by the device's timing and stay in code.
//!
//! ```toml
//! flag_test = "legacy"
//! channel_control = 0x45
//! ```

use std::path::Path;

use ds2406::frame::DEFAULT_CHANNEL_CONTROL;
use ds2406::FlagTest;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// How channel info bits become flags.
    pub flag_test: FlagTest,
    /// First control byte of a channel access.
    pub channel_control: u8,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            flag_test: FlagTest::NonZero,
            channel_control: DEFAULT_CHANNEL_CONTROL,
        }
    }
}

impl DriverConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file, defaults if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
