//! Runtime settings for the bootstrapper

use crate::error::{BootstrapError, Result};
use std::path::{Path, PathBuf};

/// Default location of the environment file, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Literal argument that switches off operator prompts
pub const NON_INTERACTIVE_ARG: &str = "--non-interactive";

/// Number of characters in a generated API key
pub const API_KEY_LENGTH: usize = 20;

/// Bytes drawn from the random source per sample
pub const SAMPLE_BLOCK_SIZE: usize = 256;

/// Upper bound on samples before key generation gives up
pub const MAX_SAMPLE_ROUNDS: usize = 64;

/// How the API key gets chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Ask the operator on the terminal
    Interactive,
    /// Use the generated key without asking
    NonInteractive,
}

impl Mode {
    /// Resolve the mode from the optional positional argument.
    ///
    /// Only the exact literal `--non-interactive` disables prompting.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some(NON_INTERACTIVE_ARG) => Mode::NonInteractive,
            _ => Mode::Interactive,
        }
    }
}

/// Key generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyConfig {
    /// Characters in the final key
    pub length: usize,

    /// Bytes per random sample
    pub block_size: usize,

    /// Samples taken before reporting exhaustion
    pub max_rounds: usize,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            length: API_KEY_LENGTH,
            block_size: SAMPLE_BLOCK_SIZE,
            max_rounds: MAX_SAMPLE_ROUNDS,
        }
    }
}

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Target environment file
    pub env_file: PathBuf,

    /// Prompting mode
    pub mode: Mode,

    /// Key generation parameters
    pub key: KeyConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_ENV_FILE), Mode::Interactive)
    }
}

impl Settings {
    pub fn new(env_file: PathBuf, mode: Mode) -> Self {
        Settings {
            env_file,
            mode,
            key: KeyConfig::default(),
        }
    }

    /// Build settings from command line values, falling back to defaults
    pub fn from_cli(env_file: Option<&Path>, mode_arg: Option<&str>) -> Result<Self> {
        let env_file = env_file
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));

        let settings = Self::new(env_file, Mode::from_arg(mode_arg));
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.env_file.as_os_str().is_empty() {
            return Err(BootstrapError::Config(
                "environment file path must not be empty".into(),
            ));
        }
        if self.key.length == 0 || self.key.block_size == 0 || self.key.max_rounds == 0 {
            return Err(BootstrapError::Config(format!(
                "invalid key parameters: {:?}",
                self.key
            )));
        }
        Ok(())
    }
}
