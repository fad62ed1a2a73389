//! Error types for the environment bootstrapper

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BootstrapError>;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Random source unavailable: {0}")]
    Entropy(String),

    #[error("Random source produced fewer than {wanted} alphabetic characters after {rounds} samples")]
    EntropyExhausted { wanted: usize, rounds: usize },

    #[error("Input closed before an API key was chosen")]
    PromptClosed,

    #[error("Identity lookup failed: {0}")]
    Identity(String),
}

impl From<rand::Error> for BootstrapError {
    fn from(err: rand::Error) -> Self {
        BootstrapError::Entropy(err.to_string())
    }
}

impl From<nix::Error> for BootstrapError {
    fn from(err: nix::Error) -> Self {
        BootstrapError::Identity(err.to_string())
    }
}
