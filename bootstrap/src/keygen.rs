//! Pseudorandom API key generation
//!
//! Keys are built by sampling blocks from a random source and keeping only
//! the ASCII letters. Filtering throws most bytes away, so further blocks are
//! drawn until the key is full or the round limit is hit.

use crate::config::KeyConfig;
use crate::error::{BootstrapError, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, trace};

/// Draws API keys from a random source
pub struct KeyGenerator<R> {
    rng: R,
    config: KeyConfig,
}

impl KeyGenerator<OsRng> {
    /// Generator backed by the operating system CSPRNG
    pub fn from_os(config: KeyConfig) -> Self {
        Self::new(OsRng, config)
    }
}

impl<R: RngCore> KeyGenerator<R> {
    pub fn new(rng: R, config: KeyConfig) -> Self {
        KeyGenerator { rng, config }
    }

    /// Produce a key of exactly `config.length` ASCII letters
    pub fn generate(&mut self) -> Result<String> {
        let wanted = self.config.length;
        let mut key = String::with_capacity(wanted);
        let mut block = vec![0u8; self.config.block_size];

        for round in 1..=self.config.max_rounds {
            self.rng.try_fill_bytes(&mut block)?;
            key.extend(alphabetic(&block).take(wanted - key.len()));
            trace!("sample {}: {}/{} characters", round, key.len(), wanted);

            if key.len() == wanted {
                debug!("Generated {}-character key after {} sample(s)", wanted, round);
                return Ok(key);
            }
        }

        Err(BootstrapError::EntropyExhausted {
            wanted,
            rounds: self.config.max_rounds,
        })
    }
}

/// ASCII letters of a raw sample, in order
pub fn alphabetic(sample: &[u8]) -> impl Iterator<Item = char> + '_ {
    sample
        .iter()
        .filter(|b| b.is_ascii_alphabetic())
        .map(|&b| char::from(b))
}

/// Convenience wrapper: one key from the OS random source
pub fn generate_api_key(config: KeyConfig) -> Result<String> {
    KeyGenerator::from_os(config).generate()
}

/// True when `key` looks like something this module produced
pub fn is_generated_shape(key: &str, length: usize) -> bool {
    key.len() == length && key.bytes().all(|b| b.is_ascii_alphabetic())
}
