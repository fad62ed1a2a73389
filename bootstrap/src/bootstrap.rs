//! One-shot creation of the environment file

use crate::config::{Mode, Settings};
use crate::env_file::{EnvFile, API_KEY_VAR};
use crate::error::Result;
use crate::identity::HostIdentity;
use crate::keygen::KeyGenerator;
use crate::prompt::{KeySource, Prompter};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file was already there and was left alone
    Skipped { path: PathBuf },

    /// The file was written
    Created {
        path: PathBuf,
        uid: u32,
        key_source: KeySource,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Skipped { path } => {
                write!(f, "{} already exists, nothing to do", path.display())
            }
            Outcome::Created {
                path,
                uid,
                key_source,
            } => write!(
                f,
                "Wrote {} (uid {}, {} API key)",
                path.display(),
                uid,
                key_source.label().to_lowercase()
            ),
        }
    }
}

pub struct EnvBootstrapper {
    settings: Settings,
    env_file: EnvFile,
}

impl EnvBootstrapper {
    pub fn new(settings: Settings) -> Self {
        let env_file = EnvFile::new(settings.env_file.clone());
        EnvBootstrapper { settings, env_file }
    }

    pub fn env_file(&self) -> &EnvFile {
        &self.env_file
    }

    /// Run against the OS random source and the given terminal streams
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<Outcome> {
        self.run_with_rng(OsRng, input, output)
    }

    pub fn run_with_rng<G, R, W>(&self, rng: G, input: R, output: W) -> Result<Outcome>
    where
        G: RngCore,
        R: BufRead,
        W: Write,
    {
        let path = self.env_file.path().to_path_buf();

        if self.env_file.exists() {
            info!("{:?} already exists, skipping", path);
            return Ok(Outcome::Skipped { path });
        }

        let identity = HostIdentity::current();
        match identity.user_name() {
            Ok(Some(name)) => info!("Host identity: uid {} ({})", identity.uid, name),
            Ok(None) => info!("Host identity: uid {}", identity.uid),
            Err(e) => warn!("Could not resolve user name for uid {}: {}", identity.uid, e),
        }

        let Some(mut writer) = self.env_file.create_with_identity(&identity)? else {
            info!("{:?} was created concurrently, skipping", path);
            return Ok(Outcome::Skipped { path });
        };

        let candidate = KeyGenerator::new(rng, self.settings.key).generate()?;

        let (key_source, key) = match self.settings.mode {
            Mode::NonInteractive => (KeySource::Pseudorandom, candidate.into_bytes()),
            Mode::Interactive => Prompter::new(input, output).choose_key(&candidate)?,
        };

        writer.append(API_KEY_VAR, &key)?;
        writer.finish()?;
        info!("Environment file {:?} created with {} key", path, key_source);

        Ok(Outcome::Created {
            path,
            uid: identity.uid,
            key_source,
        })
    }
}
