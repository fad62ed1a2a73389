//! Tightlock environment bootstrapper
//!
//! Creates the `.env` file read by the Tightlock containers: the host uid,
//! a fixed gid of `0`, and the API key the service checks requests against.
//! An existing file is never touched.

pub mod bootstrap;
pub mod config;
pub mod env_file;
pub mod error;
pub mod identity;
pub mod keygen;
pub mod prompt;

pub use bootstrap::{EnvBootstrapper, Outcome};
pub use config::{Mode, Settings};
pub use error::{BootstrapError, Result};
