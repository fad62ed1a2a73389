//! The `KEY=VALUE` environment file consumed by the deployment

use crate::error::Result;
use crate::identity::HostIdentity;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const UID_VAR: &str = "AIRFLOW_UID";
pub const GID_VAR: &str = "AIRFLOW_GID";
pub const API_KEY_VAR: &str = "TIGHTLOCK_API_KEY";

/// Handle on the environment file location
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

/// A freshly created environment file, open for appending
pub struct EnvWriter {
    file: File,
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EnvFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the file exclusively and write the identity lines.
    ///
    /// Returns `Ok(None)` when the file already exists, including when another
    /// process created it after the caller's existence check.
    pub fn create_with_identity(&self, identity: &HostIdentity) -> Result<Option<EnvWriter>> {
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!("{:?} appeared before it could be created", self.path);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut writer = EnvWriter {
            file,
            path: self.path.clone(),
        };
        writer.append(UID_VAR, identity.uid.to_string().as_bytes())?;
        writer.append(GID_VAR, identity.gid.to_string().as_bytes())?;
        Ok(Some(writer))
    }

    /// Parse the file into ordered `(key, value)` pairs with dotenv rules
    pub fn read_entries(&self) -> Result<Vec<(String, String)>> {
        let mut entries = Vec::new();
        for item in dotenvy::from_path_iter(&self.path)? {
            entries.push(item?);
        }
        Ok(entries)
    }

    /// Value of a single variable, if present
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read_entries()?
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v))
    }
}

impl EnvWriter {
    /// Append one `KEY=VALUE` line and push it to disk.
    ///
    /// The value bytes are written as given, without quoting.
    pub fn append(&mut self, key: &str, value: &[u8]) -> Result<()> {
        write!(self.file, "{}=", key)?;
        self.file.write_all(value)?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        debug!("Wrote {} to {:?}", key, self.path);
        Ok(())
    }

    pub fn finish(self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}
