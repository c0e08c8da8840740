//! Settings for the binary: where the database file lives.
//!
//! Resolution order: built-in default (a per-user dot directory),
//! overridden by an optional `truckcare.toml` next to the working
//! directory, overridden by `TRUCKCARE_*` environment variables.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path of the SQLite database file.
    pub database: PathBuf,
}

/// `~/.truckcare/truckcare.sqlite3`, falling back to the working
/// directory when no home directory is exposed.
pub fn default_db_path() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".truckcare").join("truckcare.sqlite3")
}

impl Settings {
    pub fn load() -> Result<Settings> {
        let settings = Config::builder()
            .set_default("database", default_db_path().to_string_lossy().to_string())?
            .add_source(File::with_name("truckcare").required(false))
            .add_source(Environment::with_prefix("TRUCKCARE"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
