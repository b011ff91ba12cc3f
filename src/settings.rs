//! Process-wide settings.
//!
//! Values are layered: built-in defaults, then an optional
//! `seismo-util.toml` in the working directory, then an explicit file,
//! then `SEISMO_*` environment variables.

use crate::error::Result;
use crate::utils::constants::{CONFIG_FILE_STEM, DEFAULT_LOG_LEVEL, ENV_PREFIX};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Whether progress messages are written to stderr
    pub show_progress: bool,

    /// One of debug, info, warning, error, critical
    pub log_level: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("show_progress", true)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .add_source(File::with_name(CONFIG_FILE_STEM).required(false));

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_progress: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
