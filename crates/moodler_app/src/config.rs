//! Optional RON defaults for values that rarely change between runs.
//!
//! ```ron
//! (
//!     host: Some("moodle.example.edu"),
//!     token: Some("@session.txt"),
//!     output_dir: Some("courses"),
//! )
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "moodler.ron";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub token: Option<String>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Loads `explicit`, or `moodler.ron` in the working directory when present.
/// Only an explicitly named file is required to exist.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(FileConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config = parse(&content).map_err(|message| ConfigError::Parse {
        path: path.clone(),
        message,
    })?;
    engine_info!("Loaded defaults from {:?}", path);
    Ok(config)
}

pub fn parse(content: &str) -> Result<FileConfig, String> {
    ron::from_str(content).map_err(|err| err.to_string())
}
