use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::redact;
use thiserror::Error;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "MoodleSession";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("session token must be provided")]
    Missing,
    #[error("provided session token is empty")]
    Empty,
    #[error("session token file does not exist: {0}")]
    FileMissing(PathBuf),
    #[error("failed to read session token file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Moodle session token, fixed for the lifetime of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    /// Trims surrounding whitespace; the remaining token must be non-empty.
    pub fn new(token: &str) -> Result<Self, CredentialError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self(token.to_string()))
    }

    /// Accepts either a literal token or `@path`, in which case the whole
    /// file is read once and trimmed.
    pub fn from_argument(argument: &str) -> Result<Self, CredentialError> {
        match argument.strip_prefix('@') {
            Some(path) => Self::from_file(Path::new(path)),
            None => Self::new(argument),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CredentialError> {
        if !path.exists() {
            return Err(CredentialError::FileMissing(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path).map_err(|source| CredentialError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(&contents)
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.0)
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionCredential")
            .field(&redact(&self.0))
            .finish()
    }
}
