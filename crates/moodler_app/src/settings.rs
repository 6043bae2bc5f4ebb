use moodler_core::{
    CredentialError, MoodleSite, ScrapeConfig, ScrapeTarget, SessionCredential, SiteError,
};
use thiserror::Error;

use crate::cli::Cli;
use crate::config::{self, ConfigError, FileConfig};

#[derive(Debug, Error)]
pub enum SetupError {
    /// Missing or malformed input; reported together with the usage text.
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Merge command-line flags over the optional config file into the
/// immutable configuration of this run. Reads the token file, but makes no
/// network requests.
pub fn resolve(cli: &Cli) -> Result<ScrapeConfig, SetupError> {
    let file = config::load(cli.config.as_deref())?;
    resolve_with(cli, file)
}

pub fn resolve_with(cli: &Cli, file: FileConfig) -> Result<ScrapeConfig, SetupError> {
    let host = cli
        .host
        .clone()
        .or(file.host)
        .ok_or_else(|| SetupError::Usage(SiteError::Empty.to_string()))?;
    let site = MoodleSite::from_host(&host).map_err(|err| SetupError::Usage(err.to_string()))?;

    let token = cli
        .token
        .clone()
        .or(file.token)
        .ok_or(CredentialError::Missing)
        .map_err(|err| SetupError::Usage(err.to_string()))?;
    let credential = SessionCredential::from_argument(&token)?;

    let target = ScrapeTarget::new(cli.course, cli.section);
    let output_root = cli.output.clone().or(file.output_dir);
    Ok(ScrapeConfig::new(site, credential, target, output_root))
}
