use std::path::{Path, PathBuf};

use crate::{MoodleSite, ScrapeTarget, SessionCredential};

/// Default root for downloaded files, relative to the working directory.
pub const DEFAULT_OUTPUT_ROOT: &str = "courses";

/// Everything a run needs, resolved once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    site: MoodleSite,
    credential: SessionCredential,
    target: ScrapeTarget,
    output_root: PathBuf,
}

impl ScrapeConfig {
    pub fn new(
        site: MoodleSite,
        credential: SessionCredential,
        target: ScrapeTarget,
        output_root: Option<PathBuf>,
    ) -> Self {
        Self {
            site,
            credential,
            target,
            output_root: output_root.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT)),
        }
    }

    pub fn site(&self) -> &MoodleSite {
        &self.site
    }

    pub fn credential(&self) -> &SessionCredential {
        &self.credential
    }

    pub fn target(&self) -> ScrapeTarget {
        self.target
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}
