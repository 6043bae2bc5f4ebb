use std::fmt;
use std::path::PathBuf;

/// Why a single resource link was not downloaded. None of these stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    InvalidLink { href: String },
    NoRedirect { status: u16, reason: String },
    MissingLocation,
    InvalidFilename { location: String },
    AlreadyExists { path: PathBuf },
    FileStatus { status: u16, reason: String },
    Network { message: String },
}

impl SkipReason {
    /// An existing file counts as done rather than as a failure.
    pub fn is_already_present(&self) -> bool {
        matches!(self, SkipReason::AlreadyExists { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidLink { href } => write!(f, "invalid link {href}"),
            SkipReason::NoRedirect { status, reason } => {
                write!(f, "no redirect ({status} {reason})")
            }
            SkipReason::MissingLocation => write!(f, "failed to find location"),
            SkipReason::InvalidFilename { location } => {
                write!(f, "no usable filename in {location}")
            }
            SkipReason::AlreadyExists { .. } => write!(f, "already exists"),
            SkipReason::FileStatus { status, reason } => {
                write!(f, "get request failed ({status} {reason})")
            }
            SkipReason::Network { message } => write!(f, "network error: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    Skipped(SkipReason),
}

/// Tally of one run, accumulated section by section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sections_visited: usize,
    pub sections_without_resources: usize,
    pub files_downloaded: usize,
    pub bytes_written: u64,
    pub already_present: usize,
    pub failed_links: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &LinkOutcome) {
        match outcome {
            LinkOutcome::Downloaded { bytes, .. } => {
                self.files_downloaded += 1;
                self.bytes_written += bytes;
            }
            LinkOutcome::Skipped(reason) if reason.is_already_present() => {
                self.already_present += 1;
            }
            LinkOutcome::Skipped(_) => self.failed_links += 1,
        }
    }

    pub fn merge(&mut self, other: RunSummary) {
        self.sections_visited += other.sections_visited;
        self.sections_without_resources += other.sections_without_resources;
        self.files_downloaded += other.files_downloaded;
        self.bytes_written += other.bytes_written;
        self.already_present += other.already_present;
        self.failed_links += other.failed_links;
    }

    pub fn links_seen(&self) -> usize {
        self.files_downloaded + self.already_present + self.failed_links
    }
}
