use std::fmt;

use moodler_core::{CourseId, LinkOutcome, SectionId};

use crate::markup::MarkupError;
use crate::persist::PersistError;

/// Progress reported while a run walks courses, sections and links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    FetchingCourse {
        course: CourseId,
    },
    CourseFetched {
        course: CourseId,
        sections: Vec<SectionId>,
    },
    NoSections {
        course: CourseId,
    },
    FetchingSection {
        course: CourseId,
        section: SectionId,
    },
    SectionFetched {
        course: CourseId,
        section: SectionId,
        resources: usize,
    },
    NoResources {
        course: CourseId,
        section: SectionId,
    },
    Downloading {
        name: String,
    },
    LinkFinished {
        name: String,
        outcome: LinkOutcome,
    },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ScrapeEvent);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidCredential,
    Timeout,
    RedirectLimitExceeded,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidCredential => write!(f, "invalid session credential"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failures that abort the whole run.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("{status} {reason} ({url})")]
    PageStatus {
        url: String,
        status: u16,
        reason: String,
    },
    #[error("not enrolled or not authorized ({url})")]
    NotAuthorized { url: String },
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error(transparent)]
    Markup(#[from] MarkupError),
    #[error("invalid section link pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
