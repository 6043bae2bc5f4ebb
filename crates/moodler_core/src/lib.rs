//! Moodler core: pure domain types shared by the engine and the binary.
mod config;
mod credential;
mod filename;
mod outcome;
mod resource;
mod site;
mod target;

pub use config::{ScrapeConfig, DEFAULT_OUTPUT_ROOT};
pub use credential::{CredentialError, SessionCredential, SESSION_COOKIE};
pub use filename::filename_from_location;
pub use outcome::{LinkOutcome, RunSummary, SkipReason};
pub use resource::ResourceLink;
pub use site::{MoodleSite, SiteError};
pub use target::{CourseId, ScrapeTarget, SectionId};
