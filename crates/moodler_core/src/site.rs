use thiserror::Error;
use url::Url;

use crate::{CourseId, SectionId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteError {
    #[error("a host must be provided")]
    Empty,
    #[error("invalid host {host}: {message}")]
    Invalid { host: String, message: String },
    #[error("unsupported scheme {0}, expected http or https")]
    UnsupportedScheme(String),
}

/// Base URL of a Moodle installation plus the page URLs the walkers fetch.
///
/// A bare host (`moodle.example.edu`, optionally with a path prefix such as
/// `example.edu/lms`) is reached over https. A value carrying an explicit
/// `http://` or `https://` scheme is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodleSite {
    base: Url,
}

impl MoodleSite {
    pub fn from_host(host: &str) -> Result<Self, SiteError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(SiteError::Empty);
        }
        let raw = if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };
        let base = Url::parse(&raw).map_err(|err| SiteError::Invalid {
            host: host.to_string(),
            message: err.to_string(),
        })?;
        Self::from_base_url(base)
    }

    pub fn from_base_url(mut base: Url) -> Result<Self, SiteError> {
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SiteError::UnsupportedScheme(base.scheme().to_string()));
        }
        if base.host_str().is_none() {
            return Err(SiteError::Invalid {
                host: base.to_string(),
                message: "missing host".into(),
            });
        }
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `<base>/course/view.php?id=<course>`
    pub fn course_url(&self, course: CourseId) -> Url {
        self.view_url(&format!("id={course}"))
    }

    /// `<base>/course/view.php?id=<course>&section=<section>`
    pub fn section_url(&self, course: CourseId, section: SectionId) -> Url {
        self.view_url(&format!("id={course}&section={section}"))
    }

    fn view_url(&self, query: &str) -> Url {
        let mut url = self.base.clone();
        let path = format!("{}course/view.php", self.base.path());
        url.set_path(&path);
        url.set_query(Some(query));
        url
    }
}
