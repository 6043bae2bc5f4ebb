use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE, LOCATION, USER_AGENT};
use reqwest::redirect::Policy;
use url::Url;

use engine_logging::engine_debug;
use moodler_core::SessionCredential;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Hops followed by `RedirectMode::Follow` before giving up.
    pub redirect_limit: usize,
    pub user_agent: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            redirect_limit: 10,
            user_agent: Some(concat!("moodler/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    Follow,
    /// Return 3xx responses untouched, `Location` included.
    Manual,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Final URL after any followed redirects.
    pub url: Url,
    pub status: u16,
    pub reason: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Non-empty `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.header_str(LOCATION.as_str())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header_str(CONTENT_TYPE.as_str())
    }

    fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Authenticated GET access to the Moodle host and its file URLs.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url, redirects: RedirectMode) -> Result<HttpResponse, FetchError>;
}

/// `HttpClient` over reqwest. The session cookie is a default header so it
/// rides along on every request, redirected hops included.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    following: reqwest::Client,
    manual: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(credential: &SessionCredential, settings: FetchSettings) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let mut cookie = HeaderValue::from_str(&credential.cookie_header())
            .map_err(|err| FetchError::new(FailureKind::InvalidCredential, err.to_string()))?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);
        if let Some(agent) = settings.user_agent.as_deref() {
            let agent = HeaderValue::from_str(agent)
                .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
            headers.insert(USER_AGENT, agent);
        }

        let following = build_client(headers.clone(), Policy::limited(settings.redirect_limit))?;
        let manual = build_client(headers, Policy::none())?;
        Ok(Self { following, manual })
    }
}

fn build_client(headers: HeaderMap, policy: Policy) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .default_headers(headers)
        .redirect(policy)
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &Url, redirects: RedirectMode) -> Result<HttpResponse, FetchError> {
        let client = match redirects {
            RedirectMode::Follow => &self.following,
            RedirectMode::Manual => &self.manual,
        };
        engine_debug!("GET {} ({:?})", url, redirects);

        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let final_url = response.url().clone();
        let headers = response.headers().clone();

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            body.extend_from_slice(&chunk);
        }
        engine_debug!("{} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse {
            url: final_url,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
