use std::path::{Path, PathBuf};

use url::Url;

use engine_logging::{engine_debug, engine_info};
use moodler_core::{filename_from_location, LinkOutcome, ResourceLink, SkipReason};

use crate::{AtomicFileWriter, HttpClient, PersistError, RedirectMode};

/// Resolve one resource link and store the file it points at under `dir`.
///
/// The link is expected to answer with a redirect; its `Location` names the
/// file and is fetched as a second, separate request. Every per-link problem
/// comes back as `LinkOutcome::Skipped`; only failing to write into `dir`
/// is an error.
pub async fn download_resource(
    client: &dyn HttpClient,
    page_url: &Url,
    link: &ResourceLink,
    dir: &Path,
) -> Result<LinkOutcome, PersistError> {
    let Ok(href) = page_url.join(&link.href) else {
        return Ok(skipped(SkipReason::InvalidLink {
            href: link.href.clone(),
        }));
    };

    let redirect = match client.get(&href, RedirectMode::Manual).await {
        Ok(response) => response,
        Err(err) => {
            return Ok(skipped(SkipReason::Network {
                message: err.to_string(),
            }))
        }
    };
    if !redirect.is_redirect() {
        return Ok(skipped(SkipReason::NoRedirect {
            status: redirect.status,
            reason: redirect.reason,
        }));
    }
    let Some(location) = redirect.location() else {
        return Ok(skipped(SkipReason::MissingLocation));
    };

    let Some(filename) = filename_from_location(location) else {
        return Ok(skipped(SkipReason::InvalidFilename {
            location: location.to_string(),
        }));
    };
    let target = dir.join(&filename);
    if target.exists() {
        engine_debug!("{} already present, not fetching", target.display());
        return Ok(skipped(SkipReason::AlreadyExists { path: target }));
    }

    let Ok(file_url) = redirect.url.join(location) else {
        return Ok(skipped(SkipReason::InvalidLink {
            href: location.to_string(),
        }));
    };
    let file = match client.get(&file_url, RedirectMode::Follow).await {
        Ok(response) => response,
        Err(err) => {
            return Ok(skipped(SkipReason::Network {
                message: err.to_string(),
            }))
        }
    };
    if file.status != 200 {
        return Ok(skipped(SkipReason::FileStatus {
            status: file.status,
            reason: file.reason,
        }));
    }

    let writer = AtomicFileWriter::new(PathBuf::from(dir));
    match writer.write_new(&filename, &file.body) {
        Ok(path) => {
            engine_info!("Saved {} ({} bytes)", path.display(), file.body.len());
            Ok(LinkOutcome::Downloaded {
                path,
                bytes: file.body.len() as u64,
            })
        }
        Err(PersistError::AlreadyExists(path)) => {
            Ok(skipped(SkipReason::AlreadyExists { path }))
        }
        Err(err) => Err(err),
    }
}

fn skipped(reason: SkipReason) -> LinkOutcome {
    LinkOutcome::Skipped(reason)
}
