use std::path::PathBuf;

use moodler_core::{LinkOutcome, RunSummary, ScrapeTarget, SkipReason};
use pretty_assertions::assert_eq;

#[test]
fn existing_files_are_not_failures() {
    let mut summary = RunSummary::default();
    summary.record(&LinkOutcome::Downloaded {
        path: PathBuf::from("courses/1/1/a.pdf"),
        bytes: 10,
    });
    summary.record(&LinkOutcome::Skipped(SkipReason::AlreadyExists {
        path: PathBuf::from("courses/1/1/b.pdf"),
    }));
    summary.record(&LinkOutcome::Skipped(SkipReason::MissingLocation));

    assert_eq!(summary.files_downloaded, 1);
    assert_eq!(summary.bytes_written, 10);
    assert_eq!(summary.already_present, 1);
    assert_eq!(summary.failed_links, 1);
    assert_eq!(summary.links_seen(), 3);
}

#[test]
fn merge_adds_every_counter() {
    let mut total = RunSummary {
        sections_visited: 1,
        files_downloaded: 2,
        bytes_written: 5,
        ..RunSummary::default()
    };
    total.merge(RunSummary {
        sections_visited: 1,
        sections_without_resources: 1,
        failed_links: 3,
        bytes_written: 7,
        ..RunSummary::default()
    });
    assert_eq!(
        total,
        RunSummary {
            sections_visited: 2,
            sections_without_resources: 1,
            files_downloaded: 2,
            bytes_written: 12,
            already_present: 0,
            failed_links: 3,
        }
    );
}

#[test]
fn skip_reasons_render_like_console_messages() {
    let reason = SkipReason::NoRedirect {
        status: 200,
        reason: "OK".into(),
    };
    assert_eq!(reason.to_string(), "no redirect (200 OK)");
    assert_eq!(
        ScrapeTarget::new(3, Some(0)).to_string(),
        "course 3 section 0"
    );
    assert_eq!(ScrapeTarget::new(3, None), ScrapeTarget::Course(3));
}
