use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use moodler_core::{LinkOutcome, RunSummary, SkipReason};
use moodler_engine::{EventSink, ScrapeEvent};

/// Prints one status line per fetched page and per link, in the form
/// `Fetching course 5 ... OK`.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl EventSink for ConsoleReporter {
    fn emit(&self, event: ScrapeEvent) {
        match event {
            ScrapeEvent::FetchingCourse { course } => {
                begin(format_args!("Fetching course {course} ... "))
            }
            ScrapeEvent::FetchingSection { course, section } => {
                begin(format_args!("Fetching course {course} section {section} ... "))
            }
            ScrapeEvent::CourseFetched { .. } | ScrapeEvent::SectionFetched { .. } => {
                println!("{}", green("OK"))
            }
            ScrapeEvent::NoSections { .. } => println!("{}", yellow("no sections found")),
            ScrapeEvent::NoResources { .. } => {
                println!("{}", yellow("no resource links found"))
            }
            ScrapeEvent::Downloading { name } => begin(format_args!("Downloading \"{name}\" ... ")),
            ScrapeEvent::LinkFinished { outcome, .. } => match outcome {
                LinkOutcome::Downloaded { path, .. } => {
                    println!("{} ... {}", file_name(&path), green("done"))
                }
                LinkOutcome::Skipped(SkipReason::AlreadyExists { path }) => {
                    println!("{} ... {}", file_name(&path), yellow("already exists"))
                }
                LinkOutcome::Skipped(reason @ SkipReason::NoRedirect { .. }) => {
                    println!("{}", yellow(&reason))
                }
                LinkOutcome::Skipped(reason) => println!("{}", red(&reason)),
            },
        }
    }
}

pub fn summary(summary: &RunSummary) {
    println!(
        "Finished: {} downloaded ({} bytes), {} already present, {} failed, {} section(s) visited",
        summary.files_downloaded,
        summary.bytes_written,
        summary.already_present,
        summary.failed_links,
        summary.sections_visited,
    );
}

pub fn fatal(message: impl Display) {
    eprintln!(
        "{}",
        message
            .to_string()
            .if_supports_color(Stream::Stderr, |text| text.red())
    );
}

fn begin(line: std::fmt::Arguments<'_>) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_fmt(line);
    let _ = stdout.flush();
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn green(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |text| text.green())
        .to_string()
}

fn yellow(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |text| text.yellow())
        .to_string()
}

fn red(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |text| text.red())
        .to_string()
}
