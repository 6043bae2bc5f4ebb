use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// `-h` selects the host, so help lives on `-?` / `--help`.
#[derive(Parser, Debug)]
#[command(
    name = "moodler",
    version,
    about = "Scrapes resource files from Moodle course sections",
    long_about = "Scrapes resource files from Moodle course sections into \
        <output>/<course_id>/<section_id>/. When only a course ID is given, \
        every section linked from the course page is scraped.",
    disable_help_flag = true
)]
pub struct Cli {
    /// The host to connect to (https is assumed unless a scheme is given).
    #[arg(short = 'h', long, value_name = "HOST")]
    pub host: Option<String>,

    /// The Moodle session token. Prefix with @ to read it from a file.
    #[arg(short = 't', long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// The ID of the course to scrape.
    #[arg(short = 'c', long = "course", value_name = "COURSE_ID")]
    pub course: u64,

    /// The ID of a single section to scrape.
    #[arg(short = 's', long = "section", value_name = "SECTION_ID")]
    pub section: Option<u64>,

    /// Root directory for downloaded files [default: courses].
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// RON file with default host, token and output directory [default: moodler.ron].
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write log records to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log debug details to the terminal.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print help.
    #[allow(dead_code)]
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}
