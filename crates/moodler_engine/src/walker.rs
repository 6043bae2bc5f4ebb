use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;
use url::Url;

use engine_logging::{engine_debug, engine_info};
use moodler_core::{
    CourseId, LinkOutcome, MoodleSite, ResourceLink, RunSummary, ScrapeTarget, SectionId,
};

use crate::{
    decode_page, download_resource, ensure_output_dir, EventSink, HtmlDocument, HttpClient,
    Markup, MarkupError, RedirectMode, ScrapeError, ScrapeEvent,
};

/// Text Moodle shows instead of course content to users who are not enrolled.
pub const ENROLMENT_SENTINEL: &str = "Enrolment options";

/// Resource anchors on a single-section page.
pub const RESOURCE_SELECTOR: &str = ".single-section .activity.resource a[href]";

/// Matches section links of `course` and captures the section number.
pub fn section_link_pattern(course: CourseId) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"^.*course/view\.php\?id={course}&section=(\d+)$"
    ))
}

/// Unique section ids linked from a course page, ascending.
pub fn discover_sections(
    page: &dyn Markup,
    course: CourseId,
) -> Result<BTreeSet<SectionId>, ScrapeError> {
    let pattern = section_link_pattern(course)?;
    Ok(page
        .find_anchors_by_href(&pattern)?
        .iter()
        .filter_map(|anchor| pattern.captures(&anchor.href))
        .filter_map(|captures| captures.get(1)?.as_str().parse().ok())
        .collect())
}

/// Resource links of a section page, in document order.
pub fn resource_links(page: &dyn Markup) -> Result<Vec<ResourceLink>, MarkupError> {
    Ok(page
        .select_anchors(RESOURCE_SELECTOR)?
        .into_iter()
        .map(|anchor| ResourceLink {
            name: anchor.text,
            href: anchor.href,
        })
        .collect())
}

/// Walks a course or a single section and downloads every resource found,
/// one request at a time.
pub struct Scraper<'a> {
    client: &'a dyn HttpClient,
    site: &'a MoodleSite,
    output_root: &'a Path,
    sink: &'a dyn EventSink,
}

impl<'a> Scraper<'a> {
    pub fn new(
        client: &'a dyn HttpClient,
        site: &'a MoodleSite,
        output_root: &'a Path,
        sink: &'a dyn EventSink,
    ) -> Self {
        Self {
            client,
            site,
            output_root,
            sink,
        }
    }

    pub async fn run(&self, target: ScrapeTarget) -> Result<RunSummary, ScrapeError> {
        engine_info!("Scraping {}", target);
        match target {
            ScrapeTarget::Course(course) => self.scrape_course(course).await,
            ScrapeTarget::Section { course, section } => {
                self.scrape_section(course, section).await
            }
        }
    }

    pub async fn scrape_course(&self, course: CourseId) -> Result<RunSummary, ScrapeError> {
        let url = self.site.course_url(course);
        self.sink.emit(ScrapeEvent::FetchingCourse { course });
        let html = self.fetch_page(&url).await?;
        let sections = inspect_course_page(&html, &url, course)?;

        let mut summary = RunSummary::default();
        if sections.is_empty() {
            engine_info!("Course {} links no sections", course);
            self.sink.emit(ScrapeEvent::NoSections { course });
            return Ok(summary);
        }
        self.sink.emit(ScrapeEvent::CourseFetched {
            course,
            sections: sections.iter().copied().collect(),
        });

        for section in sections {
            summary.merge(self.scrape_section(course, section).await?);
        }
        Ok(summary)
    }

    pub async fn scrape_section(
        &self,
        course: CourseId,
        section: SectionId,
    ) -> Result<RunSummary, ScrapeError> {
        let url = self.site.section_url(course, section);
        self.sink
            .emit(ScrapeEvent::FetchingSection { course, section });
        let html = self.fetch_page(&url).await?;
        let links = inspect_section_page(&html, &url)?;

        let mut summary = RunSummary {
            sections_visited: 1,
            ..RunSummary::default()
        };
        if links.is_empty() {
            engine_info!("Course {} section {} has no resource links", course, section);
            summary.sections_without_resources = 1;
            self.sink.emit(ScrapeEvent::NoResources { course, section });
            return Ok(summary);
        }
        self.sink.emit(ScrapeEvent::SectionFetched {
            course,
            section,
            resources: links.len(),
        });

        let dir = self
            .output_root
            .join(course.to_string())
            .join(section.to_string());
        ensure_output_dir(&dir)?;

        for link in &links {
            self.sink.emit(ScrapeEvent::Downloading {
                name: link.name.clone(),
            });
            let outcome = download_resource(self.client, &url, link, &dir).await?;
            if let LinkOutcome::Skipped(reason) = &outcome {
                if !reason.is_already_present() {
                    engine_info!("Skipped \"{}\" ({}): {}", link.name, link.href, reason);
                }
            }
            summary.record(&outcome);
            self.sink.emit(ScrapeEvent::LinkFinished {
                name: link.name.clone(),
                outcome,
            });
        }
        Ok(summary)
    }

    async fn fetch_page(&self, url: &Url) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url, RedirectMode::Follow)
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: url.to_string(),
                source,
            })?;
        if response.status != 200 {
            return Err(ScrapeError::PageStatus {
                url: url.to_string(),
                status: response.status,
                reason: response.reason,
            });
        }
        let page = decode_page(&response.body, response.content_type());
        engine_debug!("Decoded {} as {}", url, page.encoding_label);
        Ok(page.html)
    }
}

// The parsed document is not `Send`; keep it out of the async frames.
fn inspect_course_page(
    html: &str,
    url: &Url,
    course: CourseId,
) -> Result<BTreeSet<SectionId>, ScrapeError> {
    let page = HtmlDocument::parse(html);
    ensure_enrolled(&page, url)?;
    discover_sections(&page, course)
}

fn inspect_section_page(html: &str, url: &Url) -> Result<Vec<ResourceLink>, ScrapeError> {
    let page = HtmlDocument::parse(html);
    ensure_enrolled(&page, url)?;
    Ok(resource_links(&page)?)
}

fn ensure_enrolled(page: &dyn Markup, url: &Url) -> Result<(), ScrapeError> {
    if page.contains_text(ENROLMENT_SENTINEL) {
        return Err(ScrapeError::NotAuthorized {
            url: url.to_string(),
        });
    }
    Ok(())
}
