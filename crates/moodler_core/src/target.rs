use std::fmt;

pub type CourseId = u64;
pub type SectionId = u64;

/// What a single run scrapes: every discovered section of a course, or one
/// explicit section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeTarget {
    Course(CourseId),
    Section {
        course: CourseId,
        section: SectionId,
    },
}

impl ScrapeTarget {
    pub fn new(course: CourseId, section: Option<SectionId>) -> Self {
        match section {
            Some(section) => ScrapeTarget::Section { course, section },
            None => ScrapeTarget::Course(course),
        }
    }
}

impl fmt::Display for ScrapeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeTarget::Course(course) => write!(f, "course {course}"),
            ScrapeTarget::Section { course, section } => {
                write!(f, "course {course} section {section}")
            }
        }
    }
}
