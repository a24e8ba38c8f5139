//! Site content.
//!
//! Text pages are bundled into the binary; project records can be replaced
//! at startup. The [`Catalog`] is built once and shared read-only by every
//! session.

use termfolio_core::{Project, projects::parse_projects};

const HOME: &str = include_str!("../content/home.txt");
const RESUME: &str = include_str!("../content/resume.txt");
const CONTACT: &str = include_str!("../content/contact.txt");
const PROJECTS: &str = include_str!("../content/projects.txt");

/// Read-only content shown by every session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    home: String,
    resume: String,
    contact: String,
    projects: Vec<Project>,
}

impl Catalog {
    /// Bundled pages and projects.
    pub fn bundled() -> Self {
        Self::with_project_records(PROJECTS)
    }

    /// Bundled pages with projects parsed from `records`.
    ///
    /// Malformed records are skipped.
    pub fn with_project_records(records: &str) -> Self {
        Self::with_projects(parse_projects(records))
    }

    /// Bundled pages with the given projects.
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            home: HOME.trim_end().to_string(),
            resume: RESUME.trim_end().to_string(),
            contact: CONTACT.trim_end().to_string(),
            projects,
        }
    }

    /// Home page introduction.
    pub fn home(&self) -> &str {
        &self.home
    }

    /// Resume page.
    pub fn resume(&self) -> &str {
        &self.resume
    }

    /// Contact page.
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Projects in file order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::bundled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_projects_parse() {
        let catalog = Catalog::bundled();

        assert_eq!(catalog.projects().len(), 4);
        assert_eq!(catalog.projects()[0].title, "termfolio");
        assert_eq!(catalog.projects()[3].number, 4);
    }

    #[test]
    fn bundled_pages_are_not_empty() {
        let catalog = Catalog::bundled();

        assert!(!catalog.home().is_empty());
        assert!(!catalog.resume().is_empty());
        assert!(!catalog.contact().is_empty());
    }
}
