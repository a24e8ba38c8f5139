//! Displayable list entries.

use termfolio_core::Project;

use crate::BlogPost;

/// Anything shown as an entry in a list or a section of a page.
pub trait DisplayItem {
    /// One-line heading.
    fn title(&self) -> &str;

    /// Short summary shown under the title.
    fn description(&self) -> String;

    /// Text matched against the list filter.
    fn filter_value(&self) -> &str;

    /// Full text shown when the item is opened.
    fn detail(&self) -> &str;
}

impl DisplayItem for Project {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> String {
        let first_line = self.body.lines().next().unwrap_or_default();
        format!("#{} {first_line}", self.number)
    }

    fn filter_value(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> &str {
        &self.body
    }
}

impl DisplayItem for BlogPost {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> String {
        self.summary.clone()
    }

    fn filter_value(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> &str {
        &self.body
    }
}
