//! Project record format.
//!
//! Records are separated by a literal `---`. Inside a record, a line starting
//! with `Title:` sets the title, a line starting with `Number:` sets the
//! ordinal, and every other line belongs to the body. There is no escaping:
//! a body containing `---` is split into two records.

/// Record separator.
pub const RECORD_DELIMITER: &str = "---";

const TITLE_PREFIX: &str = "Title:";
const NUMBER_PREFIX: &str = "Number:";

/// One project entry shown on the projects screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Display title. Never empty.
    pub title: String,
    /// Ordinal from the `Number:` line. Zero when missing or unparseable.
    pub number: i64,
    /// Free text, trimmed.
    pub body: String,
}

/// Parse every well-formed record in `input`.
///
/// Records without a title are skipped; neighbouring records are unaffected.
/// Never fails.
pub fn parse_projects(input: &str) -> Vec<Project> {
    input
        .split(RECORD_DELIMITER)
        .filter_map(|record| {
            let project = parse_record(record);
            if project.is_none() && !record.trim().is_empty() {
                tracing::debug!("skipping project record without a title");
            }
            project
        })
        .collect()
}

fn parse_record(record: &str) -> Option<Project> {
    let mut title = String::new();
    let mut number = 0;
    let mut body_lines = Vec::new();

    for line in record.lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(TITLE_PREFIX) {
            rest.trim().clone_into(&mut title);
        } else if let Some(rest) = trimmed.strip_prefix(NUMBER_PREFIX) {
            number = rest.trim().parse().unwrap_or(0);
        } else {
            body_lines.push(line);
        }
    }

    if title.is_empty() {
        return None;
    }

    Some(Project { title, number, body: body_lines.join("\n").trim().to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_records() {
        let projects =
            parse_projects("Title: A\nNumber: 1\nHello\n---Title: B\nNumber: 2\nWorld\n");

        assert_eq!(projects, vec![
            Project { title: "A".into(), number: 1, body: "Hello".into() },
            Project { title: "B".into(), number: 2, body: "World".into() },
        ]);
    }

    #[test]
    fn record_without_title_is_dropped() {
        let projects =
            parse_projects("Title: A\nNumber: 1\nHello\n---Number: 2\nOrphan\n---Title: C\nBye\n");

        let titles: Vec<_> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["A", "C"]);
    }

    #[test]
    fn bad_number_defaults_to_zero() {
        let projects = parse_projects("Title: A\nNumber: twelve\nBody");
        assert_eq!(projects[0].number, 0);

        let projects = parse_projects("Title: A\nBody");
        assert_eq!(projects[0].number, 0);
    }

    #[test]
    fn body_keeps_inner_blank_lines_and_is_trimmed() {
        let projects = parse_projects("\nTitle: A\n\nFirst paragraph.\n\nSecond paragraph.\n\n");
        assert_eq!(projects[0].body, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn blank_title_counts_as_missing() {
        assert!(parse_projects("Title:   \nBody").is_empty());
    }

    #[test]
    fn delimiter_inside_body_splits_the_record() {
        let projects = parse_projects("Title: A\nuses --- inside\n");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].body, "uses");
    }
}
