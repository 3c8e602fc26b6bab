use crate::domain::Version;
use crate::error::Result;
use crate::patch::{update_file, EditDecision, LineBuffer, LinePolicy};
use crate::policies::token_matcher;
use regex::{Captures, Regex};
use std::path::Path;

/// Anchor for release section headers such as "======= Lucene 9.1.0 ======="
pub fn header_pattern() -> Result<Regex> {
    Ok(Regex::new(r"\d+\.\d+\.\d+\s+===")?)
}

/// Adds a section for a new release above the previous release's header
///
/// The previous header is copied with its version replaced, followed by
/// `init_changes` and one "(No changes)" placeholder per section name. The
/// old header stays below as history.
pub struct ChangelogPolicy<'a> {
    dot: String,
    present: Regex,
    previous: Regex,
    init_changes: &'a str,
    sections: &'a [String],
}

impl<'a> ChangelogPolicy<'a> {
    pub fn new(new_version: &Version, init_changes: &'a str, sections: &'a [String]) -> Result<Self> {
        let dot = new_version.dot();
        Ok(ChangelogPolicy {
            present: token_matcher(&dot)?,
            previous: new_version.previous_dot_matcher()?,
            dot,
            init_changes,
            sections,
        })
    }
}

impl LinePolicy for ChangelogPolicy<'_> {
    fn edit(&mut self, buffer: &mut LineBuffer, _caps: &Captures<'_>, line: &str) -> EditDecision {
        if self.present.is_match(line) {
            return EditDecision::UpToDate;
        }

        let Some(previous) = self.previous.captures(line).and_then(|caps| caps.get(1)) else {
            buffer.push(line);
            return EditDecision::Pending;
        };

        buffer.push(format!(
            "{}{}{}",
            &line[..previous.start()],
            self.dot,
            &line[previous.end()..]
        ));
        buffer.push_text(self.init_changes);
        for section in self.sections {
            buffer.push_text(&format!(
                "{}\n---------------------\n(No changes)\n\n",
                section
            ));
        }
        buffer.push(line);
        EditDecision::Applied
    }
}

/// Add a section for `new_version` to the changelog at `path`
pub fn update_changes(
    path: &Path,
    new_version: &Version,
    init_changes: &str,
    sections: &[String],
) -> Result<bool> {
    let pattern = header_pattern()?;
    let mut policy = ChangelogPolicy::new(new_version, init_changes, sections)?;
    update_file(path, &pattern, &mut policy)
}
