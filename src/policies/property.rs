use crate::domain::Version;
use crate::error::Result;
use crate::patch::{line_ending, update_file, EditDecision, LineBuffer, LinePolicy};
use crate::policies::token_matcher;
use regex::{Captures, Regex};
use std::path::Path;

/// Anchor for the `key=value` line of a single property
pub fn property_pattern(key: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"^\s*{}\s*[=:](.*)", regex::escape(key)))?)
}

/// Replaces the value of one property with the new version
pub struct PropertyPolicy<'a> {
    key: &'a str,
    dot: String,
    present: Regex,
}

impl<'a> PropertyPolicy<'a> {
    pub fn new(key: &'a str, new_version: &Version) -> Result<Self> {
        let dot = new_version.dot();
        Ok(PropertyPolicy {
            key,
            present: token_matcher(&dot)?,
            dot,
        })
    }
}

impl LinePolicy for PropertyPolicy<'_> {
    fn edit(&mut self, buffer: &mut LineBuffer, _caps: &Captures<'_>, line: &str) -> EditDecision {
        if self.present.is_match(line) {
            return EditDecision::UpToDate;
        }
        buffer.push(format!("{}={}{}", self.key, self.dot, line_ending(line)));
        EditDecision::Applied
    }
}

/// Point the build version property at `new_version`
pub fn update_build_version(path: &Path, key: &str, new_version: &Version) -> Result<bool> {
    let pattern = property_pattern(key)?;
    let mut policy = PropertyPolicy::new(key, new_version)?;
    update_file(path, &pattern, &mut policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::{patch_buffer, PatchOutcome};

    fn run(text: &str, version: Version) -> PatchOutcome {
        let input = LineBuffer::from_text(text);
        let mut policy = PropertyPolicy::new("version.base", &version).unwrap();
        patch_buffer(&input, &property_pattern("version.base").unwrap(), &mut policy)
    }

    #[test]
    fn test_value_replaced() {
        let outcome = run("# build\nversion.base=9.1.0\nversion.suffix=SNAPSHOT\n", Version::new(9, 2, 0));
        let PatchOutcome::Changed(out) = outcome else {
            panic!("expected a change");
        };
        assert_eq!(
            out.render(),
            "# build\nversion.base=9.2.0\nversion.suffix=SNAPSHOT\n"
        );
    }

    #[test]
    fn test_same_value_is_up_to_date() {
        assert_eq!(
            run("version.base=9.2.0\n", Version::new(9, 2, 0)),
            PatchOutcome::UpToDate
        );
    }

    #[test]
    fn test_key_must_match_exactly() {
        assert_eq!(
            run("versionXbase=9.1.0\nversion.base.extra=1\n", Version::new(9, 2, 0)),
            PatchOutcome::AnchorMissing
        );
    }

    #[test]
    fn test_unterminated_last_line_stays_unterminated() {
        let PatchOutcome::Changed(out) = run("version.base = 9.1.0", Version::new(9, 2, 0)) else {
            panic!("expected a change");
        };
        assert_eq!(out.render(), "version.base=9.2.0");
    }
}
