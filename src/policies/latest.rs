use crate::domain::Version;
use crate::error::Result;
use crate::patch::{line_ending, strip_line_ending, update_file, EditDecision, LineBuffer, LinePolicy};
use crate::policies::constant::ConstantStyle;
use crate::policies::token_matcher;
use regex::{Captures, Regex};
use std::path::Path;

/// Anchor for the alias declaration, e.g. "public static final Version LATEST"
pub fn alias_pattern(style: &ConstantStyle, alias: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r"{}\b",
        regex::escape(&format!("{}{}", style.declaration, alias))
    ))?)
}

/// Points the "latest" alias at the new version's constant
pub struct LatestAliasPolicy {
    constant: String,
    present: Regex,
}

impl LatestAliasPolicy {
    pub fn new(new_version: &Version, style: &ConstantStyle) -> Result<Self> {
        let constant = style.constant_name(new_version);
        Ok(LatestAliasPolicy {
            present: token_matcher(&constant)?,
            constant,
        })
    }
}

impl LinePolicy for LatestAliasPolicy {
    fn edit(&mut self, buffer: &mut LineBuffer, _caps: &Captures<'_>, line: &str) -> EditDecision {
        if self.present.is_match(line) {
            return EditDecision::UpToDate;
        }

        let content = strip_line_ending(line);
        match content.rfind('=') {
            Some(eq) => {
                buffer.push(format!(
                    "{}= {};{}",
                    &content[..eq],
                    self.constant,
                    line_ending(line)
                ));
                EditDecision::Applied
            }
            None => {
                buffer.push(line);
                EditDecision::Pending
            }
        }
    }
}

/// Rewrite the `alias` declaration in the source file at `path`
pub fn update_latest_constant(
    path: &Path,
    new_version: &Version,
    style: &ConstantStyle,
    alias: &str,
) -> Result<bool> {
    let pattern = alias_pattern(style, alias)?;
    let mut policy = LatestAliasPolicy::new(new_version, style)?;
    update_file(path, &pattern, &mut policy)
}
