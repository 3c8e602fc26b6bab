use crate::domain::Version;
use crate::error::Result;
use crate::patch::{indentation, update_file, EditDecision, LineBuffer, LinePolicy};
use crate::policies::token_matcher;
use regex::{Captures, Regex};
use std::path::Path;

/// How version constants are spelled in the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantStyle {
    /// Text preceding the constant name, e.g. "public static final Version "
    pub declaration: String,
    /// Constant name prefix, e.g. "LUCENE"
    pub constant_prefix: String,
    /// Product name used in doc comments
    pub product: String,
    /// Right-hand side of a declaration; `{major}`, `{minor}`, `{bugfix}`
    /// and `{version}` are substituted
    pub initializer: String,
}

impl ConstantStyle {
    pub fn constant_name(&self, version: &Version) -> String {
        version.constant(&self.constant_prefix)
    }

    /// Literal text every version-constant declaration starts with
    pub fn declaration_prefix(&self) -> String {
        format!(
            "{}{}_",
            self.declaration,
            self.constant_prefix.to_uppercase()
        )
    }

    /// Anchor matching any version-constant declaration
    pub fn declaration_pattern(&self) -> Result<Regex> {
        Ok(Regex::new(&regex::escape(&self.declaration_prefix()))?)
    }

    pub fn initializer_for(&self, version: &Version) -> String {
        self.initializer
            .replace("{major}", &version.major.to_string())
            .replace("{minor}", &version.minor.to_string())
            .replace("{bugfix}", &version.bugfix.to_string())
            .replace("{version}", &version.dot())
    }
}

/// Progress of [`ConstantPolicy`] through one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantState {
    Searching,
    /// Previous release seen; new block goes at `insert_at`
    FoundPrevious { insert_at: usize },
    Inserted,
    /// The new constant already exists
    AlreadyPresent,
}

/// Declares a constant for a new release after the previous release's
/// declarations, deprecating those as it passes them.
///
/// The new block is spliced in once the first declaration after the run of
/// previous-release constants is reached.
pub struct ConstantPolicy<'a> {
    new_version: Version,
    style: &'a ConstantStyle,
    deprecate: bool,
    present: Regex,
    previous: Regex,
    latest_tail: Regex,
    state: ConstantState,
}

impl<'a> ConstantPolicy<'a> {
    /// `deprecate` marks the new constant itself deprecated, for back-compat
    /// releases that are not the latest.
    pub fn new(new_version: &Version, style: &'a ConstantStyle, deprecate: bool) -> Result<Self> {
        Ok(ConstantPolicy {
            new_version: *new_version,
            style,
            deprecate,
            present: token_matcher(&style.constant_name(new_version))?,
            previous: new_version.make_previous_matcher(&style.declaration_prefix(), "_")?,
            latest_tail: Regex::new(&format!(r"for {}\.?\s*$", regex::escape(&style.product)))?,
            state: ConstantState::Searching,
        })
    }

    pub fn state(&self) -> ConstantState {
        self.state
    }

    /// Rewrite the doc comment preceding a previous-release declaration so
    /// it carries a deprecation marker and no "latest" wording.
    fn ensure_deprecated(&self, buffer: &mut LineBuffer, declaration: &str) {
        if declaration.contains("@Deprecated") {
            return;
        }
        let last = buffer.last().map(|line| line.trim().to_string()).unwrap_or_default();
        if last == "@Deprecated" {
            return;
        }

        let indent = indentation(declaration).to_string();
        if !last.ends_with("*/") || doc_is_deprecated(buffer) {
            buffer.push_text(&format!("{}@Deprecated\n", indent));
            return;
        }

        buffer.pop();
        let ends_with_latest = buffer
            .last()
            .map(|line| self.latest_tail.is_match(line))
            .unwrap_or(false);
        if ends_with_latest && buffer.len() >= 2 {
            // the "latest" paragraph opens with <p> and spans at most three lines
            let end = buffer.len();
            let start = end.saturating_sub(3);
            let cut = (start..end)
                .rev()
                .find(|&i| buffer.lines()[i].contains("<p>"))
                .unwrap_or(end - 1);
            buffer.truncate(cut);
        }

        buffer.push_text(&format!(
            "{0} * @deprecated ({1}) Use latest\n{0} */\n{0}@Deprecated\n",
            indent, self.new_version
        ));
    }

    fn declaration_block(&self, buffer: &LineBuffer, boundary: &str) -> LineBuffer {
        let indent = indentation(boundary);
        let mut block = buffer.empty_like();

        block.push_text(&format!(
            "\n{0}/**\n{0} * Match settings and bugs in {1}'s {2} release.\n",
            indent, self.style.product, self.new_version
        ));
        if self.deprecate {
            block.push_text(&format!("{} * @deprecated Use latest\n", indent));
        } else {
            block.push_text(&format!(
                "{} * <p>Use this to get the latest &amp; greatest settings, bug fixes, etc, for {}.\n",
                indent, self.style.product
            ));
        }
        block.push_text(&format!("{} */\n", indent));
        if self.deprecate {
            block.push_text(&format!("{}@Deprecated\n", indent));
        }
        block.push_text(&format!(
            "{}{}{} = {};\n",
            indent,
            self.style.declaration,
            self.style.constant_name(&self.new_version),
            self.style.initializer_for(&self.new_version)
        ));
        block
    }
}

/// Whether the doc comment ending at the last buffered line has a
/// `@deprecated` tag
fn doc_is_deprecated(buffer: &LineBuffer) -> bool {
    for line in buffer.lines().iter().rev() {
        if line.contains("@deprecated") {
            return true;
        }
        if line.trim_start().starts_with("/**") {
            return false;
        }
    }
    false
}

impl LinePolicy for ConstantPolicy<'_> {
    fn edit(&mut self, buffer: &mut LineBuffer, _caps: &Captures<'_>, line: &str) -> EditDecision {
        if self.present.is_match(line) {
            self.state = ConstantState::AlreadyPresent;
            return EditDecision::UpToDate;
        }

        if self.previous.is_match(line) {
            self.ensure_deprecated(buffer, line);
            buffer.push(line);
            self.state = ConstantState::FoundPrevious {
                insert_at: buffer.len(),
            };
            return EditDecision::Pending;
        }

        if let ConstantState::FoundPrevious { insert_at } = self.state {
            let block = self.declaration_block(buffer, line);
            buffer.splice(insert_at, block);
            buffer.push(line);
            self.state = ConstantState::Inserted;
            return EditDecision::Applied;
        }

        buffer.push(line);
        EditDecision::Pending
    }
}

/// Declare a constant for `new_version` in the source file at `path`
pub fn add_constant(
    path: &Path,
    new_version: &Version,
    style: &ConstantStyle,
    deprecate: bool,
) -> Result<bool> {
    let pattern = style.declaration_pattern()?;
    let mut policy = ConstantPolicy::new(new_version, style, deprecate)?;
    update_file(path, &pattern, &mut policy)
}
