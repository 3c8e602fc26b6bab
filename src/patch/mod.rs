//! Line-buffer patch engine
//!
//! A target file is scanned line by line. Lines matching an anchor pattern
//! are handed to a [`LinePolicy`], which writes whatever it wants into the
//! output buffer and answers with an [`EditDecision`]. Everything else is
//! copied through untouched.
//!
//! A file is either rewritten in full or not touched at all: when the policy
//! reports the desired state is already present, nothing is written.

pub mod buffer;

pub use buffer::{indentation, line_ending, strip_line_ending, LineBuffer, Newline};

use crate::error::{AddVersionError, Result};
use regex::{Captures, Regex};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// What a policy decided for one anchor line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDecision {
    /// The file already reflects the new version; stop and write nothing
    UpToDate,
    /// The edit has been written into the buffer; copy the rest verbatim
    Applied,
    /// Not yet; the policy has appended the line itself and wants to see
    /// later anchors
    Pending,
}

/// Per-artifact insertion rule
///
/// Called only for lines matching the anchor pattern. The current line has
/// not been added to `buffer`; the policy is responsible for emitting it
/// (unchanged, rewritten, or surrounded by new content) unless it returns
/// [`EditDecision::UpToDate`].
pub trait LinePolicy {
    fn edit(&mut self, buffer: &mut LineBuffer, caps: &Captures<'_>, line: &str) -> EditDecision;
}

impl<F> LinePolicy for F
where
    F: FnMut(&mut LineBuffer, &Captures<'_>, &str) -> EditDecision,
{
    fn edit(&mut self, buffer: &mut LineBuffer, caps: &Captures<'_>, line: &str) -> EditDecision {
        self(buffer, caps, line)
    }
}

/// Result of running a policy over an in-memory buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    UpToDate,
    Changed(LineBuffer),
    /// No anchor line led to an applied edit
    AnchorMissing,
}

/// Single pass of `policy` over `input`
pub fn patch_buffer<P>(input: &LineBuffer, pattern: &Regex, policy: &mut P) -> PatchOutcome
where
    P: LinePolicy + ?Sized,
{
    let mut output = input.empty_like();
    let mut applied = false;

    for (index, line) in input.lines().iter().enumerate() {
        if !applied {
            if let Some(caps) = pattern.captures(line) {
                let decision = policy.edit(&mut output, &caps, line);
                debug!(line = index + 1, ?decision, "anchor matched");
                match decision {
                    EditDecision::UpToDate => return PatchOutcome::UpToDate,
                    EditDecision::Applied => applied = true,
                    EditDecision::Pending => {}
                }
                continue;
            }
        }
        output.push(line.as_str());
    }

    if applied {
        PatchOutcome::Changed(output)
    } else {
        PatchOutcome::AnchorMissing
    }
}

/// Apply `policy` to the file at `path`
///
/// Returns `true` if the file content changed. A missing anchor is a
/// [`AddVersionError::PatternNotFound`].
pub fn update_file<P>(path: &Path, pattern: &Regex, policy: &mut P) -> Result<bool>
where
    P: LinePolicy + ?Sized,
{
    let original = LineBuffer::read(path)?;

    match patch_buffer(&original, pattern, policy) {
        PatchOutcome::UpToDate => {
            debug!(path = %path.display(), "already up to date");
            Ok(false)
        }
        PatchOutcome::AnchorMissing => Err(AddVersionError::pattern_not_found(
            path,
            pattern.as_str(),
        )),
        PatchOutcome::Changed(patched) => {
            if patched == original {
                debug!(path = %path.display(), "edit produced identical content");
                return Ok(false);
            }
            atomic_write(path, patched.render().as_bytes())?;
            debug!(path = %path.display(), lines = patched.len(), "written");
            Ok(true)
        }
    }
}

/// Write through a temp file in the same directory, then rename over `path`
fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
