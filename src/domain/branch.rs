use crate::error::{AddVersionError, Result};
use regex::Regex;
use std::fmt;

/// Classification of the branch a release is being prepared on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchType {
    /// `main`
    Unstable,
    /// `branch_<major>x`
    Stable,
    /// `branch_<major>_<minor>`
    Release,
}

impl BranchType {
    /// Classify a branch by name
    ///
    /// Feature branches have no classification and are rejected.
    pub fn from_branch_name(name: &str) -> Result<Self> {
        if name == "main" {
            return Ok(BranchType::Unstable);
        }

        let stable = Regex::new(r"^branch_\d+x$")?;
        if stable.is_match(name) {
            return Ok(BranchType::Stable);
        }

        let release = Regex::new(r"^branch_\d+_\d+$")?;
        if release.is_match(name) {
            return Ok(BranchType::Release);
        }

        Err(AddVersionError::branch(format!(
            "cannot add a version on feature branch '{}'",
            name
        )))
    }

    pub fn name(&self) -> &'static str {
        match self {
            BranchType::Unstable => "unstable",
            BranchType::Stable => "stable",
            BranchType::Release => "release",
        }
    }
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
