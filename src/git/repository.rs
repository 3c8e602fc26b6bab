use crate::error::{AddVersionError, Result};
use git2::Repository as Git2Repo;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .map_err(|e| AddVersionError::branch(format!("Cannot read HEAD: {}", e)))?;

        if !head.is_branch() {
            return Err(AddVersionError::branch("HEAD is detached, check out a branch"));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| AddVersionError::branch("Branch name is not valid UTF-8"))
    }
}
