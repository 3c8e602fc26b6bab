use crate::error::{AddVersionError, Result};
use crate::git::Repository;

/// Mock repository for testing without an actual checkout
pub struct MockRepository {
    branch: Option<String>,
}

impl MockRepository {
    /// A checkout on `branch`
    pub fn on_branch(branch: impl Into<String>) -> Self {
        MockRepository {
            branch: Some(branch.into()),
        }
    }

    /// A checkout with a detached HEAD
    pub fn detached() -> Self {
        MockRepository { branch: None }
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| AddVersionError::branch("HEAD is detached, check out a branch"))
    }
}
