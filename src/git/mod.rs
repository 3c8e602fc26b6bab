//! Repository introspection
//!
//! The release workflow only needs to know which branch the checkout is on.
//! [Repository] abstracts that so the workflow can run against a real
//! checkout ([repository::Git2Repository]) or a fixed answer in tests
//! ([mock::MockRepository]).

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Read-only view of the version-control state of a checkout
pub trait Repository {
    /// Short name of the checked-out branch (e.g. "main", "branch_9x")
    ///
    /// # Returns
    /// * `Ok(String)` - The branch name
    /// * `Err` - If HEAD is detached or cannot be read
    fn current_branch(&self) -> Result<String>;
}
