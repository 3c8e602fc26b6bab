//! Domain logic - pure release rules independent of files and git

pub mod branch;
pub mod compat;
pub mod version;

pub use branch::BranchType;
pub use compat::{BackCompatPolicy, MajorWindow};
pub use version::Version;
