pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod patch;
pub mod policies;
pub mod properties;
pub mod runner;
pub mod ui;

pub use domain::Version;
pub use error::{AddVersionError, Result};
