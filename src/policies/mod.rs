//! Edit policies, one per target artifact
//!
//! Each policy is a [`LinePolicy`](crate::patch::LinePolicy) holding only the
//! state its artifact needs, plus an `update_*` helper binding it to its
//! anchor pattern and running it through [`update_file`](crate::patch::update_file).

pub mod changelog;
pub mod constant;
pub mod latest;
pub mod property;

pub use changelog::{update_changes, ChangelogPolicy};
pub use constant::{add_constant, ConstantPolicy, ConstantState, ConstantStyle};
pub use latest::{update_latest_constant, LatestAliasPolicy};
pub use property::{update_build_version, PropertyPolicy};

use crate::error::Result;
use regex::Regex;

/// Matches `text` as a whole token, so "9.1.0" does not hit "19.1.0"
pub(crate) fn token_matcher(text: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r"(?:^|[^\w.]){}(?:$|[^\w.])",
        regex::escape(text)
    ))?)
}
