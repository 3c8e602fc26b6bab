use crate::domain::compat::BackCompatPolicy;
use crate::error::{AddVersionError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Three-part product version (major.minor.bugfix)
///
/// Field order gives the derived ordering: lexicographic over
/// (major, minor, bugfix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub bugfix: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, bugfix: u32) -> Self {
        Version {
            major,
            minor,
            bugfix,
        }
    }

    /// Parse a version from its dotted form (e.g. "9.1.0")
    ///
    /// Exactly three dot-separated non-negative integers are accepted;
    /// surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(AddVersionError::format(format!(
                "'{}' - expected major.minor.bugfix",
                text
            )));
        }

        let component = |name: &str, raw: &str| -> Result<u32> {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AddVersionError::format(format!(
                    "invalid {} component '{}' in '{}'",
                    name, raw, text
                )));
            }
            raw.parse::<u32>().map_err(|e| {
                AddVersionError::format(format!("{} component '{}': {}", name, raw, e))
            })
        };

        Ok(Version {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            bugfix: component("bugfix", parts[2])?,
        })
    }

    /// Dotted form, "major.minor.bugfix"
    pub fn dot(&self) -> String {
        self.to_string()
    }

    /// Identifier-safe constant form, e.g. `LUCENE_9_1_0` for prefix "lucene"
    pub fn constant(&self, prefix: &str) -> String {
        format!(
            "{}_{}_{}_{}",
            prefix.to_uppercase(),
            self.major,
            self.minor,
            self.bugfix
        )
    }

    pub fn on_or_after(&self, other: &Version) -> bool {
        self >= other
    }

    pub fn is_major_release(&self) -> bool {
        self.minor == 0 && self.bugfix == 0
    }

    pub fn is_minor_release(&self) -> bool {
        self.minor > 0 && self.bugfix == 0
    }

    pub fn is_bugfix_release(&self) -> bool {
        self.bugfix > 0
    }

    /// Whether `other`, an older or equal version, is still inside the
    /// supported window of `self` according to `policy`.
    ///
    /// Asking about a newer version is an error.
    pub fn is_back_compat_with<P>(&self, other: &Version, policy: &P) -> Result<bool>
    where
        P: BackCompatPolicy + ?Sized,
    {
        if !self.on_or_after(other) {
            return Err(AddVersionError::format(format!(
                "back compat check disallowed for newer version: {} < {}",
                self, other
            )));
        }
        Ok(policy.is_back_compat(self, other))
    }

    /// Matches the dotted form of the immediately preceding release
    pub fn previous_dot_matcher(&self) -> Result<Regex> {
        self.make_previous_matcher("", r"\.")
    }

    /// Build a matcher for the release preceding `self`, rendered with `sep`
    /// between components and preceded by the literal `prefix`.
    ///
    /// `sep` is a regex fragment. Capture group 1 holds the version text.
    /// The version must end at a token boundary, and without a prefix it must
    /// also start at one, so "1.2.0" never matches inside "11.2.0".
    ///
    /// - bugfix release X.Y.Z: exactly X.Y.(Z-1)
    /// - minor release X.Y.0: any bugfix of X.(Y-1)
    /// - major release X.0.0: any release of (X-1)
    pub fn make_previous_matcher(&self, prefix: &str, sep: &str) -> Result<Regex> {
        let pattern = if self.is_bugfix_release() {
            format!(
                "{}{sep}{}{sep}{}",
                self.major,
                self.minor,
                self.bugfix - 1,
                sep = sep
            )
        } else if self.is_minor_release() {
            format!(r"{}{sep}{}{sep}\d+", self.major, self.minor - 1, sep = sep)
        } else if self.major > 0 {
            format!(r"{}{sep}\d+{sep}\d+", self.major - 1, sep = sep)
        } else {
            return Err(AddVersionError::format(format!(
                "{} has no previous release",
                self
            )));
        };

        let (lead, tail) = if prefix.is_empty() {
            (r"(?:^|[^\w.])".to_string(), r"(?:$|[^\w.])")
        } else {
            (regex::escape(prefix), r"(?:$|[^\w])")
        };
        Ok(Regex::new(&format!("{}({}){}", lead, pattern, tail))?)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.bugfix)
    }
}

impl FromStr for Version {
    type Err = AddVersionError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}
