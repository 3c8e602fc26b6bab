use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for add-version operations
#[derive(Error, Debug)]
pub enum AddVersionError {
    #[error("Invalid version format: {0}")]
    Format(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Could not find '{pattern}' in {}", .path.display())]
    PatternNotFound { path: PathBuf, pattern: String },

    #[error("External command failed: {0}")]
    ExternalCommand(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Properties error: {0}")]
    Properties(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in add-version
pub type Result<T> = std::result::Result<T, AddVersionError>;

impl AddVersionError {
    /// Create a version format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        AddVersionError::Format(msg.into())
    }

    /// Create a precondition error with context
    pub fn precondition(msg: impl Into<String>) -> Self {
        AddVersionError::Precondition(msg.into())
    }

    /// Create a missing-anchor error for a target file
    pub fn pattern_not_found(path: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        AddVersionError::PatternNotFound {
            path: path.into(),
            pattern: pattern.into(),
        }
    }

    /// Create an external command error with context
    pub fn external_command(msg: impl Into<String>) -> Self {
        AddVersionError::ExternalCommand(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        AddVersionError::Branch(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AddVersionError::Config(msg.into())
    }

    /// Create a properties error with context
    pub fn properties(msg: impl Into<String>) -> Self {
        AddVersionError::Properties(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AddVersionError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AddVersionError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_pattern_not_found_names_file_and_pattern() {
        let err = AddVersionError::pattern_not_found("lucene/CHANGES.txt", r"\d+\.\d+");
        let msg = err.to_string();
        assert!(msg.contains("lucene/CHANGES.txt"));
        assert!(msg.contains(r"\d+\.\d+"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (AddVersionError::format("x"), "Invalid version format"),
            (AddVersionError::precondition("x"), "Precondition failed"),
            (AddVersionError::external_command("x"), "External command failed"),
            (AddVersionError::branch("x"), "Branch error"),
            (AddVersionError::properties("x"), "Properties error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: AddVersionError = regex_err.into();
        assert!(err.to_string().starts_with("Invalid pattern"));
    }
}
