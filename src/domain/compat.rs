use crate::domain::version::Version;

/// Decides whether an older release still receives a named constant
pub trait BackCompatPolicy {
    /// `current` is never older than `candidate` when this is called
    fn is_back_compat(&self, current: &Version, candidate: &Version) -> bool;
}

/// Back-compat window measured in major versions
///
/// With `supported_majors = 1`, a 10.x checkout still supports 9.x releases
/// but not 8.x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorWindow {
    pub supported_majors: u32,
}

impl MajorWindow {
    pub fn new(supported_majors: u32) -> Self {
        MajorWindow { supported_majors }
    }
}

impl BackCompatPolicy for MajorWindow {
    fn is_back_compat(&self, current: &Version, candidate: &Version) -> bool {
        candidate.major.saturating_add(self.supported_majors) >= current.major
    }
}

impl<F> BackCompatPolicy for F
where
    F: Fn(&Version, &Version) -> bool,
{
    fn is_back_compat(&self, current: &Version, candidate: &Version) -> bool {
        self(current, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_major_is_always_supported() {
        let window = MajorWindow::new(0);
        assert!(window.is_back_compat(&Version::new(9, 4, 0), &Version::new(9, 0, 0)));
        assert!(!window.is_back_compat(&Version::new(9, 4, 0), &Version::new(8, 11, 2)));
    }

    #[test]
    fn test_wider_window() {
        let window = MajorWindow::new(2);
        assert!(window.is_back_compat(&Version::new(10, 0, 0), &Version::new(8, 11, 2)));
        assert!(!window.is_back_compat(&Version::new(10, 0, 0), &Version::new(7, 7, 3)));
    }

    #[test]
    fn test_closure_policy() {
        let only_bugfixes = |current: &Version, candidate: &Version| {
            current.major == candidate.major && current.minor == candidate.minor
        };
        assert!(only_bugfixes.is_back_compat(&Version::new(9, 1, 3), &Version::new(9, 1, 0)));
        assert!(!only_bugfixes.is_back_compat(&Version::new(9, 2, 0), &Version::new(9, 1, 0)));
    }
}
