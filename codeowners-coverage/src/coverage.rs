use crate::patternset::Matcher;

/// Return the paths that no pattern in `matcher` covers, in the order they
/// were given.
pub fn check_coverage<P: AsRef<str>>(matcher: &Matcher, paths: &[P]) -> Vec<String> {
    let mut uncovered = Vec::new();
    for path in paths {
        let path: &str = path.as_ref();
        if !matcher.is_match(path) {
            uncovered.push(path.to_owned());
        }
    }
    uncovered
}

/// Outcome of a coverage check over a set of paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub checked: usize,
    pub uncovered: Vec<String>,
}

impl CoverageReport {
    pub fn is_covered(&self) -> bool {
        self.uncovered.is_empty()
    }
}

pub fn check_coverage_report<P: AsRef<str>>(matcher: &Matcher, paths: &[P]) -> CoverageReport {
    CoverageReport {
        checked: paths.len(),
        uncovered: check_coverage(matcher, paths),
    }
}
