use super::nfa::{Nfa, StateId};

/// Matches repository-relative paths against a fixed set of patterns. Created
/// with [`super::Builder::build`].
#[derive(Debug, Clone)]
pub struct Matcher {
    nfa: Nfa,
    patterns: Vec<String>,
}

impl Matcher {
    pub(crate) fn new(nfa: Nfa, patterns: Vec<String>) -> Matcher {
        Self { nfa, patterns }
    }

    /// The patterns the matcher was built from, in insertion order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if at least one pattern matches `path`.
    pub fn is_match(&self, path: impl AsRef<str>) -> bool {
        self.final_states(path.as_ref())
            .iter()
            .any(|&id| self.nfa.state(id).is_accepting())
    }

    /// Ids of every pattern matching `path`, in ascending order. Ids follow the
    /// order in which patterns were added to the builder.
    pub fn matching_patterns(&self, path: impl AsRef<str>) -> Vec<usize> {
        let mut ids = self
            .final_states(path.as_ref())
            .into_iter()
            .flat_map(|id| self.nfa.state(id).accepting.iter().copied())
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn final_states(&self, path: &str) -> Vec<StateId> {
        let mut states = self.nfa.initial_states();
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            if states.is_empty() {
                break;
            }
            states = self.nfa.step(&states, segment);
        }
        states
    }
}
