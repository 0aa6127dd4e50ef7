use super::{
    nfa::{Edge, Nfa, StateId},
    Matcher,
};

/// Accumulates CODEOWNERS glob patterns and compiles them into an NFA as they
/// are added. Patterns are kept in insertion order, duplicates included.
/// Calling [`Builder::build`] consumes the builder.
#[derive(Debug, Clone)]
pub struct Builder {
    nfa: Nfa,
    patterns: Vec<String>,
}

impl Builder {
    /// Create an empty `Builder`.
    pub fn new() -> Self {
        Self {
            nfa: Nfa::new(),
            patterns: Vec::new(),
        }
    }

    /// The patterns added so far, in the order they were added.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Freeze the builder into a [`Matcher`].
    pub fn build(self) -> Matcher {
        Matcher::new(self.nfa, self.patterns)
    }

    /// Add a pattern and return its id. Ids are assigned sequentially from
    /// zero and are what [`Matcher::matching_patterns`] reports.
    pub fn add(&mut self, pattern: &str) -> usize {
        let pattern_id = self.patterns.len();
        self.patterns.push(pattern.to_owned());

        // A leading slash anchors the pattern to the root of the repository.
        let (pattern, anchored) = match pattern.strip_prefix('/') {
            Some(rest) => (rest, true),
            None => (pattern, false),
        };
        // Only files are matched, so a trailing slash just means "something
        // below this directory".
        let (pattern, directory_only) = match pattern.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (pattern, false),
        };

        let mut segments = pattern
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();
        if segments.is_empty() {
            segments.push("**");
        }

        // Single segment patterns float: they match at any depth.
        let start = if !anchored && segments.len() == 1 {
            self.add_epsilon(StateId::START)
        } else {
            StateId::START
        };

        let mut end = segments
            .iter()
            .fold(start, |from, &segment| match segment {
                "**" => self.add_epsilon(from),
                _ => self.add_edge(from, segment),
            });

        let last = segments.last().copied();
        if directory_only || last == Some("**") {
            end = self.add_edge(end, "*");
        }

        // Everything except a trailing lone `*` also covers whatever lives
        // below the matched path. `dir/*/` still covers the whole subtree.
        if directory_only || last != Some("*") {
            end = self.add_epsilon(end);
        }

        self.nfa.state_mut(end).accepting.push(pattern_id);
        pattern_id
    }

    // Reuse an existing edge for the same glob where possible so patterns
    // sharing a prefix share states.
    fn add_edge(&mut self, from: StateId, glob: &str) -> StateId {
        let existing = self
            .nfa
            .edges_from(from)
            .find(|edge| edge.glob == glob && edge.target != from)
            .map(|edge| edge.target);
        if let Some(target) = existing {
            return target;
        }

        let target = self.nfa.add_state();
        self.nfa.state_mut(from).edges.push(Edge::new(glob, target));
        target
    }

    // Returns the `**` state reachable from `from`, creating it if needed.
    fn add_epsilon(&mut self, from: StateId) -> StateId {
        // Already a `**` state: consecutive double stars collapse into one.
        let loops = self
            .nfa
            .edges_from(from)
            .any(|edge| edge.glob == "*" && edge.target == from);
        if loops {
            return from;
        }

        if let Some(target) = self.nfa.state(from).epsilon {
            return target;
        }

        let target = self.nfa.add_state();
        self.nfa.state_mut(target).edges.push(Edge::new("*", target));
        self.nfa.state_mut(from).epsilon = Some(target);
        target
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
