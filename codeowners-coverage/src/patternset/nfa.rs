use memchr::memmem;
use regex::Regex;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct StateId(pub(crate) u32);

impl StateId {
    pub(crate) const START: StateId = StateId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Non-deterministic automaton over path segments. Every edge consumes exactly
/// one segment; an optional epsilon edge per state leads to a `**` state that
/// loops on any segment.
#[derive(Debug, Clone)]
pub(crate) struct Nfa {
    states: Vec<State>,
}

impl Nfa {
    pub(crate) fn new() -> Self {
        Self {
            states: vec![State::default()],
        }
    }

    pub(crate) fn add_state(&mut self) -> StateId {
        self.states.push(State::default());
        StateId((self.states.len() - 1) as u32)
    }

    pub(crate) fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    pub(crate) fn state_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.index()]
    }

    pub(crate) fn edges_from(&self, id: StateId) -> impl Iterator<Item = &Edge> {
        self.state(id).edges.iter()
    }

    pub(crate) fn initial_states(&self) -> Vec<StateId> {
        let mut states = vec![StateId::START];
        states.extend(self.state(StateId::START).epsilon);
        states
    }

    /// Follow every edge that accepts `segment` from the given states, then
    /// traverse epsilon edges from the states reached.
    pub(crate) fn step(&self, from: &[StateId], segment: &str) -> Vec<StateId> {
        let mut next = Vec::new();
        for &id in from {
            next.extend(
                self.edges_from(id)
                    .filter(|edge| edge.accepts(segment))
                    .map(|edge| edge.target),
            );
        }

        let epsilons = next
            .iter()
            .filter_map(|&id| self.state(id).epsilon)
            .collect::<Vec<_>>();
        next.extend(epsilons);
        next.sort_unstable();
        next.dedup();
        next
    }

    #[cfg(test)]
    pub(crate) fn states(&self) -> &[State] {
        &self.states
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    /// Ids of the patterns that match when the path ends in this state.
    pub(crate) accepting: Vec<usize>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) epsilon: Option<StateId>,
}

impl State {
    pub(crate) fn is_accepting(&self) -> bool {
        !self.accepting.is_empty()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Edge {
    pub(crate) glob: String,
    pub(crate) target: StateId,
    condition: SegmentCondition,
}

impl Edge {
    pub(crate) fn new(glob: &str, target: StateId) -> Self {
        Self {
            glob: glob.to_owned(),
            target,
            condition: SegmentCondition::new(glob),
        }
    }

    pub(crate) fn accepts(&self, segment: &str) -> bool {
        self.condition.accepts(segment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GlobToken {
    Star,
    Question,
    Literal(char),
}

fn tokenize(glob: &str) -> Vec<GlobToken> {
    let mut tokens = Vec::with_capacity(glob.len());
    let mut chars = glob.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '\\' => GlobToken::Literal(chars.next().unwrap_or('\\')),
            '*' => GlobToken::Star,
            '?' => GlobToken::Question,
            _ => GlobToken::Literal(c),
        });
    }
    tokens
}

fn literal_text(tokens: &[GlobToken]) -> Option<String> {
    tokens
        .iter()
        .map(|token| match token {
            GlobToken::Literal(c) => Some(*c),
            _ => None,
        })
        .collect()
}

/// How a single glob segment is tested against a path segment. The cheap
/// string checks cover the shapes that show up in most CODEOWNERS files; the
/// rest fall back to a regex.
#[derive(Debug, Clone)]
enum SegmentCondition {
    Any,
    Literal(String),
    Prefix(String),
    Suffix(String),
    Contains(memmem::Finder<'static>),
    Wildcard(Regex),
}

impl SegmentCondition {
    fn new(glob: &str) -> Self {
        let tokens = tokenize(glob);
        if tokens == [GlobToken::Star] {
            return Self::Any;
        }
        if let Some(text) = literal_text(&tokens) {
            return Self::Literal(text);
        }

        match tokens.as_slice() {
            [GlobToken::Star, inner @ .., GlobToken::Star] if !inner.is_empty() => {
                match literal_text(inner) {
                    Some(text) => Self::Contains(memmem::Finder::new(text.as_bytes()).into_owned()),
                    None => Self::Wildcard(segment_regex(&tokens)),
                }
            }
            [GlobToken::Star, rest @ ..] => match literal_text(rest) {
                Some(text) => Self::Suffix(text),
                None => Self::Wildcard(segment_regex(&tokens)),
            },
            [rest @ .., GlobToken::Star] => match literal_text(rest) {
                Some(text) => Self::Prefix(text),
                None => Self::Wildcard(segment_regex(&tokens)),
            },
            _ => Self::Wildcard(segment_regex(&tokens)),
        }
    }

    fn accepts(&self, segment: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Literal(text) => segment == text,
            Self::Prefix(text) => segment.starts_with(text.as_str()),
            Self::Suffix(text) => segment.ends_with(text.as_str()),
            Self::Contains(finder) => finder.find(segment.as_bytes()).is_some(),
            Self::Wildcard(re) => re.is_match(segment),
        }
    }
}

fn segment_regex(tokens: &[GlobToken]) -> Regex {
    let mut expr = String::with_capacity(tokens.len() * 2 + 4);
    expr.push_str(r"\A");
    for token in tokens {
        match token {
            GlobToken::Star => expr.push_str(r"[^/]*"),
            GlobToken::Question => expr.push_str(r"[^/]"),
            GlobToken::Literal(c) => {
                if regex_syntax::is_meta_character(*c) {
                    expr.push('\\');
                }
                expr.push(*c);
            }
        }
    }
    expr.push_str(r"\z");
    // Every literal is escaped above, so the expression is always valid.
    Regex::new(&expr).unwrap_or_else(|err| panic!("invalid segment regex {expr}: {err}"))
}
