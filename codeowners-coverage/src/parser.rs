/// A single rule from a CODEOWNERS file: the glob pattern, the owner tokens
/// that follow it, and the 1-based line it was read from.
///
/// Owners are kept for diagnostics only. Coverage is decided by the pattern
/// alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub owners: Vec<String>,
    pub line: usize,
}

/// Parse the text of a CODEOWNERS file into rules.
///
/// Blank lines and lines whose first non-whitespace character is `#` are
/// skipped. Every other line is split on whitespace; the first field is the
/// pattern and the rest are owners. A `#` anywhere else is ordinary text.
pub fn parse(source: &str) -> Vec<Rule> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line, idx + 1))
        .collect()
}

fn parse_line(line: &str, number: usize) -> Option<Rule> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }

    let mut fields = line.split_whitespace();
    let pattern = fields.next()?;
    Some(Rule {
        pattern: pattern.to_owned(),
        owners: fields.map(str::to_owned).collect(),
        line: number,
    })
}
