use std::{fs, path::Path};

use log::{debug, trace};

use crate::{error::ConfigError, parser, patternset::Builder};

/// Where GitHub looks for the CODEOWNERS file unless told otherwise.
pub const DEFAULT_CODEOWNERS_PATH: &str = ".github/CODEOWNERS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Drop rules whose pattern is exactly `*`. A catch-all default owner
    /// would otherwise cover every file.
    pub skip_asterisk: bool,
}

/// Read the CODEOWNERS file at `path` (or [`DEFAULT_CODEOWNERS_PATH`]) and add
/// the pattern of every rule to `builder`. Returns the number of patterns
/// added.
///
/// Nothing is added if the file is missing or unreadable.
pub fn load_rules(
    builder: &mut Builder,
    path: Option<&Path>,
    options: &LoadOptions,
) -> Result<usize, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CODEOWNERS_PATH));
    if !path.exists() {
        return Err(ConfigError::MissingCodeowners {
            path: path.to_path_buf(),
        });
    }

    let source = fs::read_to_string(path).map_err(|source| ConfigError::ReadCodeowners {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loading rules from {}", path.display());
    Ok(load_rules_from_str(builder, &source, options))
}

/// Same as [`load_rules`] for CODEOWNERS text that is already in memory.
pub fn load_rules_from_str(builder: &mut Builder, source: &str, options: &LoadOptions) -> usize {
    let mut added = 0;
    for rule in parser::parse(source) {
        if options.skip_asterisk && rule.pattern == "*" {
            debug!("skipping catch-all rule on line {}", rule.line);
            continue;
        }
        trace!(
            "line {}: adding pattern {:?} (owners: {})",
            rule.line,
            rule.pattern,
            rule.owners.join(" ")
        );
        builder.add(&rule.pattern);
        added += 1;
    }
    added
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const ONE_RULE: &str = "
        # This is a comment
        *.js     @someone
    ";

    const THREE_RULES: &str = "
        # This is a comment
        *        @org/default
        *.js     @someone
        # another comment
        src/*.js
    ";

    fn codeowners_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn load(contents: &str, skip_asterisk: bool) -> Builder {
        let file = codeowners_file(contents);
        let mut builder = Builder::new();
        load_rules(
            &mut builder,
            Some(file.path()),
            &LoadOptions { skip_asterisk },
        )
        .unwrap();
        builder
    }

    #[test]
    fn test_single_rule_with_comment() {
        let builder = load(ONE_RULE, false);
        assert_eq!(builder.patterns(), ["*.js"]);
    }

    #[test]
    fn test_rules_keep_file_order() {
        let builder = load(THREE_RULES, false);
        assert_eq!(builder.patterns(), ["*", "*.js", "src/*.js"]);
    }

    #[test]
    fn test_skip_asterisk() {
        let builder = load(THREE_RULES, true);
        assert_eq!(builder.patterns(), ["*.js", "src/*.js"]);
    }

    #[test]
    fn test_skip_asterisk_only_drops_bare_wildcard() {
        let mut builder = Builder::new();
        let added = load_rules_from_str(
            &mut builder,
            "*  @org/default\n*.js @someone\n/* @root\n**  @all\n",
            &LoadOptions {
                skip_asterisk: true,
            },
        );
        assert_eq!(added, 3);
        assert_eq!(builder.patterns(), ["*.js", "/*", "**"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut builder = Builder::new();
        let added = load_rules_from_str(
            &mut builder,
            "*.js @a\n*.js @b\n",
            &LoadOptions::default(),
        );
        assert_eq!(added, 2);
        assert_eq!(builder.patterns(), ["*.js", "*.js"]);
    }

    #[test]
    fn test_comments_only_adds_nothing() {
        let builder = load("# nothing here\n\n   # still nothing\n", false);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_loading_twice_is_idempotent() {
        let first = load(THREE_RULES, false);
        let second = load(THREE_RULES, false);
        assert_eq!(first.patterns(), second.patterns());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CODEOWNER");
        let mut builder = Builder::new();

        let err = load_rules(&mut builder, Some(path.as_path()), &LoadOptions::default())
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingCodeowners { .. }));
        assert_eq!(
            err.to_string(),
            format!("CODEOWNERS file {} not exist.", path.display())
        );
        assert!(builder.is_empty());
    }

    #[test]
    fn test_default_path() {
        let mut builder = Builder::new();

        let err = load_rules(&mut builder, None, &LoadOptions::default()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "CODEOWNERS file .github/CODEOWNERS not exist."
        );
    }

    #[test]
    fn test_unreadable_file_adds_nothing() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[b'*', b' ', 0xff, 0xfe, b'\n']).unwrap();
        let mut builder = Builder::new();

        let err = load_rules(&mut builder, Some(file.path()), &LoadOptions::default())
            .unwrap_err();

        assert!(matches!(err, ConfigError::ReadCodeowners { .. }));
        assert!(builder.is_empty());
    }
}
