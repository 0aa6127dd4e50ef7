//! Glob pattern sets following GitHub's CODEOWNERS matching rules.
//!
//! Patterns are added to a [`Builder`], which compiles them into an NFA whose
//! edges each consume one `/`-separated path segment. [`Builder::build`]
//! freezes the automaton into a [`Matcher`] that answers whether, and which,
//! patterns match a repository-relative path.

mod builder;
mod matcher;
mod nfa;

pub use self::builder::Builder;
pub use self::matcher::Matcher;
