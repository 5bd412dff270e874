//! A compiled pattern ready for repeated matching.

use crate::automaton::Automaton;
use crate::compiler::{CompileError, compile};
use crate::matcher::matches;
use crate::pattern::{Node, PatternError, parse};

/// Either stage of turning a pattern string into an automaton failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Pattern(PatternError),
    Compile(CompileError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern(e) => write!(f, "{e}"),
            Self::Compile(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern(e) => Some(e),
            Self::Compile(e) => Some(e),
        }
    }
}

impl From<PatternError> for Error {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

impl From<CompileError> for Error {
    fn from(e: CompileError) -> Self {
        Self::Compile(e)
    }
}

/// A parsed and compiled pattern.
///
/// The automaton is immutable, so one `Regex` can answer any number of
/// [`is_match`](Regex::is_match) calls, from several threads if need be.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    nodes: Vec<Node>,
    automaton: Automaton,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let nodes = parse(pattern)?;
        let automaton = compile(&nodes)?;
        Ok(Self {
            pattern: pattern.to_string(),
            nodes,
            automaton,
        })
    }

    /// Test whether the whole of `input` is accepted.
    pub fn is_match(&self, input: &str) -> bool {
        matches(&self.automaton, input.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }
}

impl std::str::FromStr for Regex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_match(pattern: &str, input: &str) -> bool {
        Regex::new(pattern).unwrap().is_match(input)
    }

    // --- End-to-end scenarios ---

    #[test]
    fn literal_strings_match_themselves() {
        for s in ["a", "hello", "hello world", "0123", "a-b.c/d", "]}"] {
            let re = Regex::new(s).unwrap();
            assert_eq!(re.nodes().len(), s.len(), "pattern {s:?}");
            assert!(
                re.nodes().iter().all(|n| matches!(n, Node::Literal(_))),
                "pattern {s:?}"
            );
            assert!(re.is_match(s), "pattern {s:?}");
        }
    }

    #[test]
    fn star_scenarios() {
        assert!(is_match("a*", "aaa"));
        assert!(is_match("a*", ""));
        assert!(!is_match("a+", ""));
    }

    #[test]
    fn class_scenarios() {
        assert!(is_match("[a-z]", "a"));
        assert!(!is_match("[a-z]", "1"));
    }

    #[test]
    fn group_scenario() {
        assert!(is_match("(ab)", "ab"));
    }

    #[test]
    fn alternation_scenarios() {
        assert!(is_match("a|b", "a"));
        assert!(!is_match("a|b", "c"));
    }

    #[test]
    fn count_scenarios() {
        assert!(is_match("a{2}", "aa"));
        assert!(!is_match("a{2}", "a"));
    }

    #[test]
    fn zero_count_boundary() {
        assert!(is_match("a{0}", ""));
        assert!(is_match("a{0,0}", ""));
    }

    #[test]
    fn realistic_patterns() {
        assert!(is_match("[0-9]{4}-[0-9]{2}-[0-9]{2}", "2026-10-17"));
        assert!(!is_match("[0-9]{4}-[0-9]{2}-[0-9]{2}", "2026-1-17"));
        assert!(is_match("[a-z]+@[a-z]+", "root@crate"));
        assert!(is_match("colou?r", "color"));
        assert!(is_match("colou?r", "colour"));
    }

    // --- Errors ---

    #[test]
    fn errors_are_wrapped_by_stage() {
        assert_eq!(
            Regex::new("").unwrap_err(),
            Error::Pattern(PatternError::EmptyPattern)
        );
        assert_eq!(
            Regex::new("a{2,3,4}").unwrap_err(),
            Error::Pattern(PatternError::InvalidRangeSyntax)
        );
        assert_eq!(
            Regex::new("a{1000}{1000}").unwrap_err(),
            Error::Compile(CompileError::StateLimitExceeded)
        );
    }

    #[test]
    fn error_display_is_stage_message() {
        let err = Regex::new("(abc").unwrap_err();
        assert_eq!(err.to_string(), "Missing ')' to close group");
    }

    // --- Accessors ---

    #[test]
    fn from_str_and_accessors() {
        let re: Regex = "x[0-9]".parse().unwrap();
        assert_eq!(re.as_str(), "x[0-9]");
        assert_eq!(re.nodes().len(), 2);
        assert!(re.automaton().len() > 2);
    }

    #[test]
    fn shared_across_threads() {
        let re = std::sync::Arc::new(Regex::new("[a-z]+").unwrap());
        let handles: Vec<_> = ["abc", "xyz", "a1"]
            .into_iter()
            .map(|input| {
                let re = re.clone();
                std::thread::spawn(move || re.is_match(input))
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, true, false]);
    }
}
