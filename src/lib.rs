//! A small regular-expression engine over bytes.
//!
//! A pattern goes through three stages: [`parse`] turns the text into a
//! sequence of [`Node`]s, [`compile`] turns those into an epsilon-NFA
//! ([`Automaton`]), and [`matches`] decides whether a whole input string is
//! accepted. [`Regex`] runs the first two once and keeps the automaton for
//! repeated matching.
//!
//! # Example
//!
//! ```rust
//! use pstr::{Regex, compile, matches, parse};
//!
//! let nodes = parse("(a|b)*[0-9]+").unwrap();
//! let automaton = compile(&nodes).unwrap();
//! assert!(matches(&automaton, b"abba42"));
//! assert!(!matches(&automaton, b"abc1"));
//!
//! let re = Regex::new("a{2,3}").unwrap();
//! assert!(re.is_match("aaa"));
//! assert!(!re.is_match("aaaa"));
//! ```

pub mod automaton;
pub mod compiler;
mod matcher;
pub mod pattern;
mod regex;
pub mod shell;

pub use automaton::{Automaton, Label, State, StateId};
pub use compiler::{CompileError, MAX_EDGES, MAX_STATES, compile};
pub use matcher::matches;
pub use pattern::{ClassRange, MAX_REPEAT, Node, PatternError, parse, parse_bytes, render};
pub use regex::{Error, Regex};
