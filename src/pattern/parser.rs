//! Cursor-driven parser for pattern strings.

use phf::{Map, phf_map};

use super::ast::*;
use super::char_class::class_ranges;

/// Largest repetition count accepted in a `{...}` bound.
///
/// Every counted copy becomes its own automaton fragment, so the bound is
/// capped to keep compiled automata small.
pub const MAX_REPEAT: usize = 1000;

/// Errors that can occur while parsing a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    EmptyPattern,
    UnterminatedGroup,
    EmptyGroup,
    UnsupportedNesting,
    UnmatchedGroupClose,
    UnterminatedClass,
    EmptyClass,
    InvalidClass,
    MissingLeftOperand,
    MissingRightOperand,
    MissingRepeatOperand,
    UnsupportedGroupRepeat,
    UnterminatedRange,
    InvalidRangeSyntax,
    RepeatLimitExceeded,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "Empty pattern"),
            Self::UnterminatedGroup => write!(f, "Missing ')' to close group"),
            Self::EmptyGroup => write!(f, "Empty group '()'"),
            Self::UnsupportedNesting => write!(f, "Nested groups are not supported"),
            Self::UnmatchedGroupClose => write!(f, "Unmatched ')' in pattern"),
            Self::UnterminatedClass => write!(f, "Missing ']' to close character class"),
            Self::EmptyClass => write!(f, "Empty character class '[]'"),
            Self::InvalidClass => write!(f, "Character class needs at least two characters"),
            Self::MissingLeftOperand => write!(f, "Missing left operand for '|'"),
            Self::MissingRightOperand => write!(f, "Missing right operand for '|'"),
            Self::MissingRepeatOperand => write!(f, "Nothing to repeat"),
            Self::UnsupportedGroupRepeat => write!(f, "Repeating a group is not supported"),
            Self::UnterminatedRange => write!(f, "Missing '}}' to close repetition range"),
            Self::InvalidRangeSyntax => write!(f, "Invalid repetition range {{n,m}}"),
            Self::RepeatLimitExceeded => {
                write!(f, "Repetition count exceeds the limit of {MAX_REPEAT}")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Repetition bounds of a quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    min: usize,
    max: Option<usize>,
}

/// Single-byte quantifiers.
const SHORTHAND_QUANTIFIERS: Map<u8, Bounds> = phf_map! {
    b'*' => Bounds { min: 0, max: None },
    b'+' => Bounds { min: 1, max: None },
    b'?' => Bounds { min: 0, max: Some(1) },
};

/// Parse a pattern string into its node sequence.
pub fn parse(pattern: &str) -> Result<Vec<Node>, PatternError> {
    parse_bytes(pattern.as_bytes())
}

/// Parse a pattern given as raw bytes. Every byte is one character.
pub fn parse_bytes(pattern: &[u8]) -> Result<Vec<Node>, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::EmptyPattern);
    }
    let nodes = Parser::new(pattern).parse_all()?;
    tracing::debug!(nodes = nodes.len(), "parsed pattern");
    Ok(nodes)
}

/// Parsing state over one run of pattern text: the whole pattern, a group
/// interior, or the right-hand side of `|`.
struct Parser<'a> {
    pattern: &'a [u8],
    pos: usize,
    /// Nodes parsed so far in this run.
    nodes: Vec<Node>,
    /// Node count spliced in by the previous unit, when that unit was a group.
    last_group_len: Option<usize>,
}

impl<'a> Parser<'a> {
    fn new(pattern: &'a [u8]) -> Self {
        Self {
            pattern,
            pos: 0,
            nodes: Vec::new(),
            last_group_len: None,
        }
    }

    fn parse_all(mut self) -> Result<Vec<Node>, PatternError> {
        while self.pos < self.pattern.len() {
            self.parse_unit()?;
        }
        Ok(self.nodes)
    }

    /// Consume one lexical unit at the cursor.
    fn parse_unit(&mut self) -> Result<(), PatternError> {
        let b = self.pattern[self.pos];
        let group_len = self.last_group_len.take();
        match b {
            b'(' => self.parse_group(),
            b')' => Err(PatternError::UnmatchedGroupClose),
            b'[' => self.parse_class(),
            b'|' => self.parse_alternation(),
            b'{' => {
                let bounds = self.parse_range()?;
                self.apply_repeat(bounds, group_len)
            }
            _ => {
                self.pos += 1;
                match SHORTHAND_QUANTIFIERS.get(&b) {
                    Some(&bounds) => self.apply_repeat(bounds, group_len),
                    None => {
                        self.nodes.push(Node::Literal(b));
                        Ok(())
                    }
                }
            }
        }
    }

    /// Position of the first `close` after the cursor.
    fn find_close(&self, close: u8) -> Option<usize> {
        self.pattern[self.pos + 1..]
            .iter()
            .position(|&c| c == close)
            .map(|offset| self.pos + 1 + offset)
    }

    /// `(...)`: the interior is parsed on its own and its nodes are appended
    /// to the current run.
    fn parse_group(&mut self) -> Result<(), PatternError> {
        let close = self
            .find_close(b')')
            .ok_or(PatternError::UnterminatedGroup)?;
        let interior = &self.pattern[self.pos + 1..close];
        if interior.is_empty() {
            return Err(PatternError::EmptyGroup);
        }
        if interior.contains(&b'(') {
            return Err(PatternError::UnsupportedNesting);
        }
        let inner = Parser::new(interior).parse_all()?;
        self.last_group_len = Some(inner.len());
        self.nodes.extend(inner);
        self.pos = close + 1;
        Ok(())
    }

    /// `[...]`: one class node.
    fn parse_class(&mut self) -> Result<(), PatternError> {
        let close = self
            .find_close(b']')
            .ok_or(PatternError::UnterminatedClass)?;
        let interior = &self.pattern[self.pos + 1..close];
        if interior.is_empty() {
            return Err(PatternError::EmptyClass);
        }
        if interior.len() < 2 {
            return Err(PatternError::InvalidClass);
        }
        self.nodes.push(Node::CharClass(class_ranges(interior)));
        self.pos = close + 1;
        Ok(())
    }

    /// `|`: everything parsed so far becomes the left branch and the rest of
    /// the run becomes the right branch. A further `|` on the right nests,
    /// so `a|b|c` reads as `a|(b|c)`.
    fn parse_alternation(&mut self) -> Result<(), PatternError> {
        if self.nodes.is_empty() {
            return Err(PatternError::MissingLeftOperand);
        }
        let rest = &self.pattern[self.pos + 1..];
        if rest.is_empty() {
            return Err(PatternError::MissingRightOperand);
        }
        let right = Parser::new(rest).parse_all()?;
        if right.is_empty() {
            return Err(PatternError::MissingRightOperand);
        }
        let left = std::mem::take(&mut self.nodes);
        self.nodes
            .push(Node::alternation(Node::Sequence(left), Node::Sequence(right)));
        self.pos = self.pattern.len();
        Ok(())
    }

    /// `{...}`: the interior split on `,`.
    fn parse_range(&mut self) -> Result<Bounds, PatternError> {
        let close = self
            .find_close(b'}')
            .ok_or(PatternError::UnterminatedRange)?;
        let interior = &self.pattern[self.pos + 1..close];
        self.pos = close + 1;

        let parts: Vec<&[u8]> = interior.split(|&c| c == b',').collect();
        let bounds = match parts.as_slice() {
            [n] => {
                let n = parse_count(n)?;
                Bounds {
                    min: n,
                    max: Some(n),
                }
            }
            [lo, hi] => match (lo.is_empty(), hi.is_empty()) {
                (true, true) => return Err(PatternError::InvalidRangeSyntax),
                (false, true) => Bounds {
                    min: parse_count(lo)?,
                    max: None,
                },
                (true, false) => Bounds {
                    min: 0,
                    max: Some(parse_count(hi)?),
                },
                (false, false) => {
                    let (min, max) = (parse_count(lo)?, parse_count(hi)?);
                    if min > max {
                        return Err(PatternError::InvalidRangeSyntax);
                    }
                    Bounds {
                        min,
                        max: Some(max),
                    }
                }
            },
            _ => return Err(PatternError::InvalidRangeSyntax),
        };
        Ok(bounds)
    }

    /// Wrap the last parsed node in a repeat.
    fn apply_repeat(
        &mut self,
        bounds: Bounds,
        group_len: Option<usize>,
    ) -> Result<(), PatternError> {
        if group_len.is_some_and(|n| n > 1) {
            return Err(PatternError::UnsupportedGroupRepeat);
        }
        let inner = self
            .nodes
            .pop()
            .ok_or(PatternError::MissingRepeatOperand)?;
        self.nodes.push(Node::repeat(bounds.min, bounds.max, inner));
        Ok(())
    }
}

/// A decimal repetition count.
fn parse_count(digits: &[u8]) -> Result<usize, PatternError> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(PatternError::InvalidRangeSyntax);
    }
    let n = digits.iter().try_fold(0usize, |acc, &d| {
        acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
    });
    match n {
        Some(n) if n <= MAX_REPEAT => Ok(n),
        _ => Err(PatternError::RepeatLimitExceeded),
    }
}
