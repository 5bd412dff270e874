//! Pattern node types produced by the parser.

use std::fmt;
use std::ops::RangeInclusive;

use itertools::Itertools;

/// One parsed pattern element.
///
/// A parsed pattern is an ordered `Vec<Node>`; concatenation is expressed by
/// juxtaposition in that vector, and internally by [`Node::Sequence`] for the
/// branches of an alternation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Matches exactly one byte.
    Literal(u8),
    /// Matches one byte falling in any of the inclusive ranges.
    CharClass(Vec<ClassRange>),
    /// Concatenation of the children, in order.
    Sequence(Vec<Node>),
    /// Exactly two branches.
    Alternation(Box<Node>, Box<Node>),
    /// Repetition of a single inner node. `max == None` is unbounded.
    Repeat {
        min: usize,
        max: Option<usize>,
        inner: Box<Node>,
    },
}

/// An inclusive byte range inside a character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRange {
    pub low: u8,
    pub high: u8,
}

impl ClassRange {
    pub fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }

    /// Every byte in the range. Empty when `low > high`.
    pub fn bytes(&self) -> RangeInclusive<u8> {
        self.low..=self.high
    }
}

impl Node {
    pub fn alternation(left: Node, right: Node) -> Self {
        Node::Alternation(Box::new(left), Box::new(right))
    }

    pub fn repeat(min: usize, max: Option<usize>, inner: Node) -> Self {
        Node::Repeat {
            min,
            max,
            inner: Box::new(inner),
        }
    }
}

/// A byte as pattern text. The grammar has no escapes, so printable ASCII
/// is written as is; other bytes are shown as `\xNN` and do not parse back.
pub(crate) fn show_byte(b: u8) -> String {
    match b {
        0x20..=0x7e => (b as char).to_string(),
        _ => format!("\\x{b:02x}"),
    }
}

/// Render a node sequence as pattern text that parses back to the same
/// nodes.
pub fn render(nodes: &[Node]) -> String {
    struct Rendered<'a>(&'a [Node]);

    impl fmt::Display for Rendered<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_seq(f, self.0, true)
        }
    }

    Rendered(nodes).to_string()
}

/// `bare_alt`: an alternation that is the only node may go unbracketed.
fn write_seq(f: &mut fmt::Formatter<'_>, nodes: &[Node], bare_alt: bool) -> fmt::Result {
    let sole = nodes.len() == 1;
    for node in nodes {
        write_node(f, node, bare_alt && sole)?;
    }
    Ok(())
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, bare_alt: bool) -> fmt::Result {
    match node {
        Node::Literal(b) => write!(f, "{}", show_byte(*b)),
        Node::CharClass(ranges) => write!(f, "[{}]", ranges.iter().join("")),
        Node::Sequence(children) => write_seq(f, children, bare_alt),
        Node::Alternation(left, right) => {
            if !bare_alt {
                write!(f, "(")?;
            }
            // `|` takes everything to its left, so only the right branch
            // may hold a bare alternation.
            write_node(f, left, false)?;
            write!(f, "|")?;
            write_node(f, right, true)?;
            if !bare_alt {
                write!(f, ")")?;
            }
            Ok(())
        }
        Node::Repeat { min, max, inner } => {
            write_node(f, inner, false)?;
            match (*min, *max) {
                (0, None) => write!(f, "*"),
                (1, None) => write!(f, "+"),
                (0, Some(1)) => write!(f, "?"),
                (n, None) => write!(f, "{{{n},}}"),
                (n, Some(m)) if n == m => write!(f, "{{{n}}}"),
                (n, Some(m)) => write!(f, "{{{n},{m}}}"),
            }
        }
    }
}

/// Always `low-high`: a lone byte would shift the 3-byte windows the
/// parser reads classes with.
impl fmt::Display for ClassRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", show_byte(self.low), show_byte(self.high))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, true)
    }
}
