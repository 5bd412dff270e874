//! Structural compiler from pattern nodes to an epsilon-NFA.
//!
//! Each node becomes a fragment with one entry and one exit state; the
//! fragments of a sequence are chained with epsilon edges and the whole
//! chain is wrapped by a global start and a global accept state.

use crate::automaton::{Automaton, Builder, Label, StateId};
use crate::pattern::Node;
use crate::pattern::char_class::class_contains;

/// Upper bound on the number of states in one automaton.
pub const MAX_STATES: usize = 1 << 20;

/// Upper bound on the number of stored edges in one automaton. A class
/// stores one edge per member byte, so edges outgrow states quickly.
pub const MAX_EDGES: usize = 1 << 21;

/// Errors that can occur while compiling a node sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The node sequence was empty.
    EmptyTokenStream,
    /// Stacked repeats would need more than [`MAX_STATES`] states.
    StateLimitExceeded,
    /// Repeated classes would need more than [`MAX_EDGES`] edges.
    EdgeLimitExceeded,
    /// A node that the parser never produces, such as an empty sequence.
    MalformedNode(&'static str),
}

impl CompileError {
    /// True for contract violations by the caller, as opposed to problems
    /// with the pattern text.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::MalformedNode(_))
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTokenStream => write!(f, "Nothing to compile"),
            Self::StateLimitExceeded => {
                write!(f, "Pattern needs more than {MAX_STATES} automaton states")
            }
            Self::EdgeLimitExceeded => {
                write!(f, "Pattern needs more than {MAX_EDGES} automaton edges")
            }
            Self::MalformedNode(what) => write!(f, "Internal error: malformed node ({what})"),
        }
    }
}

impl std::error::Error for CompileError {}

/// Compile a parsed node sequence into an automaton.
pub fn compile(nodes: &[Node]) -> Result<Automaton, CompileError> {
    let (first, rest) = nodes
        .split_first()
        .ok_or(CompileError::EmptyTokenStream)?;

    let mut compiler = Compiler {
        builder: Builder::new(),
        states: 0,
        edges: 0,
    };
    let (entry, mut exit) = compiler.compile_node(first)?;
    for node in rest {
        let (next_entry, next_exit) = compiler.compile_node(node)?;
        compiler.add_epsilon(exit, next_entry)?;
        exit = next_exit;
    }

    let start = compiler.add_state()?;
    compiler.add_epsilon(start, entry)?;
    let accept = compiler.add_state()?;
    compiler.add_epsilon(exit, accept)?;

    let automaton = compiler.builder.finish(start, accept);
    tracing::debug!(
        states = automaton.len(),
        edges = automaton.edge_count(),
        "compiled automaton"
    );
    Ok(automaton)
}

struct Compiler {
    builder: Builder,
    states: usize,
    edges: usize,
}

impl Compiler {
    fn add_state(&mut self) -> Result<StateId, CompileError> {
        if self.states >= MAX_STATES {
            return Err(CompileError::StateLimitExceeded);
        }
        self.states += 1;
        Ok(self.builder.add_state())
    }

    fn add_transition(
        &mut self,
        from: StateId,
        label: Label,
        to: StateId,
    ) -> Result<(), CompileError> {
        if self.edges >= MAX_EDGES {
            return Err(CompileError::EdgeLimitExceeded);
        }
        self.edges += 1;
        self.builder.add_transition(from, label, to);
        Ok(())
    }

    fn add_epsilon(&mut self, from: StateId, to: StateId) -> Result<(), CompileError> {
        self.add_transition(from, Label::Epsilon, to)
    }

    /// Compile one node to a fresh `(entry, exit)` pair.
    fn compile_node(&mut self, node: &Node) -> Result<(StateId, StateId), CompileError> {
        match node {
            Node::Literal(b) => {
                let start = self.add_state()?;
                let end = self.add_state()?;
                self.add_transition(start, Label::Byte(*b), end)?;
                Ok((start, end))
            }
            Node::CharClass(ranges) => {
                let start = self.add_state()?;
                let end = self.add_state()?;
                for b in (0..=u8::MAX).filter(|&b| class_contains(ranges, b)) {
                    self.add_transition(start, Label::Byte(b), end)?;
                }
                Ok((start, end))
            }
            Node::Sequence(children) => {
                let (first, rest) = children
                    .split_first()
                    .ok_or(CompileError::MalformedNode("empty sequence"))?;
                let (start, mut end) = self.compile_node(first)?;
                for child in rest {
                    let (next_start, next_end) = self.compile_node(child)?;
                    self.add_epsilon(end, next_start)?;
                    end = next_end;
                }
                Ok((start, end))
            }
            Node::Alternation(left, right) => {
                let (left_start, left_end) = self.compile_node(left)?;
                let (right_start, right_end) = self.compile_node(right)?;
                let start = self.add_state()?;
                let end = self.add_state()?;
                self.add_epsilon(start, left_start)?;
                self.add_epsilon(start, right_start)?;
                self.add_epsilon(left_end, end)?;
                self.add_epsilon(right_end, end)?;
                Ok((start, end))
            }
            Node::Repeat { min, max, inner } => self.compile_repeat(*min, *max, inner),
        }
    }

    /// Lay out `copies` chained copies of `inner`. Copies past `min` may be
    /// skipped straight to the exit; an unbounded repeat loops from the exit
    /// back into its last copy.
    ///
    /// A zero count (`{0}`, `{0,0}`) lays out no copies at all, so the
    /// fragment accepts only the empty string. Do not emit the first copy
    /// unconditionally: that would make `a{0}` accept `a`.
    fn compile_repeat(
        &mut self,
        min: usize,
        max: Option<usize>,
        inner: &Node,
    ) -> Result<(StateId, StateId), CompileError> {
        let start = self.add_state()?;
        let end = self.add_state()?;
        if min == 0 {
            self.add_epsilon(start, end)?;
        }

        let copies = max.unwrap_or(min.max(1));
        if copies == 0 {
            return Ok((start, end));
        }

        let (mut last_start, mut last_end) = self.compile_node(inner)?;
        self.add_epsilon(start, last_start)?;
        for i in 2..=copies {
            let (copy_start, copy_end) = self.compile_node(inner)?;
            self.add_epsilon(last_end, copy_start)?;
            if i > min {
                self.add_epsilon(copy_start, end)?;
            }
            last_start = copy_start;
            last_end = copy_end;
        }
        self.add_epsilon(last_end, end)?;

        if max.is_none() {
            self.add_epsilon(end, last_start)?;
        }
        Ok((start, end))
    }
}
