//! Epsilon-NFA representation.
//!
//! States live in one arena owned by the [`Automaton`] and refer to each
//! other by [`StateId`], so the back-edges of unbounded repeats need no
//! shared ownership. An automaton is never mutated once compiled.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use crate::pattern::ast::show_byte;

/// Index of a state in its automaton's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A transition label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// Traversed without consuming input.
    Epsilon,
    /// Consumes exactly this byte.
    Byte(u8),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub is_start: bool,
    pub is_accept: bool,
    /// Targets per label, in insertion order.
    pub transitions: BTreeMap<Label, Vec<StateId>>,
}

impl State {
    /// Epsilon targets in insertion order.
    pub fn epsilon_targets(&self) -> &[StateId] {
        self.targets(Label::Epsilon)
    }

    /// The target followed on byte `b`. Only the first inserted target
    /// counts.
    pub fn byte_target(&self, b: u8) -> Option<StateId> {
        self.targets(Label::Byte(b)).first().copied()
    }

    fn targets(&self, label: Label) -> &[StateId] {
        self.transitions
            .get(&label)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// A compiled pattern: a state graph with one start and one accept state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<State>,
    start: StateId,
    accept: StateId,
}

impl Automaton {
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states.iter().enumerate().map(|(i, s)| (StateId(i), s))
    }

    /// Total number of stored (label, target) edges.
    pub fn edge_count(&self) -> usize {
        self.states
            .iter()
            .flat_map(|s| s.transitions.values())
            .map(Vec::len)
            .sum()
    }
}

/// Arena under construction. States are only added and linked; nothing is
/// removed.
#[derive(Debug, Default)]
pub(crate) struct Builder {
    states: Vec<State>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self) -> StateId {
        self.states.push(State::default());
        StateId(self.states.len() - 1)
    }

    pub fn add_transition(&mut self, from: StateId, label: Label, to: StateId) {
        self.states[from.0]
            .transitions
            .entry(label)
            .or_default()
            .push(to);
    }

    /// Freeze the arena, flagging the global start and accept states.
    pub fn finish(mut self, start: StateId, accept: StateId) -> Automaton {
        self.states[start.0].is_start = true;
        self.states[accept.0].is_accept = true;
        Automaton {
            states: self.states,
            start,
            accept,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Byte(b) => write!(f, "'{}'", show_byte(*b)),
        }
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, state) in self.states() {
            let flags = match (state.is_start, state.is_accept) {
                (true, _) => " (start)",
                (_, true) => " (accept)",
                _ => "",
            };
            let edges = state
                .transitions
                .iter()
                .map(|(label, targets)| {
                    format!("{label} -> {}", targets.iter().map(|t| t.index()).join(","))
                })
                .join("; ");
            writeln!(f, "{}{flags}: {edges}", id.index())?;
        }
        Ok(())
    }
}
