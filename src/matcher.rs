//! Automaton matcher: decide whether a whole input is accepted.
//!
//! The search walks (state, position) configurations depth-first on an
//! explicit stack. From each configuration it follows the first target of
//! the byte transition for the byte under the cursor, then every epsilon
//! target in insertion order. Only the first target of a byte transition is
//! ever followed.
//!
//! Each configuration is expanded at most once, so the search terminates on
//! epsilon cycles (`a?*`) and does at most states × (len + 1) expansions.

use std::collections::HashSet;

use crate::automaton::{Automaton, StateId};

/// What the cursor sees at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    Byte(u8),
    /// Past the last byte.
    EndOfText,
}

fn symbol_at(input: &[u8], pos: usize) -> Symbol {
    input.get(pos).map_or(Symbol::EndOfText, |&b| Symbol::Byte(b))
}

/// Test whether `automaton` accepts the whole of `input`.
pub fn matches(automaton: &Automaton, input: &[u8]) -> bool {
    let mut seen: HashSet<(StateId, usize)> = HashSet::new();
    let mut stack = vec![(automaton.start(), 0usize)];

    while let Some((id, pos)) = stack.pop() {
        if !seen.insert((id, pos)) {
            continue;
        }
        let state = automaton.state(id);
        let symbol = symbol_at(input, pos);
        if symbol == Symbol::EndOfText && state.is_accept {
            tracing::trace!(visited = seen.len(), "match");
            return true;
        }

        // Pushed in reverse so they pop in priority order.
        for &target in state.epsilon_targets().iter().rev() {
            stack.push((target, pos));
        }
        if let Symbol::Byte(b) = symbol
            && let Some(target) = state.byte_target(b)
        {
            stack.push((target, pos + 1));
        }
    }

    tracing::trace!(visited = seen.len(), "no match");
    false
}
