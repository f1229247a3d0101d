//! # ε-NFA
//! The nondeterministic automaton, with ε-transitions, that [Thompson's construction](thompson)
//! produces from an AST and that [determinization](crate::determinize) consumes.
//!
//! Acceptance is defined by ε-closure traversal: start in the ε-closure of the initial state,
//! step and re-close on each symbol of the word, and test whether any state reached intersects
//! the accepting set.

pub mod thompson;

use crate::id::StateId;
use std::collections::{HashMap, HashSet};

/// A transition label: either a concrete alphabet symbol or ε (`None`).
pub type Label = Option<char>;

/// A nondeterministic finite automaton with ε-transitions, as (q₀, δ, F).
///
/// δ maps a `(state, label)` pair to the *set* of states it may transition to. A label of `None`
/// denotes ε. There is no explicit state list: the state set is implicitly the union of `q0`,
/// every key/value state in `delta`, and every state in `accepting`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub(crate) initial: StateId,
    pub(crate) delta: HashMap<(StateId, Label), HashSet<StateId>>,
    pub(crate) accepting: HashSet<StateId>,
}

impl Nfa {
    /// Builds an NFA directly from its three components. Exposed for tests and for callers that
    /// want to construct automata without going through the regex compiler.
    pub fn new(
        initial: StateId,
        delta: HashMap<(StateId, Label), HashSet<StateId>>,
        accepting: HashSet<StateId>,
    ) -> Self {
        Self {
            initial,
            delta,
            accepting,
        }
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    pub fn accepting_states(&self) -> &HashSet<StateId> {
        &self.accepting
    }

    pub fn transitions(&self) -> &HashMap<(StateId, Label), HashSet<StateId>> {
        &self.delta
    }

    /// δ extended to sets of states: the union of δ(q, sym) over every q in `states`.
    pub fn step(&self, states: &HashSet<StateId>, sym: char) -> HashSet<StateId> {
        states
            .iter()
            .filter_map(|q| self.delta.get(&(*q, Some(sym))))
            .flatten()
            .copied()
            .collect()
    }

    /// The ε-closure of `states`: the least fixed point of adding ε-successors to the frontier.
    ///
    /// The result doesn't depend on traversal order, only on which states are ε-reachable.
    pub fn eps_closure(&self, states: &HashSet<StateId>) -> HashSet<StateId> {
        let mut closure = states.clone();
        let mut frontier: Vec<StateId> = states.iter().copied().collect();
        while let Some(q) = frontier.pop() {
            if let Some(next) = self.delta.get(&(q, None)) {
                for &r in next {
                    if closure.insert(r) {
                        frontier.push(r);
                    }
                }
            }
        }
        closure
    }

    /// Whether `word` is accepted: starting from the ε-closure of `q0`, step and re-close on
    /// every symbol, then test for a non-empty intersection with the accepting set.
    pub fn accepts(&self, word: &str) -> bool {
        let mut current = self.eps_closure(&HashSet::from([self.initial]));
        for sym in word.chars() {
            let stepped = self.step(&current, sym);
            current = self.eps_closure(&stepped);
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|q| self.accepting.contains(q))
    }

    pub fn rejects(&self, word: &str) -> bool {
        !self.accepts(word)
    }

    /// The set of concrete symbols (excluding ε) that appear as transition labels.
    pub fn alphabet(&self) -> HashSet<char> {
        self.delta
            .keys()
            .filter_map(|(_, label)| *label)
            .collect()
    }
}
