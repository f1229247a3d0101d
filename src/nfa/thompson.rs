//! Thompson's construction, compiling an [`Node`] into an [`Nfa`] fragment.
//!
//! Each AST shape maps to a small NFA fragment with a single initial state and a set of
//! accepting states (a singleton except for [`Node::Star`] and [`Node::Alt`], where a union is
//! required). Fragments are composed bottom-up; a single [`IdGen`] threads the whole construction
//! so that subfragments never share a state id.

use crate::ast::Node;
use crate::id::{IdGen, StateId};
use crate::nfa::{Label, Nfa};
use std::collections::{HashMap, HashSet};

/// An NFA-in-progress: same shape as [`Nfa`], kept separate so partially-built fragments aren't
/// mistaken for complete automata.
struct Fragment {
    initial: StateId,
    delta: HashMap<(StateId, Label), HashSet<StateId>>,
    accepting: HashSet<StateId>,
}

impl Fragment {
    fn add_edge(&mut self, from: StateId, label: Label, to: StateId) {
        self.delta.entry((from, label)).or_default().insert(to);
    }

    fn merge_delta(a: HashMap<(StateId, Label), HashSet<StateId>>, b: HashMap<(StateId, Label), HashSet<StateId>>) -> HashMap<(StateId, Label), HashSet<StateId>> {
        let mut merged = a;
        for (key, states) in b {
            merged.entry(key).or_default().extend(states);
        }
        merged
    }
}

/// Compiles `ast` into a complete ε-NFA, using `id_gen` to allocate every state so that ids never
/// collide across the compilation.
pub fn compile_nfa(ast: &Node, id_gen: &mut IdGen) -> Nfa {
    let span = tracing::debug_span!("compile_nfa");
    let _enter = span.enter();
    let frag = build(ast, id_gen);
    tracing::trace!(states = frag.delta.len(), "thompson construction complete");
    Nfa::new(frag.initial, frag.delta, frag.accepting)
}

fn build(node: &Node, id_gen: &mut IdGen) -> Fragment {
    match node {
        Node::Literal(c) => {
            let q0 = id_gen.fresh();
            let q1 = id_gen.fresh();
            let mut delta = HashMap::new();
            delta.insert((q0, Some(*c)), HashSet::from([q1]));
            Fragment {
                initial: q0,
                delta,
                accepting: HashSet::from([q1]),
            }
        }
        Node::Star(child) => {
            let mut frag = build(child, id_gen);
            let q0 = frag.initial;
            for f in frag.accepting.clone() {
                frag.add_edge(f, None, q0);
            }
            frag.accepting.insert(q0);
            frag
        }
        Node::Concat(left, right) => {
            let l = build(left, id_gen);
            let r = build(right, id_gen);
            let q0 = l.initial;
            let mut delta = Fragment::merge_delta(l.delta, r.delta);
            for f in &l.accepting {
                delta.entry((*f, None)).or_default().insert(r.initial);
            }
            Fragment {
                initial: q0,
                delta,
                accepting: r.accepting,
            }
        }
        Node::Alt(left, right) => {
            let l = build(left, id_gen);
            let r = build(right, id_gen);
            let q0 = id_gen.fresh();
            let mut delta = Fragment::merge_delta(l.delta, r.delta);
            delta
                .entry((q0, None))
                .or_default()
                .extend([l.initial, r.initial]);
            let accepting = l.accepting.union(&r.accepting).copied().collect();
            Fragment {
                initial: q0,
                delta,
                accepting,
            }
        }
    }
}
