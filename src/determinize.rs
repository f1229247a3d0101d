//! The ε-NFA→DFA determinizer, in two phases — ε-elimination, then subset construction.

use crate::dfa::Dfa;
use crate::id::{IdGen, StateId};
use crate::nfa::Nfa;
use std::collections::{HashMap, HashSet};

/// Phase 1: produces an ε-free NFA equivalent to `nfa`.
///
/// `q0` is kept as-is. Every non-ε transition `(q, c) -> R` is carried over with `R` replaced by
/// its ε-closure; if `q` is itself ε-equivalent to `q0` (i.e. reachable from `q0` by ε-moves
/// alone), the same transition is additionally recorded as leaving `q0`, so `q0` subsumes its
/// ε-equivalents as a source. `q0` becomes accepting if any ε-equivalent of it was accepting.
fn eps_eliminate(nfa: &Nfa) -> Nfa {
    let span = tracing::debug_span!("eps_eliminate");
    let _enter = span.enter();

    let q0 = nfa.initial_state();
    let start_eq: HashSet<StateId> = nfa
        .eps_closure(&HashSet::from([q0]))
        .into_iter()
        .filter(|&q| q != q0)
        .collect();

    let mut delta: HashMap<(StateId, Option<char>), HashSet<StateId>> = HashMap::new();
    for (&(q, label), targets) in nfa.transitions() {
        let Some(c) = label else { continue };
        let closed = nfa.eps_closure(targets);
        delta.entry((q, Some(c))).or_default().extend(&closed);
        if start_eq.contains(&q) {
            delta.entry((q0, Some(c))).or_default().extend(&closed);
        }
    }

    let mut accepting = nfa.accepting_states().clone();
    if !nfa.accepting_states().is_disjoint(&start_eq) {
        accepting.insert(q0);
    }

    tracing::trace!(transitions = delta.len(), "epsilon moves eliminated");
    Nfa::new(q0, delta, accepting)
}

/// Phase 2: the classical subset (powerset) construction over an ε-free NFA.
///
/// Macro-states are canonicalized as sorted vectors of [`StateId`] so that "have we already seen
/// this macro-state" is semantic set equality, not identifier identity.
fn subset_construction(eps_free: &Nfa) -> Dfa {
    let span = tracing::debug_span!("subset_construction");
    let _enter = span.enter();

    let alphabet = eps_free.alphabet();
    let mut id_gen = IdGen::new();
    let mut canonical_to_id: HashMap<Vec<StateId>, StateId> = HashMap::new();
    let mut macro_states: HashMap<StateId, HashSet<StateId>> = HashMap::new();

    let canon = |set: &HashSet<StateId>| -> Vec<StateId> {
        let mut v: Vec<StateId> = set.iter().copied().collect();
        v.sort();
        v
    };

    let initial_macro = HashSet::from([eps_free.initial_state()]);
    let initial_key = canon(&initial_macro);
    let initial_id = id_gen.fresh();
    canonical_to_id.insert(initial_key, initial_id);
    macro_states.insert(initial_id, initial_macro);

    let mut worklist = vec![initial_id];
    let mut delta: HashMap<(StateId, char), StateId> = HashMap::new();
    let mut accepting = HashSet::new();

    while let Some(p) = worklist.pop() {
        let s = macro_states[&p].clone();
        if !s.is_disjoint(eps_free.accepting_states()) {
            accepting.insert(p);
        }
        for &c in &alphabet {
            let t = eps_free.step(&s, c);
            if t.is_empty() {
                continue;
            }
            let key = canon(&t);
            let target_id = *canonical_to_id.entry(key).or_insert_with(|| {
                let fresh = id_gen.fresh();
                macro_states.insert(fresh, t.clone());
                worklist.push(fresh);
                fresh
            });
            delta.insert((p, c), target_id);
        }
    }

    tracing::trace!(states = macro_states.len(), "subset construction complete");
    Dfa::new(initial_id, delta, accepting)
}

/// Determinizes `nfa` into an equivalent [`Dfa`]: for every word `w`,
/// `determinize(nfa).accepts(w) == nfa.accepts(w)`.
pub fn determinize(nfa: &Nfa) -> Dfa {
    let span = tracing::debug_span!("determinize");
    let _enter = span.enter();
    subset_construction(&eps_eliminate(nfa))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::StateId;
    use proptest::collection::vec as pvec;
    use proptest::prelude::*;

    fn sid(n: usize) -> StateId {
        StateId(n)
    }

    /// A small random ε-NFA over `{a, b}`: 2-5 states, each with an independently random subset
    /// of states reachable on `a`, on `b`, and by an ε-move, plus a random accepting set. `q0` is
    /// always state 0.
    fn arb_small_nfa() -> impl Strategy<Value = Nfa> {
        (2usize..=5usize).prop_flat_map(|n| {
            let bitvec = move || pvec(any::<bool>(), n);
            let sym_a = pvec(bitvec(), n);
            let sym_b = pvec(bitvec(), n);
            let eps = pvec(bitvec(), n);
            let accept = bitvec();
            (sym_a, sym_b, eps, accept).prop_map(move |(sym_a, sym_b, eps, accept)| {
                let mut delta: HashMap<(StateId, Option<char>), HashSet<StateId>> = HashMap::new();
                for s in 0..n {
                    let targets = |flags: &[bool]| -> HashSet<StateId> {
                        flags
                            .iter()
                            .enumerate()
                            .filter(|&(_, &flag)| flag)
                            .map(|(t, _)| StateId(t))
                            .collect()
                    };
                    let a_targets = targets(&sym_a[s]);
                    if !a_targets.is_empty() {
                        delta.insert((StateId(s), Some('a')), a_targets);
                    }
                    let b_targets = targets(&sym_b[s]);
                    if !b_targets.is_empty() {
                        delta.insert((StateId(s), Some('b')), b_targets);
                    }
                    let eps_targets: HashSet<StateId> = eps[s]
                        .iter()
                        .enumerate()
                        .filter(|&(t, &flag)| flag && t != s)
                        .map(|(t, _)| StateId(t))
                        .collect();
                    if !eps_targets.is_empty() {
                        delta.insert((StateId(s), None), eps_targets);
                    }
                }
                let accepting: HashSet<StateId> = accept
                    .iter()
                    .enumerate()
                    .filter(|&(_, &flag)| flag)
                    .map(|(i, _)| StateId(i))
                    .collect();
                Nfa::new(StateId(0), delta, accepting)
            })
        })
    }

    proptest! {
        /// Invariant 3: ε-elimination never changes what a word decides, even on randomly wired
        /// automata with arbitrary ε-edges.
        #[test]
        fn eps_elimination_matches_nfa_on_random_automata(nfa in arb_small_nfa()) {
            let eliminated = eps_eliminate(&nfa);
            for w in enumerate_words(&['a', 'b'], 4) {
                prop_assert_eq!(eliminated.accepts(&w), nfa.accepts(&w), "mismatch on {:?}", w);
            }
        }

        /// Invariant 4: determinization never changes what a word decides, even on randomly
        /// wired automata with arbitrary ε-edges.
        #[test]
        fn determinize_matches_nfa_on_random_automata(nfa in arb_small_nfa()) {
            let dfa = determinize(&nfa);
            for w in enumerate_words(&['a', 'b'], 4) {
                prop_assert_eq!(dfa.accepts(&w), nfa.accepts(&w), "mismatch on {:?}", w);
            }
        }
    }

    /// q0=0, F={3,4}, δ={(0,ε):{1,2}, (1,'a'):{1,3}, (2,ε):{3}, (3,'c'):{4}}
    fn scenario_nfa() -> Nfa {
        let mut delta = HashMap::new();
        delta.insert((sid(0), None), HashSet::from([sid(1), sid(2)]));
        delta.insert((sid(1), Some('a')), HashSet::from([sid(1), sid(3)]));
        delta.insert((sid(2), None), HashSet::from([sid(3)]));
        delta.insert((sid(3), Some('c')), HashSet::from([sid(4)]));
        Nfa::new(sid(0), delta, HashSet::from([sid(3), sid(4)]))
    }

    #[test]
    fn eps_elimination_preserves_acceptance() {
        let nfa = scenario_nfa();
        let eliminated = eps_eliminate(&nfa);
        let words = enumerate_words(&['a', 'b', 'c'], 5);
        for w in words {
            assert_eq!(
                eliminated.accepts(&w),
                nfa.accepts(&w),
                "mismatch on {w:?}"
            );
        }
    }

    #[test]
    fn determinization_preserves_acceptance() {
        let nfa = scenario_nfa();
        let dfa = determinize(&nfa);
        let words = enumerate_words(&['a', 'b', 'c'], 5);
        for w in words {
            assert_eq!(dfa.accepts(&w), nfa.accepts(&w), "mismatch on {w:?}");
        }
    }

    #[test]
    fn determinization_of_star_keeps_empty_word_acceptance() {
        use crate::ast::Node;
        use crate::id::IdGen;
        use crate::nfa::thompson::compile_nfa;

        let mut gen = IdGen::new();
        let ast = Node::Concat(
            Box::new(Node::Star(Box::new(Node::Literal('a')))),
            Box::new(Node::Star(Box::new(Node::Literal('b')))),
        );
        let nfa = compile_nfa(&ast, &mut gen);
        let dfa = determinize(&nfa);
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("a"));
        assert!(dfa.accepts("b"));
        assert!(dfa.accepts("ab"));
        assert!(dfa.accepts("aabb"));
        assert!(dfa.rejects("ba"));
        assert!(dfa.rejects("aba"));
    }

    fn enumerate_words(alphabet: &[char], max_len: usize) -> Vec<String> {
        let mut words = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..max_len {
            let mut next = Vec::new();
            for w in &frontier {
                for &c in alphabet {
                    let mut w2 = w.clone();
                    w2.push(c);
                    words.push(w2.clone());
                    next.push(w2);
                }
            }
            frontier = next;
        }
        words
    }
}
