//! The compiled matcher entry, gluing the whole pipeline into a single `regex string -> Matcher`
//! call.

use crate::ast::build_ast;
use crate::determinize::determinize;
use crate::dfa::Dfa;
use crate::error::CompileError;
use crate::id::IdGen;
use crate::lexer::normalize;
use crate::nfa::thompson::compile_nfa;
use crate::nfa::Nfa;
use crate::shunting::to_prefix;

/// A compiled regular expression. Immutable and freely shareable: `accepts`/`rejects` never fail
/// and never mutate the matcher, so a single [`Matcher`] can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Matcher {
    nfa: Nfa,
    dfa: Dfa,
}

impl Matcher {
    /// Whether `word` is in the language of the compiled regex.
    pub fn accepts(&self, word: &str) -> bool {
        self.dfa.accepts(word)
    }

    /// `!self.accepts(word)`.
    pub fn rejects(&self, word: &str) -> bool {
        self.dfa.rejects(word)
    }

    /// The DFA backing this matcher, for introspection and testing.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// The ε-NFA this matcher's DFA was determinized from, kept for introspection and testing.
    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }
}

/// Compiles `regex` into a [`Matcher`] by running it through the whole pipeline: normalize,
/// shunting-yard to prefix form, parse to an AST, Thompson's construction into an ε-NFA, and the
/// two-phase determinizer into a DFA.
///
/// Errors from the shunting-yard or parse stages propagate unchanged; once this returns `Ok`,
/// the resulting [`Matcher`] cannot fail at match time.
pub fn compile(regex: &str) -> Result<Matcher, CompileError> {
    let span = tracing::info_span!("compile", regex = %regex);
    let _enter = span.enter();

    let normalized = normalize(regex);
    let prefix = to_prefix(&normalized)?;
    let ast = build_ast(&prefix)?;
    let mut id_gen = IdGen::new();
    let nfa: Nfa = compile_nfa(&ast, &mut id_gen);
    let dfa = determinize(&nfa);

    tracing::debug!("compilation succeeded");
    Ok(Matcher { nfa, dfa })
}
