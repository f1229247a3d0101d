//!# rexfa
//!
//! `rexfa` compiles regular expressions over an alphanumeric alphabet into deterministic finite
//! automata and evaluates whole-word membership against them. It is a three-stage pipeline:
//!
//! 1. **Shunting-yard parsing** ([`lexer::normalize`] + [`shunting::to_prefix`] +
//!    [`ast::build_ast`]) turns infix concatenation/alternation/Kleene-star syntax into an AST.
//! 2. **Thompson's construction** ([`nfa::thompson::compile_nfa`]) compiles the AST into an
//!    ε-NFA ([`nfa::Nfa`]).
//! 3. **Subset construction** ([`determinize::determinize`]) determinizes the ε-NFA into a DFA
//!    ([`dfa::Dfa`]).
//!
//! ## Usage
//!
//! ```
//! use rexfa::compile;
//!
//! let matcher = compile("d|(a*b|c*)e").unwrap();
//! assert!(matcher.accepts("aabe"));
//! assert!(matcher.accepts("ccce"));
//! assert!(matcher.rejects("dabe"));
//! ```
//!
//! ## Syntax
//!
//! ```text
//! R    ::= Char | R R | R '|' R | R '*' | '(' R ')'
//! Char ::= [A-Za-z0-9]
//! ```
//!
//! Whitespace anywhere is ignored. Operator precedence, highest to lowest: `*`, implicit
//! concatenation, `|`. Parentheses override precedence. There is no support for submatch
//! capture, anchoring, character classes, or backreferences — matching is whole-word equality
//! against the language the regex describes, not a search.
//!
//! ## Scope
//!
//! This crate has no file format, no pretty-printing, and no command-line entry point; it is a
//! compiler and a runtime only. A compiled [`Matcher`] is immutable, `Send + Sync`, and never
//! fails at match time — only [`compile`] can return [`error::CompileError`].

pub mod ast;
pub mod determinize;
pub mod dfa;
pub mod error;
pub mod id;
pub mod lexer;
pub mod matcher;
pub mod nfa;
pub mod shunting;

pub use error::CompileError;
pub use matcher::{compile, Matcher};
