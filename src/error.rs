//! Error model for the compile-time half of the pipeline.
//!
//! Matching itself is total (see [`crate::dfa::Dfa`]); only [`crate::compile`] and the stage
//! functions it calls can fail, and they all fail with [`CompileError`].

use thiserror::Error;

/// Which pipeline stage (see the module-level table in [`crate`]) produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The infix-to-prefix shunting-yard conversion.
    Shunting,
    /// The recursive-descent parse-tree builder.
    Parse,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Shunting => write!(f, "shunting-yard"),
            Stage::Parse => write!(f, "parse"),
        }
    }
}

/// The single error kind surfaced at the boundary of [`crate::compile`].
///
/// Internal invariant violations (an AST node with the wrong arity reaching Thompson's
/// constructor) are program bugs, not user-facing errors, and panic instead of appearing here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A character outside the accepted grammar was seen at the given byte offset.
    #[error("{stage}: unexpected character '{ch}' at byte {at}")]
    UnexpectedChar { stage: Stage, ch: char, at: usize },
    /// A `(`/`)` pair could not be matched while shunting.
    #[error("{stage}: unbalanced parentheses")]
    UnbalancedParens { stage: Stage },
    /// The input ended before a grammar rule's operands were fully consumed.
    #[error("{stage}: unexpected end of input")]
    UnexpectedEnd { stage: Stage },
    /// The top-level prefix parse consumed a valid tree but input remained.
    #[error("parse: trailing input after a complete expression: {remainder:?}")]
    TrailingInput { remainder: String },
}
