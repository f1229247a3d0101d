//! The infix-to-prefix converter, a right-to-left variant of the shunting-yard algorithm.

use crate::error::{CompileError, Stage};

const STAGE: Stage = Stage::Shunting;

/// Converts a normalized (whitespace-free, explicit-concatenation) infix regex into prefix form.
///
/// Operator precedence, highest to lowest: `*`, `.`, `|`. The algorithm scans `regex` back to
/// front, treating a `)` as the opening marker and a `(` as the closing one (since the scan runs
/// right-to-left), emitting a reversed-prefix string, then reverses the whole thing once at the
/// end.
pub fn to_prefix(regex: &str) -> Result<String, CompileError> {
    let span = tracing::debug_span!("to_prefix", input_len = regex.len());
    let _enter = span.enter();

    let chars: Vec<char> = regex.chars().collect();
    let mut op_stack: Vec<char> = Vec::new();
    let mut result = String::with_capacity(chars.len());

    for (rev_idx, &ch) in chars.iter().rev().enumerate() {
        let at = chars.len() - 1 - rev_idx;
        match ch {
            c if c.is_ascii_alphanumeric() => result.push(c),
            '*' => op_stack.push('*'),
            '.' => {
                while matches!(op_stack.last(), Some('*')) {
                    result.push(op_stack.pop().unwrap());
                }
                op_stack.push('.');
            }
            '|' => {
                while matches!(op_stack.last(), Some('.') | Some('*')) {
                    result.push(op_stack.pop().unwrap());
                }
                op_stack.push('|');
            }
            ')' => op_stack.push(')'),
            '(' => {
                loop {
                    match op_stack.pop() {
                        Some(')') => break,
                        Some(top) => result.push(top),
                        None => return Err(CompileError::UnbalancedParens { stage: STAGE }),
                    }
                }
                if let Some(op) = op_stack.pop() {
                    result.push(op);
                }
            }
            other => {
                return Err(CompileError::UnexpectedChar {
                    stage: STAGE,
                    ch: other,
                    at,
                })
            }
        }
    }

    result.extend(op_stack.iter().rev());
    let prefix: String = result.chars().rev().collect();
    tracing::trace!(output_len = prefix.len(), "converted to prefix form");
    Ok(prefix)
}
