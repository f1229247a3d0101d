//! The parse-tree builder, a recursive descent over the prefix-form grammar
//! `R ::= Alnum | '*' R | '.' R R | '|' R R`.

use crate::error::{CompileError, Stage};
use nom::character::complete::satisfy;
use nom::combinator::map;
use nom::sequence::pair;
use nom::IResult;

const STAGE: Stage = Stage::Parse;

/// A node of the regex abstract syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A leaf carrying a single alphabet symbol.
    Literal(char),
    /// Kleene star, zero-or-more repetitions of `child`.
    Star(Box<Node>),
    /// Sequencing: `left` followed by `right`.
    Concat(Box<Node>, Box<Node>),
    /// Alternation: `left` or `right`.
    Alt(Box<Node>, Box<Node>),
}

/// Parses a full prefix-form string into an AST, requiring the entire input be consumed.
pub fn build_ast(prefix: &str) -> Result<Node, CompileError> {
    let span = tracing::debug_span!("build_ast", input_len = prefix.len());
    let _enter = span.enter();

    let (remainder, tree) = expr(prefix).map_err(|e| from_nom_err(prefix, e))?;
    if !remainder.is_empty() {
        return Err(CompileError::TrailingInput {
            remainder: remainder.to_string(),
        });
    }
    tracing::trace!("parsed AST");
    Ok(tree)
}

fn expr(input: &str) -> IResult<&str, Node> {
    if input.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Eof,
        )));
    }
    let (rest, head) = satisfy(|_| true)(input)?;
    match head {
        c if c.is_ascii_alphanumeric() => Ok((rest, Node::Literal(c))),
        '*' => map(expr, |child| Node::Star(Box::new(child)))(rest),
        '.' => map(pair(expr, expr), |(l, r)| Node::Concat(Box::new(l), Box::new(r)))(rest),
        '|' => map(pair(expr, expr), |(l, r)| Node::Alt(Box::new(l), Box::new(r)))(rest),
        _ => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        ))),
    }
}

fn from_nom_err(original: &str, err: nom::Err<nom::error::Error<&str>>) -> CompileError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            if e.input.is_empty() {
                CompileError::UnexpectedEnd { stage: STAGE }
            } else {
                let at = original.len() - e.input.len();
                let ch = e.input.chars().next().expect("non-empty input");
                CompileError::UnexpectedChar {
                    stage: STAGE,
                    ch,
                    at,
                }
            }
        }
        nom::Err::Incomplete(_) => CompileError::UnexpectedEnd { stage: STAGE },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal() {
        assert_eq!(build_ast("a").unwrap(), Node::Literal('a'));
    }

    #[test]
    fn star() {
        assert_eq!(
            build_ast("*a").unwrap(),
            Node::Star(Box::new(Node::Literal('a')))
        );
    }

    #[test]
    fn concat_and_alt() {
        assert_eq!(
            build_ast(".ab").unwrap(),
            Node::Concat(Box::new(Node::Literal('a')), Box::new(Node::Literal('b')))
        );
        assert_eq!(
            build_ast("|ab").unwrap(),
            Node::Alt(Box::new(Node::Literal('a')), Box::new(Node::Literal('b')))
        );
    }

    #[test]
    fn scenario_tree_shape() {
        // prefix form of d|(a*.b|c*).e, from the shunting-yard scenario table
        let tree = build_ast("|d.|.*ab*ce").unwrap();
        assert_eq!(
            tree,
            Node::Alt(
                Box::new(Node::Literal('d')),
                Box::new(Node::Concat(
                    Box::new(Node::Alt(
                        Box::new(Node::Concat(
                            Box::new(Node::Star(Box::new(Node::Literal('a')))),
                            Box::new(Node::Literal('b')),
                        )),
                        Box::new(Node::Star(Box::new(Node::Literal('c')))),
                    )),
                    Box::new(Node::Literal('e')),
                )),
            )
        );
    }

    #[test]
    fn rejects_truncated_input() {
        assert!(matches!(
            build_ast(".a"),
            Err(CompileError::UnexpectedEnd { .. })
        ));
        assert!(matches!(build_ast(""), Err(CompileError::UnexpectedEnd { .. })));
    }

    #[test]
    fn rejects_trailing_input() {
        assert!(matches!(
            build_ast("ab"),
            Err(CompileError::TrailingInput { .. })
        ));
    }

    #[test]
    fn rejects_invalid_char() {
        assert!(matches!(
            build_ast("$"),
            Err(CompileError::UnexpectedChar { ch: '$', .. })
        ));
    }
}
