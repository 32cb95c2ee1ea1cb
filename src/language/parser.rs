/*!
The parser --- tokens to terms.

A term is a name, a number, or a non-empty tuple of terms whose first sub-term is a name (the operator).

Parsing keeps an explicit stack of open tuples rather than recursing, so deeply nested input exhausts memory before it exhausts the call stack.
An open brace pushes a fresh tuple, a close brace pops the top tuple and appends it to the tuple below (or to the top-level sequence, if none is below), and names and numbers append to whichever of these is current.
*/

use crate::language::tokenizer::{tokenize, Location, Token, TokenKind};
use crate::types::err::{self, ParseError};

/// A term of the constraint language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// A name.
    Name(String),

    /// A number.
    Number(i64),

    /// A non-empty tuple of terms, headed by a name.
    Tuple(Vec<Term>),
}

impl Term {
    /// A name term, from anything string-like.
    pub fn name(text: impl Into<String>) -> Self {
        Term::Name(text.into())
    }

    /// The `(empty)` tuple, produced by macros which expand to no constraint.
    pub fn empty() -> Self {
        Term::Tuple(vec![Term::name("empty")])
    }

    /// True iff the term is the `(empty)` tuple.
    pub fn is_empty_marker(&self) -> bool {
        match self {
            Term::Tuple(children) => {
                matches!(children.as_slice(), [Term::Name(head)] if head == "empty")
            }
            _ => false,
        }
    }

    /// The head name of a tuple, if the term is a tuple.
    pub fn head(&self) -> Option<&str> {
        match self {
            Term::Tuple(children) => match children.first() {
                Some(Term::Name(head)) => Some(head.as_str()),
                _ => None,
            },
            _ => None,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Name(name) => write!(f, "{name}"),
            Term::Number(number) => write!(f, "{number}"),
            Term::Tuple(children) => {
                write!(f, "(")?;
                let mut children = children.iter();
                if let Some(first) = children.next() {
                    write!(f, "{first}")?;
                    for child in children {
                        write!(f, " {child}")?;
                    }
                }
                write!(f, ")")
            }
        }
    }
}

/// Builds the top-level sequence of terms from tokens.
pub fn parse(tokens: &[Token]) -> Result<Vec<Term>, err::ErrorKind> {
    let mut top_level: Vec<Term> = Vec::default();
    let mut stack: Vec<(Vec<Term>, Location)> = Vec::default();

    for token in tokens {
        match &token.kind {
            TokenKind::Open => stack.push((Vec::default(), token.location)),

            TokenKind::Close => {
                let Some((children, _)) = stack.pop() else {
                    return Err(err::ErrorKind::from(ParseError::UnbalancedClose(
                        token.location,
                    )));
                };

                if children.is_empty() {
                    return Err(err::ErrorKind::from(ParseError::EmptyTuple(token.location)));
                }

                if !matches!(children.first(), Some(Term::Name(_))) {
                    return Err(err::ErrorKind::from(ParseError::TupleHead(token.location)));
                }

                let tuple = Term::Tuple(children);
                match stack.last_mut() {
                    Some((parent, _)) => parent.push(tuple),
                    None => top_level.push(tuple),
                }
            }

            TokenKind::Name(name) => {
                let leaf = Term::Name(name.clone());
                match stack.last_mut() {
                    Some((parent, _)) => parent.push(leaf),
                    None => top_level.push(leaf),
                }
            }

            TokenKind::Number(number) => {
                let leaf = Term::Number(*number);
                match stack.last_mut() {
                    Some((parent, _)) => parent.push(leaf),
                    None => top_level.push(leaf),
                }
            }
        }
    }

    if let Some((_, location)) = stack.last() {
        return Err(err::ErrorKind::from(ParseError::UnterminatedTuple(
            *location,
        )));
    }

    Ok(top_level)
}

/// Tokenizes and parses source text.
pub fn parse_source(source: &str) -> Result<Vec<Term>, err::ErrorKind> {
    parse(&tokenize(source)?)
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    #[test]
    fn nested_tuples() {
        let terms = parse_source("(and p (or q r))").expect("terms");
        assert_eq!(
            terms,
            vec![Term::Tuple(vec![
                Term::name("and"),
                Term::name("p"),
                Term::Tuple(vec![Term::name("or"), Term::name("q"), Term::name("r")]),
            ])]
        );
    }

    #[test]
    fn top_level_sequence() {
        let terms = parse_source("(macro f p) (and #f q)").expect("terms");
        assert_eq!(terms.len(), 2);
    }

    #[test]
    fn empty_tuple_rejected() {
        assert_eq!(
            parse_source("(and () p)"),
            Err(err::ErrorKind::Parse(ParseError::EmptyTuple(Location {
                line: 1,
                column: 7
            })))
        );
    }

    #[test]
    fn unbalanced_close_rejected() {
        assert!(matches!(
            parse_source("(and p))"),
            Err(err::ErrorKind::Parse(ParseError::UnbalancedClose(_)))
        ));
    }

    #[test]
    fn unterminated_tuple_rejected() {
        assert!(matches!(
            parse_source("(and p (or q"),
            Err(err::ErrorKind::Parse(ParseError::UnterminatedTuple(_)))
        ));
    }

    #[test]
    fn tuple_head_must_be_a_name() {
        assert!(matches!(
            parse_source("(1 2 3)"),
            Err(err::ErrorKind::Parse(ParseError::TupleHead(_)))
        ));
    }

    #[test]
    fn display_reparses_to_the_same_terms() {
        let source = "(macro adv (j) (\\/* i 1 4 (/\\ v_i_j (~ s_i)))) (/\\ (adv 1) s_2)";
        let terms = parse_source(source).expect("terms");
        let printed = terms
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(parse_source(&printed).expect("terms"), terms);
    }
}
