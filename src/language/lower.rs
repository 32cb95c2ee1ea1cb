/*!
Lowering --- a fully expanded term to a boolean expression.

The recognised operators are `and`/`/\`, `or`/`\/`, `not`/`~`, `imply`/`->`, and `iff`/`<->`.
Two meta forms are handled here rather than by the macro expander:

- `(_ t₁ … tₖ)` --- every `tᵢ` must be an already-expanded name or number, and the result is a single variable labelled by the underscore-join of the parts.
  This realises indexed variable families: `(_ p 3 5)` is the variable `p_3_5`.
- `(? v)` --- consults the assignment map supplied alongside the term, resolving to the variable itself when the recorded value is true and to its negation when false.
  A query on a variable with no recorded value is an error.

A number in operand position becomes a variable labelled by its decimal text, which permits uniform compound-name construction.
A name `#NAME` surviving expansion is a dangling macro reference, and an error.

The `(empty)` tuples left behind by guards and empty ranges are pruned from `and`/`or` argument lists before lowering proper.
An `and`/`or` whose arguments all prune away is itself `(empty)`.
*/

use std::collections::BTreeMap;

use crate::language::parser::Term;
use crate::structures::expr::Expr;
use crate::types::err::{self, MacroError, ShapeError};

/// Assignments consulted by the `(? v)` form, keyed by source label.
pub type LabelAssignment = BTreeMap<String, bool>;

/// Removes `(empty)` tuples from `and`/`or` argument lists, recursively.
///
/// An `and`/`or` left with no arguments rewrites to `(empty)` itself.
pub fn prune_empty(term: Term) -> Term {
    let Term::Tuple(children) = term else {
        return term;
    };

    let conjunctive = matches!(
        children.first(),
        Some(Term::Name(head)) if matches!(head.as_str(), "and" | "/\\" | "or" | "\\/")
    );

    let mut pruned = Vec::with_capacity(children.len());
    let mut children = children.into_iter();
    pruned.extend(children.next());
    for child in children {
        let child = prune_empty(child);
        if !(conjunctive && child.is_empty_marker()) {
            pruned.push(child);
        }
    }

    match conjunctive && pruned.len() == 1 {
        true => Term::empty(),
        false => Term::Tuple(pruned),
    }
}

/// Lowers a fully expanded term to a boolean expression.
pub fn lower(term: &Term, assignments: Option<&LabelAssignment>) -> Result<Expr, err::ErrorKind> {
    match term {
        Term::Name(name) => match name.starts_with('#') {
            true => Err(err::ErrorKind::from(MacroError::UnknownReference(
                name.clone(),
            ))),
            false => Ok(Expr::named(name.clone())),
        },

        Term::Number(number) => Ok(Expr::named(number.to_string())),

        Term::Tuple(children) => {
            let Some(Term::Name(head)) = children.first() else {
                return Err(err::ErrorKind::from(ShapeError::UnknownOperator(
                    term.to_string(),
                )));
            };
            let arguments = &children[1..];

            match head.as_str() {
                "and" | "/\\" => lower_list(arguments, assignments, head, Expr::And),

                "or" | "\\/" => lower_list(arguments, assignments, head, Expr::Or),

                "not" | "~" => match arguments {
                    [argument] => Ok(lower(argument, assignments)?.negate()),
                    _ => Err(err::ErrorKind::from(arity(head, arguments.len()))),
                },

                "imply" | "->" => match arguments {
                    [antecedent, consequent] => Ok(Expr::Imply(
                        Box::new(lower(antecedent, assignments)?),
                        Box::new(lower(consequent, assignments)?),
                    )),
                    _ => Err(err::ErrorKind::from(arity(head, arguments.len()))),
                },

                "iff" | "<->" => lower_list(arguments, assignments, head, Expr::Iff),

                "_" => {
                    if arguments.is_empty() {
                        return Err(err::ErrorKind::from(arity(head, 0)));
                    }
                    let mut parts = Vec::with_capacity(arguments.len());
                    for argument in arguments {
                        match argument {
                            Term::Name(name) if name.starts_with('#') => {
                                return Err(err::ErrorKind::from(MacroError::UnknownReference(
                                    name.clone(),
                                )))
                            }
                            Term::Name(name) => parts.push(name.clone()),
                            Term::Number(number) => parts.push(number.to_string()),
                            Term::Tuple(_) => {
                                return Err(err::ErrorKind::from(ShapeError::IndexedArgument))
                            }
                        }
                    }
                    Ok(Expr::named(parts.join("_")))
                }

                "?" => match arguments {
                    [queried] => {
                        let Expr::Variable(variable) = lower(queried, assignments)? else {
                            return Err(err::ErrorKind::from(ShapeError::UnassignedQuery(
                                queried.to_string(),
                            )));
                        };
                        let label = variable.to_string();
                        match assignments.and_then(|map| map.get(&label).copied()) {
                            Some(true) => Ok(Expr::Variable(variable)),
                            Some(false) => Ok(Expr::Variable(variable).negate()),
                            None => {
                                Err(err::ErrorKind::from(ShapeError::UnassignedQuery(label)))
                            }
                        }
                    }
                    _ => Err(err::ErrorKind::from(arity(head, arguments.len()))),
                },

                "empty" => Err(err::ErrorKind::from(ShapeError::EmptyTerm)),

                _ => Err(err::ErrorKind::from(ShapeError::UnknownOperator(
                    head.clone(),
                ))),
            }
        }
    }
}

/// Lowers the argument list of an `and`/`or`/`iff`.
///
/// A single argument unwraps to itself, normalising the operator away.
fn lower_list(
    arguments: &[Term],
    assignments: Option<&LabelAssignment>,
    operator: &str,
    build: fn(Vec<Expr>) -> Expr,
) -> Result<Expr, err::ErrorKind> {
    let mut lowered = arguments
        .iter()
        .map(|argument| lower(argument, assignments))
        .collect::<Result<Vec<_>, _>>()?;

    match lowered.len() {
        0 => Err(err::ErrorKind::from(arity(operator, 0))),
        1 => Ok(lowered.pop().expect("an argument")),
        _ => Ok(build(lowered)),
    }
}

fn arity(operator: &str, given: usize) -> ShapeError {
    ShapeError::Arity {
        operator: operator.to_string(),
        given,
    }
}

#[cfg(test)]
mod lower_tests {
    use super::*;
    use crate::language::{macros::expand_program, parser::parse_source};
    use crate::structures::expr::Var;

    fn lowered(source: &str) -> Result<Expr, err::ErrorKind> {
        let term = expand_program(parse_source(source).expect("terms"))?;
        lower(&prune_empty(term), None)
    }

    #[test]
    fn operators() {
        let expr = lowered("(-> (/\\ p q) (\\/ (~ r) (<-> s t)))").expect("expression");
        assert_eq!(expr.to_string(), "(-> (/\\ p q) (\\/ (~ r) (<-> s t)))");
    }

    #[test]
    fn word_operators() {
        let expr = lowered("(imply (and p q) (or (not r) (iff s t)))").expect("expression");
        assert_eq!(expr.to_string(), "(-> (/\\ p q) (\\/ (~ r) (<-> s t)))");
    }

    #[test]
    fn indexed_variables_join() {
        let expr = lowered("(_ p 3 5)").expect("expression");
        assert_eq!(expr, Expr::named("p_3_5"));
    }

    #[test]
    fn numbers_become_labels() {
        let expr = lowered("(\\/ 3 p)").expect("expression");
        assert_eq!(
            expr,
            Expr::Or(vec![Expr::named("3"), Expr::named("p")])
        );
    }

    #[test]
    fn dangling_references_rejected() {
        assert_eq!(
            lowered("(\\/ #f p)"),
            Err(err::ErrorKind::Macro(MacroError::UnknownReference(
                "#f".to_string()
            )))
        );
    }

    #[test]
    fn tuples_rejected_within_indexing() {
        assert_eq!(
            lowered("(_ p (\\/ q r))"),
            Err(err::ErrorKind::Shape(ShapeError::IndexedArgument))
        );
    }

    #[test]
    fn queries_resolve_against_assignments() {
        let term = expand_program(parse_source("(/\\ (? p) (? q))").expect("terms"))
            .expect("expansion");
        let mut assignments = LabelAssignment::default();
        assignments.insert("p".to_string(), true);
        assignments.insert("q".to_string(), false);

        let expr = lower(&term, Some(&assignments)).expect("expression");
        assert_eq!(
            expr,
            Expr::And(vec![
                Expr::Variable(Var::Named("p".to_string())),
                Expr::Variable(Var::Named("q".to_string())).negate(),
            ])
        );
    }

    #[test]
    fn unassigned_queries_rejected() {
        assert_eq!(
            lowered("(? p)"),
            Err(err::ErrorKind::Shape(ShapeError::UnassignedQuery(
                "p".to_string()
            )))
        );
    }

    #[test]
    fn guards_prune_from_conjunctions() {
        let expr = lowered("(/\\* i 1 3 (if (calc i 2 =) p_i))").expect("expression");
        assert_eq!(expr, Expr::named("p_2"));
    }

    #[test]
    fn unary_wrappers_unwrap() {
        assert_eq!(lowered("(/\\ p)").expect("expression"), Expr::named("p"));
        assert_eq!(lowered("(\\/ p)").expect("expression"), Expr::named("p"));
    }
}
