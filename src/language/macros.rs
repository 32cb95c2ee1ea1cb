/*!
The macro expander.

# Overview

A source program is a sequence of top-level terms, of which all but the last must be macro definitions.
Two forms of definition are accepted:

- `(macro NAME BODY)` --- a nullary macro, referenced as the name `#NAME`.
- `(macro NAME (PARAM …) BODY)` --- a macro with formal parameters, referenced as a tuple headed by `NAME`.

Macros are applied LIFO: the final term is rewritten by each user macro in reverse declaration order, and then by the fixed standard macros.
So, a macro may reference only the macros declared before it, and recursion is impossible by construction.

Each application is a full post-order rewrite of the term: sub-terms are rewritten before the tuple holding them, so the arguments of a macro instance are expanded before substitution.

# The standard macros

| form                      | semantics                                                                  |
|---------------------------|----------------------------------------------------------------------------|
| `(/\ * i lo hi body)`      | `(/\ body[i≔lo] … body[i≔hi])`                                             |
| `(\/ * i lo hi body)`      | the same, wrapped in `\/`                                                  |
| `(/\ ** lo i j hi body)`   | `(/\ …)` over `body[i≔a, j≔b]` for every `lo ≤ a < b ≤ hi`                 |
| `(\/ ** lo i j hi body)`   | the same, wrapped in `\/`                                                  |
| `(calc t₁ … tₖ)`          | postfix arithmetic over integers, leaving a single number                  |
| `(if n body)`             | `body` when `n` is a number other than zero, the tuple `(empty)` otherwise |

The ranged forms apply before `calc`, and `calc` before `if`.
This way arithmetic over a range index is resolved once the index has been substituted, and a guard `(if (calc …) …)` sees a numeric condition.

An expansion over no values --- a single range with `lo > hi`, a pairwise range with fewer than two values, or a failed guard --- yields the tuple `(empty)`, which is pruned before lowering.

# Substitution

Substituting a term *r* for a parameter *x* replaces every leaf name equal to *x* with *r*.
A compound name is split on underscores, and any segment equal to *x* is replaced by the text of *r* and the name rejoined --- so `q_i_j` under `i ≔ 3` becomes `q_3_j`.
Only a name or a number may be written into a segment: substituting a tuple into a compound name is an error.
*/

use crate::language::parser::Term;
use crate::types::err::{self, MacroError, ParseError};

/// A user macro definition.
#[derive(Clone, Debug)]
pub struct MacroDef {
    /// The name of the macro.
    pub name: String,

    /// Formal parameters, absent for the nullary form.
    pub params: Option<Vec<String>>,

    /// The body the macro expands to.
    pub body: Term,
}

/// Splits a program into its macro definitions and formula, and expands the formula.
///
/// ```rust
/// # use cpl_sat::language::{macros::expand_program, parser::parse_source};
/// let terms = parse_source("(macro f (x) (\\/ x_1 x_2)) (f p)").unwrap();
/// assert_eq!(expand_program(terms).unwrap().to_string(), "(\\/ p_1 p_2)");
/// ```
pub fn expand_program(terms: Vec<Term>) -> Result<Term, err::ErrorKind> {
    let mut terms = terms;
    let Some(formula) = terms.pop() else {
        return Err(err::ErrorKind::from(ParseError::EmptyProgram));
    };

    let mut definitions: Vec<MacroDef> = Vec::with_capacity(terms.len());
    for term in terms {
        let definition = read_definition(&term)?;
        if definitions.iter().any(|known| known.name == definition.name) {
            return Err(err::ErrorKind::from(MacroError::DuplicateDefinition(
                definition.name,
            )));
        }
        definitions.push(definition);
    }

    expand(formula, &definitions)
}

/// Expands a term with respect to the given definitions.
///
/// Expanding an already-expanded term again is a no-op.
pub fn expand(term: Term, definitions: &[MacroDef]) -> Result<Term, err::ErrorKind> {
    let mut term = term;

    for definition in definitions.iter().rev() {
        log::trace!(target: crate::misc::log::targets::EXPANSION, "Applying {}", definition.name);
        term = apply_user(term, definition)?;
    }

    term = apply_range_single(term, "/\\*", "/\\")?;
    term = apply_range_single(term, "\\/*", "\\/")?;
    term = apply_range_pairwise(term, "/\\**", "/\\")?;
    term = apply_range_pairwise(term, "\\/**", "\\/")?;
    term = apply_calc(term)?;
    term = apply_if(term)?;

    Ok(term)
}

/// Reads a top-level term as a macro definition.
fn read_definition(term: &Term) -> Result<MacroDef, err::ErrorKind> {
    let Term::Tuple(children) = term else {
        return Err(err::ErrorKind::from(ParseError::UnexpectedTopLevelTerm));
    };
    if !matches!(children.first(), Some(Term::Name(head)) if head == "macro") {
        return Err(err::ErrorKind::from(ParseError::UnexpectedTopLevelTerm));
    }

    match children.as_slice() {
        [_, Term::Name(name), body] => Ok(MacroDef {
            name: name.clone(),
            params: None,
            body: body.clone(),
        }),

        [_, Term::Name(name), Term::Tuple(params), body] => {
            let mut names = Vec::with_capacity(params.len());
            for param in params {
                match param {
                    Term::Name(param) => names.push(param.clone()),
                    _ => return Err(err::ErrorKind::from(MacroError::MalformedDefinition)),
                }
            }
            Ok(MacroDef {
                name: name.clone(),
                params: Some(names),
                body: body.clone(),
            })
        }

        _ => Err(err::ErrorKind::from(MacroError::MalformedDefinition)),
    }
}

/// Rewrites every instance of a user macro, innermost instances first.
fn apply_user(term: Term, definition: &MacroDef) -> Result<Term, err::ErrorKind> {
    match term {
        Term::Name(ref name) => {
            match definition.params.is_none()
                && name.strip_prefix('#') == Some(definition.name.as_str())
            {
                true => Ok(definition.body.clone()),
                false => Ok(term),
            }
        }

        Term::Number(_) => Ok(term),

        Term::Tuple(children) => {
            let children = children
                .into_iter()
                .map(|child| apply_user(child, definition))
                .collect::<Result<Vec<_>, _>>()?;

            let is_instance =
                matches!(children.first(), Some(Term::Name(head)) if *head == definition.name);
            if !is_instance {
                return Ok(Term::Tuple(children));
            }

            let arguments = &children[1..];
            let expected = definition.params.as_ref().map_or(0, |params| params.len());
            if arguments.len() != expected {
                return Err(err::ErrorKind::from(MacroError::Arity {
                    name: definition.name.clone(),
                    expected,
                    given: arguments.len(),
                }));
            }

            let mut body = definition.body.clone();
            if let Some(params) = &definition.params {
                for (param, argument) in params.iter().zip(arguments) {
                    body = substitute(body, param, argument)?;
                }
            }
            Ok(body)
        }
    }
}

/// Substitutes a term for a parameter, including into underscore segments of compound names.
pub fn substitute(
    term: Term,
    parameter: &str,
    replacement: &Term,
) -> Result<Term, err::ErrorKind> {
    match term {
        Term::Name(name) => {
            if name == parameter {
                return Ok(replacement.clone());
            }

            if name.contains('_') && name.split('_').any(|segment| segment == parameter) {
                let text = match replacement {
                    Term::Name(text) => text.clone(),
                    Term::Number(number) => number.to_string(),
                    Term::Tuple(_) => {
                        return Err(err::ErrorKind::from(MacroError::TupleIntoCompoundName(
                            name,
                        )))
                    }
                };
                let rejoined = name
                    .split('_')
                    .map(|segment| match segment == parameter {
                        true => text.as_str(),
                        false => segment,
                    })
                    .collect::<Vec<_>>()
                    .join("_");
                return Ok(Term::Name(rejoined));
            }

            Ok(Term::Name(name))
        }

        Term::Number(_) => Ok(term),

        Term::Tuple(children) => {
            let children = children
                .into_iter()
                .map(|child| substitute(child, parameter, replacement))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Term::Tuple(children))
        }
    }
}

/// Rewrites every `(head i lo hi body)` to the wrapped expansion of `body` over `lo ≤ i ≤ hi`.
fn apply_range_single(term: Term, head: &str, wrapper: &str) -> Result<Term, err::ErrorKind> {
    let Term::Tuple(children) = term else {
        return Ok(term);
    };

    let children = children
        .into_iter()
        .map(|child| apply_range_single(child, head, wrapper))
        .collect::<Result<Vec<_>, _>>()?;

    if !matches!(children.first(), Some(Term::Name(h)) if h == head) {
        return Ok(Term::Tuple(children));
    }

    let [_, index, low, high, body] = children.as_slice() else {
        return Err(err::ErrorKind::from(MacroError::Arity {
            name: head.to_string(),
            expected: 4,
            given: children.len() - 1,
        }));
    };

    let Term::Name(index) = index else {
        return Err(err::ErrorKind::from(MacroError::RangeIndex(
            index.to_string(),
        )));
    };
    let (low, high) = range_bounds(low, high)?;

    let mut expansions = Vec::default();
    for value in low..=high {
        expansions.push(substitute(body.clone(), index, &Term::Number(value))?);
    }

    Ok(wrap(wrapper, expansions))
}

/// Rewrites every `(head lo i j hi body)` to the wrapped expansion of `body` over pairs `lo ≤ i < j ≤ hi`.
fn apply_range_pairwise(term: Term, head: &str, wrapper: &str) -> Result<Term, err::ErrorKind> {
    let Term::Tuple(children) = term else {
        return Ok(term);
    };

    let children = children
        .into_iter()
        .map(|child| apply_range_pairwise(child, head, wrapper))
        .collect::<Result<Vec<_>, _>>()?;

    if !matches!(children.first(), Some(Term::Name(h)) if h == head) {
        return Ok(Term::Tuple(children));
    }

    let [_, low, first, second, high, body] = children.as_slice() else {
        return Err(err::ErrorKind::from(MacroError::Arity {
            name: head.to_string(),
            expected: 5,
            given: children.len() - 1,
        }));
    };

    let (Term::Name(first), Term::Name(second)) = (first, second) else {
        return Err(err::ErrorKind::from(MacroError::RangeIndex(format!(
            "{first} {second}"
        ))));
    };
    let (low, high) = range_bounds(low, high)?;

    let mut expansions = Vec::default();
    for a in low..=high {
        for b in (a + 1)..=high {
            let body = substitute(body.clone(), first, &Term::Number(a))?;
            expansions.push(substitute(body, second, &Term::Number(b))?);
        }
    }

    Ok(wrap(wrapper, expansions))
}

fn range_bounds(low: &Term, high: &Term) -> Result<(i64, i64), err::ErrorKind> {
    match (low, high) {
        (Term::Number(low), Term::Number(high)) => Ok((*low, *high)),
        (Term::Number(_), other) | (other, _) => Err(err::ErrorKind::from(
            MacroError::RangeBound(other.to_string()),
        )),
    }
}

/// Wraps expansions in the given operator, or yields `(empty)` for an expansion over no values.
fn wrap(wrapper: &str, mut expansions: Vec<Term>) -> Term {
    match expansions.is_empty() {
        true => Term::empty(),
        false => {
            let mut children = vec![Term::name(wrapper)];
            children.append(&mut expansions);
            Term::Tuple(children)
        }
    }
}

/// Evaluates every `(calc …)` by postfix arithmetic over integers.
fn apply_calc(term: Term) -> Result<Term, err::ErrorKind> {
    let Term::Tuple(children) = term else {
        return Ok(term);
    };

    let children = children
        .into_iter()
        .map(apply_calc)
        .collect::<Result<Vec<_>, _>>()?;

    if !matches!(children.first(), Some(Term::Name(h)) if h == "calc") {
        return Ok(Term::Tuple(children));
    }

    let mut stack: Vec<i64> = Vec::default();
    for argument in &children[1..] {
        match argument {
            Term::Number(number) => stack.push(*number),

            Term::Name(operation) => {
                let operation: fn(i64, i64) -> i64 = match operation.as_str() {
                    "+" => |a: i64, b: i64| a + b,
                    "-" => |a: i64, b: i64| a - b,
                    "*" => |a: i64, b: i64| a * b,
                    "=" => |a: i64, b: i64| (a == b) as i64,
                    "and" => |a: i64, b: i64| (a != 0 && b != 0) as i64,
                    "or" => |a: i64, b: i64| (a != 0 || b != 0) as i64,
                    _ => {
                        return Err(err::ErrorKind::from(MacroError::CalcOperand(
                            operation.clone(),
                        )))
                    }
                };

                let Some(b) = stack.pop() else {
                    return Err(err::ErrorKind::from(MacroError::CalcStack));
                };
                let Some(a) = stack.pop() else {
                    return Err(err::ErrorKind::from(MacroError::CalcStack));
                };
                stack.push(operation(a, b));
            }

            Term::Tuple(_) => {
                return Err(err::ErrorKind::from(MacroError::CalcOperand(
                    argument.to_string(),
                )))
            }
        }
    }

    match stack.as_slice() {
        [result] => Ok(Term::Number(*result)),
        _ => Err(err::ErrorKind::from(MacroError::CalcStack)),
    }
}

/// Rewrites every `(if n body)` to `body` when `n` is non-zero and to `(empty)` otherwise.
fn apply_if(term: Term) -> Result<Term, err::ErrorKind> {
    let Term::Tuple(children) = term else {
        return Ok(term);
    };

    let mut children = children
        .into_iter()
        .map(apply_if)
        .collect::<Result<Vec<_>, _>>()?;

    if !matches!(children.first(), Some(Term::Name(h)) if h == "if") {
        return Ok(Term::Tuple(children));
    }

    match children.as_mut_slice() {
        [_, Term::Number(condition), body] => match *condition != 0 {
            true => Ok(std::mem::replace(body, Term::empty())),
            false => Ok(Term::empty()),
        },
        [_, _, _] => Err(err::ErrorKind::from(MacroError::IfCondition)),
        _ => Err(err::ErrorKind::from(MacroError::Arity {
            name: "if".to_string(),
            expected: 2,
            given: children.len() - 1,
        })),
    }
}
