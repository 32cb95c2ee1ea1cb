//! Clausal lowerings of boolean expressions.
//!
//! Two routes lead from an arbitrary expression to clauses:
//!
//! - [distributive] --- implications and equivalences unfolded, negations pushed to the leaves, and the result distributed into conjunctive normal form.
//!   Equivalence preserving, and potentially exponential in the size of the expression.
//! - [tseytin] --- the expression binarised and each subformula named by a fresh auxiliary variable.
//!   Satisfiability preserving (not equivalence preserving), and linear in the size of the expression.

pub mod distributive;
pub mod tseytin;

use crate::structures::expr::Var;

/// A literal over an expression variable: the variable paired with a polarity.
pub type SymbolicLiteral = (Var, bool);

/// A clause over expression variables, as produced by the clausal lowerings.
pub type SymbolicClause = Vec<SymbolicLiteral>;
