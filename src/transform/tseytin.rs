/*!
The Tseytin lowering to three-literal conjunctive normal form.

Three steps, applied in sequence:

1. Double negations are removed.
2. The expression is put in binary operator normal form: every conjunction, disjunction, and equivalence of more than two arguments becomes a left-associated nest of binary operators, and unary wrappers unwrap.
3. Each non-literal subformula `S` is named by a fresh auxiliary variable `n`, and clauses equivalent to `n ↔ S` are emitted from a fixed template for the operator of `S`.
   A literal subformula borrows its own literal as its name, and emits nothing.

The unit clause naming the whole expression closes the lowering.

Every emitted clause holds at most three literals, and the count of clauses is linear in the size of the expression.
The result is satisfiability preserving --- not logically equivalent to the input, as the auxiliary variables are unconstrained in models of the input --- and a model of the result restricts to a model of the input.
*/

use crate::structures::expr::{Expr, Var};
use crate::transform::{SymbolicClause, SymbolicLiteral};

/// Lowers an expression to three-literal clauses by subformula naming.
pub fn to_clauses(expr: &Expr) -> Vec<SymbolicClause> {
    let simplified = remove_double_negation(expr.clone());
    let binary = binary_operator_normal_form(simplified);

    let mut clauses = Vec::default();
    let mut auxiliary_count = 0;
    let top = name_subformula(&binary, &mut clauses, &mut auxiliary_count);
    clauses.push(vec![top]);
    clauses
}

/// Removes every double negation.
pub fn remove_double_negation(expr: Expr) -> Expr {
    match expr {
        Expr::Variable(_) => expr,

        Expr::Not(inner) => match *inner {
            Expr::Not(nested) => remove_double_negation(*nested),
            other => remove_double_negation(other).negate(),
        },

        Expr::And(arguments) => Expr::And(
            arguments
                .into_iter()
                .map(remove_double_negation)
                .collect(),
        ),

        Expr::Or(arguments) => Expr::Or(
            arguments
                .into_iter()
                .map(remove_double_negation)
                .collect(),
        ),

        Expr::Imply(antecedent, consequent) => Expr::Imply(
            Box::new(remove_double_negation(*antecedent)),
            Box::new(remove_double_negation(*consequent)),
        ),

        Expr::Iff(arguments) => Expr::Iff(
            arguments
                .into_iter()
                .map(remove_double_negation)
                .collect(),
        ),
    }
}

/// Left-associates every operator of more than two arguments, and unwraps unary wrappers.
pub fn binary_operator_normal_form(expr: Expr) -> Expr {
    match expr {
        Expr::Variable(_) => expr,

        Expr::Not(inner) => binary_operator_normal_form(*inner).negate(),

        Expr::Imply(antecedent, consequent) => Expr::Imply(
            Box::new(binary_operator_normal_form(*antecedent)),
            Box::new(binary_operator_normal_form(*consequent)),
        ),

        Expr::And(arguments) => left_associate(arguments, Expr::And),
        Expr::Or(arguments) => left_associate(arguments, Expr::Or),
        Expr::Iff(arguments) => left_associate(arguments, Expr::Iff),
    }
}

fn left_associate(arguments: Vec<Expr>, operator: fn(Vec<Expr>) -> Expr) -> Expr {
    let mut arguments = arguments.into_iter().map(binary_operator_normal_form);
    let Some(first) = arguments.next() else {
        panic!("! Binarisation of an operator over no arguments");
    };
    arguments.fold(first, |nest, argument| operator(vec![nest, argument]))
}

fn negated(literal: &SymbolicLiteral) -> SymbolicLiteral {
    (literal.0.clone(), !literal.1)
}

/// Names a subformula, emitting the clauses of `name ↔ subformula`, and returns the naming literal.
fn name_subformula(
    expr: &Expr,
    clauses: &mut Vec<SymbolicClause>,
    auxiliary_count: &mut u32,
) -> SymbolicLiteral {
    // Literal subformulas borrow their own literal.
    match expr {
        Expr::Variable(v) => return (v.clone(), true),
        Expr::Not(inner) => {
            if let Expr::Variable(v) = inner.as_ref() {
                return (v.clone(), false);
            }
        }
        _ => {}
    }

    *auxiliary_count += 1;
    let name: SymbolicLiteral = (Var::Aux(*auxiliary_count), true);
    let not_name = negated(&name);

    match expr {
        Expr::Not(inner) => {
            let q = name_subformula(inner, clauses, auxiliary_count);
            clauses.push(vec![name.clone(), q.clone()]);
            clauses.push(vec![not_name, negated(&q)]);
        }

        Expr::And(arguments) => {
            let [left, right] = arguments.as_slice() else {
                panic!("! Subformula naming on a non-binary conjunction");
            };
            let q = name_subformula(left, clauses, auxiliary_count);
            let r = name_subformula(right, clauses, auxiliary_count);
            clauses.push(vec![name.clone(), negated(&q), negated(&r)]);
            clauses.push(vec![not_name.clone(), q]);
            clauses.push(vec![not_name, r]);
        }

        Expr::Or(arguments) => {
            let [left, right] = arguments.as_slice() else {
                panic!("! Subformula naming on a non-binary disjunction");
            };
            let q = name_subformula(left, clauses, auxiliary_count);
            let r = name_subformula(right, clauses, auxiliary_count);
            clauses.push(vec![not_name, q.clone(), r.clone()]);
            clauses.push(vec![name.clone(), negated(&q)]);
            clauses.push(vec![name.clone(), negated(&r)]);
        }

        Expr::Imply(antecedent, consequent) => {
            let q = name_subformula(antecedent, clauses, auxiliary_count);
            let r = name_subformula(consequent, clauses, auxiliary_count);
            clauses.push(vec![not_name, negated(&q), r.clone()]);
            clauses.push(vec![name.clone(), negated(&r)]);
            clauses.push(vec![name.clone(), q]);
        }

        Expr::Iff(arguments) => {
            let [left, right] = arguments.as_slice() else {
                panic!("! Subformula naming on a non-binary equivalence");
            };
            let q = name_subformula(left, clauses, auxiliary_count);
            let r = name_subformula(right, clauses, auxiliary_count);
            clauses.push(vec![name.clone(), q.clone(), r.clone()]);
            clauses.push(vec![name.clone(), negated(&q), negated(&r)]);
            clauses.push(vec![not_name.clone(), q.clone(), negated(&r)]);
            clauses.push(vec![not_name, negated(&q), r]);
        }

        Expr::Variable(_) => unreachable!("literal subformulas return above"),
    }

    name
}

#[cfg(test)]
mod tseytin_tests {
    use super::*;

    fn var(label: &str) -> Expr {
        Expr::named(label)
    }

    #[test]
    fn wide_operators_binarise_left() {
        let expr = Expr::And(vec![var("p"), var("q"), var("r")]);
        let binary = binary_operator_normal_form(expr);
        assert_eq!(binary.to_string(), "(/\\ (/\\ p q) r)");
    }

    #[test]
    fn unary_wrappers_unwrap() {
        let expr = Expr::Or(vec![var("p")]);
        assert_eq!(binary_operator_normal_form(expr), var("p"));
    }

    #[test]
    fn double_negations_remove() {
        let expr = var("p").negate().negate().negate();
        assert_eq!(remove_double_negation(expr), var("p").negate());
    }

    #[test]
    fn literals_emit_no_clauses() {
        let clauses = to_clauses(&var("p"));
        assert_eq!(clauses, vec![vec![(Var::Named("p".to_string()), true)]]);

        let clauses = to_clauses(&var("p").negate());
        assert_eq!(clauses, vec![vec![(Var::Named("p".to_string()), false)]]);
    }

    #[test]
    fn clauses_stay_narrow() {
        let expr = Expr::Iff(vec![
            Expr::And(vec![var("p"), var("q"), var("r")]),
            Expr::Or(vec![var("s"), Expr::Imply(Box::new(var("t")), Box::new(var("u")))]),
        ]);
        for clause in to_clauses(&expr) {
            assert!(clause.len() <= 3);
        }
    }

    #[test]
    fn one_unit_names_the_whole_formula() {
        let expr = Expr::And(vec![
            Expr::Or(vec![var("p"), var("q")]),
            Expr::Or(vec![var("p").negate(), var("r")]),
        ]);
        let clauses = to_clauses(&expr);

        let units = clauses
            .iter()
            .filter(|clause| clause.len() == 1)
            .collect::<Vec<_>>();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0], clauses.last().expect("clauses"));
        assert!(matches!(units[0].as_slice(), [(Var::Aux(_), true)]));
    }

    #[test]
    fn clause_count_is_linear() {
        // A conjunction of n disjunctions: 3 clauses per named subformula plus the top unit.
        let disjuncts = (0..10)
            .map(|i| Expr::Or(vec![var(&format!("p{i}")), var(&format!("q{i}"))]))
            .collect::<Vec<_>>();
        let expr = Expr::And(disjuncts);
        // 10 disjunctions and 9 nested conjunctions name 19 subformulas.
        assert_eq!(to_clauses(&expr).len(), 19 * 3 + 1);
    }
}
