/*!
The distributive lowering to conjunctive normal form.

Three steps, applied in sequence:

1. Conditionals are unfolded: `P → Q` becomes `¬P ∨ Q`, and a chain `P ↔ Q₁ ↔ … ↔ Qₖ` becomes the conjunction of the pairwise unfoldings `(L → R) ∧ (R → L)` of adjacent links.
2. Negations are pushed to the leaves by the De Morgan laws, eliminating double negations along the way.
3. The result is distributed: conjunction concatenates clause lists, and disjunction takes the Cartesian product of clause lists, joining each pair of clauses by disjunction.

The result is logically equivalent to the input, and may be exponentially larger.
*/

use crate::structures::expr::Expr;
use crate::transform::SymbolicClause;

/// Lowers an expression to clauses by distribution.
pub fn to_clauses(expr: &Expr) -> Vec<SymbolicClause> {
    let unfolded = unfold_conditionals(expr.clone());
    let normal = negation_normal_form(unfolded);
    products(&normal)
}

/// The unfolding `(L → R) ∧ (R → L)` of a single equivalence, as disjunctions.
fn unfold_iff(left: Expr, right: Expr) -> Expr {
    Expr::And(vec![
        Expr::Or(vec![left.clone().negate(), right.clone()]),
        Expr::Or(vec![right.negate(), left]),
    ])
}

/// Rewrites implications and equivalences away.
pub fn unfold_conditionals(expr: Expr) -> Expr {
    match expr {
        Expr::Variable(_) => expr,

        Expr::Not(inner) => unfold_conditionals(*inner).negate(),

        Expr::And(arguments) => {
            Expr::And(arguments.into_iter().map(unfold_conditionals).collect())
        }

        Expr::Or(arguments) => Expr::Or(arguments.into_iter().map(unfold_conditionals).collect()),

        Expr::Imply(antecedent, consequent) => Expr::Or(vec![
            unfold_conditionals(*antecedent).negate(),
            unfold_conditionals(*consequent),
        ]),

        Expr::Iff(arguments) => {
            let arguments = arguments
                .into_iter()
                .map(unfold_conditionals)
                .collect::<Vec<_>>();
            let mut unfoldings = Vec::with_capacity(arguments.len() - 1);
            for link in arguments.windows(2) {
                unfoldings.push(unfold_iff(link[0].clone(), link[1].clone()));
            }
            match unfoldings.len() {
                1 => unfoldings.pop().expect("an unfolding"),
                _ => Expr::And(unfoldings),
            }
        }
    }
}

/// Pushes negations to the leaves and eliminates double negations.
pub fn negation_normal_form(expr: Expr) -> Expr {
    negate_into(expr, false)
}

fn negate_into(expr: Expr, negated: bool) -> Expr {
    match expr {
        Expr::Variable(_) => match negated {
            true => expr.negate(),
            false => expr,
        },

        Expr::Not(inner) => negate_into(*inner, !negated),

        Expr::And(arguments) => {
            let arguments = arguments
                .into_iter()
                .map(|argument| negate_into(argument, negated))
                .collect();
            match negated {
                true => Expr::Or(arguments),
                false => Expr::And(arguments),
            }
        }

        Expr::Or(arguments) => {
            let arguments = arguments
                .into_iter()
                .map(|argument| negate_into(argument, negated))
                .collect();
            match negated {
                true => Expr::And(arguments),
                false => Expr::Or(arguments),
            }
        }

        // Conditionals unfold first, so negation distributes over the unfolding.
        Expr::Imply(_, _) | Expr::Iff(_) => negate_into(unfold_conditionals(expr), negated),
    }
}

/// Distributes an expression in negation normal form into clauses.
///
/// Clauses are duplicate-free, and trivially true clauses are discarded.
pub fn products(expr: &Expr) -> Vec<SymbolicClause> {
    match expr {
        Expr::Variable(v) => vec![vec![(v.clone(), true)]],

        Expr::Not(inner) => match inner.as_ref() {
            Expr::Variable(v) => vec![vec![(v.clone(), false)]],
            _ => panic!("! Products on an expression outside negation normal form"),
        },

        Expr::And(arguments) => arguments.iter().flat_map(products).collect(),

        Expr::Or(arguments) => {
            let mut joined: Vec<SymbolicClause> = vec![Vec::default()];
            for argument in arguments {
                let argument_clauses = products(argument);
                let mut fresh = Vec::with_capacity(joined.len() * argument_clauses.len());
                for left in &joined {
                    for right in &argument_clauses {
                        let mut clause = left.clone();
                        clause.extend(right.iter().cloned());
                        fresh.push(clause);
                    }
                }
                joined = fresh;
            }
            joined.into_iter().filter_map(normalise_clause).collect()
        }

        Expr::Imply(_, _) | Expr::Iff(_) => {
            panic!("! Products on an expression outside negation normal form")
        }
    }
}

/// Sorts and deduplicates a clause, discarding it when trivially true.
fn normalise_clause(mut clause: SymbolicClause) -> Option<SymbolicClause> {
    clause.sort_unstable();
    clause.dedup();
    let trivial = clause
        .windows(2)
        .any(|pair| pair[0].0 == pair[1].0 && pair[0].1 != pair[1].1);
    match trivial {
        true => None,
        false => Some(clause),
    }
}
