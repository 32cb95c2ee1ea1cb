/*!
The Davis--Putnam procedure.

# Overview

Variables are eliminated one at a time by saturating resolution:
for a variable *p*, every pair of clauses of which one contains *p* and the other *¬p* is resolved, the non-trivial resolvents join the clause list, and every clause containing *p* in either polarity is deleted.
An empty resolvent witnesses unsatisfiability, and a clause list emptied of variables witnesses satisfiability.

Before elimination begins the clause list is preprocessed: trivially true clauses are removed, and subsumed clauses discarded.

No model is produced --- resolution forgets the valuations which support it.

The clause list grows in the middle of elimination rounds, so clauses are kept in a store with stable indicies, deletion leaving a tombstone.

# Literature

The procedure follows [A Computing Procedure for Quantification Theory](https://doi.org/10.1145/321033.321034).
*/

use crate::reports::Report;
use crate::structures::{
    clause::{resolve, Clause},
    cnf::Cnf,
    literal::Literal,
};

/// Determines the satisfiability of a formula by resolution.
///
/// The formula itself is untouched: elimination happens on a preprocessed copy.
///
/// ```rust
/// # use cpl_sat::procedures::dp::check_sat_by_dp;
/// # use cpl_sat::reports::Report;
/// # use cpl_sat::structures::{clause::Clause, cnf::Cnf};
/// let mut cnf = Cnf::default();
/// for literals in [vec![1, 2], vec![-1], vec![-2]] {
///     cnf.push_clause(Clause::from_literals(literals));
/// }
///
/// assert_eq!(check_sat_by_dp(&cnf), Report::Unsatisfiable);
/// ```
pub fn check_sat_by_dp(cnf: &Cnf) -> Report {
    let mut preprocessed = cnf.clone();
    preprocessed.remove_tautologies();
    preprocessed.apply_subsumption();

    if preprocessed.clauses.iter().any(|clause| clause.is_empty()) {
        return Report::Unsatisfiable;
    }

    let mut store: Vec<Option<Clause>> = preprocessed.clauses.drain(..).map(Some).collect();

    for &variable in &preprocessed.variables {
        let positive = variable as Literal;

        let mut with_positive = Vec::default();
        let mut with_negative = Vec::default();
        for (index, slot) in store.iter().enumerate() {
            let Some(clause) = slot else { continue };
            if clause.contains(positive) {
                with_positive.push(index);
            } else if clause.contains(-positive) {
                with_negative.push(index);
            }
        }

        let mut resolvents = Vec::default();
        for &left in &with_positive {
            for &right in &with_negative {
                let (Some(left), Some(right)) = (&store[left], &store[right]) else {
                    continue;
                };
                if let Some(resolvent) = resolve(left, right, variable) {
                    if resolvent.is_empty() {
                        return Report::Unsatisfiable;
                    }
                    resolvents.push(resolvent);
                }
            }
        }

        log::trace!(
            target: crate::misc::log::targets::DP,
            "Eliminating {variable}: {} resolvents", resolvents.len()
        );

        for index in with_positive.into_iter().chain(with_negative) {
            store[index] = None;
        }
        store.extend(resolvents.into_iter().map(Some));
    }

    Report::Satisfiable
}
