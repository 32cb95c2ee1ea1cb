/*!
The Davis--Putnam--Logemann--Loveland procedure.

# Overview

Unit resolution is applied exhaustively, recording the forced values.
An emptied clause list is satisfiable on the recorded values, an empty clause is a conflict, and otherwise the procedure splits: the first remaining variable is asserted positively, and on failure the original formula is retried with the variable asserted negatively.

Each branch works on a deep copy of the formula, as unit resolution is destructive.

A model is produced on satisfiability: the values recorded by unit resolution, extended with a value for every active variable no clause came to constrain.
*/

use crate::structures::{
    clause::Clause,
    cnf::{Assignment, Cnf, UnitResolutionOutcome},
    literal::Literal,
};

/// Determines the satisfiability of a formula by splitting, producing a model when satisfiable.
///
/// The formula itself is untouched: the search happens on copies.
///
/// ```rust
/// # use cpl_sat::procedures::dpll::check_sat_by_dpll;
/// # use cpl_sat::structures::{clause::Clause, cnf::Cnf};
/// let mut cnf = Cnf::default();
/// for literals in [vec![1, 2], vec![-1]] {
///     cnf.push_clause(Clause::from_literals(literals));
/// }
///
/// let model = check_sat_by_dpll(&cnf).unwrap();
/// assert_eq!(model.get(&1), Some(&false));
/// assert_eq!(model.get(&2), Some(&true));
/// assert!(cnf.evaluate(&model));
/// ```
pub fn check_sat_by_dpll(cnf: &Cnf) -> Option<Assignment> {
    let mut working = cnf.clone();
    working.remove_tautologies();
    search(working, Assignment::default())
}

fn search(mut cnf: Cnf, mut assignment: Assignment) -> Option<Assignment> {
    match cnf.unit_resolve(Some(&mut assignment)) {
        UnitResolutionOutcome::EmptyClause => return None,
        UnitResolutionOutcome::Stable => {}
    }

    if cnf.is_empty() {
        cnf.extend_assignment(&mut assignment);
        return Some(assignment);
    }

    let variable = match cnf.first_clausal_variable() {
        Some(variable) => variable,
        None => unreachable!("a non-empty stable clause list contains a variable"),
    };

    log::trace!(target: crate::misc::log::targets::DPLL, "Splitting on {variable}");

    let mut positive_branch = cnf.clone();
    positive_branch.push_clause(Clause::unit(variable as Literal));
    if let Some(model) = search(positive_branch, assignment.clone()) {
        return Some(model);
    }

    cnf.push_clause(Clause::unit(-(variable as Literal)));
    search(cnf, assignment)
}

#[cfg(test)]
mod dpll_tests {
    use super::*;

    fn cnf(clauses: Vec<Vec<Literal>>) -> Cnf {
        let mut cnf = Cnf::default();
        for literals in clauses {
            cnf.push_clause(Clause::from_literals(literals));
        }
        cnf
    }

    #[test]
    fn single_unit_model() {
        let formula = cnf(vec![vec![1]]);
        let model = check_sat_by_dpll(&formula).expect("a model");
        assert_eq!(model.get(&1), Some(&true));
    }

    #[test]
    fn contradictory_units() {
        assert!(check_sat_by_dpll(&cnf(vec![vec![1], vec![-1]])).is_none());
    }

    #[test]
    fn all_assignments_excluded() {
        let formula = cnf(vec![vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]]);
        assert!(check_sat_by_dpll(&formula).is_none());
    }

    #[test]
    fn models_satisfy_the_formula() {
        let formula = cnf(vec![vec![1, 2], vec![-1, 3], vec![-3, -2, 1]]);
        let model = check_sat_by_dpll(&formula).expect("a model");
        assert!(formula.evaluate(&model));
    }

    #[test]
    fn models_cover_unconstrained_variables() {
        let mut formula = cnf(vec![vec![1]]);
        formula.variables.insert(7);
        let model = check_sat_by_dpll(&formula).expect("a model");
        assert!(model.contains_key(&7));
    }
}
