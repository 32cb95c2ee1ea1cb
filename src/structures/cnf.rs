/*!
Formulas in conjunctive normal form, as clause lists.

A formula keeps its clauses together with the set of active variables and an (optional, injective) map from variables to the labels written in the source.

The destructive operations here --- in particular [unit resolution](Cnf::unit_resolve) --- mutate the formula in place.
Callers who share a formula between procedures clone first: the [DPLL procedure](crate::procedures::dpll) deep-copies at every branch.
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::structures::{
    clause::Clause,
    literal::{polarity_of, variable_of, Literal, Variable},
};

/// A (partial) assignment of truth values to variables.
pub type Assignment = BTreeMap<Variable, bool>;

/// The result of unit resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitResolutionOutcome {
    /// No unit clause remains, and no empty clause appeared.
    Stable,

    /// An empty clause appeared, so the formula is unsatisfiable by propagation.
    EmptyClause,
}

/// A formula in conjunctive normal form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cnf {
    /// The clauses of the formula.
    pub clauses: Vec<Clause>,

    /// The active variables of the formula.
    pub variables: BTreeSet<Variable>,

    /// Source labels of variables, where known.
    pub labels: BTreeMap<Variable, String>,
}

impl Cnf {
    /// Appends a clause, noting its variables as active.
    pub fn push_clause(&mut self, clause: Clause) {
        for literal in clause.literals() {
            self.variables.insert(variable_of(*literal));
        }
        self.clauses.push(clause);
    }

    /// True iff no clauses remain.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True iff every clause contains a literal made true by the assignment.
    ///
    /// A variable without a value satisfies no literal.
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .literals()
                .iter()
                .any(|l| assignment.get(&variable_of(*l)) == Some(&polarity_of(*l)))
        })
    }

    /// Removes every trivially true clause.
    pub fn remove_tautologies(&mut self) {
        self.clauses.retain(|clause| !clause.is_trivially_true());
    }

    /// Discards every clause some other clause subsumes.
    ///
    /// Of two equal clauses, the one appearing later in the list is discarded.
    pub fn apply_subsumption(&mut self) {
        let mut keep = vec![true; self.clauses.len()];
        for i in 0..self.clauses.len() {
            if !keep[i] {
                continue;
            }
            for j in 0..self.clauses.len() {
                if i == j || !keep[j] {
                    continue;
                }
                if self.clauses[i].subsumes(&self.clauses[j])
                    && (self.clauses[i] != self.clauses[j] || i < j)
                {
                    keep[j] = false;
                }
            }
        }
        let mut index = 0;
        self.clauses.retain(|_| {
            let kept = keep[index];
            index += 1;
            kept
        });
    }

    /// Exhaustively applies unit resolution, in place.
    ///
    /// For each unit clause `{l}`:
    /// - The value of the variable of `l` is recorded in the assignment, if an assignment was supplied.
    /// - Every clause containing `l` is removed, the unit included, as each is subsumed by the unit.
    /// - Every occurrence of the negation of `l` is removed from the remaining clauses.
    ///
    /// Removal of a negated literal may produce a fresh unit, so the search restarts until no unit remains.
    pub fn unit_resolve(&mut self, mut assignment: Option<&mut Assignment>) -> UnitResolutionOutcome {
        loop {
            if self.clauses.iter().any(|clause| clause.is_empty()) {
                return UnitResolutionOutcome::EmptyClause;
            }

            let Some(unit) = self.clauses.iter().find_map(|clause| clause.unit_literal()) else {
                return UnitResolutionOutcome::Stable;
            };

            if let Some(assignment) = assignment.as_deref_mut() {
                assignment.insert(variable_of(unit), polarity_of(unit));
            }

            log::trace!(target: crate::misc::log::targets::PROPAGATION, "Unit {unit}");

            self.clauses.retain(|clause| !clause.contains(unit));
            for clause in self.clauses.iter_mut() {
                clause.remove(-unit);
            }
        }
    }

    /// The least variable occurring in some clause, if any clause remains.
    pub fn first_clausal_variable(&self) -> Option<Variable> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals().iter().map(|l| variable_of(*l)))
            .min()
    }

    /// Extends the assignment with a value for every active variable it misses.
    ///
    /// Sound only when no clause constrains the missing variables, as after a solve.
    pub fn extend_assignment(&self, assignment: &mut Assignment) {
        for variable in &self.variables {
            assignment.entry(*variable).or_insert(false);
        }
    }

    /// The clauses of the formula as a canonically ordered, duplicate-free set.
    pub fn clause_set(&self) -> BTreeSet<Vec<Literal>> {
        self.clauses
            .iter()
            .map(|clause| clause.literals().to_vec())
            .collect()
    }
}

impl std::fmt::Display for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod cnf_tests {
    use super::*;

    fn from_clause_literals(clauses: Vec<Vec<Literal>>) -> Cnf {
        let mut cnf = Cnf::default();
        for literals in clauses {
            cnf.push_clause(Clause::from_literals(literals));
        }
        cnf
    }

    #[test]
    fn unit_resolution_propagates() {
        let mut cnf = from_clause_literals(vec![vec![1], vec![-1, 2], vec![-2, 3]]);
        let mut assignment = Assignment::default();
        let outcome = cnf.unit_resolve(Some(&mut assignment));

        assert_eq!(outcome, UnitResolutionOutcome::Stable);
        assert!(cnf.is_empty());
        assert_eq!(assignment.get(&1), Some(&true));
        assert_eq!(assignment.get(&2), Some(&true));
        assert_eq!(assignment.get(&3), Some(&true));
    }

    #[test]
    fn unit_resolution_finds_conflict() {
        let mut cnf = from_clause_literals(vec![vec![1], vec![-1]]);
        let outcome = cnf.unit_resolve(None);
        assert_eq!(outcome, UnitResolutionOutcome::EmptyClause);
    }

    #[test]
    fn unit_resolution_subsumes() {
        let mut cnf = from_clause_literals(vec![vec![1], vec![1, 2], vec![-1, 2, 3]]);
        let outcome = cnf.unit_resolve(None);
        assert_eq!(outcome, UnitResolutionOutcome::Stable);
        // {1} and {1 2} are subsumed, while {-1 2 3} loses its first literal.
        assert_eq!(cnf.clauses, vec![Clause::from_literals(vec![2, 3])]);
    }

    #[test]
    fn evaluation() {
        let cnf = from_clause_literals(vec![vec![1, 2], vec![-1, 3]]);
        let mut assignment = Assignment::default();
        assignment.insert(1, true);
        assignment.insert(3, true);
        assert!(cnf.evaluate(&assignment));

        assignment.insert(3, false);
        assert!(!cnf.evaluate(&assignment));
    }

    #[test]
    fn subsumption_keeps_one_of_equals() {
        let mut cnf = from_clause_literals(vec![vec![1, 2], vec![1, 2], vec![1, 2, 3]]);
        cnf.apply_subsumption();
        assert_eq!(cnf.clauses, vec![Clause::from_literals(vec![1, 2])]);
    }
}
