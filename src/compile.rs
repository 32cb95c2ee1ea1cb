/*!
The compile pipeline --- constraint-language source to solver input.

[compile_cpl_to_clauses] runs the front end: tokens, terms, macro expansion, pruning, lowering, and one of the two [clausal lowerings](crate::transform).
The clauses it produces are symbolic --- over [expression variables](crate::structures::expr::Var) --- and feed either converter:

- [convert_clauses_to_cnf] interns the variables as positive integers for the [DP](crate::procedures::dp) and [DPLL](crate::procedures::dpll) procedures.
- [convert_clauses_to_cdcl_input] interns likewise, and indexes the clauses for the [CDCL context](crate::context).

Identifiers are assigned in order of first appearance, and the labels of named variables are kept as metadata.
Auxiliary variables of the Tseytin lowering receive identifiers with no label.
*/

use std::collections::HashMap;

use crate::language::{
    lower::{lower, prune_empty, LabelAssignment},
    macros::expand_program,
    parser::parse_source,
};
use crate::structures::{
    clause::Clause,
    cnf::Cnf,
    cnf3::CdclInput,
    expr::Var,
    literal::{Literal, Variable},
};
use crate::transform::{distributive, tseytin, SymbolicClause};
use crate::types::err;

/// Compiles source text to symbolic clauses.
///
/// With `tseytin` the clauses come from the [Tseytin lowering](crate::transform::tseytin), and otherwise from the [distributive lowering](crate::transform::distributive).
/// Assignments, when supplied, resolve the `(? v)` form.
///
/// A program whose formula expands to no constraint compiles to no clauses.
pub fn compile_cpl_to_clauses(
    source: &str,
    assignments: Option<&LabelAssignment>,
    tseytin: bool,
) -> Result<Vec<SymbolicClause>, err::ErrorKind> {
    let terms = parse_source(source)?;
    let term = prune_empty(expand_program(terms)?);

    if term.is_empty_marker() {
        return Ok(Vec::default());
    }

    let expr = lower(&term, assignments)?;

    log::trace!(target: crate::misc::log::targets::TRANSFORM, "Lowered {expr}");

    match tseytin {
        true => Ok(tseytin::to_clauses(&expr)),
        false => Ok(distributive::to_clauses(&expr)),
    }
}

/// Assigns identifiers to expression variables in order of first appearance.
#[derive(Default)]
struct Interner {
    identifiers: HashMap<Var, Variable>,
}

impl Interner {
    fn literal_of(&mut self, variable: &Var, polarity: bool) -> Literal {
        let fresh = self.identifiers.len() as Variable + 1;
        let identifier = *self
            .identifiers
            .entry(variable.clone())
            .or_insert(fresh);
        crate::structures::literal::literal_of(identifier, polarity)
    }

    fn labels(&self) -> impl Iterator<Item = (Variable, String)> + '_ {
        self.identifiers.iter().filter_map(|(variable, id)| match variable {
            Var::Named(label) => Some((*id, label.clone())),
            Var::Aux(_) => None,
        })
    }
}

/// Interns symbolic clauses as a clause-list CNF.
///
/// Trivially true clauses are discarded.
pub fn convert_clauses_to_cnf(clauses: &[SymbolicClause]) -> Cnf {
    let mut interner = Interner::default();
    let mut cnf = Cnf::default();

    for clause in clauses {
        let literals = clause
            .iter()
            .map(|(variable, polarity)| interner.literal_of(variable, *polarity))
            .collect();
        let clause = Clause::from_literals(literals);
        if !clause.is_trivially_true() {
            cnf.push_clause(clause);
        }
    }

    cnf.labels.extend(interner.labels());
    cnf
}

/// Interns symbolic clauses as a CDCL input.
///
/// Every clause must hold at most three literals.
pub fn convert_clauses_to_cdcl_input(
    clauses: &[SymbolicClause],
) -> Result<CdclInput, err::ErrorKind> {
    let mut interner = Interner::default();
    let mut input = CdclInput::default();

    for clause in clauses {
        let literals = clause
            .iter()
            .map(|(variable, polarity)| interner.literal_of(variable, *polarity))
            .collect();
        input.add_clause(&Clause::from_literals(literals))?;
    }

    input.cnf3.labels.extend(interner.labels());
    Ok(input)
}

/// The clause-list CNF of a CDCL input.
///
/// Composed with [convert_clauses_to_cdcl_input], yields a CNF holding the same set of clauses as the direct conversion.
pub fn convert_cdcl_input_to_cnf(input: &CdclInput) -> Cnf {
    input.to_cnf()
}

#[cfg(test)]
mod compile_tests {
    use super::*;

    #[test]
    fn distributive_and_tseytin_intern_the_same_labels() {
        let source = "(-> (/\\ p q) r)";
        let flat = convert_clauses_to_cnf(
            &compile_cpl_to_clauses(source, None, false).expect("clauses"),
        );
        let narrow = convert_clauses_to_cdcl_input(
            &compile_cpl_to_clauses(source, None, true).expect("clauses"),
        )
        .expect("narrow clauses");

        let flat_labels = flat.labels.values().cloned().collect::<std::collections::BTreeSet<_>>();
        let narrow_labels = narrow
            .cnf3
            .labels
            .values()
            .cloned()
            .collect::<std::collections::BTreeSet<_>>();
        assert_eq!(flat_labels, narrow_labels);
    }

    #[test]
    fn empty_formulas_compile_to_no_clauses() {
        let clauses = compile_cpl_to_clauses("(/\\* i 1 0 p_i)", None, false).expect("clauses");
        assert!(clauses.is_empty());
    }

    #[test]
    fn wide_clauses_cannot_build_a_cdcl_input() {
        let clauses =
            compile_cpl_to_clauses("(\\/ p q r s)", None, false).expect("clauses");
        assert!(convert_clauses_to_cdcl_input(&clauses).is_err());
    }

    #[test]
    fn round_trip_preserves_the_clause_set() {
        let source = "(/\\ (\\/ p q r) (\\/ (~ p) q) s)";
        let clauses = compile_cpl_to_clauses(source, None, false).expect("clauses");

        let direct = convert_clauses_to_cnf(&clauses);
        let input = convert_clauses_to_cdcl_input(&clauses).expect("narrow clauses");
        let reconstructed = convert_cdcl_input_to_cnf(&input);

        assert_eq!(direct.clause_set(), reconstructed.clause_set());
    }
}
