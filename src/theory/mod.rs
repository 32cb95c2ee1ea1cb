/*!
The theory interface --- the seam through which an SMT-style driver consults a solver.

A [Theory] reads terms it understands into typed constraints and opens empty [problems](TheoryProblem).
A problem accumulates constraints, decides their joint satisfiability, and --- when satisfiable --- reports the value assigned to an identifier.

The boolean theory implemented here is a provider over the SAT core: constraints are [boolean expressions](crate::structures::expr::Expr), and a check runs the Tseytin lowering into a [CDCL solve](crate::procedures::solve).
Other theories plug in beside it and are not covered by this crate.
*/

use std::collections::BTreeMap;

use crate::{
    compile::convert_clauses_to_cdcl_input,
    config::Config,
    context::Context,
    language::{lower::lower, parser::Term},
    reports::Report,
    structures::expr::Expr,
    transform::tseytin,
};

/// A theory: a reader of terms into typed constraints, and a source of empty problems.
pub trait Theory {
    /// The typed constraints of the theory.
    type Constraint;

    /// The problems of the theory.
    type Problem: TheoryProblem<Constraint = Self::Constraint>;

    /// Reads a term as a constraint of the theory, if the term belongs to the theory.
    fn read(&self, term: &Term) -> Option<Self::Constraint>;

    /// An empty problem of the theory.
    fn empty_problem(&self) -> Self::Problem;
}

/// A problem of a theory: constraints accumulate, and satisfiability is checked on demand.
pub trait TheoryProblem {
    /// The typed constraints of the theory.
    type Constraint;

    /// The values the theory assigns to identifiers.
    type Value;

    /// Adds a constraint to the problem.
    fn add(&mut self, constraint: Self::Constraint);

    /// True iff the constraints of the problem are jointly satisfiable.
    fn check(&mut self) -> bool;

    /// The value assigned to an identifier by the latest satisfiable check.
    fn value_of(&self, identifier: &str) -> Option<Self::Value>;
}

/// The theory of boolean constraints, provided by the SAT core.
#[derive(Clone, Debug, Default)]
pub struct BooleanTheory {
    /// The configuration handed to each solve.
    pub config: Config,
}

impl Theory for BooleanTheory {
    type Constraint = Expr;
    type Problem = BooleanProblem;

    fn read(&self, term: &Term) -> Option<Self::Constraint> {
        lower(term, None).ok()
    }

    fn empty_problem(&self) -> Self::Problem {
        BooleanProblem {
            config: self.config.clone(),
            constraints: Vec::default(),
            model: None,
        }
    }
}

/// A conjunction of boolean constraints.
#[derive(Clone, Debug)]
pub struct BooleanProblem {
    config: Config,
    constraints: Vec<Expr>,
    model: Option<BTreeMap<String, bool>>,
}

impl TheoryProblem for BooleanProblem {
    type Constraint = Expr;
    type Value = bool;

    fn add(&mut self, constraint: Expr) {
        self.model = None;
        self.constraints.push(constraint);
    }

    fn check(&mut self) -> bool {
        let conjunction = match self.constraints.len() {
            0 => {
                self.model = Some(BTreeMap::default());
                return true;
            }
            1 => self.constraints[0].clone(),
            _ => Expr::And(self.constraints.clone()),
        };

        let clauses = tseytin::to_clauses(&conjunction);
        let input = match convert_clauses_to_cdcl_input(&clauses) {
            Ok(input) => input,
            Err(_) => unreachable!("the Tseytin lowering emits clauses of at most three literals"),
        };

        let mut context = Context::from_input(input, self.config.clone());
        match context.solve() {
            Ok(Report::Satisfiable) => {
                self.model = context.model();
                true
            }
            _ => {
                self.model = None;
                false
            }
        }
    }

    fn value_of(&self, identifier: &str) -> Option<bool> {
        self.model.as_ref()?.get(identifier).copied()
    }
}
