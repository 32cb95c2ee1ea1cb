/*!
The CDCL solve loop.

# Overview

A solve walks the trail with a cursor.
At each rule the [consequences](crate::procedures::propagation) of the rule --- alone, and paired with each rule before it --- are derived and appended, and the cursor advances.
When the cursor reaches the end of the trail with nothing appended, propagation is exhausted:

- With no free variable, the trail is a complete assignment satisfying the formula.
- Otherwise, a [decision](crate::procedures::decision) extends the trail and the walk continues.

A conflict during derivation either proves the formula unsatisfiable --- when no decision supports the conflict --- or [jumps the trail back](crate::procedures::backjump), after which the cursor resumes at the learned consequence.

Roughly, the loop is as diagrammed:

```none
          +---------------+
  +-------| make_decision |
  |       +---------------+
  |               ⌃
  |               |
  |               | if nothing was appended and the cursor is at the end of the trail
  |               |
  |               |                +-----> satisfiable, if no variable is free
  ⌄   +---------------------+      |
--+-->| derive_consequences |------+
  ⌃   +---------------------+      |
  |               |                +-----> unsatisfiable, on a conflict below every decision
  |               |
  |               | on a conflict beneath some decision
  |               ⌄
  |          +----------+
  +----------| backjump |
             +----------+
```

Each pass either appends a rule, or jumps back --- strictly shrinking the space of assignments the search may revisit.
Both are bounded, so the loop terminates.

# Initialisation

The unit clauses of the input are materialised first, as propagations depending on no decision.
A contradiction among them is unsatisfiability before the loop begins, and an input holding an empty clause is unsatisfiable outright.
*/

use crate::{
    context::{ContextState, GenericContext},
    db::trail::Rule,
    procedures::propagation::PropagateSignal,
    reports::Report,
    types::err,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Determines the satisfiability of the input of the context.
    ///
    /// A concluded context reports its conclusion without solving again.
    pub fn solve(&mut self) -> Result<Report, err::ErrorKind> {
        match self.state {
            ContextState::Satisfiable | ContextState::Unsatisfiable => return Ok(self.report()),
            ContextState::Input | ContextState::Solving => {}
        }
        self.state = ContextState::Solving;

        if self.empty_clause {
            self.state = ContextState::Unsatisfiable;
            return Ok(self.report());
        }

        for literal in self.initial_units.clone() {
            if self.trail.is_fixed(-literal) {
                self.state = ContextState::Unsatisfiable;
                return Ok(self.report());
            }
            if self.trail.is_fixed(literal) {
                continue;
            }
            self.trail.push(Rule {
                literal,
                decide: false,
                decide_a: None,
                decide_b: None,
            });
        }

        if self.trail.rules.is_empty() {
            if self.trail.free.is_empty() {
                self.state = ContextState::Satisfiable;
                return Ok(self.report());
            }
            self.make_decision();
        }

        let mut index = 0;
        'solve_loop: loop {
            self.counters.total_iterations += 1;

            if self.config.trail_checks {
                self.check_trail()?;
            }

            let length_before = self.trail.rules.len();

            match self.derive_consequences(index) {
                PropagateSignal::Continue => {}

                PropagateSignal::Fail => {
                    self.state = ContextState::Unsatisfiable;
                    return Ok(self.report());
                }

                PropagateSignal::Backjump(resume) => {
                    index = resume;
                    continue 'solve_loop;
                }
            }

            let appended = self.trail.rules.len() > length_before;
            if !appended && index + 1 == self.trail.rules.len() {
                if self.trail.free.is_empty() {
                    self.state = ContextState::Satisfiable;
                    return Ok(self.report());
                }
                self.make_decision();
            }

            index += 1;
        }
    }
}

#[cfg(test)]
mod solve_tests {
    use super::*;
    use crate::{
        config::Config,
        context::Context,
        structures::{clause::Clause, cnf3::CdclInput, literal::Literal},
    };

    fn context(clauses: Vec<Vec<Literal>>) -> Context {
        let mut input = CdclInput::default();
        for literals in clauses {
            input
                .add_clause(&Clause::from_literals(literals))
                .expect("narrow clauses");
        }
        Context::from_input(input, Config::default())
    }

    #[test]
    fn empty_input() {
        let mut ctx = context(vec![]);
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.assignment().expect("an assignment").is_empty());
    }

    #[test]
    fn unit_propagation_alone() {
        let mut ctx = context(vec![vec![1], vec![-1, 2], vec![-2, -3]]);
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        let assignment = ctx.assignment().expect("an assignment");
        assert_eq!(assignment.get(&1), Some(&true));
        assert_eq!(assignment.get(&2), Some(&true));
        assert_eq!(assignment.get(&3), Some(&false));
    }

    #[test]
    fn contradictory_units() {
        let mut ctx = context(vec![vec![1], vec![-1]]);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.assignment(), None);
    }

    #[test]
    fn conflict_below_every_decision() {
        let mut ctx = context(vec![vec![1], vec![-1, 2], vec![-1, -2]]);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn decisions_complete_the_assignment() {
        let mut ctx = context(vec![vec![1, 2], vec![-1, 2], vec![3, 4, -2]]);
        ctx.config.trail_checks = true;
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        let assignment = ctx.assignment().expect("an assignment");
        assert_eq!(assignment.len(), 4);
        assert_eq!(ctx.cnf3.clause_set().len(), 3);
    }

    #[test]
    fn all_assignments_excluded() {
        let mut ctx = context(vec![vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]]);
        ctx.config.trail_checks = true;
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn wider_exclusion_with_backjumps() {
        // Every assignment to three variables is excluded by some triple.
        let mut clauses = Vec::default();
        for a in [-1, 1] {
            for b in [-2, 2] {
                for c in [-3, 3] {
                    clauses.push(vec![a as Literal, b as Literal, c as Literal]);
                }
            }
        }
        let mut ctx = context(clauses);
        ctx.config.trail_checks = true;
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.counters.total_decisions > 0);
        assert!(ctx.counters.total_backjumps > 0);
    }

    #[test]
    fn seeded_solves_agree() {
        let clauses = vec![vec![1, 2, 3], vec![-1, -2], vec![-1, -3], vec![-2, -3], vec![1, 2]];
        let mut first = context(clauses.clone());
        let mut second = context(clauses);
        assert_eq!(first.solve(), second.solve());
        assert_eq!(first.assignment(), second.assignment());
    }
}
