/*!
Deriving implied literals from the two-level index, and conflict analysis.

# Overview

Processing the rule at index *i* of the trail derives every literal the formula forces given the assignments so far:

- For the assigned literal alone, `double_clauses` lists each literal some two-literal clause now forces.
- For the assigned literal paired with each earlier assigned literal, `triple_clauses` lists each literal some three-literal clause now forces.

Each derived literal is offered to the trail through [add_unit_propagate](crate::context::GenericContext::add_unit_propagate), with a genealogy computed from the rules which triggered it:

- A single-literal consequence inherits the genealogy of its trigger.
- A pair consequence takes `α`, the later of the two triggers' last decisions, and `β`, the latest of the remaining genealogy entries of the two triggers apart from `α` --- so `β < α` always.

# Conflict analysis

Offering a literal whose negation is already fixed is a conflict.
Let the conflicting rule be the one which fixed the negation, and `lD` the last decision of the offered literal.

- With no `lD` the conflict does not depend on any decision, and the formula is unsatisfiable.
- Otherwise the second last decision supporting the conflict is the later of the offered `β` and whichever of the conflicting rule's genealogy differs from `lD`, and a [backjump](crate::procedures::backjump) is made past `lD`, anchored above the second last decision.

Anchoring the learned consequence to the earliest decision genealogy which produced the conflict keeps unrelated decisions valid: the contradiction cannot recur beneath them.
*/

use std::cmp;

use crate::{
    context::GenericContext,
    db::trail::Rule,
    misc::log::targets::{self},
    structures::{cnf3::LiteralPair, literal::Literal},
};

/// The outcome of offering a derived literal to the trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagateSignal {
    /// The literal was fresh and appended, or already fixed.
    Continue,

    /// The literal conflicts with a fixed literal, and no decision supports the conflict.
    Fail,

    /// The literal conflicts with a fixed literal, and the trail jumped back.
    ///
    /// Processing resumes at the held index, where the learned consequence now sits.
    Backjump(usize),
}

impl<R: rand::Rng> GenericContext<R> {
    /// Derives every literal implied by the rule at the given index, paired with the rules before it.
    pub(crate) fn derive_consequences(&mut self, index: usize) -> PropagateSignal {
        let trigger = self.trail.rules[index];

        for position in 0..self.cnf3.double_consequence_count(trigger.literal) {
            let consequence = self.cnf3.double_consequence(trigger.literal, position);
            match self.add_unit_propagate(consequence, trigger.decide_a, trigger.decide_b) {
                PropagateSignal::Continue => {}
                signal => return signal,
            }
        }

        for earlier in 0..index {
            let partner = self.trail.rules[earlier];
            let pair = LiteralPair::from(trigger.literal, partner.literal);

            let count = self.cnf3.triple_consequence_count(pair);
            if count == 0 {
                continue;
            }

            let alpha = cmp::max(trigger.decide_a, partner.decide_a);
            let beta = [
                trigger.decide_a,
                trigger.decide_b,
                partner.decide_a,
                partner.decide_b,
            ]
            .into_iter()
            .filter(|genealogy| *genealogy != alpha)
            .max()
            .flatten();

            for position in 0..count {
                let consequence = self.cnf3.triple_consequence(pair, position);
                match self.add_unit_propagate(consequence, alpha, beta) {
                    PropagateSignal::Continue => {}
                    signal => return signal,
                }
            }
        }

        PropagateSignal::Continue
    }

    /// Offers a literal to the trail under a genealogy.
    ///
    /// - An already fixed literal changes nothing.
    /// - A fresh literal is appended as a propagation.
    /// - A literal whose negation is fixed is a conflict: unsatisfiability when no decision supports the conflict, and a [backjump](crate::procedures::backjump) otherwise.
    pub(crate) fn add_unit_propagate(
        &mut self,
        literal: Literal,
        decide_a: Option<usize>,
        decide_b: Option<usize>,
    ) -> PropagateSignal {
        if self.trail.is_fixed(literal) {
            return PropagateSignal::Continue;
        }

        if !self.trail.is_fixed(-literal) {
            log::trace!(target: targets::PROPAGATION, "Propagating {literal}");
            self.counters.total_propagations += 1;
            self.trail.push(Rule {
                literal,
                decide: false,
                decide_a,
                decide_b,
            });
            return PropagateSignal::Continue;
        }

        // The negation is fixed, so the offered literal closes a contradiction.
        self.counters.total_conflicts += 1;
        let Some(last_decision) = decide_a else {
            log::info!(target: targets::PROPAGATION, "Fundamental conflict on {literal}");
            return PropagateSignal::Fail;
        };

        let conflicting_index = self
            .trail
            .index_of(-literal)
            .expect("! A fixed literal indexes a rule");
        let conflicting = self.trail.rules[conflicting_index];

        let second_decision = cmp::max(
            decide_b,
            match conflicting.decide_a == Some(last_decision) {
                true => conflicting.decide_b,
                false => conflicting.decide_a,
            },
        );

        self.backjump(last_decision, second_decision)
    }
}
