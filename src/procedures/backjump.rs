/*!
Recovery from a conflict.

# Overview

A backjump undoes part of the trail after a conflict, guided by the two decisions the conflict analysis singled out: the last decision `lD` which produced the conflicting literal, and the second last decision `slD` supporting the conflict.

The jump lands at the first decision strictly after `slD` --- which is `lD` itself when no decision sits between them.
Every rule from that point on is popped, restoring `fixed` and `free`, and the negation of the literal decided at `lD` is appended in its place as a propagation anchored at `slD`.

So, the branch which produced the conflict is closed by its learned consequence, while every decision at or beneath `slD` stays valid --- the backjump is non-chronological, and unrelated later decisions are rebuilt only if propagation forces them again.

# Literature

See [Chronological Backtracking](https://doi.org/10.1007/978-3-319-94144-8_7) for a discussion of chronological and non-chronological backjumping.
*/

use crate::{
    context::GenericContext,
    db::trail::Rule,
    misc::log::targets::{self},
    procedures::propagation::PropagateSignal,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Jumps back past the decision which produced a conflict, learning its negation.
    ///
    /// Returns the index at which the main loop resumes: the position of the learned rule.
    pub(crate) fn backjump(
        &mut self,
        last_decision: usize,
        second_decision: Option<usize>,
    ) -> PropagateSignal {
        let search_from = match second_decision {
            Some(anchor) => anchor + 1,
            None => 0,
        };
        let new_start = (search_from..self.trail.rules.len())
            .find(|index| self.trail.rules[*index].decide)
            .expect("! A decision follows the backjump anchor");

        let learned = -self.trail.rules[last_decision].literal;

        self.counters.total_backjumps += 1;
        log::info!(
            target: targets::BACKJUMP,
            "Backjump from {} to {new_start}, learning {learned}",
            self.trail.rules.len(),
        );

        self.trail.truncate(new_start);
        self.trail.push(Rule {
            literal: learned,
            decide: false,
            decide_a: second_decision,
            decide_b: None,
        });

        PropagateSignal::Backjump(new_start)
    }
}
