/*!
Methods for choosing a variable when propagation is exhausted.

# Overview

A decision asserts the positive literal of a free variable chosen uniformly at random.

Random choice is part of the procedure rather than an optimisation --- it is empirically superior to taking the first free variable in order.
Reproducibility comes from the source of randomness: the context seeds its own from the [configuration](crate::config::Config), so a fixed seed fixes the decision sequence.

The free variables are kept in an ordered set, so the choice depends only on the rng stream and not on any incidental iteration order.

A decision depends on itself: its genealogy is its own trail index.
*/

use rand::seq::IteratorRandom;

use crate::{
    context::GenericContext,
    db::trail::Rule,
    misc::log::targets::{self},
    structures::literal::Literal,
};

impl<R: rand::Rng> GenericContext<R> {
    /// Decides a free variable, appending the decision to the trail.
    ///
    /// To be called only when some variable is free.
    pub(crate) fn make_decision(&mut self) {
        let chosen = self
            .trail
            .free
            .iter()
            .copied()
            .choose(&mut self.rng)
            .expect("! A decision requires a free variable");

        self.counters.total_decisions += 1;

        let index = self.trail.rules.len();
        log::info!(target: targets::DECISION, "Deciding {chosen} at {index}");

        self.trail.push(Rule {
            literal: chosen as Literal,
            decide: true,
            decide_a: Some(index),
            decide_b: None,
        });
    }
}
