/*!
Trail integrity assertions.

Expensive, and gated behind [Config::trail_checks](crate::config::Config::trail_checks) --- intended for test builds only, and never raised during ordinary use.
*/

use crate::{
    context::GenericContext,
    structures::literal::variable_of,
    types::err::{self, InvariantError},
};

impl<R: rand::Rng> GenericContext<R> {
    /// Asserts the invariants binding the rules, `fixed`, and `free`.
    pub(crate) fn check_trail(&self) -> Result<(), err::ErrorKind> {
        for (index, rule) in self.trail.rules.iter().enumerate() {
            if self.trail.index_of(rule.literal) != Some(index) {
                return Err(err::ErrorKind::from(InvariantError::FixedIndex(index)));
            }

            if self.trail.free.contains(&variable_of(rule.literal)) {
                return Err(err::ErrorKind::from(InvariantError::FreeOverlap(index)));
            }

            for genealogy in [rule.decide_a, rule.decide_b].into_iter().flatten() {
                match self.trail.rules.get(genealogy) {
                    Some(reference) if reference.decide => {}
                    _ => {
                        return Err(err::ErrorKind::from(InvariantError::GenealogyReference(
                            index,
                        )))
                    }
                }
            }

            if let (Some(a), Some(b)) = (rule.decide_a, rule.decide_b) {
                if a <= b {
                    return Err(err::ErrorKind::from(InvariantError::GenealogyOrder(index)));
                }
            }
        }

        if self.cnf3.variables.len() != self.trail.free.len() + self.trail.fixed.len() {
            return Err(err::ErrorKind::from(InvariantError::VariablePartition));
        }

        Ok(())
    }
}
