use std::collections::BTreeMap;

use crate::{
    config::Config,
    db::trail::Trail,
    reports::Report,
    structures::{
        cnf::Assignment,
        cnf3::{CdclInput, Cnf3},
        literal::Literal,
    },
};

use super::{ContextState, Counters};

/// A generic context, parameterised to a source of randomness.
///
/// # Example
///
/// ```rust
/// # use cpl_sat::config::Config;
/// # use cpl_sat::context::GenericContext;
/// # use cpl_sat::generic::minimal_pcg::MinimalPCG32;
/// # use cpl_sat::structures::cnf3::CdclInput;
/// # use rand::SeedableRng;
/// let rng = MinimalPCG32::from_seed(7_u64.to_le_bytes());
/// let context = GenericContext::from_parts(CdclInput::default(), Config::default(), rng);
/// ```
pub struct GenericContext<R: rand::Rng> {
    /// The configuration of the context.
    pub config: Config,

    /// The interned formula.
    pub cnf3: Cnf3,

    /// The unit clauses of the formula, materialised as rules when a solve begins.
    pub initial_units: Vec<Literal>,

    /// Whether the formula held an empty clause.
    pub empty_clause: bool,

    /// The trail of the solve.
    pub trail: Trail,

    /// Counters related to the solve.
    pub counters: Counters,

    /// The status of the context.
    pub state: ContextState,

    /// The source of rng used for decisions.
    pub rng: R,
}

impl<R: rand::Rng> GenericContext<R> {
    /// A context from an input, a configuration, and a source of randomness.
    pub fn from_parts(input: CdclInput, config: Config, rng: R) -> Self {
        let trail = Trail::from_variables(&input.cnf3.variables);
        GenericContext {
            config,
            cnf3: input.cnf3,
            initial_units: input.initial_units,
            empty_clause: input.empty_clause,
            trail,
            counters: Counters::default(),
            state: ContextState::Input,
            rng,
        }
    }

    /// A report on the state of the context.
    pub fn report(&self) -> Report {
        Report::from(self.state)
    }

    /// The assignment on the trail, if the context is satisfiable.
    pub fn assignment(&self) -> Option<Assignment> {
        match self.state {
            ContextState::Satisfiable => Some(self.trail.assignment()),
            _ => None,
        }
    }

    /// The assignment restricted to labelled variables, if the context is satisfiable.
    ///
    /// Auxiliary variables introduced by the Tseytin lowering carry no label, and are omitted.
    pub fn model(&self) -> Option<BTreeMap<String, bool>> {
        let assignment = self.assignment()?;
        Some(
            assignment
                .iter()
                .filter_map(|(variable, value)| {
                    self.cnf3
                        .labels
                        .get(variable)
                        .map(|label| (label.clone(), *value))
                })
                .collect(),
        )
    }
}
