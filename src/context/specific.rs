use rand::SeedableRng;

use crate::{config::Config, generic::minimal_pcg::MinimalPCG32, structures::cnf3::CdclInput};

use super::GenericContext;

/// A context which uses [MinimalPCG32] as a source of randomness.
pub type Context = GenericContext<MinimalPCG32>;

impl Context {
    /// A context from an input and a configuration, seeding the rng from the configuration.
    pub fn from_input(input: CdclInput, config: Config) -> Self {
        let rng = MinimalPCG32::from_seed(config.decision_seed.to_le_bytes());
        Self::from_parts(input, config, rng)
    }
}
