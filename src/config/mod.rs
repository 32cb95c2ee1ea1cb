/*!
Configuration of a context.

All configuration for a context is contained within the context, set at construction time.
The defaults are chosen to give quick, deterministic results on a library of tests.
*/

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The seed for the source of rng used when making decisions.
    ///
    /// Two solves of the same input under the same seed make the same decisions in the same order.
    pub decision_seed: u64,

    /// Assert the integrity of the trail at each step of a solve.
    ///
    /// Expensive, and intended for test builds only.
    pub trail_checks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            decision_seed: 0,
            trail_checks: false,
        }
    }
}
