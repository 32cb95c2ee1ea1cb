//! The context --- to which a 3-CNF is given and within which a CDCL solve takes place.
//!
//! Strictly, a [GenericContext] and a [Context].
//!
//! The generic context is generic over the source of randomness used for decisions.
//! This helps distinguish generic context methods against those intended for external use: [from_input](Context::from_input) is implemented for a context rather than a generic context, so a source of randomness need not be supplied alongside the input --- the context seeds its own from the [configuration](crate::config::Config).
//!
//! # Example
//! ```rust
//! # use cpl_sat::config::Config;
//! # use cpl_sat::context::Context;
//! # use cpl_sat::reports::Report;
//! # use cpl_sat::structures::clause::Clause;
//! # use cpl_sat::structures::cnf3::CdclInput;
//! let mut input = CdclInput::default();
//! for literals in [vec![1, 2], vec![-1, 2], vec![-2, 3]] {
//!     input.add_clause(&Clause::from_literals(literals)).unwrap();
//! }
//!
//! let mut ctx = Context::from_input(input, Config::default());
//! assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
//!
//! let assignment = ctx.assignment().unwrap();
//! assert_eq!(assignment.get(&2), Some(&true));
//! assert_eq!(assignment.get(&3), Some(&true));
//! ```

mod counters;
pub use counters::Counters;
mod generic;
pub use generic::GenericContext;
mod specific;
pub use specific::Context;

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The input has been received, and no solve has concluded.
    Input,

    /// A solve is underway.
    Solving,

    /// The input is known to be satisfiable, with a complete assignment on the trail.
    Satisfiable,

    /// The input is known to be unsatisfiable.
    Unsatisfiable,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Solving => write!(f, "Solving"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
        }
    }
}
