/// Counters related to a context/solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    /// Passes of the solve loop.
    pub total_iterations: usize,

    /// Decisions made.
    pub total_decisions: usize,

    /// Literals appended to the trail by propagation.
    pub total_propagations: usize,

    /// Conflicts observed.
    pub total_conflicts: usize,

    /// Backjumps made in response to a conflict.
    pub total_backjumps: usize,
}
