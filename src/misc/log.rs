/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    pub const TOKENIZER: &str = "tokenizer";
    pub const EXPANSION: &str = "expansion";
    pub const TRANSFORM: &str = "transform";
    pub const DP: &str = "dp";
    pub const DPLL: &str = "dpll";
    pub const PROPAGATION: &str = "propagation";
    pub const BACKJUMP: &str = "backjump";
    pub const DECISION: &str = "decision";
}
