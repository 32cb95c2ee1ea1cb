//! Generic structures with no direct relation to solving.

pub mod minimal_pcg;
