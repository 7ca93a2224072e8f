//! The local, CPU-bound analyses. Pure functions with no failure mode.

pub mod duplicates;
pub mod palindrome;
pub mod permutations;
