//! Compliance-balance formula, evaluation and route comparison.

pub mod comparison;
pub mod evaluator;
pub mod formula;
