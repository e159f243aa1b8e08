//! Single-pass grouping and summary statistics over transaction sets.

pub mod flows;
pub mod summary;
