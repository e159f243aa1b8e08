//! Foundational types: countries, risk levels, transactions.

pub mod country;
pub mod risk;
pub mod transaction;
