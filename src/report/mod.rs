//! Structured input for the narrative-generation collaborator.

pub mod narrative;
