//! Geometric layout: centroids, planar geometry, flow edge building.

pub mod builder;
pub mod centroids;
pub mod edge;
pub mod geometry;
