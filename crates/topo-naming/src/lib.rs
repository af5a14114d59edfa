//! Topological naming of swept light-slot solids.
//!
//! A naming pass stamps every face, edge and co-edge of a freshly swept brep
//! with a deterministic name derived from the profile curve ids and the path
//! segment tags, so that repeated sweeps of the same profile along the same
//! path reproduce the same names. Anomalies never abort the pass; they are
//! collected as diagnostics in the returned [`NamingReport`].

pub mod config;
pub mod entity;
pub mod namer;
pub mod wrap;

#[cfg(test)]
mod fixtures;

pub use config::NamingConfig;
pub use entity::SweepEntity;
pub use namer::{calc_edge_topo_name, reconstruct_brep_names, NamingReport, TopoNamer};
pub use wrap::wrap_anchor_point;
