//! Sweep paths of moldings (baseboards and cornices).
//!
//! A [`Molding`] owns an ordered list of [`TopoPather`] fragments. Its sweep
//! path is derived by chaining the fragments' curves end to start with
//! [`sort_paths`], and can be extended one fragment at a time or split at a
//! point into several moldings.

pub mod config;
pub mod molding;
pub mod pather;
pub mod sort;

pub use config::MoldingConfig;
pub use molding::{Molding, MoldingParams};
pub use pather::TopoPather;
pub use sort::{sort_path_indices, sort_paths};
