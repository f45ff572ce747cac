//! Reformats daily v4 metric rollups into a denormalized table with
//! synthetic `all` categories along the geo, channel and os facets, ready
//! for client-side cross-filtering.

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod rollup;
pub mod table;

pub use errors::RollupError;
pub use rollup::{aggregate, Rollup, RollupSummary};
