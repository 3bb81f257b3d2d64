//! Trailheat Core Library
//!
//! Graph engine behind the trailheat tooling: an index-based road graph,
//! cost-limited shortest paths, graph contraction, reachability and
//! round-trip edge weighting, and bounded walkway enumeration.

pub mod analysis;
pub mod config;
pub mod contraction;
pub mod error;
pub mod format;
pub mod graph;
pub mod logging;
pub mod walkway;

pub use error::{Result, TrailheatError};
pub use graph::{Cost, Graph, NodeId};
