//! Road graph storage and traversal
//!
//! Provides the index-based graph the engine runs on:
//! - `Graph`: directed adjacency-cost structure keyed by dense node indices
//! - `Dijkstra`: cost-limited, arc-restricted shortest paths
//! - component filtering and largest-connected-component extraction
//! - `NodeTable`: optional external id / position side table
//! - `io`: the line-based interchange format

pub mod adjacency;
pub mod algos;
pub mod components;
pub mod io;
pub mod node_info;
pub mod types;

pub use adjacency::Graph;
pub use algos::{Dijkstra, ShortestPaths};
pub use node_info::{great_circle_distance, NodeInfo, NodeTable, Position, SpatialIndex};
pub use types::{Arc, Cost, NodeId};
