//! Graph algorithm implementations
//!
//! - `dijkstra`: cost-limited, arc-restricted shortest paths

pub mod dijkstra;

pub use dijkstra::{Dijkstra, ShortestPaths};
