//! CLI commands for trailheat

pub mod contract;
pub mod dispatch;
pub mod edge_weights;
pub mod helpers;
pub mod reachability;
pub mod shortest_paths;
pub mod stats;
pub mod walkways;
