//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Analysis configuration, one table per engine operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub reachability: ReachabilityConfig,

    #[serde(default)]
    pub edge_weights: EdgeWeightsConfig,

    #[serde(default)]
    pub contraction: ContractionConfig,

    #[serde(default)]
    pub walkways: WalkwaysConfig,

    #[serde(default)]
    pub components: ComponentsConfig,
}

/// Configuration for reachability analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachabilityConfig {
    /// Maximum travel cost from a source (default 3600, one hour in seconds)
    #[serde(default = "default_travel_limit")]
    pub cost_limit: f64,
}

/// Configuration for round-trip edge weighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeWeightsConfig {
    /// Maximum round-trip cost (default 3600)
    #[serde(default = "default_travel_limit")]
    pub cost_limit: f64,
}

/// Configuration for graph contraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractionConfig {
    /// Arcs cheaper than this may join their endpoints into one cluster
    #[serde(default = "default_intra_cluster_threshold")]
    pub intra_cluster_threshold: f64,

    /// Maximum centroid distance in metres for two clusters to merge
    #[serde(default = "default_inter_cluster_threshold")]
    pub inter_cluster_threshold: f64,

    /// Outgoing-arc cost bound for threshold contraction
    #[serde(default = "default_cost_threshold")]
    pub cost_threshold: f64,
}

/// Configuration for walkway enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkwaysConfig {
    #[serde(default = "default_walkway_cost_limit")]
    pub cost_limit: f64,

    #[serde(default = "default_local_cycle_depth")]
    pub local_cycle_depth: usize,

    /// Expansions between global pruning passes (0 disables)
    #[serde(default = "default_prune_after")]
    pub prune_after: usize,
}

/// Configuration for component filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentsConfig {
    /// Components with fewer nodes are dropped
    #[serde(default = "default_min_size")]
    pub min_size: usize,
}

fn default_travel_limit() -> f64 {
    3600.0
}

fn default_intra_cluster_threshold() -> f64 {
    15.0
}

fn default_inter_cluster_threshold() -> f64 {
    50.0
}

fn default_cost_threshold() -> f64 {
    15.0
}

fn default_walkway_cost_limit() -> f64 {
    9.0
}

fn default_local_cycle_depth() -> usize {
    2
}

fn default_prune_after() -> usize {
    500
}

fn default_min_size() -> usize {
    1
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            cost_limit: default_travel_limit(),
        }
    }
}

impl Default for EdgeWeightsConfig {
    fn default() -> Self {
        Self {
            cost_limit: default_travel_limit(),
        }
    }
}

impl Default for ContractionConfig {
    fn default() -> Self {
        Self {
            intra_cluster_threshold: default_intra_cluster_threshold(),
            inter_cluster_threshold: default_inter_cluster_threshold(),
            cost_threshold: default_cost_threshold(),
        }
    }
}

impl Default for WalkwaysConfig {
    fn default() -> Self {
        Self {
            cost_limit: default_walkway_cost_limit(),
            local_cycle_depth: default_local_cycle_depth(),
            prune_after: default_prune_after(),
        }
    }
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
        }
    }
}
