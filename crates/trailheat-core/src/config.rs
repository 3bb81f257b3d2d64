//! Analysis configuration for trailheat
//!
//! Configuration is read from a TOML file; every key is optional and falls
//! back to its default, so an empty file is a valid configuration.

pub mod types;

use std::fs;
use std::path::Path;

use crate::contraction::{ClusterContraction, ThresholdContraction};
use crate::error::{Result, TrailheatError};
use crate::graph::Cost;
use crate::walkway::WalkwayOptions;

pub use types::{
    AnalysisConfig, ComponentsConfig, ContractionConfig, EdgeWeightsConfig, ReachabilityConfig,
    WalkwaysConfig,
};

fn check_limit(context: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        crate::bail_invalid!(context, value);
    }
    Ok(())
}

impl AnalysisConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AnalysisConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TrailheatError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Rejects negative or NaN costs and distances
    pub fn validate(&self) -> Result<()> {
        check_limit("reachability.cost_limit", self.reachability.cost_limit)?;
        check_limit("edge_weights.cost_limit", self.edge_weights.cost_limit)?;
        check_limit(
            "contraction.intra_cluster_threshold",
            self.contraction.intra_cluster_threshold,
        )?;
        check_limit(
            "contraction.inter_cluster_threshold",
            self.contraction.inter_cluster_threshold,
        )?;
        check_limit(
            "contraction.cost_threshold",
            self.contraction.cost_threshold,
        )?;
        check_limit("walkways.cost_limit", self.walkways.cost_limit)?;
        Ok(())
    }

    pub fn walkway_options(&self) -> WalkwayOptions {
        WalkwayOptions {
            cost_limit: Cost::new(self.walkways.cost_limit),
            local_cycle_depth: self.walkways.local_cycle_depth,
            prune_after: Some(self.walkways.prune_after).filter(|&n| n > 0),
        }
    }

    pub fn cluster_contraction(&self) -> ClusterContraction {
        ClusterContraction::new(
            Cost::new(self.contraction.intra_cluster_threshold),
            self.contraction.inter_cluster_threshold,
        )
    }

    pub fn threshold_contraction(&self) -> ThresholdContraction {
        ThresholdContraction::new(Cost::new(self.contraction.cost_threshold))
    }
}
