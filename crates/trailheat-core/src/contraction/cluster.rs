//! Agglomerative clustering followed by interior-node contraction.
//!
//! Arcs cheaper than the intra-cluster threshold are visited from cheapest
//! to most expensive, ties broken by `(min(a, b), max(a, b))`. Their
//! endpoint clusters merge when the centroids lie closer than the
//! inter-cluster threshold. Each cluster is then reduced to its border
//! nodes.

use std::collections::{BTreeMap, BTreeSet};

use crate::contraction::ContractionRecord;
use crate::error::{Result, TrailheatError};
use crate::graph::{great_circle_distance, Cost, Graph, NodeId, NodeTable, Position};

/// A set of nodes with a size-weighted centroid
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    nodes: BTreeSet<NodeId>,
    centroid: Position,
}

impl Cluster {
    pub fn new(node: NodeId, position: Position) -> Self {
        Self {
            nodes: BTreeSet::from([node]),
            centroid: position,
        }
    }

    pub fn nodes(&self) -> &BTreeSet<NodeId> {
        &self.nodes
    }

    pub fn centroid(&self) -> Position {
        self.centroid
    }

    /// Absorbs `other`, moving the centroid by relative cluster size
    pub fn join(&mut self, other: Cluster) {
        let total = (self.nodes.len() + other.nodes.len()) as f64;
        let a = self.nodes.len() as f64 / total;
        let b = other.nodes.len() as f64 / total;
        self.centroid = Position::new(
            a * self.centroid.lat + b * other.centroid.lat,
            a * self.centroid.lon + b * other.centroid.lon,
        );
        self.nodes.extend(other.nodes);
    }

    /// Great-circle distance between centroids, in metres
    pub fn distance(&self, other: &Cluster) -> f64 {
        great_circle_distance(self.centroid, other.centroid)
    }

    /// Members with at least one arc leaving the cluster
    pub fn border_nodes(&self, graph: &Graph) -> BTreeSet<NodeId> {
        self.nodes
            .iter()
            .copied()
            .filter(|&node| {
                graph
                    .successors(node)
                    .map(|out| out.keys().any(|t| !self.nodes.contains(t)))
                    .unwrap_or(false)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClusterContraction {
    intra_cluster_threshold: Cost,
    inter_cluster_threshold: f64,
}

impl ClusterContraction {
    /// `intra_cluster_threshold` bounds the arc cost eligible for merging,
    /// `inter_cluster_threshold` the centroid distance in metres
    pub fn new(intra_cluster_threshold: Cost, inter_cluster_threshold: f64) -> Self {
        Self {
            intra_cluster_threshold,
            inter_cluster_threshold,
        }
    }

    /// Undirected arcs below the intra-cluster threshold, cheapest first
    fn merge_order(&self, graph: &Graph) -> Vec<(Cost, NodeId, NodeId)> {
        let mut pairs: BTreeMap<(NodeId, NodeId), Cost> = BTreeMap::new();
        for (s, t, cost) in graph.arcs() {
            if s == t || cost >= self.intra_cluster_threshold {
                continue;
            }
            let key = (s.min(t), s.max(t));
            pairs
                .entry(key)
                .and_modify(|c| {
                    if cost < *c {
                        *c = cost;
                    }
                })
                .or_insert(cost);
        }
        let mut order: Vec<_> = pairs.into_iter().map(|((a, b), cost)| (cost, a, b)).collect();
        order.sort_by(|x, y| x.0.total_cmp(&y.0).then((x.1, x.2).cmp(&(y.1, y.2))));
        order
    }

    /// Clusters the present nodes of `graph`.
    ///
    /// Every node needs a position in `table`, otherwise this fails with
    /// `MissingPosition`. Clusters are returned in order of their smallest
    /// member.
    pub fn cluster(&self, graph: &Graph, table: &NodeTable) -> Result<Vec<Cluster>> {
        let mut clusters: BTreeMap<NodeId, Cluster> = BTreeMap::new();
        let mut labels: BTreeMap<NodeId, NodeId> = BTreeMap::new();
        for node in graph.nodes() {
            let position = table
                .position(node)
                .ok_or(TrailheatError::MissingPosition { node })?;
            clusters.insert(node, Cluster::new(node, position));
            labels.insert(node, node);
        }

        for (_, a, b) in self.merge_order(graph) {
            let (Some(&label_a), Some(&label_b)) = (labels.get(&a), labels.get(&b)) else {
                continue;
            };
            if label_a == label_b {
                continue;
            }
            let (Some(cluster_a), Some(cluster_b)) = (clusters.get(&label_a), clusters.get(&label_b))
            else {
                continue;
            };
            if cluster_a.distance(cluster_b) >= self.inter_cluster_threshold {
                continue;
            }
            if let Some(absorbed) = clusters.remove(&label_b) {
                for node in &absorbed.nodes {
                    labels.insert(*node, label_a);
                }
                if let Some(target) = clusters.get_mut(&label_a) {
                    target.join(absorbed);
                }
            }
        }

        let mut result: Vec<Cluster> = clusters.into_values().collect();
        result.sort_by_key(|c| c.nodes.first().copied());
        Ok(result)
    }

    /// Clusters the graph and contracts every interior cluster node.
    ///
    /// Nodes in `exclude` are treated as border nodes and survive.
    #[tracing::instrument(skip(self, graph, table, exclude), fields(nodes = graph.node_count()))]
    pub fn contract(
        &self,
        graph: &mut Graph,
        table: &NodeTable,
        exclude: &BTreeSet<NodeId>,
    ) -> Result<ContractionRecord> {
        let clusters = self.cluster(graph, table)?;
        tracing::debug!(clusters = clusters.len(), "clustering finished");
        let mut record = ContractionRecord::new();
        for cluster in &clusters {
            let mut keep = cluster.border_nodes(graph);
            keep.extend(exclude.iter().copied());
            for &node in cluster.nodes.difference(&keep) {
                record.extend(graph.contract_node(node, true)?);
            }
        }
        tracing::debug!(
            remaining = graph.node_count(),
            events = record.len(),
            "cluster contraction finished"
        );
        Ok(record)
    }
}
