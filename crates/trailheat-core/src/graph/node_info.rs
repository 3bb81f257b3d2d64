//! External identity and position side table.
//!
//! Node identity is the index alone; `NodeTable` only answers "where is
//! this node and what was it called upstream". Nothing in the engine
//! requires an entry for every node except cluster contraction, which needs
//! positions.

use rstar::{primitives::GeomWithData, RTree};
use serde::{Deserialize, Serialize};

use crate::graph::adjacency::Graph;
use crate::graph::types::{Cost, NodeId};

/// Mean earth radius in metres
const EARTH_RADIUS_M: f64 = 6_371_000.785;

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Great-circle (haversine) distance between two positions, in metres
pub fn great_circle_distance(a: Position, b: Position) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Upstream identity of a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl NodeInfo {
    pub fn at(position: Position) -> Self {
        Self {
            external_id: None,
            position: Some(position),
        }
    }

    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }
}

/// Index-keyed lookup of [`NodeInfo`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTable {
    entries: Vec<Option<NodeInfo>>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: NodeId, info: NodeInfo) {
        if node >= self.entries.len() {
            self.entries.resize(node + 1, None);
        }
        self.entries[node] = Some(info);
    }

    pub fn get(&self, node: NodeId) -> Option<&NodeInfo> {
        self.entries.get(node).and_then(Option::as_ref)
    }

    pub fn position(&self, node: NodeId) -> Option<Position> {
        self.get(node).and_then(|info| info.position)
    }

    pub fn external_id(&self, node: NodeId) -> Option<&str> {
        self.get(node).and_then(|info| info.external_id.as_deref())
    }

    /// Number of indices covered, including empty slots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Spatial index over the present nodes of `graph` that have a position
    pub fn spatial_index(&self, graph: &Graph) -> SpatialIndex {
        let entries = graph
            .nodes()
            .filter_map(|node| {
                self.position(node)
                    .map(|p| GeomWithData::new([p.lat, p.lon], node))
            })
            .collect();
        SpatialIndex {
            tree: RTree::bulk_load(entries),
        }
    }
}

/// Nearest-node lookup over a fixed set of positioned nodes.
///
/// Distances are planar in (lat, lon) degrees.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: RTree<GeomWithData<[f64; 2], NodeId>>,
}

impl SpatialIndex {
    pub fn nearest(&self, position: Position) -> Option<NodeId> {
        self.tree
            .nearest_neighbor(&[position.lat, position.lon])
            .map(|entry| entry.data)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

/// Connects external points to their nearest graph node.
///
/// Candidates are the positioned nodes present before the call, so a point
/// never hangs off another attached point. Every point gets a fresh index
/// past `graph.size()` and a zero-cost arc from its nearest node to it.
/// Returns the new indices in input order; with no positioned node in the
/// graph nothing is attached.
pub fn attach_points(graph: &mut Graph, table: &mut NodeTable, points: &[Position]) -> Vec<NodeId> {
    let index = table.spatial_index(graph);
    if index.is_empty() {
        tracing::warn!("no positioned node to attach points to");
        return Vec::new();
    }
    tracing::debug!(candidates = index.len(), points = points.len(), "attaching points");

    let mut attached = Vec::with_capacity(points.len());
    for &point in points {
        let Some(nearest) = index.nearest(point) else {
            break;
        };
        let node = graph.size();
        graph.add_edge(nearest, node, Cost::ZERO);
        table.insert(node, NodeInfo::at(point));
        attached.push(node);
    }
    attached
}
