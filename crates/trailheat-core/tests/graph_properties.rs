use proptest::prelude::*;
use std::collections::BTreeSet;
use trailheat_core::graph::{Cost, Dijkstra, Graph, NodeId};

const MAX_NODES: usize = 9;

/// Arcs as (from, to, cost) over node indices below `MAX_NODES`
fn arc_list(directed: bool) -> impl Strategy<Value = (usize, Vec<(NodeId, NodeId, u32)>)> {
    (2..=MAX_NODES).prop_flat_map(move |n| {
        let arcs = proptest::collection::vec((0..n, 0..n, 0u32..20), 0..n * 3);
        arcs.prop_map(move |arcs| {
            if directed {
                (n, arcs)
            } else {
                // no self-loops on road-like graphs
                (n, arcs.into_iter().filter(|(s, t, _)| s != t).collect())
            }
        })
    })
}

fn build(n: usize, arcs: &[(NodeId, NodeId, u32)], symmetric: bool) -> Graph {
    let mut g = Graph::with_size(n);
    for node in 0..n {
        g.add_node(node);
    }
    for &(s, t, c) in arcs {
        if symmetric {
            g.add_biedge(s, t, Cost::from(c));
        } else {
            g.add_edge(s, t, Cost::from(c));
        }
    }
    g
}

fn floyd_warshall(g: &Graph) -> Vec<Vec<f64>> {
    let n = g.size();
    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for node in g.nodes() {
        dist[node][node] = 0.0;
    }
    for (s, t, c) in g.arcs() {
        dist[s][t] = dist[s][t].min(c.value());
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let via = dist[i][k] + dist[k][j];
                if via < dist[i][j] {
                    dist[i][j] = via;
                }
            }
        }
    }
    dist
}

fn arc_pairs(g: &Graph) -> BTreeSet<(NodeId, NodeId)> {
    g.arcs().map(|(s, t, _)| (s, t)).collect()
}

proptest! {
    #[test]
    fn test_dijkstra_matches_floyd_warshall((n, arcs) in arc_list(true)) {
        let g = build(n, &arcs, false);
        let reference = floyd_warshall(&g);
        let dijkstra = Dijkstra::new(&g);
        for s in 0..n {
            let paths = dijkstra.run(s).unwrap();
            for t in 0..n {
                prop_assert_eq!(
                    paths.cost(t).value(),
                    reference[s][t],
                    "distance {} -> {}", s, t
                );
            }
        }
    }

    #[test]
    fn test_bounded_search_agrees_below_limit(
        (n, arcs) in arc_list(true),
        limit in 0u32..40,
    ) {
        let g = build(n, &arcs, false);
        let limit = Cost::from(limit);
        let unbounded = Dijkstra::new(&g).run(0).unwrap();
        let bounded = Dijkstra::new(&g).with_cost_limit(limit).run(0).unwrap();
        for node in 0..n {
            let full = unbounded.cost(node);
            if full <= limit {
                prop_assert_eq!(bounded.cost(node), full);
            } else {
                prop_assert_eq!(bounded.cost(node), Cost::INFINITE);
            }
        }
    }

    #[test]
    fn test_filter_components_partitions_input(
        (n, arcs) in arc_list(false),
        threshold in 0usize..6,
    ) {
        let g = build(n, &arcs, true);
        let all: BTreeSet<NodeId> = g.nodes().collect();
        let (remaining, removed) = g.filter_components(all.iter().copied(), threshold);

        prop_assert!(remaining.is_disjoint(&removed));
        let union: BTreeSet<NodeId> = remaining.union(&removed).copied().collect();
        prop_assert_eq!(union, all);

        for component in g.components() {
            if component.len() >= threshold {
                prop_assert!(component.is_subset(&remaining));
            } else {
                prop_assert!(component.is_subset(&removed));
            }
        }
    }

    #[test]
    fn test_binary_contraction_preserves_kept_distances((n, arcs) in arc_list(false)) {
        let original = build(n, &arcs, true);
        let mut contracted = original.clone();
        contracted.contract_binary_nodes(&BTreeSet::new());

        let kept: Vec<NodeId> = contracted.nodes().collect();
        for &s in &kept {
            let before = Dijkstra::new(&original).run(s).unwrap();
            let after = Dijkstra::new(&contracted).run(s).unwrap();
            for &t in &kept {
                prop_assert_eq!(after.cost(t), before.cost(t), "distance {} -> {}", s, t);
            }
        }
    }

    #[test]
    fn test_binary_contraction_undo_restores_structure((n, arcs) in arc_list(false)) {
        let original = build(n, &arcs, true);
        let mut g = original.clone();
        let record = g.contract_binary_nodes(&BTreeSet::new());
        g.undo_contraction(&record).unwrap();

        prop_assert_eq!(g.nodes().collect::<Vec<_>>(), original.nodes().collect::<Vec<_>>());
        prop_assert_eq!(arc_pairs(&g), arc_pairs(&original));
    }

    #[test]
    fn test_excluded_nodes_survive_contraction(
        (n, arcs) in arc_list(false),
        exclude in proptest::collection::btree_set(0..MAX_NODES, 0..4),
    ) {
        let mut g = build(n, &arcs, true);
        let record = g.contract_binary_nodes(&exclude);
        for node in record.contracted_nodes() {
            prop_assert!(!exclude.contains(&node));
            prop_assert!(!g.contains_node(node));
        }
        for node in exclude.iter().filter(|&&node| node < n) {
            prop_assert!(g.contains_node(*node));
        }
    }
}
