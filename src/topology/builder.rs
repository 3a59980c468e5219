//! Graph construction strategies.
//!
//! Two strategies are supported: `simple` builds a chain of routers laid
//! out as a square spiral, `nx` builds a clustered random topology with
//! bounded average degree. Both attach one DNS host and one external
//! connector to a deterministically chosen central router.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::TopogenError;

use super::coords::{ring, CoordsGenerator};
use super::types::{Graph, NodeId, NodeRole, Point, DNS_HOST_NAME, EXT_CONN_NAME};

/// Topology generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A single connected chain of routers on a square spiral.
    Simple,
    /// A partially meshed topology with emergent clustering.
    Nx,
}

impl FromStr for Mode {
    type Err = TopogenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Mode::Simple),
            "nx" => Ok(Mode::Nx),
            other => Err(TopogenError::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Simple => write!(f, "simple"),
            Mode::Nx => write!(f, "nx"),
        }
    }
}

/// Smallest cluster the nx strategy will form; below roughly four times
/// this node count the topology degenerates to a single cluster.
const MIN_CLUSTER_SIZE: usize = 20;

/// Build an abstract topology graph.
///
/// Creates `node_count` routers wired according to `mode`, then attaches
/// the DNS host and the external connector to the central router. The
/// `seed` only influences the `nx` strategy; identical inputs build
/// identical graphs.
pub fn build(
    node_count: usize,
    mode: Mode,
    distance: i64,
    seed: u64,
) -> Result<Graph, TopogenError> {
    if node_count < 1 {
        return Err(TopogenError::InvalidNodeCount(node_count));
    }
    let (mut graph, central) = match mode {
        Mode::Simple => build_chain(node_count, distance),
        Mode::Nx => build_clustered(node_count, distance, seed),
    };
    attach_special_nodes(&mut graph, central, distance);
    Ok(graph)
}

/// Chain of routers `r1..rN` with N-1 edges, laid out as a square spiral.
/// The chain head is the central node.
fn build_chain(node_count: usize, distance: i64) -> (Graph, NodeId) {
    let mut graph = Graph::new();
    let mut coords = CoordsGenerator::new(distance);
    let mut prev: Option<NodeId> = None;
    for n in 1..=node_count {
        let id = graph.add_node(NodeRole::Router, format!("r{n}"), coords.advance());
        if let Some(prev) = prev {
            graph.add_edge(prev, id);
        }
        prev = Some(id);
    }
    (graph, 0)
}

/// Clustered random topology.
///
/// Routers are split into clusters of `max(N/4, 20)` nodes. Each cluster is
/// wired as a random connected subgraph: a shuffled spanning chain plus
/// extra random edges up to roughly twice the member count, which bounds
/// the average degree at about four. Consecutive clusters are joined by a
/// single edge so the whole graph stays connected. The highest-degree
/// router (lowest id on ties) becomes the central node.
fn build_clustered(node_count: usize, distance: i64, seed: u64) -> (Graph, NodeId) {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(seed);

    let size = (node_count / 4).max(MIN_CLUSTER_SIZE).min(node_count);
    let mut ranges: Vec<std::ops::Range<usize>> = Vec::new();
    let mut start = 0;
    while start < node_count {
        let end = (start + size).min(node_count);
        ranges.push(start..end);
        start = end;
    }

    // cluster centers sit on a coarse spiral wide enough that member rings
    // of neighboring clusters cannot overlap
    let max_radius = ((size as f64 * distance as f64) / TAU).max(distance as f64);
    let span = 2 * max_radius.ceil() as i64 + distance;
    let mut centers = CoordsGenerator::new(span);

    for range in &ranges {
        let center = centers.advance();
        let positions = ring(center, range.len(), distance);
        for (offset, index) in range.clone().enumerate() {
            graph.add_node(NodeRole::Router, format!("r{}", index + 1), positions[offset]);
        }
    }

    for range in &ranges {
        let members: Vec<NodeId> = range.clone().collect();
        // a shuffled spanning chain keeps the cluster connected
        let mut order = members.clone();
        order.shuffle(&mut rng);
        for pair in order.windows(2) {
            graph.add_edge(pair[0], pair[1]);
        }
        // extra random edges; duplicates and self-loops are rejected by the
        // graph, the attempt bound keeps small clusters from spinning
        let target = members.len() * 2;
        let mut edges = members.len().saturating_sub(1);
        let mut attempts = 0;
        while edges < target && attempts < target * 8 {
            let a = members[rng.gen_range(0..members.len())];
            let b = members[rng.gen_range(0..members.len())];
            if graph.add_edge(a, b) {
                edges += 1;
            }
            attempts += 1;
        }
    }

    // one edge between consecutive clusters keeps the whole graph connected
    for pair in ranges.windows(2) {
        let a = pair[0].start + rng.gen_range(0..pair[0].len());
        let b = pair[1].start + rng.gen_range(0..pair[1].len());
        graph.add_edge(a, b);
    }

    let mut central = 0;
    let mut best = 0;
    for node in graph.routers() {
        let degree = graph.degree(node.id);
        if degree > best {
            best = degree;
            central = node.id;
        }
    }
    (graph, central)
}

/// Attach the DNS host and the external connector, each with one edge to
/// the central router. Candidacy for the attachment point is restricted to
/// router nodes before selection, so the special nodes can never end up as
/// their own anchor.
fn attach_special_nodes(graph: &mut Graph, central: NodeId, distance: i64) {
    let anchor = graph.node(central).position;
    let dns = graph.add_node(
        NodeRole::DnsHost,
        DNS_HOST_NAME.to_string(),
        Point {
            x: anchor.x + distance / 2,
            y: anchor.y - distance,
        },
    );
    let ext = graph.add_node(
        NodeRole::ExternalConnector,
        EXT_CONN_NAME.to_string(),
        Point {
            x: anchor.x - distance / 2,
            y: anchor.y - distance,
        },
    );
    graph.add_edge(central, dns);
    graph.add_edge(central, ext);
    graph.set_central(central);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_zero_nodes_is_invalid() {
        let err = build(0, Mode::Simple, 200, 1);
        assert!(matches!(err, Err(TopogenError::InvalidNodeCount(0))));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("simple".parse::<Mode>().unwrap(), Mode::Simple);
        assert_eq!("nx".parse::<Mode>().unwrap(), Mode::Nx);
        let err = "mesh".parse::<Mode>();
        assert!(matches!(err, Err(TopogenError::UnsupportedMode(ref m)) if m == "mesh"));
    }

    #[test]
    fn test_simple_is_a_chain() {
        let graph = build(5, Mode::Simple, 200, 1).unwrap();
        // 5 routers + dns-host + ext-conn
        assert_eq!(graph.node_count(), 7);
        // 4 chain edges + 2 attachment edges
        assert_eq!(graph.edge_count(), 6);
        assert!(graph.is_connected());

        let routers: Vec<_> = graph.routers().collect();
        assert_eq!(routers.len(), 5);
        assert_eq!(routers[0].hostname, "r1");
        assert_eq!(routers[4].hostname, "r5");

        // router-router subgraph is a path: ends have degree 1, middle 2
        let router_edges: Vec<_> = graph
            .edges()
            .iter()
            .filter(|e| {
                graph.node(e.a).role == NodeRole::Router && graph.node(e.b).role == NodeRole::Router
            })
            .collect();
        assert_eq!(router_edges.len(), 4);
        assert_eq!(graph.central(), Some(0));
    }

    #[test]
    fn test_single_node_topology() {
        let graph = build(1, Mode::Simple, 200, 1).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.is_connected());
    }

    #[test]
    fn test_exactly_one_special_node_each() {
        for mode in [Mode::Simple, Mode::Nx] {
            let graph = build(10, mode, 200, 7).unwrap();
            let dns: Vec<_> = graph
                .nodes()
                .iter()
                .filter(|n| n.role == NodeRole::DnsHost)
                .collect();
            let ext: Vec<_> = graph
                .nodes()
                .iter()
                .filter(|n| n.role == NodeRole::ExternalConnector)
                .collect();
            assert_eq!(dns.len(), 1);
            assert_eq!(ext.len(), 1);
            assert_eq!(dns[0].hostname, DNS_HOST_NAME);
            assert_eq!(ext[0].hostname, EXT_CONN_NAME);
        }
    }

    #[test]
    fn test_special_nodes_attach_to_a_router() {
        let graph = build(50, Mode::Nx, 200, 3).unwrap();
        let central = graph.central().unwrap();
        assert_eq!(graph.node(central).role, NodeRole::Router);
        for role in [NodeRole::DnsHost, NodeRole::ExternalConnector] {
            let special = graph.find_role(role).unwrap();
            assert_eq!(graph.neighbors(special.id), vec![central]);
        }
    }

    #[test]
    fn test_nx_is_connected_and_degree_bounded() {
        for count in [5, 40, 120, 400] {
            let graph = build(count, Mode::Nx, 200, 42).unwrap();
            assert!(graph.is_connected(), "nx graph of {count} must be connected");
            let router_count = graph.routers().count();
            assert_eq!(router_count, count);
            // edges stay linear in node count, nowhere near all-pairs
            let avg_degree = 2.0 * graph.edge_count() as f64 / graph.node_count() as f64;
            assert!(
                avg_degree <= 6.0,
                "average degree {avg_degree} too high for {count} nodes"
            );
        }
    }

    #[test]
    fn test_nx_is_deterministic_for_a_seed() {
        let a = build(80, Mode::Nx, 200, 9).unwrap();
        let b = build(80, Mode::Nx, 200, 9).unwrap();
        let edges_a: Vec<_> = a.edges().iter().map(|e| (e.a, e.b)).collect();
        let edges_b: Vec<_> = b.edges().iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(edges_a, edges_b);
        let pos_a: Vec<_> = a.nodes().iter().map(|n| n.position).collect();
        let pos_b: Vec<_> = b.nodes().iter().map(|n| n.position).collect();
        assert_eq!(pos_a, pos_b);
    }

    #[test]
    fn test_hostnames_are_unique() {
        let graph = build(200, Mode::Nx, 200, 5).unwrap();
        let mut seen = HashSet::new();
        for node in graph.nodes() {
            assert!(seen.insert(node.hostname.clone()), "duplicate {}", node.hostname);
        }
    }

    #[test]
    fn test_simple_layout_spacing() {
        let graph = build(8, Mode::Simple, 100, 1).unwrap();
        let routers: Vec<_> = graph.routers().collect();
        for pair in routers.windows(2) {
            let dx = (pair[1].position.x - pair[0].position.x).abs();
            let dy = (pair[1].position.y - pair[0].position.y).abs();
            assert_eq!(dx + dy, 100);
        }
    }
}
