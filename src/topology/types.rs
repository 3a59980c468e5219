//! Topology graph types.
//!
//! The topology builder owns node and edge creation; the addressing binder
//! later fills in the loopback, interface and subnet fields. The DNS record
//! builder and the config renderer only read.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;

/// Fixed hostname of the DNS host node.
pub const DNS_HOST_NAME: &str = "dns-host";

/// Fixed hostname of the external connector node.
pub const EXT_CONN_NAME: &str = "ext-conn-0";

/// Dense node identifier, index into the graph's node list.
pub type NodeId = usize;

/// A point in a cartesian coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// Role of a node in the generated topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Router,
    DnsHost,
    ExternalConnector,
}

/// One addressed attachment of a node to an edge.
///
/// The slot index is the insertion order of the binding on its node and
/// drives interface numbering in rendered configurations.
#[derive(Debug, Clone)]
pub struct InterfaceBinding {
    pub address: Ipv4Net,
    pub neighbor: NodeId,
    pub description: String,
    pub slot: usize,
}

/// A node of a topology.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub role: NodeRole,
    pub hostname: String,
    pub position: Point,
    pub loopback: Option<Ipv4Net>,
    pub interfaces: Vec<InterfaceBinding>,
}

impl Node {
    /// Configuration-facing name of the interface in the given slot.
    pub fn interface_name(&self, slot: usize) -> String {
        match self.role {
            NodeRole::Router => format!("GigabitEthernet0/{slot}"),
            NodeRole::DnsHost | NodeRole::ExternalConnector => format!("eth{slot}"),
        }
    }

    /// Short interface label used in descriptions and DNS names.
    pub fn interface_label(&self, slot: usize) -> String {
        match self.role {
            NodeRole::Router => format!("gi0-{slot}"),
            NodeRole::DnsHost | NodeRole::ExternalConnector => format!("eth{slot}"),
        }
    }
}

/// An unordered pair of distinct nodes, plus the p2p allocation the
/// addressing binder attaches to it.
#[derive(Debug, Clone)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    /// Point-to-point subnet, filled in by the addressing binder.
    pub subnet: Option<Ipv4Net>,
    /// Slot indices of the bound endpoint interfaces (`a` side, `b` side).
    pub slots: Option<(usize, usize)>,
}

/// The designated default-route origin: the router adjacent to the external
/// connector, and the connector's address as its next hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultRoute {
    pub node: NodeId,
    pub via: Ipv4Addr,
}

/// An abstract topology graph.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    edge_set: HashSet<(NodeId, NodeId)>,
    central: Option<NodeId>,
    origin: Option<DefaultRoute>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Add a node, returning its id. Hostname uniqueness is the builder's
    /// responsibility; router hostnames are derived from the id sequence.
    pub fn add_node(&mut self, role: NodeRole, hostname: String, position: Point) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            role,
            hostname,
            position,
            loopback: None,
            interfaces: Vec::new(),
        });
        id
    }

    /// Add an edge between two distinct nodes. Self-loops and parallel
    /// edges are rejected; returns whether the edge was added.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b || a >= self.nodes.len() || b >= self.nodes.len() {
            return false;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if !self.edge_set.insert(key) {
            return false;
        }
        self.edges.push(Edge {
            a,
            b,
            subnet: None,
            slots: None,
        });
        true
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, index: usize) -> &Edge {
        &self.edges[index]
    }

    pub fn edge_mut(&mut self, index: usize) -> &mut Edge {
        &mut self.edges[index]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Router nodes in ascending id order.
    pub fn routers(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.role == NodeRole::Router)
    }

    /// First node with the given role.
    pub fn find_role(&self, role: NodeRole) -> Option<&Node> {
        self.nodes.iter().find(|n| n.role == role)
    }

    /// Number of edges incident to a node.
    pub fn degree(&self, id: NodeId) -> usize {
        self.edges
            .iter()
            .filter(|e| e.a == id || e.b == id)
            .count()
    }

    /// Ids of all neighbors of a node, in edge creation order.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter_map(|e| {
                if e.a == id {
                    Some(e.b)
                } else if e.b == id {
                    Some(e.a)
                } else {
                    None
                }
            })
            .collect()
    }

    /// The designated central node, the attachment point for the special
    /// nodes.
    pub fn central(&self) -> Option<NodeId> {
        self.central
    }

    pub fn set_central(&mut self, id: NodeId) {
        self.central = Some(id);
    }

    /// The designated default-route origin, set by the addressing binder.
    pub fn origin(&self) -> Option<DefaultRoute> {
        self.origin
    }

    pub fn set_origin(&mut self, origin: DefaultRoute) {
        self.origin = Some(origin);
    }

    /// Address of the lab's DNS server: the dns-host's bound address.
    pub fn nameserver(&self) -> Option<Ipv4Addr> {
        self.find_role(NodeRole::DnsHost)
            .and_then(|n| n.interfaces.first())
            .map(|b| b.address.addr())
    }

    /// Whether every node is reachable from node 0.
    pub fn is_connected(&self) -> bool {
        if self.nodes.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![0];
        seen[0] = true;
        while let Some(id) = stack.pop() {
            for neighbor in self.neighbors(id) {
                if !seen[neighbor] {
                    seen[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }
        seen.into_iter().all(|v| v)
    }
}
