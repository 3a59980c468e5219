//! Addressing binder.
//!
//! Walks a built graph and attaches pool allocations: one loopback per
//! router, one point-to-point subnet per edge. Also designates the
//! default-route origin. The binder is the single writer of address fields;
//! the DNS builder and the renderer only read.

use ipnet::Ipv4Net;

use crate::addr::AddressPool;
use crate::error::TopogenError;
use crate::topology::{DefaultRoute, Graph, InterfaceBinding, Node, NodeId, NodeRole};

/// Bind loopback and point-to-point addressing onto a built graph.
///
/// Routers are visited in ascending id order (the hostname order) and edges
/// in creation order, so identical inputs always produce identical
/// addressing. Per edge, the endpoint with the lower node id takes the
/// first host address of the subnet. A `PoolExhausted` failure propagates
/// unchanged; the caller discards the whole graph in that case.
pub fn bind(
    graph: &mut Graph,
    loopbacks: &mut AddressPool,
    p2pnets: &mut AddressPool,
) -> Result<(), TopogenError> {
    let router_ids: Vec<NodeId> = graph.routers().map(|n| n.id).collect();
    for id in router_ids {
        let block = loopbacks.allocate()?;
        graph.node_mut(id).loopback = Some(block);
    }

    for index in 0..graph.edge_count() {
        let (a, b) = {
            let edge = graph.edge(index);
            (edge.a, edge.b)
        };
        let subnet = p2pnets.allocate()?;
        let (first, second) = host_pair(subnet)?;

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let lo_slot = graph.node(lo).interfaces.len();
        let hi_slot = graph.node(hi).interfaces.len();
        let lo_desc = interface_description(graph.node(lo), lo_slot, graph.node(hi), hi_slot);
        let hi_desc = interface_description(graph.node(hi), hi_slot, graph.node(lo), lo_slot);

        graph.node_mut(lo).interfaces.push(InterfaceBinding {
            address: first,
            neighbor: hi,
            description: lo_desc,
            slot: lo_slot,
        });
        graph.node_mut(hi).interfaces.push(InterfaceBinding {
            address: second,
            neighbor: lo,
            description: hi_desc,
            slot: hi_slot,
        });

        let edge = graph.edge_mut(index);
        edge.subnet = Some(subnet);
        edge.slots = Some(if a < b {
            (lo_slot, hi_slot)
        } else {
            (hi_slot, lo_slot)
        });
    }

    designate_origin(graph);
    Ok(())
}

/// The two host addresses of a point-to-point subnet, as address/netmask
/// pairs.
fn host_pair(subnet: Ipv4Net) -> Result<(Ipv4Net, Ipv4Net), TopogenError> {
    let mut hosts = subnet.hosts();
    let invalid = || TopogenError::InvalidPool {
        supernet: subnet,
        prefix_len: subnet.prefix_len(),
    };
    let first = hosts.next().ok_or_else(invalid)?;
    let second = hosts.next().ok_or_else(invalid)?;
    let first = Ipv4Net::new(first, subnet.prefix_len()).map_err(|_| invalid())?;
    let second = Ipv4Net::new(second, subnet.prefix_len()).map_err(|_| invalid())?;
    Ok((first, second))
}

/// `from-r1-gi0-0-to-r9-gi0-0` style label for one direction of an edge.
fn interface_description(local: &Node, local_slot: usize, peer: &Node, peer_slot: usize) -> String {
    format!(
        "from-{}-{}-to-{}-{}",
        local.hostname,
        local.interface_label(local_slot),
        peer.hostname,
        peer.interface_label(peer_slot)
    )
}

/// The router adjacent to the external connector becomes the default-route
/// origin, with the connector's bound address as its next hop.
fn designate_origin(graph: &mut Graph) {
    let origin = graph
        .find_role(NodeRole::ExternalConnector)
        .and_then(|ext| ext.interfaces.first())
        .map(|binding| DefaultRoute {
            node: binding.neighbor,
            via: binding.address.addr(),
        });
    if let Some(origin) = origin {
        graph.set_origin(origin);
    }
}
