//! DNS record derivation for an addressed topology.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use crate::error::TopogenError;
use crate::topology::{Graph, NodeRole};

/// Forward and reverse records for every address bound in a topology.
///
/// Built once after addressing is complete, read-only afterward. Both maps
/// iterate in sorted order, so zone rendering is identical across runs.
#[derive(Debug, Default)]
pub struct DnsRecordSet {
    forward: BTreeMap<String, Ipv4Addr>,
    reverse: BTreeMap<Ipv4Addr, String>,
}

impl DnsRecordSet {
    /// Insert a forward/reverse pair. A duplicate name or address is a
    /// `DnsNameCollision`; records are never overwritten.
    fn insert(&mut self, name: &str, address: Ipv4Addr) -> Result<(), TopogenError> {
        if self.forward.contains_key(name) || self.reverse.contains_key(&address) {
            return Err(TopogenError::DnsNameCollision {
                name: name.to_string(),
                address,
            });
        }
        self.forward.insert(name.to_string(), address);
        self.reverse.insert(address, name.to_string());
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Ipv4Addr> {
        self.forward.get(name).copied()
    }

    pub fn lookup_reverse(&self, address: Ipv4Addr) -> Option<&str> {
        self.reverse.get(&address).map(String::as_str)
    }

    /// Forward records in name order.
    pub fn forward(&self) -> impl Iterator<Item = (&str, Ipv4Addr)> {
        self.forward.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    /// Reverse records in address order.
    pub fn reverse(&self) -> impl Iterator<Item = (Ipv4Addr, &str)> {
        self.reverse.iter().map(|(addr, name)| (*addr, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Derive the record set for a fully addressed graph.
///
/// Routers contribute their loopback under the bare hostname and one record
/// per interface under its descriptive name. The DNS host and the external
/// connector contribute their network-facing address under their fixed
/// hostnames, so routers can be pointed at the resolver by name.
pub fn build_records(graph: &Graph) -> Result<DnsRecordSet, TopogenError> {
    let mut records = DnsRecordSet::default();
    for node in graph.nodes() {
        match node.role {
            NodeRole::Router => {
                if let Some(loopback) = node.loopback {
                    records.insert(&node.hostname, loopback.addr())?;
                }
                for binding in &node.interfaces {
                    records.insert(&binding.description, binding.address.addr())?;
                }
            }
            NodeRole::DnsHost | NodeRole::ExternalConnector => {
                for binding in &node.interfaces {
                    records.insert(&node.hostname, binding.address.addr())?;
                }
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::AddressPool;
    use crate::addressing;
    use crate::topology::{build, Mode, DNS_HOST_NAME, EXT_CONN_NAME};

    fn addressed_graph(count: usize, mode: Mode) -> Graph {
        let mut graph = build(count, mode, 200, 2).unwrap();
        let mut loopbacks = AddressPool::new("10.0.0.0/16".parse().unwrap(), 32).unwrap();
        let mut p2pnets = AddressPool::new("172.16.0.0/16".parse().unwrap(), 30).unwrap();
        addressing::bind(&mut graph, &mut loopbacks, &mut p2pnets).unwrap();
        graph
    }

    #[test]
    fn test_loopbacks_resolve_under_bare_hostnames() {
        let graph = addressed_graph(3, Mode::Simple);
        let records = build_records(&graph).unwrap();
        assert_eq!(records.lookup("r1"), Some("10.0.0.1".parse().unwrap()));
        assert_eq!(records.lookup("r2"), Some("10.0.0.2".parse().unwrap()));
        assert_eq!(records.lookup("r3"), Some("10.0.0.3".parse().unwrap()));
    }

    #[test]
    fn test_well_known_names() {
        let graph = addressed_graph(3, Mode::Simple);
        let records = build_records(&graph).unwrap();
        let dns_addr = graph.nameserver().unwrap();
        assert_eq!(records.lookup(DNS_HOST_NAME), Some(dns_addr));
        assert!(records.lookup(EXT_CONN_NAME).is_some());
    }

    #[test]
    fn test_forward_reverse_round_trip() {
        let graph = addressed_graph(15, Mode::Nx);
        let records = build_records(&graph).unwrap();
        assert!(!records.is_empty());
        for (name, addr) in records.forward() {
            assert_eq!(records.lookup_reverse(addr), Some(name));
        }
        for (addr, name) in records.reverse() {
            assert_eq!(records.lookup(name), Some(addr));
        }
    }

    #[test]
    fn test_every_bound_address_appears_exactly_once() {
        let graph = addressed_graph(10, Mode::Simple);
        let records = build_records(&graph).unwrap();
        let mut bound = 0;
        for node in graph.nodes() {
            if let Some(loopback) = node.loopback {
                bound += 1;
                assert!(records.lookup_reverse(loopback.addr()).is_some());
            }
            for binding in &node.interfaces {
                bound += 1;
                assert!(records.lookup_reverse(binding.address.addr()).is_some());
            }
        }
        assert_eq!(records.len(), bound);
    }

    #[test]
    fn test_collision_is_a_hard_failure() {
        let mut records = DnsRecordSet::default();
        records.insert("r1", "10.0.0.1".parse().unwrap()).unwrap();
        let same_name = records.insert("r1", "10.0.0.2".parse().unwrap());
        assert!(matches!(
            same_name,
            Err(TopogenError::DnsNameCollision { .. })
        ));
        let same_addr = records.insert("r2", "10.0.0.1".parse().unwrap());
        assert!(matches!(
            same_addr,
            Err(TopogenError::DnsNameCollision { .. })
        ));
        // the failed inserts left nothing behind
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_interface_records_use_descriptive_names() {
        let graph = addressed_graph(2, Mode::Simple);
        let records = build_records(&graph).unwrap();
        assert_eq!(
            records.lookup("from-r1-gi0-0-to-r2-gi0-0"),
            Some("172.16.0.1".parse().unwrap())
        );
        assert_eq!(
            records.lookup("from-r2-gi0-0-to-r1-gi0-0"),
            Some("172.16.0.2".parse().unwrap())
        );
    }
}
