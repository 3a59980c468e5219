//! Boot configuration for the DNS host node.
//!
//! The DNS host is an Alpine container running dnsmasq. Its configuration
//! is a shell script sourced at boot: it brings up the link towards the
//! central router, routes the two lab supernets through it and seeds
//! `/etc/hosts` with the derived record set.

use std::net::Ipv4Addr;

use super::{literal, RenderContext};
use crate::dns::DnsRecordSet;
use crate::error::TopogenError;
use crate::topology::DNS_HOST_NAME;

/// Render the DNS host boot script. `gateway` is the central router's
/// address on the shared link; every lab-internal route points at it.
pub fn render_dns_host(
    ctx: &RenderContext,
    records: &DnsRecordSet,
    gateway: Ipv4Addr,
) -> Result<String, TopogenError> {
    let node = ctx.node;
    let config = ctx.config;
    let binding = node
        .interfaces
        .first()
        .ok_or_else(|| TopogenError::RenderError {
            template: DNS_HOST_NAME.to_string(),
            hostname: node.hostname.clone(),
            field: "interface",
        })?;
    let port = node.interface_name(binding.slot);
    let domain = literal(&config.domainname);

    let mut out = String::new();
    out.push_str("# this is a shell script which will be sourced at boot\n");
    out.push_str(&format!("hostname {}\n", node.hostname));
    out.push_str("# configurable user account\n");
    out.push_str(&format!("USERNAME={}\n", literal(&config.username)));
    out.push_str("# consider to configure a strong password here instead of the var\n");
    out.push_str(&format!("PASSWORD={}\n", literal(&config.password)));
    out.push_str("\n");
    out.push_str("apk update\n");
    out.push_str("apk add dnsmasq\n");
    out.push_str("\n");
    out.push_str("cat <<EOF >/etc/dnsmasq.conf\n");
    out.push_str("domain-needed\n");
    out.push_str("bogus-priv\n");
    out.push_str("resolv-file=/etc/resolv.dnsmasq\n");
    out.push_str("no-poll\n");
    out.push_str(&format!("local=/{domain}/\n"));
    out.push_str(&format!("interface={port}\n"));
    out.push_str(&format!("no-dhcp-interface={port}\n"));
    out.push_str("log-queries\n");
    out.push_str("conf-dir=/etc/dnsmasq.d/,*.conf\n");
    out.push_str("EOF\n");
    out.push_str("\n");
    out.push_str(&format!("ip link set {port} up\n"));
    out.push_str(&format!("ip address add {} dev {port}\n", binding.address));
    out.push_str(&format!("ip route add {} via {gateway}\n", config.loopbacks));
    out.push_str(&format!("ip route add {} via {gateway}\n", config.p2pnets));
    out.push_str(&format!("ip route add default via {gateway}\n"));
    out.push_str("\n");
    for (name, address) in records.forward() {
        out.push_str(&format!(
            "echo -e \"{address}\\t{name}.{domain}\" >>/etc/hosts\n"
        ));
    }
    out.push_str("\n");
    out.push_str("cp /etc/resolv.conf /etc/resolv.dnsmasq\n");
    out.push_str("cat <<EOF >/etc/resolv.conf\n");
    out.push_str("nameserver 127.0.0.1\n");
    out.push_str(&format!("search {domain}\n"));
    out.push_str("EOF\n");
    out.push_str("\n");
    out.push_str("# prevent UDHCPC from overwriting resolv.conf\n");
    out.push_str("UDHCPC=/etc/udhcpc\n");
    out.push_str("UDHCPC_CONF=\"$UDHCPC/udhcpc.conf\"\n");
    out.push_str("mkdir -p \"$UDHCPC\"\n");
    out.push_str(&format!("echo \"NO_DNS={port}\" >$UDHCPC_CONF\n"));
    out.push_str("\n");
    out.push_str("service dnsmasq start\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::AddressPool;
    use crate::addressing;
    use crate::config::Config;
    use crate::dns::build_records;
    use crate::topology::{build, Graph, Mode, NodeRole};

    fn addressed_graph() -> Graph {
        let mut graph = build(3, Mode::Simple, 200, 1).unwrap();
        let mut loopbacks = AddressPool::new("10.0.0.0/24".parse().unwrap(), 32).unwrap();
        let mut p2pnets = AddressPool::new("172.16.0.0/24".parse().unwrap(), 30).unwrap();
        addressing::bind(&mut graph, &mut loopbacks, &mut p2pnets).unwrap();
        graph
    }

    #[test]
    fn test_dns_host_script_contents() {
        let graph = addressed_graph();
        let config = Config::default();
        let records = build_records(&graph).unwrap();
        let dns = graph.find_role(NodeRole::DnsHost).unwrap();
        let ctx = RenderContext {
            node: dns,
            config: &config,
            nameserver: graph.nameserver().unwrap(),
            origin: None,
        };
        // the central router's address on the shared /30
        let central = graph.node(graph.central().unwrap());
        let gateway = central
            .interfaces
            .iter()
            .find(|b| b.neighbor == dns.id)
            .unwrap()
            .address
            .addr();

        let text = render_dns_host(&ctx, &records, gateway).unwrap();
        assert!(text.contains("hostname dns-host"));
        assert!(text.contains("apk add dnsmasq"));
        assert!(text.contains(&format!("ip address add {} dev eth0", dns.interfaces[0].address)));
        assert!(text.contains(&format!("ip route add 10.0.0.0/8 via {gateway}")));
        assert!(text.contains(&format!("ip route add default via {gateway}")));
        // one hosts entry per derived record, fully qualified
        for (name, address) in records.forward() {
            assert!(text.contains(&format!("{address}\\t{name}.virl.lab")));
        }
    }

    #[test]
    fn test_unbound_dns_host_is_a_render_error() {
        let graph = build(2, Mode::Simple, 200, 1).unwrap();
        let config = Config::default();
        let records = DnsRecordSet::default();
        let dns = graph.find_role(NodeRole::DnsHost).unwrap();
        let ctx = RenderContext {
            node: dns,
            config: &config,
            nameserver: "172.16.0.10".parse().unwrap(),
            origin: None,
        };
        let err = render_dns_host(&ctx, &records, "172.16.0.9".parse().unwrap());
        assert!(matches!(
            err,
            Err(TopogenError::RenderError {
                field: "interface",
                ..
            })
        ));
    }
}
