//! Pipeline orchestration.
//!
//! Coordinates the run: build the graph, bind addressing, derive DNS
//! records, render per-node configurations and assemble the lab plan. The
//! pipeline is synchronous and all-or-nothing: any failure discards the
//! whole in-memory topology, so nothing partially provisioned ever leaves
//! this module.

use std::net::Ipv4Addr;

use log::info;

use crate::addr::AddressPool;
use crate::addressing;
use crate::config::Config;
use crate::dns::{self, DnsRecordSet};
use crate::error::TopogenError;
use crate::plan::{LabPlan, PlanLink, PlanNode, PlanRecord};
use crate::render::{render_dns_host, RenderContext, Template};
use crate::topology::{self, Graph, Mode, Node, NodeRole, DNS_HOST_NAME};

/// Loopbacks are /32s carved from the loopback supernet.
const LOOPBACK_PREFIX_LEN: u8 = 32;
/// Point-to-point links take a /30 each: two hosts, network, broadcast.
const P2P_PREFIX_LEN: u8 = 30;

/// Per-run options, resolved by the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub node_count: usize,
    pub mode: Mode,
    pub distance: i64,
    pub seed: u64,
    pub template: String,
    pub lab_name: String,
}

/// Run the whole pipeline and return the lab plan.
pub fn generate_plan(config: &Config, opts: &RunOptions) -> Result<LabPlan, TopogenError> {
    // resolve the template up front so a typo fails before any work is done
    let template = Template::lookup(&opts.template)?;

    let mut graph = topology::build(opts.node_count, opts.mode, opts.distance, opts.seed)?;
    info!(
        "Topology built: {} nodes, {} links ({} mode)",
        graph.node_count(),
        graph.edge_count(),
        opts.mode
    );

    let mut loopbacks = AddressPool::new(config.loopbacks, LOOPBACK_PREFIX_LEN)?;
    let mut p2pnets = AddressPool::new(config.p2pnets, P2P_PREFIX_LEN)?;
    addressing::bind(&mut graph, &mut loopbacks, &mut p2pnets)?;
    info!("Addressing bound, {} p2p blocks left", p2pnets.remaining());

    let records = dns::build_records(&graph)?;
    info!("Derived {} DNS records", records.len());

    let nameserver = graph.nameserver().ok_or_else(|| TopogenError::RenderError {
        template: DNS_HOST_NAME.to_string(),
        hostname: DNS_HOST_NAME.to_string(),
        field: "nameserver",
    })?;

    let total = graph.node_count();
    let mut nodes = Vec::with_capacity(total);
    for (done, node) in graph.nodes().iter().enumerate() {
        let ctx = RenderContext {
            node,
            config,
            nameserver,
            origin: graph
                .origin()
                .filter(|origin| origin.node == node.id)
                .map(|origin| origin.via),
        };
        let configuration = match node.role {
            NodeRole::Router => template.render(&ctx)?,
            NodeRole::DnsHost => render_dns_host(&ctx, &records, link_gateway(&graph, node)?)?,
            // the external connector takes no configuration
            NodeRole::ExternalConnector => String::new(),
        };
        info!("Config created for {} ({}/{})", node.hostname, done + 1, total);
        nodes.push(PlanNode {
            hostname: node.hostname.clone(),
            role: node.role,
            x: node.position.x,
            y: node.position.y,
            configuration,
        });
    }

    let links = graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let (a_slot, b_slot) = edge.slots?;
            Some(PlanLink {
                a_node: graph.node(edge.a).hostname.clone(),
                a_interface: graph.node(edge.a).interface_name(a_slot),
                b_node: graph.node(edge.b).hostname.clone(),
                b_interface: graph.node(edge.b).interface_name(b_slot),
            })
        })
        .collect();

    let dns = plan_records(&records, config);

    Ok(LabPlan {
        lab: opts.lab_name.clone(),
        nodes,
        links,
        dns,
    })
}

/// The peer address on a single-homed node's link: for the dns-host this
/// is the central router's address on the shared /30.
fn link_gateway(graph: &Graph, node: &Node) -> Result<Ipv4Addr, TopogenError> {
    node.interfaces
        .first()
        .and_then(|binding| {
            graph
                .node(binding.neighbor)
                .interfaces
                .iter()
                .find(|peer| peer.neighbor == node.id)
                .map(|peer| peer.address.addr())
        })
        .ok_or_else(|| TopogenError::RenderError {
            template: DNS_HOST_NAME.to_string(),
            hostname: node.hostname.clone(),
            field: "gateway",
        })
}

/// Fully qualified DNS records in name order.
fn plan_records(records: &DnsRecordSet, config: &Config) -> Vec<PlanRecord> {
    records
        .forward()
        .map(|(name, address)| PlanRecord {
            name: format!("{}.{}", name, config.domainname),
            address,
        })
        .collect()
}
