//! Durable lab plan artifact.
//!
//! Everything the external provisioner needs to create the lab: per node
//! the role, hostname, rendered configuration text and canvas position; per
//! link the two endpoint interface identifiers to wire together; plus the
//! derived DNS records. Serialized to JSON by the caller.

use std::net::Ipv4Addr;

use serde::Serialize;

use crate::topology::NodeRole;

#[derive(Debug, Serialize)]
pub struct LabPlan {
    pub lab: String,
    pub nodes: Vec<PlanNode>,
    pub links: Vec<PlanLink>,
    pub dns: Vec<PlanRecord>,
}

#[derive(Debug, Serialize)]
pub struct PlanNode {
    pub hostname: String,
    pub role: NodeRole,
    pub x: i64,
    pub y: i64,
    /// Rendered device configuration; empty for the external connector,
    /// which takes no configuration.
    pub configuration: String,
}

#[derive(Debug, Serialize)]
pub struct PlanLink {
    pub a_node: String,
    pub a_interface: String,
    pub b_node: String,
    pub b_interface: String,
}

#[derive(Debug, Serialize)]
pub struct PlanRecord {
    /// Fully qualified record name.
    pub name: String,
    pub address: Ipv4Addr,
}
