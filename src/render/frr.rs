//! FRR router configuration template, for Linux-container router nodes.

use super::{literal, require_loopback, RenderContext, Template};
use crate::error::TopogenError;

pub(super) fn render(ctx: &RenderContext) -> Result<String, TopogenError> {
    let loopback = require_loopback(ctx, Template::Frr)?;
    let node = ctx.node;
    let config = ctx.config;
    let password = literal(&config.password);

    let mut out = String::new();
    out.push_str("frr defaults traditional\n");
    out.push_str(&format!("hostname {}\n", node.hostname));
    out.push_str(&format!("domainname {}\n", literal(&config.domainname)));
    out.push_str(&format!("password {password}\n"));
    out.push_str(&format!("enable password {password}\n"));
    out.push_str("!\n");
    out.push_str("interface lo\n");
    out.push_str(&format!(" ip address {}\n", loopback));
    out.push_str("!\n");
    // container router nodes expose plain ethN ports
    for binding in &node.interfaces {
        out.push_str(&format!("interface eth{}\n", binding.slot));
        out.push_str(&format!(" description {}\n", binding.description));
        out.push_str(&format!(" ip address {}\n", binding.address));
        out.push_str("!\n");
    }
    out.push_str("router ospf\n");
    out.push_str(&format!(" ospf router-id {}\n", loopback.addr()));
    out.push_str(&format!(" network {} area 0\n", loopback));
    for binding in &node.interfaces {
        out.push_str(&format!(
            " network {}/{} area 0\n",
            binding.address.network(),
            binding.address.prefix_len()
        ));
    }
    if ctx.origin.is_some() {
        out.push_str(" default-information originate\n");
    }
    out.push_str("!\n");
    if let Some(via) = ctx.origin {
        out.push_str(&format!("ip route 0.0.0.0/0 {via}\n"));
        out.push_str("!\n");
    }
    out.push_str("line vty\n");
    Ok(out)
}
