//! IOSv router configuration template.

use super::{literal, require_loopback, RenderContext, Template};
use crate::error::TopogenError;

pub(super) fn render(ctx: &RenderContext) -> Result<String, TopogenError> {
    let loopback = require_loopback(ctx, Template::Iosv)?;
    let node = ctx.node;
    let config = ctx.config;
    let username = literal(&config.username);
    let password = literal(&config.password);

    let mut out = String::new();
    out.push_str(&format!("hostname {}\n", node.hostname));
    out.push_str("!\n");
    out.push_str(&format!("ip domain name {}\n", literal(&config.domainname)));
    out.push_str(&format!("ip name-server {}\n", ctx.nameserver));
    out.push_str("!\n");
    out.push_str(&format!(
        "username {username} privilege 15 secret {password}\n"
    ));
    out.push_str(&format!("enable secret {password}\n"));
    out.push_str("!\n");
    out.push_str("interface Loopback0\n");
    out.push_str(&format!(
        " ip address {} {}\n",
        loopback.addr(),
        loopback.netmask()
    ));
    out.push_str("!\n");
    for binding in &node.interfaces {
        out.push_str(&format!("interface {}\n", node.interface_name(binding.slot)));
        out.push_str(&format!(" description {}\n", binding.description));
        out.push_str(&format!(
            " ip address {} {}\n",
            binding.address.addr(),
            binding.address.netmask()
        ));
        out.push_str(" no shutdown\n");
        out.push_str("!\n");
    }
    out.push_str("router ospf 1\n");
    out.push_str(&format!(" router-id {}\n", loopback.addr()));
    out.push_str(&format!(" network {} 0.0.0.0 area 0\n", loopback.addr()));
    for binding in &node.interfaces {
        out.push_str(&format!(
            " network {} {} area 0\n",
            binding.address.network(),
            binding.address.hostmask()
        ));
    }
    if ctx.origin.is_some() {
        out.push_str(" default-information originate\n");
    }
    out.push_str("!\n");
    if let Some(via) = ctx.origin {
        out.push_str(&format!("ip route 0.0.0.0 0.0.0.0 {via}\n"));
        out.push_str("!\n");
    }
    out.push_str("line vty 0 4\n");
    out.push_str(" login local\n");
    out.push_str(" transport input ssh\n");
    out.push_str("!\n");
    out.push_str("end\n");
    Ok(out)
}
