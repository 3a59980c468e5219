//! Configuration rendering.
//!
//! Templates form a closed, enumerable registry keyed by name. Rendering
//! substitutes the fields of a [`RenderContext`] and returns plain text;
//! syntax correctness of the target device's configuration language is the
//! template author's responsibility, and writing the text anywhere is the
//! caller's.

pub mod dnshost;
mod frr;
mod iosv;

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::config::Config;
use crate::error::TopogenError;
use crate::topology::Node;

pub use dnshost::render_dns_host;

/// The immutable bundle handed to a template.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub node: &'a Node,
    pub config: &'a Config,
    /// Address of the lab's DNS server, the dns-host's bound address.
    pub nameserver: Ipv4Addr,
    /// External next hop; set only on the default-route origin.
    pub origin: Option<Ipv4Addr>,
}

/// Router configuration templates, a closed registry keyed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Iosv,
    Frr,
}

impl Template {
    /// Look up a template by name.
    pub fn lookup(name: &str) -> Result<Template, TopogenError> {
        match name {
            "iosv" => Ok(Template::Iosv),
            "frr" => Ok(Template::Frr),
            other => Err(TopogenError::TemplateNotFound(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Template::Iosv => "iosv",
            Template::Frr => "frr",
        }
    }

    /// Render a router configuration.
    pub fn render(self, ctx: &RenderContext) -> Result<String, TopogenError> {
        match self {
            Template::Iosv => iosv::render(ctx),
            Template::Frr => frr::render(ctx),
        }
    }
}

/// All registered template names, for `--list-templates`.
pub fn template_names() -> &'static [&'static str] {
    &["iosv", "frr"]
}

/// Credentials are substituted into configuration text verbatim; strip
/// control characters so a crafted value cannot inject extra lines.
pub(crate) fn literal(value: &str) -> String {
    value.chars().filter(|c| !c.is_control()).collect()
}

/// A router template without a bound loopback cannot be rendered.
fn require_loopback(ctx: &RenderContext, template: Template) -> Result<Ipv4Net, TopogenError> {
    ctx.node.loopback.ok_or_else(|| TopogenError::RenderError {
        template: template.name().to_string(),
        hostname: ctx.node.hostname.clone(),
        field: "loopback",
    })
}
