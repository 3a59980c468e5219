//! Error taxonomy for the topology-and-addressing core.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use thiserror::Error;

/// Errors raised by the core pipeline.
///
/// Every variant is fatal to the current run. A half-addressed topology has
/// no valid interpretation, so callers abort before anything is written.
#[derive(Debug, Error)]
pub enum TopogenError {
    #[error("invalid node count {0}, need at least 1")]
    InvalidNodeCount(usize),

    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    #[error("pool exhausted: no free /{prefix_len} left in {supernet}")]
    PoolExhausted { supernet: Ipv4Net, prefix_len: u8 },

    #[error("allocation prefix /{prefix_len} does not fit supernet {supernet}")]
    InvalidPool { supernet: Ipv4Net, prefix_len: u8 },

    #[error("DNS name collision: {name} -> {address} clashes with an existing record")]
    DnsNameCollision { name: String, address: Ipv4Addr },

    #[error("template does not exist: {0}")]
    TemplateNotFound(String),

    #[error("cannot render {template} for {hostname}: missing {field}")]
    RenderError {
        template: String,
        hostname: String,
        field: &'static str,
    },
}
