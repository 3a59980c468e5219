//! # Topogen - Static topology generator for virtual network labs
//!
//! This library builds synthetic network topologies (node placement, link
//! wiring, IP address numbering and per-node device configuration) ready
//! for provisioning onto a virtual lab platform.
//!
//! ## Overview
//!
//! A run is a single synchronous pipeline over one topology instance:
//!
//! 1. the topology builder constructs an abstract graph of router nodes
//!    plus one DNS host and one external connector, under the `simple`
//!    (chain on a square spiral) or `nx` (clustered random) strategy;
//! 2. the addressing binder carves loopback /32s and point-to-point /30s
//!    out of two configured supernets and attaches them to nodes and edge
//!    endpoints;
//! 3. the DNS record builder derives forward and reverse records for every
//!    bound address;
//! 4. the config renderer produces device configuration text per node from
//!    a named template.
//!
//! Given identical inputs (node count, mode, distance, seed, pools,
//! template) two runs produce byte-identical plans, so generated labs can
//! be diffed across runs.
//!
//! ## Architecture
//!
//! - `config`: YAML configuration (pools, domain, credentials)
//! - `error`: the core error taxonomy
//! - `addr`: sequential address pool carving
//! - `topology`: graph types, layout coordinates, construction strategies
//! - `addressing`: the addressing binder
//! - `dns`: DNS record derivation
//! - `render`: the template registry and per-role templates
//! - `plan`: the durable lab plan artifact
//! - `orchestrator`: ties the pipeline together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use topogen::config::Config;
//! use topogen::orchestrator::{generate_plan, RunOptions};
//! use topogen::topology::Mode;
//!
//! let config = Config::default();
//! let opts = RunOptions {
//!     node_count: 10,
//!     mode: Mode::Simple,
//!     distance: 200,
//!     seed: 1,
//!     template: "iosv".to_string(),
//!     lab_name: "demo lab".to_string(),
//! };
//! let plan = generate_plan(&config, &opts)?;
//! // plan.nodes carries one rendered configuration per node
//! # Ok::<(), topogen::error::TopogenError>(())
//! ```

pub mod addr;
pub mod addressing;
pub mod config;
pub mod dns;
pub mod error;
pub mod orchestrator;
pub mod plan;
pub mod render;
pub mod topology;
