//! Network topology construction.
//!
//! This module contains the abstract graph types, the layout coordinate
//! generators and the two graph construction strategies (`simple`, `nx`).

pub mod builder;
pub mod coords;
pub mod types;

// Re-export key types and functions for easier access
pub use builder::{build, Mode};
pub use coords::CoordsGenerator;
pub use types::{
    DefaultRoute, Edge, Graph, InterfaceBinding, Node, NodeId, NodeRole, Point, DNS_HOST_NAME,
    EXT_CONN_NAME,
};
