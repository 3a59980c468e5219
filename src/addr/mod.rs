//! Address pool allocation.
//!
//! This module carves configured supernets into fixed-size sub-blocks for
//! router loopbacks and point-to-point links.

pub mod pool;

pub use pool::AddressPool;
