//! Sequential address pool carving.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::error::TopogenError;

/// Carves fixed-size sub-blocks out of a configured supernet.
///
/// Allocation is strictly sequential over the supernet's address space,
/// first free block by ascending numeric order, so two runs with the same
/// pool configuration and request count hand out identical blocks.
///
/// A pool knows nothing about its siblings: two pools carved from
/// overlapping supernets will happily hand out overlapping blocks. Keeping
/// the configured supernets disjoint is the configuration's job.
#[derive(Debug, Clone)]
pub struct AddressPool {
    supernet: Ipv4Net,
    prefix_len: u8,
    next: u64,
    end: u64,
}

impl AddressPool {
    /// Create a pool handing out /`prefix_len` blocks from `supernet`.
    pub fn new(supernet: Ipv4Net, prefix_len: u8) -> Result<Self, TopogenError> {
        if prefix_len > 32 || prefix_len < supernet.prefix_len() {
            return Err(TopogenError::InvalidPool {
                supernet,
                prefix_len,
            });
        }
        let end = 1u64 << (prefix_len - supernet.prefix_len());
        // Host-granularity pools never hand out the supernet's own network
        // address, so the first /32 carved from 10.0.0.0/24 is 10.0.0.1.
        let next = if prefix_len == 32 && supernet.prefix_len() < 32 {
            1
        } else {
            0
        };
        Ok(AddressPool {
            supernet,
            prefix_len,
            next,
            end,
        })
    }

    /// The supernet this pool carves from.
    pub fn supernet(&self) -> Ipv4Net {
        self.supernet
    }

    /// Prefix length of the blocks this pool hands out.
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Number of blocks still available.
    pub fn remaining(&self) -> u64 {
        self.end - self.next
    }

    /// Return the next unused sub-block of the pool.
    pub fn allocate(&mut self) -> Result<Ipv4Net, TopogenError> {
        if self.next >= self.end {
            return Err(TopogenError::PoolExhausted {
                supernet: self.supernet,
                prefix_len: self.prefix_len,
            });
        }
        let block_size = 1u64 << (32 - self.prefix_len);
        let base = u64::from(u32::from(self.supernet.network()));
        let addr = Ipv4Addr::from((base + self.next * block_size) as u32);
        self.next += 1;
        Ipv4Net::new(addr, self.prefix_len).map_err(|_| TopogenError::InvalidPool {
            supernet: self.supernet,
            prefix_len: self.prefix_len,
        })
    }
}
