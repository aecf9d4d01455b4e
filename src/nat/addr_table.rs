//! Address-keyed NAT table
//!
//! For traffic classes where only the destination address distinguishes
//! flows. One binding per translated address, overwritten on rebind; no
//! pooling and no aging.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use super::Origin;

/// Address-keyed NAT table, keyed by the translated/destination address.
#[derive(Debug, Default)]
pub struct AddrNatTable {
    bindings: HashMap<IpAddr, Origin>,
}

impl AddrNatTable {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Records `origin_addr` as the origin behind `endpoint`, keyed by the
    /// endpoint's address. Rebinding the same address overwrites.
    pub fn bind(&mut self, origin_addr: IpAddr, endpoint: SocketAddr) {
        self.bindings.insert(
            endpoint.ip(),
            Origin {
                endpoint,
                addr: origin_addr,
                port: 0,
            },
        );
    }

    /// Looks up the origin recorded for a destination address.
    pub fn resolve(&self, dst_addr: &IpAddr) -> Option<Origin> {
        self.bindings.get(dst_addr).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
