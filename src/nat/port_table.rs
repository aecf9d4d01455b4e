//! Port-keyed NAT table
//!
//! One translation slot exists per port in the configured range, created at
//! construction. Slots cycle between a free pool and the active registry;
//! reclamation sweeps idle slots back into the pool.

use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use crate::{Error, Result};

use super::Origin;

/// A translation slot. The translated port is fixed for the slot's
/// lifetime; the origin fields are meaningful only while the slot is bound.
#[derive(Debug, Clone)]
struct NatEntry {
    translated_port: u16,
    origin_addr: IpAddr,
    origin_port: u16,
    endpoint: SocketAddr,
    last_used: Instant,
}

/// Port-keyed NAT table.
///
/// All slots live in an arena; `pool` and `active` hold disjoint arena
/// indices, so a slot is always in exactly one of the two queues.
/// Allocation takes the pool head and reclamation appends to the pool tail,
/// rotating ports FIFO across reuse cycles instead of hammering the lowest
/// numbers.
#[derive(Debug)]
pub struct PortNatTable {
    entries: Vec<NatEntry>,
    /// Free slots, oldest first.
    pool: VecDeque<usize>,
    /// Bound slots in binding order.
    active: VecDeque<usize>,
}

impl PortNatTable {
    /// Builds a table with one slot per port in the inclusive range
    /// `start..=end`.
    pub fn new(start: u16, end: u16) -> Result<Self> {
        if start == 0 || start > end {
            return Err(Error::InvalidPortRange { start, end });
        }

        let unset = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);
        let now = Instant::now();
        let entries: Vec<NatEntry> = (start..=end)
            .map(|port| NatEntry {
                translated_port: port,
                origin_addr: unset.ip(),
                origin_port: 0,
                endpoint: unset,
                last_used: now,
            })
            .collect();
        let pool = (0..entries.len()).collect();

        Ok(Self {
            entries,
            pool,
            active: VecDeque::new(),
        })
    }

    /// Number of free translated ports.
    pub fn available(&self) -> usize {
        self.pool.len()
    }

    /// Number of bound translated ports.
    pub fn active(&self) -> usize {
        self.active.len()
    }

    /// Total number of translation slots.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Binds `(origin_addr, origin_port)` to a translated port, reusing the
    /// existing binding if one is active. The destination endpoint is
    /// re-stamped on every call, so a flow keeps its translated port while
    /// it stays active, whatever it talks to.
    pub fn bind(
        &mut self,
        origin_addr: IpAddr,
        origin_port: u16,
        endpoint: SocketAddr,
    ) -> Result<u16> {
        let idx = match self.lookup_origin(origin_addr, origin_port) {
            Some(idx) => idx,
            None => {
                let idx = self.pool.pop_front().ok_or(Error::PortsExhausted)?;
                self.entries[idx].origin_addr = origin_addr;
                self.entries[idx].origin_port = origin_port;
                self.active.push_back(idx);
                idx
            }
        };

        let entry = &mut self.entries[idx];
        entry.endpoint = endpoint;
        entry.last_used = Instant::now();
        Ok(entry.translated_port)
    }

    /// Resolves a translated port back to its origin. Misses are expected
    /// for expired or never-allocated ports. Recency is not refreshed here;
    /// only outbound traffic keeps a binding alive.
    pub fn lookup(&self, translated_port: u16) -> Option<Origin> {
        self.active.iter().find_map(|&idx| {
            let entry = &self.entries[idx];
            (entry.translated_port == translated_port).then_some(Origin {
                endpoint: entry.endpoint,
                addr: entry.origin_addr,
                port: entry.origin_port,
            })
        })
    }

    /// Sweeps the registry once, returning every slot idle for at least
    /// `idle` to the pool. The sweep visits slots in binding order and
    /// takes every qualifying slot in the same pass. Returns the number of
    /// slots reclaimed.
    pub fn reclaim(&mut self, idle: Duration) -> usize {
        let now = Instant::now();
        let before = self.active.len();

        let mut kept = VecDeque::with_capacity(before);
        for idx in self.active.drain(..) {
            if now.duration_since(self.entries[idx].last_used) >= idle {
                self.pool.push_back(idx);
            } else {
                kept.push_back(idx);
            }
        }
        self.active = kept;

        before - self.active.len()
    }

    fn lookup_origin(&self, origin_addr: IpAddr, origin_port: u16) -> Option<usize> {
        self.active.iter().copied().find(|&idx| {
            let entry = &self.entries[idx];
            entry.origin_addr == origin_addr && entry.origin_port == origin_port
        })
    }
}
