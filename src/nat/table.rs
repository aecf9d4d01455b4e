//! NAT table façade
//!
//! Composes the port-keyed and address-keyed disciplines behind one surface
//! and owns the reclamation policy that keeps the port pool populated.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::telemetry::NatMetrics;
use crate::{Error, Result};

use super::{AddrNatTable, Origin, PortNatTable};

/// Idle threshold applied when an allocation finds the pool empty.
pub const DEFAULT_RECLAIM_IDLE: Duration = Duration::from_secs(75);

/// Reclamation tuning.
#[derive(Debug, Clone)]
pub struct NatTimeouts {
    /// How long a binding must sit idle before a pressure sweep takes its
    /// port back (default: 75 seconds).
    pub reclaim_idle: Duration,
}

impl Default for NatTimeouts {
    fn default() -> Self {
        Self {
            reclaim_idle: DEFAULT_RECLAIM_IDLE,
        }
    }
}

/// NAT table for a gateway.
///
/// Maps internal source endpoints to translated ports, records per-address
/// origins, and resolves translated replies back to where they came from.
/// All mutation goes through `&mut self`; callers that share the table
/// across threads put it behind their own lock.
#[derive(Debug)]
pub struct NatTable {
    ports: PortNatTable,
    addrs: AddrNatTable,
    timeouts: NatTimeouts,
    metrics: Arc<NatMetrics>,
}

impl NatTable {
    /// Builds a table over the inclusive translated-port range
    /// `start..=end`, one slot per port.
    pub fn new(start: u16, end: u16) -> Result<Self> {
        Self::with_timeouts(start, end, NatTimeouts::default())
    }

    /// As [`NatTable::new`], with explicit reclamation tuning.
    pub fn with_timeouts(start: u16, end: u16, timeouts: NatTimeouts) -> Result<Self> {
        Ok(Self {
            ports: PortNatTable::new(start, end)?,
            addrs: AddrNatTable::new(),
            timeouts,
            metrics: Arc::new(NatMetrics::new()),
        })
    }

    /// Maps `(origin_addr, origin_port)` to a translated source port for
    /// traffic headed to `endpoint`.
    ///
    /// An origin keeps its translated port across destinations while its
    /// binding stays active; the recorded destination follows the latest
    /// call. When the pool is empty a sweep with the configured idle
    /// threshold runs first; if that frees nothing the caller gets
    /// [`Error::PortsExhausted`] and picks between backoff and drop.
    pub fn translate_outbound(
        &mut self,
        origin_addr: IpAddr,
        origin_port: u16,
        endpoint: SocketAddr,
    ) -> Result<u16> {
        if self.ports.available() == 0 {
            let freed = self.ports.reclaim(self.timeouts.reclaim_idle);
            self.metrics.reclaimed_entries.add(freed as u64);
            debug!("port pool empty, pressure sweep reclaimed {} bindings", freed);

            if self.ports.available() == 0 {
                self.metrics.exhaustion_events.inc();
                warn!(
                    "translated port pool exhausted, {} bindings active",
                    self.ports.active()
                );
                return Err(Error::PortsExhausted);
            }
        }

        let port = self.ports.bind(origin_addr, origin_port, endpoint)?;
        self.metrics.outbound_translations.inc();
        self.update_gauges();
        Ok(port)
    }

    /// Resolves an inbound packet's destination port back to its origin.
    /// `None` for stale, spoofed or never-allocated ports is expected, not
    /// an error.
    pub fn translate_inbound(&self, translated_port: u16) -> Option<Origin> {
        let origin = self.ports.lookup(translated_port);
        match origin {
            Some(_) => self.metrics.inbound_hits.inc(),
            None => self.metrics.inbound_misses.inc(),
        }
        origin
    }

    /// Records `origin_addr` as the origin behind `endpoint`'s address.
    /// No port is allocated; the two disciplines share no state.
    pub fn bind_address(&mut self, origin_addr: IpAddr, endpoint: SocketAddr) {
        self.addrs.bind(origin_addr, endpoint);
        self.metrics.address_bindings.inc();
    }

    /// Resolves a destination address to its recorded origin.
    pub fn resolve_address(&self, dst_addr: &IpAddr) -> Option<Origin> {
        self.addrs.resolve(dst_addr)
    }

    /// Returns bindings idle for at least `idle` to the pool, oldest-bound
    /// first. Exposed so the surrounding system can sweep periodically;
    /// allocation pressure triggers its own sweep either way.
    pub fn reclaim(&mut self, idle: Duration) -> usize {
        let freed = self.ports.reclaim(idle);
        self.metrics.reclaimed_entries.add(freed as u64);
        self.update_gauges();
        freed
    }

    /// Unconditionally returns every active binding to the pool. The
    /// shutdown path calls this before dropping the table.
    pub fn drain(&mut self) -> usize {
        self.reclaim(Duration::ZERO)
    }

    /// Number of free translated ports.
    pub fn available_ports(&self) -> usize {
        self.ports.available()
    }

    /// Number of active port bindings.
    pub fn active_mappings(&self) -> usize {
        self.ports.active()
    }

    /// Number of address-discipline bindings.
    pub fn address_bindings(&self) -> usize {
        self.addrs.len()
    }

    /// Shared metrics handle; safe to read from other threads.
    pub fn metrics(&self) -> &Arc<NatMetrics> {
        &self.metrics
    }

    fn update_gauges(&self) {
        self.metrics.set_active_mappings(self.ports.active());
        self.metrics.set_available_ports(self.ports.available());
    }
}
