//! Link-health monitor.
//!
//! Owns the `commands_allowed` decision on behalf of the network layer.
//! A freshly (re)connected link has to stay up for the settle time before
//! external commands are accepted; losing it blocks commands at once and
//! the orchestrator halts automatic motion.
//!
//! ```text
//!   Down ──connect──▶ Settling ──settle_ms──▶ Up
//!    ▲                   │                    │
//!    └───────disconnect──┴────────────────────┘
//! ```

use log::{info, warn};

/// Gating change the orchestrator has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTransition {
    /// Link dropped: block commands, stop automatic motion.
    Lost,
    /// Link stayed up for the settle time: allow commands.
    Settled,
}

#[derive(Debug)]
pub struct LinkMonitor {
    settle_ms: u64,
    connected: bool,
    settle_deadline_ms: Option<u64>,
}

impl LinkMonitor {
    pub fn new(settle_ms: u32) -> Self {
        Self {
            settle_ms: u64::from(settle_ms),
            connected: false,
            settle_deadline_ms: None,
        }
    }

    pub fn set_settle_ms(&mut self, settle_ms: u32) {
        self.settle_ms = u64::from(settle_ms);
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// True while waiting out the settle time after a reconnect.
    pub fn is_settling(&self) -> bool {
        self.settle_deadline_ms.is_some()
    }

    /// Record the current link state.
    pub fn observe(&mut self, connected: bool, now_ms: u64) -> Option<LinkTransition> {
        match (self.connected, connected) {
            (true, false) => {
                self.connected = false;
                self.settle_deadline_ms = None;
                warn!("Link lost - commands blocked");
                Some(LinkTransition::Lost)
            }
            (false, true) => {
                self.connected = true;
                self.settle_deadline_ms = Some(now_ms.saturating_add(self.settle_ms));
                info!("Link up - accepting commands in {} ms", self.settle_ms);
                self.poll(now_ms)
            }
            _ => self.poll(now_ms),
        }
    }

    /// Check the settle deadline without a new link event.
    pub fn poll(&mut self, now_ms: u64) -> Option<LinkTransition> {
        match self.settle_deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.settle_deadline_ms = None;
                info!("Link settled - commands allowed");
                Some(LinkTransition::Settled)
            }
            _ => None,
        }
    }
}
