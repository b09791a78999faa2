//! Per-call ambient flags for a transfer authorization.
//!
//! The transaction boundary builds one `RequestContext` per send and hands it
//! to the engine explicitly; nothing is read from global state.

use serde::{Deserialize, Serialize};

use crate::{Address, RestrictionConfig};

/// Ambient request state for one authorization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Internally originated system transfer; skips per-denom checks.
    pub bypass_active: bool,
    /// A fee grant whose legitimacy was established elsewhere is paying fees.
    pub fee_grant_in_use: bool,
    /// Admin addresses acting on behalf of the sender, in order, no duplicates.
    pub transfer_agents: Vec<Address>,
    /// The system's own module accounts.
    pub module_addrs: Vec<Address>,
    pub fee_collector_addr: Address,
}

impl RequestContext {
    #[must_use]
    pub fn new(module_addrs: Vec<Address>, fee_collector_addr: Address) -> Self {
        Self {
            bypass_active: false,
            fee_grant_in_use: false,
            transfer_agents: Vec::new(),
            module_addrs,
            fee_collector_addr,
        }
    }

    /// Module and fee collector addresses taken from `cfg`.
    #[must_use]
    pub fn from_config(cfg: &RestrictionConfig) -> Self {
        Self::new(cfg.module_addrs(), cfg.fee_collector_addr.clone())
    }

    #[must_use]
    pub fn with_bypass(mut self) -> Self {
        self.bypass_active = true;
        self
    }

    #[must_use]
    pub fn with_fee_grant_in_use(mut self) -> Self {
        self.fee_grant_in_use = true;
        self
    }

    /// Add a transfer agent. Re-adding an existing agent keeps its position.
    #[must_use]
    pub fn with_transfer_agent(mut self, agent: Address) -> Self {
        if !self.transfer_agents.contains(&agent) {
            self.transfer_agents.push(agent);
        }
        self
    }

    #[must_use]
    pub fn has_transfer_agents(&self) -> bool {
        !self.transfer_agents.is_empty()
    }

    #[must_use]
    pub fn is_module_addr(&self, addr: &Address) -> bool {
        self.module_addrs.contains(addr)
    }

    #[must_use]
    pub fn is_fee_collector(&self, addr: &Address) -> bool {
        &self.fee_collector_addr == addr
    }
}
