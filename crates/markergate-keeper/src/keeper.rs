//! In-memory marker keeper.
//!
//! Owns marker records, send-deny lists, and held attributes, and is the
//! caller that serializes every mutation: it checks the signer's authority,
//! applies the change to a copy, runs full marker validation, and only then
//! commits. A failed operation leaves state untouched.

use std::collections::{HashMap, HashSet};

use markergate_restrictions::{
    AttributeStore, DenyListStore, MarkerRegistry, TransferAuthorizer, add_required,
    normalize_required, remove_required,
};
use markergate_types::{
    Access, AccessGrant, Address, Coin, MarkerAccount, MarkerError, MarkerStatus,
    RequestContext, RestrictionConfig, Result, marker_address, validate_amount,
};
use rust_decimal::Decimal;

use crate::DefaultNameNormalizer;

/// Marker state plus the deny-list and attribute stores the authorizer reads.
pub struct MarkerKeeper {
    /// Markers keyed by their derived address.
    markers: HashMap<Address, MarkerAccount>,
    /// Marker address → addresses denied from sending its denom.
    deny_lists: HashMap<Address, HashSet<Address>>,
    /// Account address → attribute names it holds.
    attributes: HashMap<Address, Vec<String>>,
    normalizer: DefaultNameNormalizer,
    config: RestrictionConfig,
}

/// Pre-active markers accept their manager; otherwise `signer` needs `role`.
fn check_signer(marker: &MarkerAccount, signer: &Address, role: Access) -> Result<()> {
    if marker.status < MarkerStatus::Active && marker.manager.as_ref() == Some(signer) {
        return Ok(());
    }
    marker.validate_has_role(signer, role)
}

fn require_restricted(marker: &MarkerAccount) -> Result<()> {
    if marker.is_restricted() {
        Ok(())
    } else {
        Err(MarkerError::NotRestricted(marker.denom.clone()))
    }
}

impl MarkerKeeper {
    /// Create a keeper with the given configuration.
    pub fn new(config: RestrictionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            markers: HashMap::new(),
            deny_lists: HashMap::new(),
            attributes: HashMap::new(),
            normalizer: DefaultNameNormalizer::new(config.name_rules),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RestrictionConfig {
        &self.config
    }

    /// A fresh request context seeded with this keeper's system addresses.
    #[must_use]
    pub fn request_context(&self) -> RequestContext {
        RequestContext::from_config(&self.config)
    }

    /// Snapshot of the marker for `denom`.
    pub fn marker(&self, denom: &str) -> Result<MarkerAccount> {
        self.get_marker_by_denom(denom)?
            .ok_or_else(|| MarkerError::MarkerNotFound(denom.to_string()))
    }

    /// Number of markers held.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    // -- Creation & lifecycle -------------------------------------------

    /// Store a new marker after full validation.
    pub fn add_marker(&mut self, marker: MarkerAccount) -> Result<()> {
        if self.markers.contains_key(&marker.address) {
            return Err(MarkerError::MarkerAlreadyExists(marker.denom));
        }
        if !marker.required_attributes.is_empty() {
            require_restricted(&marker)?;
        }
        marker.validate()?;
        tracing::info!(
            denom = %marker.denom,
            status = %marker.status,
            marker_type = %marker.marker_type,
            "Marker added"
        );
        self.markers.insert(marker.address.clone(), marker);
        Ok(())
    }

    /// Apply `f` to a copy of the marker, validate, then commit.
    fn update_marker<F>(&mut self, denom: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut MarkerAccount) -> Result<()>,
    {
        let addr = marker_address(denom)?;
        let mut marker = self
            .markers
            .get(&addr)
            .cloned()
            .ok_or_else(|| MarkerError::MarkerNotFound(denom.to_string()))?;
        f(&mut marker)?;
        marker.validate()?;
        self.markers.insert(addr, marker);
        Ok(())
    }

    fn transition(
        &mut self,
        denom: &str,
        signer: &Address,
        target: MarkerStatus,
        role: Access,
    ) -> Result<()> {
        let mut from = MarkerStatus::Undefined;
        self.update_marker(denom, |m| {
            check_signer(m, signer, role)?;
            if !m.status.can_transition_to(target) {
                return Err(MarkerError::InvalidStatusTransition {
                    denom: m.denom.clone(),
                    from: m.status,
                    to: target,
                });
            }
            if target == MarkerStatus::Destroyed && !m.supply.is_zero() {
                return Err(MarkerError::MarkerInvariantViolation {
                    denom: m.denom.clone(),
                    reason: format!("cannot destroy marker with remaining supply {}", m.supply),
                });
            }
            from = m.status;
            m.set_status(target)
        })?;
        tracing::info!(denom, signer = %signer, %from, to = %target, "Marker status changed");
        Ok(())
    }

    /// PROPOSED → FINALIZED. Manager or ADMIN.
    pub fn finalize(&mut self, denom: &str, signer: &Address) -> Result<()> {
        self.transition(denom, signer, MarkerStatus::Finalized, Access::Admin)
    }

    /// FINALIZED → ACTIVE. Manager or ADMIN. Clears the manager.
    pub fn activate(&mut self, denom: &str, signer: &Address) -> Result<()> {
        self.transition(denom, signer, MarkerStatus::Active, Access::Admin)
    }

    /// → CANCELLED. Manager (pre-active) or DELETE.
    pub fn cancel(&mut self, denom: &str, signer: &Address) -> Result<()> {
        self.transition(denom, signer, MarkerStatus::Cancelled, Access::Delete)
    }

    /// CANCELLED → DESTROYED. DELETE, and only once supply is zero.
    pub fn destroy(&mut self, denom: &str, signer: &Address) -> Result<()> {
        self.transition(denom, signer, MarkerStatus::Destroyed, Access::Delete)
    }

    // -- Access control -------------------------------------------------

    /// Grant roles. Manager (pre-active) or ADMIN.
    pub fn grant_access(&mut self, denom: &str, signer: &Address, grant: AccessGrant) -> Result<()> {
        let who = grant.address.clone();
        let roles = grant.roles_display();
        self.update_marker(denom, |m| {
            check_signer(m, signer, Access::Admin)?;
            m.grant_access(grant)
        })?;
        tracing::info!(denom, signer = %signer, grantee = %who, roles = %roles, "Access granted");
        Ok(())
    }

    /// Revoke every role of `address`. Manager (pre-active) or ADMIN.
    pub fn revoke_access(&mut self, denom: &str, signer: &Address, address: &Address) -> Result<()> {
        self.update_marker(denom, |m| {
            check_signer(m, signer, Access::Admin)?;
            m.revoke_access(address)
        })?;
        tracing::info!(denom, signer = %signer, address = %address, "Access revoked");
        Ok(())
    }

    // -- Supply ---------------------------------------------------------

    /// Increase supply. Needs MINT; not allowed once cancelled.
    pub fn mint(&mut self, denom: &str, signer: &Address, amount: Decimal) -> Result<()> {
        validate_amount(amount)?;
        self.update_marker(denom, |m| {
            m.validate_has_role(signer, Access::Mint)?;
            if m.status > MarkerStatus::Active {
                return Err(MarkerError::MarkerNotActive {
                    denom: m.denom.clone(),
                    marker: m.address.clone(),
                    status: m.status,
                });
            }
            let supply = m
                .supply
                .checked_add(amount)
                .ok_or_else(|| MarkerError::SupplyOverflow {
                    denom: m.denom.clone(),
                    amount,
                    supply: m.supply,
                })?;
            m.set_supply(&Coin::new(m.denom.clone(), supply))
        })?;
        tracing::info!(denom, signer = %signer, %amount, "Supply minted");
        Ok(())
    }

    /// Decrease supply. Needs BURN; supply never goes below zero.
    pub fn burn(&mut self, denom: &str, signer: &Address, amount: Decimal) -> Result<()> {
        validate_amount(amount)?;
        self.update_marker(denom, |m| {
            m.validate_has_role(signer, Access::Burn)?;
            if m.supply < amount {
                return Err(MarkerError::InsufficientSupply {
                    denom: m.denom.clone(),
                    needed: amount,
                    available: m.supply,
                });
            }
            let total = Coin::new(m.denom.clone(), m.supply - amount);
            m.set_supply(&total)
        })?;
        tracing::info!(denom, signer = %signer, %amount, "Supply burned");
        Ok(())
    }

    // -- Required attributes --------------------------------------------

    /// Normalize and append required attributes. Restricted markers, TRANSFER.
    pub fn add_required_attributes(
        &mut self,
        denom: &str,
        signer: &Address,
        to_add: &[String],
    ) -> Result<()> {
        self.update_required_attributes(denom, signer, &[], to_add)
    }

    /// Remove required attributes. Restricted markers, TRANSFER.
    pub fn remove_required_attributes(
        &mut self,
        denom: &str,
        signer: &Address,
        to_remove: &[String],
    ) -> Result<()> {
        self.update_required_attributes(denom, signer, to_remove, &[])
    }

    /// Remove then add, atomically. Both lists are normalized first.
    pub fn update_required_attributes(
        &mut self,
        denom: &str,
        signer: &Address,
        to_remove: &[String],
        to_add: &[String],
    ) -> Result<()> {
        let max = self.config.max_required_attribute_length;
        let to_remove = normalize_required(to_remove, max, &self.normalizer)?;
        let to_add = normalize_required(to_add, max, &self.normalizer)?;
        self.update_marker(denom, |m| {
            require_restricted(m)?;
            m.validate_has_role(signer, Access::Transfer)?;
            let kept = remove_required(&m.required_attributes, &to_remove)?;
            let updated = add_required(&kept, &to_add)?;
            m.set_required_attributes(updated);
            Ok(())
        })?;
        tracing::info!(
            denom,
            signer = %signer,
            removed = to_remove.len(),
            added = to_add.len(),
            "Required attributes updated"
        );
        Ok(())
    }

    // -- Deny list ------------------------------------------------------

    /// Stop `address` from sending the marker's denom. Restricted markers, TRANSFER.
    pub fn add_to_deny_list(&mut self, denom: &str, signer: &Address, address: &Address) -> Result<()> {
        address.verify()?;
        let marker = self.marker(denom)?;
        require_restricted(&marker)?;
        marker.validate_has_role(signer, Access::Transfer)?;
        self.deny_lists
            .entry(marker.address)
            .or_default()
            .insert(address.clone());
        tracing::info!(denom, signer = %signer, address = %address, "Address added to deny list");
        Ok(())
    }

    /// Lift a deny-list entry. Removing an absent entry is a no-op.
    pub fn remove_from_deny_list(
        &mut self,
        denom: &str,
        signer: &Address,
        address: &Address,
    ) -> Result<()> {
        address.verify()?;
        let marker = self.marker(denom)?;
        require_restricted(&marker)?;
        marker.validate_has_role(signer, Access::Transfer)?;
        if let Some(list) = self.deny_lists.get_mut(&marker.address) {
            list.remove(address);
        }
        tracing::info!(denom, signer = %signer, address = %address, "Address removed from deny list");
        Ok(())
    }

    // -- Attributes -----------------------------------------------------

    /// Replace the attribute names held by `address`.
    pub fn set_attributes(&mut self, address: &Address, names: Vec<String>) -> Result<()> {
        address.verify()?;
        self.attributes.insert(address.clone(), names);
        Ok(())
    }

    // -- Sends ----------------------------------------------------------

    /// Run the transfer authorizer against this keeper's current state.
    pub fn authorize_send(
        &self,
        from: &Address,
        to: &Address,
        amounts: &[Coin],
        ctx: &RequestContext,
    ) -> Result<()> {
        TransferAuthorizer::new(self, self, self, &self.config).authorize(from, to, amounts, ctx)
    }
}

impl MarkerRegistry for MarkerKeeper {
    fn get_marker(&self, addr: &Address) -> Result<Option<MarkerAccount>> {
        Ok(self.markers.get(addr).cloned())
    }
}

impl DenyListStore for MarkerKeeper {
    fn is_denied(&self, marker_addr: &Address, addr: &Address) -> bool {
        self.deny_lists
            .get(marker_addr)
            .is_some_and(|list| list.contains(addr))
    }
}

impl AttributeStore for MarkerKeeper {
    fn attributes_of(&self, addr: &Address) -> Result<Vec<String>> {
        Ok(self.attributes.get(addr).cloned().unwrap_or_default())
    }
}
