//! # MarkerAccount: the authoritative record for one denom
//!
//! A marker describes a denom's type, lifecycle status, supply, and the
//! role-based access grants that govern it. The marker only enforces
//! invariants on its own fields; it knows nothing about transfers.
//!
//! ## Lifecycle
//!
//! ```text
//!   ┌──────────┐ finalize ┌───────────┐ activate ┌────────┐
//!   │ PROPOSED ├─────────▶│ FINALIZED ├─────────▶│ ACTIVE │
//!   └────┬─────┘          └─────┬─────┘          └───┬────┘
//!        │ cancel               │ cancel             │ cancel
//!        ▼                      ▼                    ▼
//!   ┌─────────────────────────────────────────────────────┐
//!   │                      CANCELLED                       │
//!   └──────────────────────────┬──────────────────────────┘
//!                              │ destroy
//!                              ▼
//!                        ┌───────────┐
//!                        │ DESTROYED │
//!                        └───────────┘
//! ```
//!
//! Transitions never go backwards. The marker itself does not police
//! transitions (`set_status` only rejects `Undefined`); the keeper does.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Access, AccessGrant, Address, Coin, MarkerError, Result, constants, marker_address,
    validate_amount, validate_grants,
};

// ---------------------------------------------------------------------------
// MarkerStatus
// ---------------------------------------------------------------------------

/// Lifecycle status. Ordering follows the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStatus {
    Undefined,
    Proposed,
    Finalized,
    Active,
    Cancelled,
    Destroyed,
}

impl MarkerStatus {
    /// Can a marker move from this status to `target`?
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Proposed, Self::Finalized | Self::Cancelled)
                | (Self::Finalized, Self::Active | Self::Cancelled)
                | (Self::Active, Self::Cancelled)
                | (Self::Cancelled, Self::Destroyed)
        )
    }
}

impl fmt::Display for MarkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "UNDEFINED"),
            Self::Proposed => write!(f, "PROPOSED"),
            Self::Finalized => write!(f, "FINALIZED"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Destroyed => write!(f, "DESTROYED"),
        }
    }
}

// ---------------------------------------------------------------------------
// MarkerType
// ---------------------------------------------------------------------------

/// Whether a denom moves freely or only through the authorization engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerType {
    Coin,
    RestrictedCoin,
}

impl fmt::Display for MarkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coin => write!(f, "COIN"),
            Self::RestrictedCoin => write!(f, "RESTRICTED_COIN"),
        }
    }
}

impl FromStr for MarkerType {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coin" | "marker_type_coin" => Ok(Self::Coin),
            "restricted" | "restrictedcoin" | "restricted_coin" | "marker_type_restricted_coin" => {
                Ok(Self::RestrictedCoin)
            }
            _ => Err(MarkerError::UnknownName {
                kind: "marker type",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// MarkerAccount
// ---------------------------------------------------------------------------

/// A denom's full authorization record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerAccount {
    /// Derived from `denom`; see [`marker_address`].
    pub address: Address,
    pub denom: String,
    /// Owner of a not-yet-active marker. Cleared on activation.
    pub manager: Option<Address>,
    pub supply: Decimal,
    pub supply_fixed: bool,
    pub status: MarkerStatus,
    pub marker_type: MarkerType,
    pub access_control: Vec<AccessGrant>,
    pub allow_governance_control: bool,
    pub allow_forced_transfer: bool,
    pub required_attributes: Vec<String>,
}

impl MarkerAccount {
    /// A proposed `Coin` marker with zero, fixed supply owned by `manager`.
    pub fn new_empty(
        denom: &str,
        manager: Option<Address>,
        grants: Vec<AccessGrant>,
    ) -> Result<Self> {
        Ok(Self {
            address: marker_address(denom)?,
            denom: denom.to_string(),
            manager,
            supply: Decimal::ZERO,
            supply_fixed: true,
            status: MarkerStatus::Proposed,
            marker_type: MarkerType::Coin,
            access_control: grants,
            allow_governance_control: true,
            allow_forced_transfer: false,
            required_attributes: Vec::new(),
        })
    }

    /// Build a marker from every field. The manager is dropped for markers
    /// that are already active or later.
    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    pub fn new(
        total_supply: Coin,
        manager: Option<Address>,
        access_control: Vec<AccessGrant>,
        status: MarkerStatus,
        marker_type: MarkerType,
        supply_fixed: bool,
        allow_governance_control: bool,
        allow_forced_transfer: bool,
        required_attributes: Vec<String>,
    ) -> Result<Self> {
        let manager = if status >= MarkerStatus::Active {
            None
        } else {
            manager
        };
        Ok(Self {
            address: marker_address(&total_supply.denom)?,
            denom: total_supply.denom,
            manager,
            supply: total_supply.amount,
            supply_fixed,
            status,
            marker_type,
            access_control,
            allow_governance_control,
            allow_forced_transfer,
            required_attributes,
        })
    }

    // -- Simple accessors ---------------------------------------------------

    #[must_use]
    pub fn is_restricted(&self) -> bool {
        self.marker_type == MarkerType::RestrictedCoin
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MarkerStatus::Active
    }

    #[must_use]
    pub fn supply(&self) -> Coin {
        Coin::new(self.denom.clone(), self.supply)
    }

    #[must_use]
    pub fn has_fixed_supply(&self) -> bool {
        self.supply_fixed
    }

    #[must_use]
    pub fn has_governance_enabled(&self) -> bool {
        self.allow_governance_control
    }

    #[must_use]
    pub fn allows_forced_transfer(&self) -> bool {
        self.allow_forced_transfer
    }

    pub fn set_required_attributes(&mut self, required: Vec<String>) {
        self.required_attributes = required;
    }

    fn violation(&self, reason: impl Into<String>) -> MarkerError {
        MarkerError::MarkerInvariantViolation {
            denom: self.denom.clone(),
            reason: reason.into(),
        }
    }

    // -- Single-field setters -----------------------------------------------

    /// Set the status. `Undefined` is rejected; activating clears the manager.
    pub fn set_status(&mut self, status: MarkerStatus) -> Result<()> {
        if status == MarkerStatus::Undefined {
            return Err(self.violation(format!("invalid marker status {status}")));
        }
        if status == MarkerStatus::Active {
            self.manager = None;
        }
        self.status = status;
        Ok(())
    }

    /// Set the tracked supply. The coin's denom must be this marker's denom.
    pub fn set_supply(&mut self, total: &Coin) -> Result<()> {
        if total.denom != self.denom {
            return Err(self.violation(format!(
                "supply coin denom {} must match marker denom",
                total.denom
            )));
        }
        validate_amount(total.amount)?;
        self.supply = total.amount;
        Ok(())
    }

    /// Set the manager. Only proposed markers have one.
    pub fn set_manager(&mut self, manager: Address) -> Result<()> {
        if self.status != MarkerStatus::Proposed {
            return Err(self.violation(
                "manager address is only valid for proposed markers, use access grants instead",
            ));
        }
        manager.verify()?;
        self.manager = Some(manager);
        Ok(())
    }

    /// Toggle forced transfers. Only restricted markers may allow them.
    pub fn set_allow_forced_transfer(&mut self, allow: bool) -> Result<()> {
        if allow && !self.is_restricted() {
            return Err(self.violation("forced transfers can only be allowed on restricted markers"));
        }
        self.allow_forced_transfer = allow;
        Ok(())
    }

    // -- Access control -----------------------------------------------------

    /// Does `addr` hold `role`?
    #[must_use]
    pub fn has_role(&self, addr: &Address, role: Access) -> bool {
        self.access_control
            .iter()
            .any(|g| &g.address == addr && g.has_role(role))
    }

    /// Fails naming `addr`, `role`, and this marker when the role is missing.
    pub fn validate_has_role(&self, addr: &Address, role: Access) -> Result<()> {
        if self.has_role(addr, role) {
            return Ok(());
        }
        Err(self.missing_access(role, vec![addr.clone()]))
    }

    /// Addresses holding `role`, in access-list order.
    #[must_use]
    pub fn addresses_with_role(&self, role: Access) -> Vec<Address> {
        self.access_control
            .iter()
            .filter(|g| g.has_role(role))
            .map(|g| g.address.clone())
            .collect()
    }

    #[must_use]
    pub fn at_least_one_has_role(&self, addrs: &[Address], role: Access) -> bool {
        addrs.iter().any(|a| self.has_role(a, role))
    }

    /// Fails naming every checked address when none of them hold `role`.
    pub fn validate_at_least_one_has_role(&self, addrs: &[Address], role: Access) -> Result<()> {
        if let [single] = addrs {
            return self.validate_has_role(single, role);
        }
        if self.at_least_one_has_role(addrs, role) {
            return Ok(());
        }
        Err(self.missing_access(role, addrs.to_vec()))
    }

    fn missing_access(&self, role: Access, addresses: Vec<Address>) -> MarkerError {
        MarkerError::MissingAccess {
            role,
            denom: self.denom.clone(),
            marker: self.address.clone(),
            addresses,
        }
    }

    /// Grant roles, merging with any existing grant for the same address.
    /// The merged grant replaces the old entry at the end of the list.
    pub fn grant_access(&mut self, grant: AccessGrant) -> Result<()> {
        grant.validate()?;
        let mut merged = grant;
        if let Some(existing) = self
            .access_control
            .iter()
            .find(|g| g.address == merged.address)
        {
            merged.merge(existing)?;
        }
        self.revoke_access(&merged.address)?;
        self.access_control.push(merged);
        Ok(())
    }

    /// Remove every role held by `addr`. Unknown addresses are a no-op.
    pub fn revoke_access(&mut self, addr: &Address) -> Result<()> {
        addr.verify().map_err(|_| MarkerError::InvalidAddress {
            reason: "can not revoke access for invalid address".to_string(),
        })?;
        self.access_control.retain(|g| &g.address != addr);
        Ok(())
    }

    // -- Validation ---------------------------------------------------------

    /// Check every invariant in a fixed order and report the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.status == MarkerStatus::Undefined {
            return Err(self.violation("invalid marker status"));
        }
        if self.supply.is_sign_negative() && !self.supply.is_zero() {
            return Err(self.violation("total supply must be greater than or equal to zero"));
        }
        if self.status < MarkerStatus::Active
            && self.manager.is_none()
            && self.addresses_with_role(Access::Admin).is_empty()
        {
            return Err(self.violation(
                "a manager is required if there are no accounts with ADMIN and marker is not ACTIVE",
            ));
        }
        if self.status == MarkerStatus::Finalized
            && self.addresses_with_role(Access::Mint).is_empty()
            && self.supply.is_zero()
        {
            return Err(self.violation(
                "cannot create a marker with zero total supply and no authorization for minting more",
            ));
        }
        if self.denom.trim().is_empty() {
            return Err(self.violation("marker denom cannot be empty"));
        }
        let derived = marker_address(&self.denom)
            .map_err(|e| self.violation(format!("marker denom is invalid: {e}")))?;
        self.validate_ibc_denom()?;
        if self.address != derived {
            return Err(self.violation(format!(
                "address {} cannot be derived from the marker denom '{}'",
                self.address, self.denom
            )));
        }
        self.validate_grants_for_type()?;
        if let Some(own) = self.access_control.iter().find(|g| g.address == self.address) {
            return Err(self.violation(format!(
                "permissions cannot be granted to '{}' marker account: {}",
                self.denom,
                own.roles_display()
            )));
        }
        if self.manager.as_ref() == Some(&self.address) {
            return Err(self.violation("marker can not be self managed"));
        }
        if self.allow_forced_transfer && !self.is_restricted() {
            return Err(self.violation("forced transfers can only be allowed on restricted markers"));
        }
        validate_required_attributes(&self.required_attributes)
    }

    /// IBC denoms float with the counterparty chain: no fixed supply, no mint/burn.
    fn validate_ibc_denom(&self) -> Result<()> {
        if !self.denom.starts_with(constants::IBC_DENOM_PREFIX) {
            return Ok(());
        }
        if self.supply_fixed {
            return Err(self.violation(
                "invalid ibc denom configuration: fixed supply is not supported for ibc marker",
            ));
        }
        for grant in &self.access_control {
            if let Some(role) = grant
                .permissions
                .iter()
                .find(|r| matches!(r, Access::Mint | Access::Burn))
            {
                return Err(self.violation(format!(
                    "invalid ibc denom configuration: {role} is not supported for ibc marker"
                )));
            }
        }
        Ok(())
    }

    fn validate_grants_for_type(&self) -> Result<()> {
        for grant in &self.access_control {
            if let Some(role) = grant
                .permissions
                .iter()
                .find(|r| !r.allowed_for(self.marker_type))
            {
                return Err(self.violation(format!(
                    "invalid access privileges granted: {role} is not supported for marker type {}",
                    self.marker_type
                )));
            }
        }
        validate_grants(&self.access_control).map_err(|e| {
            self.violation(format!("invalid access privileges granted: {e}"))
        })
    }
}

/// Every required attribute name must be non-blank.
pub fn validate_required_attributes(required: &[String]) -> Result<()> {
    if required.iter().any(|a| a.trim().is_empty()) {
        return Err(MarkerError::EmptyAttributeName);
    }
    Ok(())
}

/// Marker fixtures for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl MarkerAccount {
    /// An active restricted marker with `supply` units and a random admin.
    pub fn dummy_restricted(denom: &str, supply: i64) -> Self {
        Self::new(
            Coin::units(denom, supply),
            None,
            vec![AccessGrant::new(Address::random(), [Access::Admin])],
            MarkerStatus::Active,
            MarkerType::RestrictedCoin,
            true,
            true,
            false,
            Vec::new(),
        )
        .expect("fixture denom must be valid")
    }

    /// An active unrestricted marker with `supply` units and a random admin.
    pub fn dummy_coin(denom: &str, supply: i64) -> Self {
        let mut marker = Self::dummy_restricted(denom, supply);
        marker.marker_type = MarkerType::Coin;
        marker
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn proposed(manager: &Address) -> MarkerAccount {
        MarkerAccount::new_empty("gold", Some(manager.clone()), Vec::new()).unwrap()
    }

    fn reason(err: MarkerError) -> String {
        match err {
            MarkerError::MarkerInvariantViolation { reason, .. } => reason,
            other => panic!("expected invariant violation, got {other}"),
        }
    }

    #[test]
    fn new_empty_is_proposed_coin() {
        let m = proposed(&Address::random());
        assert_eq!(m.status, MarkerStatus::Proposed);
        assert_eq!(m.marker_type, MarkerType::Coin);
        assert!(m.supply.is_zero());
        assert!(m.has_fixed_supply());
        assert!(m.has_governance_enabled());
        assert!(!m.allows_forced_transfer());
        assert!(m.validate().is_ok());
    }

    #[test]
    fn new_active_drops_manager() {
        let m = MarkerAccount::new(
            Coin::units("gold", 10),
            Some(Address::random()),
            vec![AccessGrant::new(Address::random(), [Access::Admin])],
            MarkerStatus::Active,
            MarkerType::Coin,
            true,
            false,
            false,
            Vec::new(),
        )
        .unwrap();
        assert!(m.manager.is_none());
    }

    #[test]
    fn status_ordering_follows_lifecycle() {
        assert!(MarkerStatus::Proposed < MarkerStatus::Finalized);
        assert!(MarkerStatus::Finalized < MarkerStatus::Active);
        assert!(MarkerStatus::Active < MarkerStatus::Cancelled);
        assert!(MarkerStatus::Cancelled < MarkerStatus::Destroyed);
    }

    #[test]
    fn transitions_are_forward_only() {
        assert!(MarkerStatus::Proposed.can_transition_to(MarkerStatus::Finalized));
        assert!(MarkerStatus::Finalized.can_transition_to(MarkerStatus::Active));
        assert!(MarkerStatus::Active.can_transition_to(MarkerStatus::Cancelled));
        assert!(MarkerStatus::Cancelled.can_transition_to(MarkerStatus::Destroyed));
        assert!(!MarkerStatus::Active.can_transition_to(MarkerStatus::Finalized));
        assert!(!MarkerStatus::Proposed.can_transition_to(MarkerStatus::Active));
        assert!(!MarkerStatus::Destroyed.can_transition_to(MarkerStatus::Active));
        assert!(!MarkerStatus::Cancelled.can_transition_to(MarkerStatus::Cancelled));
        assert!(!MarkerStatus::Active.can_transition_to(MarkerStatus::Destroyed));
    }

    #[test]
    fn validate_rejects_forced_transfer_on_coin() {
        let mut m = MarkerAccount::dummy_coin("gold", 10);
        m.allow_forced_transfer = true;
        assert!(reason(m.validate().unwrap_err()).contains("forced transfers"));

        let mut r = MarkerAccount::dummy_restricted("silver", 10);
        r.allow_forced_transfer = true;
        assert!(r.validate().is_ok());
    }

    #[test]
    fn validate_rejects_undefined_status() {
        let mut m = proposed(&Address::random());
        m.status = MarkerStatus::Undefined;
        assert!(reason(m.validate().unwrap_err()).contains("invalid marker status"));
    }

    #[test]
    fn validate_requires_manager_or_admin_before_active() {
        let mut m = proposed(&Address::random());
        m.manager = None;
        assert!(reason(m.validate().unwrap_err()).contains("manager is required"));
        m.grant_access(AccessGrant::new(Address::random(), [Access::Admin]))
            .unwrap();
        assert!(m.validate().is_ok());
    }

    #[test]
    fn validate_finalized_needs_mint_or_supply() {
        let mut m = proposed(&Address::random());
        m.status = MarkerStatus::Finalized;
        assert!(reason(m.validate().unwrap_err()).contains("zero total supply"));
        m.supply = Decimal::from(5);
        assert!(m.validate().is_ok());
        m.supply = Decimal::ZERO;
        m.grant_access(AccessGrant::new(Address::random(), [Access::Mint]))
            .unwrap();
        assert!(m.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_supply() {
        let mut m = proposed(&Address::random());
        m.supply = Decimal::from(-1);
        assert!(reason(m.validate().unwrap_err()).contains("greater than or equal to zero"));
    }

    #[test]
    fn validate_rejects_mismatched_address() {
        let mut m = proposed(&Address::random());
        m.address = Address::random();
        assert!(reason(m.validate().unwrap_err()).contains("cannot be derived"));
    }

    #[test]
    fn validate_rejects_ibc_fixed_supply_and_mint() {
        let admin = Address::random();
        let mut m = MarkerAccount::new_empty("ibc/ABCDEF", Some(admin.clone()), Vec::new())
            .unwrap();
        assert!(reason(m.validate().unwrap_err()).contains("fixed supply"));
        m.supply_fixed = false;
        assert!(m.validate().is_ok());
        m.grant_access(AccessGrant::new(admin, [Access::Mint])).unwrap();
        assert!(reason(m.validate().unwrap_err()).contains("MINT is not supported"));
    }

    #[test]
    fn validate_rejects_transfer_role_on_coin() {
        let mut m = proposed(&Address::random());
        m.grant_access(AccessGrant::new(Address::random(), [Access::Transfer]))
            .unwrap();
        assert!(reason(m.validate().unwrap_err()).contains("TRANSFER is not supported"));
    }

    #[test]
    fn validate_rejects_self_grant_and_self_manager() {
        let mut m = proposed(&Address::random());
        let own = m.address.clone();
        m.grant_access(AccessGrant::new(own.clone(), [Access::Admin]))
            .unwrap();
        assert!(reason(m.validate().unwrap_err()).contains("cannot be granted"));

        let mut m = proposed(&Address::random());
        m.manager = Some(m.address.clone());
        assert!(reason(m.validate().unwrap_err()).contains("self managed"));
    }

    #[test]
    fn validate_rejects_blank_required_attribute() {
        let mut m = MarkerAccount::dummy_restricted("gold", 1);
        m.set_required_attributes(vec!["kyc.example".into(), "  ".into()]);
        assert!(matches!(m.validate(), Err(MarkerError::EmptyAttributeName)));
    }

    #[test]
    fn grant_access_merges_roles() {
        let mut m = proposed(&Address::random());
        let addr = Address::random();
        m.grant_access(AccessGrant::new(addr.clone(), [Access::Mint, Access::Burn]))
            .unwrap();
        m.grant_access(AccessGrant::new(addr.clone(), [Access::Burn, Access::Withdraw]))
            .unwrap();
        assert_eq!(m.access_control.len(), 1);
        let grant = &m.access_control[0];
        assert_eq!(
            grant.permissions.iter().copied().collect::<Vec<_>>(),
            vec![Access::Mint, Access::Burn, Access::Withdraw]
        );
    }

    #[test]
    fn grant_access_rejects_empty_grant() {
        let mut m = proposed(&Address::random());
        let err = m
            .grant_access(AccessGrant::new(Address::random(), []))
            .unwrap_err();
        assert!(matches!(err, MarkerError::InvalidGrant { .. }));
        assert!(m.access_control.is_empty());
    }

    #[test]
    fn revoke_unknown_address_is_noop() {
        let mut m = MarkerAccount::dummy_restricted("gold", 1);
        let before = m.access_control.clone();
        m.revoke_access(&Address::random()).unwrap();
        assert_eq!(before, m.access_control);
        assert!(m.revoke_access(&Address::new(Vec::new())).is_err());
    }

    #[test]
    fn addresses_with_role_in_list_order() {
        let mut m = proposed(&Address::random());
        let (a, b, c) = (Address::random(), Address::random(), Address::random());
        m.grant_access(AccessGrant::new(a.clone(), [Access::Mint])).unwrap();
        m.grant_access(AccessGrant::new(b, [Access::Burn])).unwrap();
        m.grant_access(AccessGrant::new(c.clone(), [Access::Mint])).unwrap();
        assert_eq!(m.addresses_with_role(Access::Mint), vec![a, c]);
    }

    #[test]
    fn validate_at_least_one_names_all_addresses() {
        let m = MarkerAccount::dummy_restricted("gold", 1);
        let (a, b) = (Address::random(), Address::random());
        match m.validate_at_least_one_has_role(&[a.clone(), b.clone()], Access::Withdraw) {
            Err(MarkerError::MissingAccess { addresses, .. }) => assert_eq!(addresses, vec![a.clone(), b]),
            other => panic!("unexpected {other:?}"),
        }
        match m.validate_at_least_one_has_role(std::slice::from_ref(&a), Access::Withdraw) {
            Err(MarkerError::MissingAccess { addresses, .. }) => assert_eq!(addresses, vec![a]),
            other => panic!("unexpected {other:?}"),
        }
        let admin = m.access_control[0].address.clone();
        assert!(m
            .validate_at_least_one_has_role(&[Address::random(), admin], Access::Admin)
            .is_ok());
    }

    #[test]
    fn set_status_active_clears_manager() {
        let mut m = proposed(&Address::random());
        m.set_status(MarkerStatus::Finalized).unwrap();
        assert!(m.manager.is_some());
        m.set_status(MarkerStatus::Active).unwrap();
        assert!(m.manager.is_none());
        assert!(m.set_status(MarkerStatus::Undefined).is_err());
    }

    #[test]
    fn set_supply_checks_denom() {
        let mut m = proposed(&Address::random());
        assert!(m.set_supply(&Coin::units("silver", 5)).is_err());
        m.set_supply(&Coin::units("gold", 5)).unwrap();
        assert_eq!(m.supply(), Coin::units("gold", 5));
    }

    #[test]
    fn set_manager_only_when_proposed() {
        let mut m = proposed(&Address::random());
        m.set_manager(Address::random()).unwrap();
        assert!(m.set_manager(Address::new(Vec::new())).is_err());
        m.status = MarkerStatus::Finalized;
        assert!(m.set_manager(Address::random()).is_err());
    }

    #[test]
    fn set_allow_forced_transfer_requires_restricted() {
        let mut coin = MarkerAccount::dummy_coin("gold", 1);
        assert!(coin.set_allow_forced_transfer(true).is_err());
        assert!(coin.set_allow_forced_transfer(false).is_ok());
        let mut restricted = MarkerAccount::dummy_restricted("silver", 1);
        restricted.set_allow_forced_transfer(true).unwrap();
        assert!(restricted.allows_forced_transfer());
    }

    #[test]
    fn marker_type_parse() {
        assert_eq!("restricted".parse::<MarkerType>().unwrap(), MarkerType::RestrictedCoin);
        assert_eq!("RestrictedCoin".parse::<MarkerType>().unwrap(), MarkerType::RestrictedCoin);
        assert_eq!("coin".parse::<MarkerType>().unwrap(), MarkerType::Coin);
        assert!("nft".parse::<MarkerType>().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let m = MarkerAccount::dummy_restricted("gold", 7);
        let json = serde_json::to_string(&m).unwrap();
        let back: MarkerAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
