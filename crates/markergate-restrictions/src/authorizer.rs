//! Transfer authorizer: the send-restriction gate for restricted denoms.
//!
//! Every send of coins between accounts passes through [`TransferAuthorizer::authorize`].
//! The rules are layered and order-sensitive; reordering them changes who can
//! move restricted funds.
//!
//! ## Decision Flow
//!
//! ```text
//! authorize(from, to, amounts, ctx)
//!   → bypass / module sender?      → only the fee-collector guard applies
//!   → from is a marker account?    → admin with WITHDRAW (or fee grant), marker ACTIVE for its own denom
//!   → to is a restricted marker?   → DEPOSIT by agents, else by from
//!   → for each denom: authorize_denom
//!       1. marker not ACTIVE               → deny
//!       2. no marker / unrestricted        → allow
//!       3. to = fee collector              → deny
//!       4. an agent holds TRANSFER         → allow
//!       5. from on deny list               → deny
//!       6. from holds TRANSFER             → allow
//!       7. to is a marker account          → deny
//!       8. no required attributes          → allow iff from is a bypass account
//!       9. to is a bypass account          → allow
//!      10. to holds every required attribute → allow, else deny
//! ```
//!
//! The authorizer never mutates state. A failed lookup aborts the call.

use markergate_types::{
    Access, Address, Coin, MarkerAccount, MarkerError, RequestContext, RestrictionConfig, Result,
};

use crate::{AttributeStore, DenyListStore, MarkerRegistry, attribute_match::find_missing};

/// Decides whether a multi-coin send is allowed.
pub struct TransferAuthorizer<'a> {
    markers: &'a dyn MarkerRegistry,
    deny_list: &'a dyn DenyListStore,
    attributes: &'a dyn AttributeStore,
    config: &'a RestrictionConfig,
}

impl<'a> TransferAuthorizer<'a> {
    #[must_use]
    pub fn new(
        markers: &'a dyn MarkerRegistry,
        deny_list: &'a dyn DenyListStore,
        attributes: &'a dyn AttributeStore,
        config: &'a RestrictionConfig,
    ) -> Self {
        Self {
            markers,
            deny_list,
            attributes,
            config,
        }
    }

    /// Allow or deny sending `amounts` from `from` to `to`. All denoms must
    /// pass; the first failure denies the whole send.
    pub fn authorize(
        &self,
        from: &Address,
        to: &Address,
        amounts: &[Coin],
        ctx: &RequestContext,
    ) -> Result<()> {
        let result = self.check_send(from, to, amounts, ctx);
        match &result {
            Ok(()) => tracing::debug!(
                from = %from,
                to = %to,
                coins = amounts.len(),
                "Send authorized"
            ),
            Err(err) => tracing::warn!(
                from = %from,
                to = %to,
                coins = amounts.len(),
                reason = %err,
                "Send denied"
            ),
        }
        result
    }

    fn check_send(
        &self,
        from: &Address,
        to: &Address,
        amounts: &[Coin],
        ctx: &RequestContext,
    ) -> Result<()> {
        // Internal system transfers: validated elsewhere, but restricted coins
        // still never reach the fee collector.
        if ctx.bypass_active || ctx.is_module_addr(from) {
            tracing::debug!(from = %from, bypass = ctx.bypass_active, "Send exempt from restrictions");
            if ctx.is_fee_collector(to) {
                for coin in amounts {
                    let marker = self.markers.get_marker_by_denom(&coin.denom)?;
                    if marker.is_some_and(|m| m.is_restricted()) {
                        return Err(MarkerError::RestrictedToFeeCollector {
                            denom: coin.denom.clone(),
                            fee_collector: to.clone(),
                        });
                    }
                }
            }
            return Ok(());
        }

        let admins = &ctx.transfer_agents;

        if let Some(from_marker) = self.markers.get_marker(from)? {
            Self::check_withdraw(&from_marker, amounts, ctx)?;
        }

        let to_marker = self.markers.get_marker(to)?;
        if let Some(to_marker) = to_marker.as_ref().filter(|m| m.is_restricted()) {
            let depositors = if admins.is_empty() {
                std::slice::from_ref(from)
            } else {
                admins.as_slice()
            };
            if !to_marker.at_least_one_has_role(depositors, Access::Deposit) {
                return Err(MarkerError::DepositNotAuthorized {
                    denom: to_marker.denom.clone(),
                    marker: to_marker.address.clone(),
                    role: Access::Deposit,
                    addresses: depositors.to_vec(),
                });
            }
        }

        for coin in amounts {
            self.authorize_denom(from, to, &coin.denom, ctx, to_marker.as_ref())?;
        }
        Ok(())
    }

    /// Funds leave a marker account only through an admin with WITHDRAW or an
    /// established fee grant, and the marker's own denom only while ACTIVE.
    fn check_withdraw(
        from_marker: &MarkerAccount,
        amounts: &[Coin],
        ctx: &RequestContext,
    ) -> Result<()> {
        let admins = &ctx.transfer_agents;
        if !ctx.fee_grant_in_use
            && (admins.is_empty() || !from_marker.at_least_one_has_role(admins, Access::Withdraw))
        {
            return Err(MarkerError::WithdrawNotAuthorized {
                denom: from_marker.denom.clone(),
                marker: from_marker.address.clone(),
                role: Access::Withdraw,
                admins: admins.clone(),
            });
        }

        if !from_marker.is_active()
            && amounts
                .iter()
                .any(|c| c.denom == from_marker.denom && c.is_positive())
        {
            return Err(MarkerError::MarkerNotActive {
                denom: from_marker.denom.clone(),
                marker: from_marker.address.clone(),
                status: from_marker.status,
            });
        }
        Ok(())
    }

    /// The per-denom rule chain. `to_marker` is the marker that owns `to`, if any.
    pub fn authorize_denom(
        &self,
        from: &Address,
        to: &Address,
        denom: &str,
        ctx: &RequestContext,
        to_marker: Option<&MarkerAccount>,
    ) -> Result<()> {
        let Some(marker) = self.markers.get_marker_by_denom(denom)? else {
            return Ok(());
        };

        if !marker.is_active() {
            return Err(MarkerError::MarkerNotActive {
                denom: denom.to_string(),
                marker: marker.address.clone(),
                status: marker.status,
            });
        }

        if !marker.is_restricted() {
            return Ok(());
        }

        if ctx.is_fee_collector(to) {
            return Err(MarkerError::RestrictedToFeeCollector {
                denom: denom.to_string(),
                fee_collector: to.clone(),
            });
        }

        let admins = &ctx.transfer_agents;
        if !admins.is_empty() && marker.at_least_one_has_role(admins, Access::Transfer) {
            tracing::debug!(denom, "Transfer agent holds TRANSFER");
            return Ok(());
        }

        // Deny list wins over the sender's own TRANSFER grant.
        if self.deny_list.is_denied(&marker.address, from) {
            return Err(MarkerError::SenderDenied {
                denom: denom.to_string(),
                sender: from.clone(),
            });
        }

        if marker.has_role(from, Access::Transfer) {
            return Ok(());
        }

        // Deposits into any marker account need TRANSFER, bypass or not.
        if to_marker.is_some() {
            let mut checked = Vec::with_capacity(1 + admins.len());
            checked.push(from.clone());
            checked.extend(admins.iter().cloned());
            return Err(MarkerError::TransferNotAuthorized {
                denom: denom.to_string(),
                marker: marker.address.clone(),
                addresses: checked,
            });
        }

        if marker.required_attributes.is_empty() {
            if self.config.is_req_attr_bypass(from) {
                return Ok(());
            }
            return Err(MarkerError::TransferNotAuthorized {
                denom: denom.to_string(),
                marker: marker.address.clone(),
                addresses: vec![from.clone()],
            });
        }

        // Checked again when the funds leave the bypass account.
        if self.config.is_req_attr_bypass(to) {
            return Ok(());
        }

        let held = self.attributes.attributes_of(to)?;
        let missing = find_missing(&marker.required_attributes, &held);
        if !missing.is_empty() {
            return Err(MarkerError::MissingRequiredAttributes {
                denom: denom.to_string(),
                receiver: to.clone(),
                missing,
            });
        }
        Ok(())
    }
}
