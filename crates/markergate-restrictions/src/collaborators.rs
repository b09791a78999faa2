//! Read-only collaborators the authorization engine consults.
//!
//! Every lookup is scoped to a single authorization call. Implementations
//! must present a consistent snapshot for the duration of that call.

use markergate_types::{Address, MarkerAccount, MarkerError, Result, marker_address};

/// Resolves addresses and denoms to their marker, if one exists.
pub trait MarkerRegistry {
    /// The marker whose account lives at `addr`. `Ok(None)` when `addr` is
    /// not a marker account.
    fn get_marker(&self, addr: &Address) -> Result<Option<MarkerAccount>>;

    /// The marker for `denom`, resolved through its derived address.
    fn get_marker_by_denom(&self, denom: &str) -> Result<Option<MarkerAccount>> {
        let addr = marker_address(denom).map_err(|e| MarkerError::MarkerLookupFailed {
            key: denom.to_string(),
            reason: e.to_string(),
        })?;
        self.get_marker(&addr)
    }
}

/// Per-marker send-deny lists.
pub trait DenyListStore {
    /// Is `addr` denied from sending the denom of the marker at `marker_addr`?
    fn is_denied(&self, marker_addr: &Address, addr: &Address) -> bool;
}

/// Attribute names held by an account.
pub trait AttributeStore {
    fn attributes_of(&self, addr: &Address) -> Result<Vec<String>>;
}

/// Canonicalizes attribute names.
pub trait NameNormalizer {
    fn normalize(&self, name: &str) -> Result<String>;
}
