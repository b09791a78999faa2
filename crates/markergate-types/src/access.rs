//! Roles and per-address access grants on a marker.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Address, MarkerError, MarkerType, Result};

/// A role an address can hold on a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Manage the access list and lifecycle.
    Admin,
    /// Increase supply.
    Mint,
    /// Decrease supply.
    Burn,
    /// Deposit coins into the marker account.
    Deposit,
    /// Withdraw coins out of the marker account.
    Withdraw,
    /// Cancel and destroy the marker.
    Delete,
    /// Move restricted coins between accounts.
    Transfer,
    /// Move restricted coins without the holder's signature.
    ForceTransfer,
}

impl Access {
    /// Roles legal on a `Coin` marker.
    pub const COIN_ROLES: [Self; 6] = [
        Self::Admin,
        Self::Burn,
        Self::Delete,
        Self::Deposit,
        Self::Mint,
        Self::Withdraw,
    ];

    /// Returns `true` if this role may be granted on a marker of `marker_type`.
    #[must_use]
    pub fn allowed_for(self, marker_type: MarkerType) -> bool {
        match marker_type {
            MarkerType::Coin => Self::COIN_ROLES.contains(&self),
            MarkerType::RestrictedCoin => true,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Mint => "MINT",
            Self::Burn => "BURN",
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
            Self::Delete => "DELETE",
            Self::Transfer => "TRANSFER",
            Self::ForceTransfer => "FORCE_TRANSFER",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Access {
    type Err = MarkerError;

    /// Accepts `transfer`, `TRANSFER`, `access_transfer`, `forcetransfer`, ...
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_prefix("ACCESS_").unwrap_or(&upper);
        match name {
            "ADMIN" => Ok(Self::Admin),
            "MINT" => Ok(Self::Mint),
            "BURN" => Ok(Self::Burn),
            "DEPOSIT" => Ok(Self::Deposit),
            "WITHDRAW" => Ok(Self::Withdraw),
            "DELETE" => Ok(Self::Delete),
            "TRANSFER" => Ok(Self::Transfer),
            "FORCE_TRANSFER" | "FORCETRANSFER" => Ok(Self::ForceTransfer),
            _ => Err(MarkerError::UnknownName {
                kind: "access",
                value: s.to_string(),
            }),
        }
    }
}

/// One address's set of roles on one marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub address: Address,
    pub permissions: BTreeSet<Access>,
}

impl AccessGrant {
    #[must_use]
    pub fn new(address: Address, permissions: impl IntoIterator<Item = Access>) -> Self {
        Self {
            address,
            permissions: permissions.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn has_role(&self, role: Access) -> bool {
        self.permissions.contains(&role)
    }

    /// A grant must name a well-formed address and at least one role.
    pub fn validate(&self) -> Result<()> {
        self.address.verify().map_err(|e| MarkerError::InvalidGrant {
            reason: e.to_string(),
        })?;
        if self.permissions.is_empty() {
            return Err(MarkerError::InvalidGrant {
                reason: format!("no permissions provided for {}", self.address),
            });
        }
        Ok(())
    }

    /// Union the roles of `other` into this grant. Both must name the same address.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        if other.address != self.address {
            return Err(MarkerError::InvalidGrant {
                reason: format!(
                    "cannot merge grant for {} into grant for {}",
                    other.address, self.address
                ),
            });
        }
        self.permissions.extend(other.permissions.iter().copied());
        Ok(())
    }

    /// Roles as a comma separated list, for log lines.
    #[must_use]
    pub fn roles_display(&self) -> String {
        self.permissions
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Every grant valid, and no address granted twice.
pub fn validate_grants(grants: &[AccessGrant]) -> Result<()> {
    let mut seen = HashSet::with_capacity(grants.len());
    for grant in grants {
        grant.validate()?;
        if !seen.insert(&grant.address) {
            return Err(MarkerError::InvalidGrant {
                reason: format!("access list contains duplicate entry for {}", grant.address),
            });
        }
    }
    Ok(())
}
