//! Account addresses and denom validation.
//!
//! Addresses are opaque byte strings; encoding (bech32 etc.) is the job of
//! whoever sits above this crate. Marker and module addresses are derived
//! deterministically so the address *is* the identity of the denom.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{MarkerError, Result, constants};

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// An account address. Displayed and parsed as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(Vec<u8>);

impl Address {
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the address is usable: non-empty and at most
    /// [`constants::MAX_ADDRESS_LENGTH`] bytes.
    pub fn verify(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(MarkerError::InvalidAddress {
                reason: "addresses cannot be empty".to_string(),
            });
        }
        if self.0.len() > constants::MAX_ADDRESS_LENGTH {
            return Err(MarkerError::InvalidAddress {
                reason: format!(
                    "address length {} exceeds maximum {}",
                    self.0.len(),
                    constants::MAX_ADDRESS_LENGTH
                ),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl FromStr for Address {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| MarkerError::InvalidAddress {
            reason: format!("{s:?} is not hex: {e}"),
        })?;
        let addr = Self(bytes);
        addr.verify()?;
        Ok(addr)
    }
}

impl TryFrom<String> for Address {
    type Error = MarkerError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}

/// Random addresses for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    /// A random 20-byte address.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random::<[u8; 20]>().to_vec())
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// `SHA-256(SHA-256("module") || name || 0x00 || key)`.
fn derive(name: &str, key: &[u8]) -> Address {
    let type_hash = Sha256::digest(b"module");
    let mut hasher = Sha256::new();
    hasher.update(type_hash);
    hasher.update(name.as_bytes());
    hasher.update([0u8]);
    hasher.update(key);
    Address(hasher.finalize().to_vec())
}

/// Address of a module account (marker module, fee collector, ...).
#[must_use]
pub fn module_address(module: &str) -> Address {
    let hash = Sha256::digest(module.as_bytes());
    Address(hash[..20].to_vec())
}

/// Deterministic address of the marker account for `denom`.
pub fn marker_address(denom: &str) -> Result<Address> {
    validate_denom(denom)?;
    Ok(derive(constants::MARKER_MODULE_NAME, denom.as_bytes()))
}

/// Denom syntax: a letter followed by 2..=127 characters drawn from ASCII
/// alphanumerics and `/ : . _ -`.
pub fn validate_denom(denom: &str) -> Result<()> {
    let invalid = |reason: &str| MarkerError::InvalidDenom {
        denom: denom.to_string(),
        reason: reason.to_string(),
    };
    let len = denom.chars().count();
    if !(constants::MIN_DENOM_LENGTH..=constants::MAX_DENOM_LENGTH).contains(&len) {
        return Err(invalid(&format!(
            "length must be between {} and {}",
            constants::MIN_DENOM_LENGTH,
            constants::MAX_DENOM_LENGTH
        )));
    }
    let mut chars = denom.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("must start with a letter"));
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || "/:._-".contains(*c))) {
        return Err(invalid(&format!("character {bad:?} is not allowed")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
