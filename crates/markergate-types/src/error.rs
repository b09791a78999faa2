//! Error types for markergate.
//!
//! All errors use the `MK_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Transfer authorization errors
//! - 2xx: Marker invariant errors
//! - 3xx: Access / grant errors
//! - 4xx: Required-attribute errors
//! - 5xx: Keeper / lifecycle errors
//! - 9xx: Lookup, configuration, and internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Access, Address, MarkerStatus};

/// Joins addresses for display as `"a", "b", "c"`.
fn quoted(addrs: &[Address]) -> String {
    addrs
        .iter()
        .map(|a| format!("\"{a}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Joins attribute names for display as `a", "b`.
fn joined(names: &[String]) -> String {
    names.join("\", \"")
}

/// Central error enum for all markergate operations.
#[derive(Debug, Error)]
pub enum MarkerError {
    // =================================================================
    // Transfer Authorization Errors (1xx)
    // =================================================================
    /// Funds cannot leave a marker account without an admin holding Withdraw.
    #[error(
        "MK_ERR_100: Cannot withdraw {denom} from marker account {marker}: none of [{}] have {role}",
        quoted(.admins)
    )]
    WithdrawNotAuthorized {
        denom: String,
        marker: Address,
        role: Access,
        admins: Vec<Address>,
    },

    /// The marker (or the marker that owns the sending account) is not active.
    #[error("MK_ERR_101: Cannot send {denom}: marker {marker} status ({status}) is not ACTIVE")]
    MarkerNotActive {
        denom: String,
        marker: Address,
        status: MarkerStatus,
    },

    /// Deposits into a restricted marker account need Deposit access.
    #[error(
        "MK_ERR_102: Deposit into {denom} marker ({marker}) not authorized: none of [{}] have {role}",
        quoted(.addresses)
    )]
    DepositNotAuthorized {
        denom: String,
        marker: Address,
        role: Access,
        addresses: Vec<Address>,
    },

    /// Restricted coins must never reach the fee collector.
    #[error("MK_ERR_103: Restricted denom {denom} cannot be sent to the fee collector {fee_collector}")]
    RestrictedToFeeCollector { denom: String, fee_collector: Address },

    /// The sender is on the marker's send-deny list.
    #[error("MK_ERR_104: {sender} is on deny list for sending restricted denom {denom}")]
    SenderDenied { denom: String, sender: Address },

    /// None of the checked addresses hold Transfer on the marker.
    #[error(
        "MK_ERR_105: None of [{}] have TRANSFER on {denom} marker ({marker})",
        quoted(.addresses)
    )]
    TransferNotAuthorized {
        denom: String,
        marker: Address,
        addresses: Vec<Address>,
    },

    /// The receiver is missing attributes required by the marker.
    #[error(
        "MK_ERR_106: Address {receiver} does not contain the {denom} required attribute(s): \"{}\"",
        joined(.missing)
    )]
    MissingRequiredAttributes {
        denom: String,
        receiver: Address,
        missing: Vec<String>,
    },

    // =================================================================
    // Marker Invariant Errors (2xx)
    // =================================================================
    /// `MarkerAccount::validate` (or a single-field setter) found a violation.
    #[error("MK_ERR_200: Marker {denom} invariant violated: {reason}")]
    MarkerInvariantViolation { denom: String, reason: String },

    /// The denom string is not a valid denomination.
    #[error("MK_ERR_201: Invalid denom {denom:?}: {reason}")]
    InvalidDenom { denom: String, reason: String },

    /// A coin or net asset value is structurally invalid.
    #[error("MK_ERR_202: Invalid coin: {reason}")]
    InvalidCoin { reason: String },

    // =================================================================
    // Access / Grant Errors (3xx)
    // =================================================================
    /// The access grant is empty or malformed.
    #[error("MK_ERR_300: Invalid access grant: {reason}")]
    InvalidGrant { reason: String },

    /// The address is empty or longer than the allowed maximum.
    #[error("MK_ERR_301: Invalid address: {reason}")]
    InvalidAddress { reason: String },

    /// An address (or every address in a list) lacks a role.
    #[error(
        "MK_ERR_302: None of [{}] have {role} on {denom} marker ({marker})",
        quoted(.addresses)
    )]
    MissingAccess {
        role: Access,
        denom: String,
        marker: Address,
        addresses: Vec<Address>,
    },

    /// A role or marker type name could not be parsed.
    #[error("MK_ERR_303: Unknown {kind}: {value:?}")]
    UnknownName { kind: &'static str, value: String },

    // =================================================================
    // Required-Attribute Errors (4xx)
    // =================================================================
    /// The attribute is already in the marker's required list.
    #[error("MK_ERR_400: Attribute {0:?} is already required")]
    AlreadyRequired(String),

    /// The attribute is not in the marker's required list.
    #[error("MK_ERR_401: Attribute {0:?} is already not required")]
    NotRequired(String),

    /// The raw attribute name exceeds the configured maximum length.
    #[error("MK_ERR_402: Required attribute {name:?} length {length} exceeds maximum {max}")]
    TooLong { name: String, length: usize, max: usize },

    /// The name normalizer rejected the attribute name.
    #[error("MK_ERR_403: Attribute name normalization failed for {name:?}: {reason}")]
    NormalizationFailed { name: String, reason: String },

    /// A required-attribute entry is blank.
    #[error("MK_ERR_404: Invalid required attribute name: empty")]
    EmptyAttributeName,

    // =================================================================
    // Keeper / Lifecycle Errors (5xx)
    // =================================================================
    /// No marker exists for the denom.
    #[error("MK_ERR_500: Marker not found: {0}")]
    MarkerNotFound(String),

    /// A marker for the denom already exists.
    #[error("MK_ERR_501: Marker already exists: {0}")]
    MarkerAlreadyExists(String),

    /// The requested status change moves backwards or skips a stage.
    #[error("MK_ERR_502: Invalid status transition for {denom}: {from} -> {to}")]
    InvalidStatusTransition {
        denom: String,
        from: MarkerStatus,
        to: MarkerStatus,
    },

    /// The operation is only available on restricted markers.
    #[error("MK_ERR_503: Marker {0} is not a restricted coin")]
    NotRestricted(String),

    /// Burning would drive supply negative.
    #[error("MK_ERR_504: Insufficient supply of {denom}: need {needed}, have {available}")]
    InsufficientSupply {
        denom: String,
        needed: Decimal,
        available: Decimal,
    },

    /// Minting would overflow the supply counter.
    #[error("MK_ERR_505: Minting {amount} {denom} would overflow supply {supply}")]
    SupplyOverflow {
        denom: String,
        amount: Decimal,
        supply: Decimal,
    },

    // =================================================================
    // Lookup / Configuration / Internal (9xx)
    // =================================================================
    /// The marker registry failed to resolve a marker.
    #[error("MK_ERR_900: Marker lookup failed for {key}: {reason}")]
    MarkerLookupFailed { key: String, reason: String },

    /// The attribute store failed to return an address's attributes.
    #[error("MK_ERR_901: Could not get attributes for {address}: {reason}")]
    AttributeLookupFailed { address: Address, reason: String },

    /// Configuration error (invalid config document, bad field values).
    #[error("MK_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MarkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::new(vec![b; 20])
    }

    #[test]
    fn transfer_not_authorized_lists_every_address() {
        let err = MarkerError::TransferNotAuthorized {
            denom: "restricted".into(),
            marker: addr(9),
            addresses: vec![addr(1), addr(2)],
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("MK_ERR_105"), "Got: {msg}");
        assert!(msg.contains(&addr(1).to_string()));
        assert!(msg.contains(&addr(2).to_string()));
        assert!(msg.contains("restricted"));
    }

    #[test]
    fn missing_attributes_display() {
        let err = MarkerError::MissingRequiredAttributes {
            denom: "restricted".into(),
            receiver: addr(3),
            missing: vec!["kyc.example".into(), "*.aml.example".into()],
        };
        let msg = format!("{err}");
        assert!(msg.contains("MK_ERR_106"));
        assert!(msg.contains(r#""kyc.example", "*.aml.example""#), "Got: {msg}");
    }

    #[test]
    fn marker_not_active_names_status() {
        let err = MarkerError::MarkerNotActive {
            denom: "gold".into(),
            marker: addr(4),
            status: MarkerStatus::Finalized,
        };
        let msg = format!("{err}");
        assert!(msg.contains("FINALIZED"));
        assert!(msg.contains("gold"));
    }

    #[test]
    fn all_errors_have_mk_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(MarkerError::AlreadyRequired("a".into())),
            Box::new(MarkerError::NotRequired("a".into())),
            Box::new(MarkerError::EmptyAttributeName),
            Box::new(MarkerError::MarkerNotFound("gold".into())),
            Box::new(MarkerError::Configuration("bad".into())),
            Box::new(MarkerError::SupplyOverflow {
                denom: "gold".into(),
                amount: Decimal::ONE,
                supply: Decimal::MAX,
            }),
            Box::new(MarkerError::SenderDenied {
                denom: "gold".into(),
                sender: addr(1),
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("MK_ERR_"),
                "Error missing MK_ERR_ prefix: {msg}"
            );
        }
    }
}
