//! # markergate-restrictions
//!
//! **Send-restriction layer**: decides whether a proposed transfer of
//! marker-governed denoms may proceed.
//!
//! ## Architecture
//!
//! 1. **Collaborators**: [`MarkerRegistry`], [`DenyListStore`], [`AttributeStore`],
//!    [`NameNormalizer`]: read-only views of ledger state, supplied by the caller
//! 2. **Attribute matching**: [`attribute_match::matches`] / [`attribute_match::find_missing`]
//! 3. **Required-attribute editing**: [`add_required`], [`remove_required`], [`normalize_required`]
//! 4. **TransferAuthorizer**: the layered rule chain over a consistent snapshot
//!
//! ## Send Flow
//!
//! ```text
//! tx boundary → RequestContext → TransferAuthorizer.authorize(from, to, coins)
//!     → MarkerRegistry / DenyListStore / AttributeStore lookups
//!     → Ok(()) or MarkerError naming denom, addresses, and rule
//! ```

pub mod attribute_match;
pub mod authorizer;
pub mod collaborators;
pub mod required_attributes;

pub use attribute_match::{find_missing, matches};
pub use authorizer::TransferAuthorizer;
pub use collaborators::{AttributeStore, DenyListStore, MarkerRegistry, NameNormalizer};
pub use required_attributes::{add_required, normalize_required, remove_required};
