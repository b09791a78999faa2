//! # markergate-types
//!
//! Shared types, errors, and configuration for **markergate**, the
//! restricted-denom marker model and its transfer authorization engine.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Addresses**: [`Address`], [`marker_address`], [`module_address`], [`validate_denom`]
//! - **Access control**: [`Access`], [`AccessGrant`]
//! - **Marker model**: [`MarkerAccount`], [`MarkerStatus`], [`MarkerType`]
//! - **Value**: [`Coin`], [`NetAssetValue`]
//! - **Request context**: [`RequestContext`]
//! - **Configuration**: [`RestrictionConfig`], [`NameRules`]
//! - **Errors**: [`MarkerError`] with `MK_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod access;
pub mod address;
pub mod coin;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod marker;

pub use access::*;
pub use address::*;
pub use coin::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use marker::*;

// Constants are accessed via `markergate_types::constants::FOO`
// (not re-exported to avoid name collisions).
