//! # markergate-keeper
//!
//! In-memory owner of marker state. [`MarkerKeeper`] applies lifecycle,
//! access, supply, deny-list, and required-attribute changes with signer
//! checks, and answers send-authorization queries by running the
//! [`markergate_restrictions::TransferAuthorizer`] over its own state.

pub mod keeper;
pub mod normalizer;

pub use keeper::MarkerKeeper;
pub use normalizer::DefaultNameNormalizer;
