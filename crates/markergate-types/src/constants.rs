//! System-wide constants for markergate.

/// Module name used when deriving marker account addresses.
pub const MARKER_MODULE_NAME: &str = "marker";

/// Module name of the interchain transfer module account.
pub const IBC_TRANSFER_MODULE_NAME: &str = "transfer";

/// Module name of the fee collector account.
pub const FEE_COLLECTOR_NAME: &str = "fee_collector";

/// Denoms with this prefix are interchain vouchers.
pub const IBC_DENOM_PREFIX: &str = "ibc/";

/// Wildcard prefix on a required attribute name.
pub const WILDCARD_PREFIX: &str = "*.";

/// Maximum address length in bytes.
pub const MAX_ADDRESS_LENGTH: usize = 255;

/// Minimum denom length in characters.
pub const MIN_DENOM_LENGTH: usize = 3;

/// Maximum denom length in characters.
pub const MAX_DENOM_LENGTH: usize = 128;

/// Default maximum raw length of a required attribute name.
pub const DEFAULT_MAX_REQUIRED_ATTRIBUTE_LENGTH: usize = 1000;

/// Default minimum length of one name segment.
pub const DEFAULT_MIN_SEGMENT_LENGTH: usize = 2;

/// Default maximum length of one name segment.
pub const DEFAULT_MAX_SEGMENT_LENGTH: usize = 32;

/// Default maximum number of segments in a name.
pub const DEFAULT_MAX_NAME_LEVELS: usize = 16;
