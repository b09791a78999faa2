//! Configuration for the transfer restriction layer.

use serde::{Deserialize, Serialize};

use crate::{Address, MarkerError, Result, constants, module_address};

/// Addresses and limits the authorization engine and keeper depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestrictionConfig {
    /// The marker module's own holding account.
    pub marker_module_addr: Address,
    /// The interchain transfer module's account.
    pub ibc_transfer_module_addr: Address,
    /// Where transaction fees are collected. Restricted coins may never land here.
    pub fee_collector_addr: Address,
    /// Accounts exempt from required-attribute checks.
    pub req_attr_bypass_addrs: Vec<Address>,
    /// Maximum raw length of a required attribute name.
    pub max_required_attribute_length: usize,
    /// Attribute-name normalization rules.
    pub name_rules: NameRules,
}

impl Default for RestrictionConfig {
    fn default() -> Self {
        Self {
            marker_module_addr: module_address(constants::MARKER_MODULE_NAME),
            ibc_transfer_module_addr: module_address(constants::IBC_TRANSFER_MODULE_NAME),
            fee_collector_addr: module_address(constants::FEE_COLLECTOR_NAME),
            req_attr_bypass_addrs: Vec::new(),
            max_required_attribute_length: constants::DEFAULT_MAX_REQUIRED_ATTRIBUTE_LENGTH,
            name_rules: NameRules::default(),
        }
    }
}

impl RestrictionConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| MarkerError::Configuration(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Module accounts whose outgoing sends skip per-denom checks.
    #[must_use]
    pub fn module_addrs(&self) -> Vec<Address> {
        vec![
            self.marker_module_addr.clone(),
            self.ibc_transfer_module_addr.clone(),
        ]
    }

    #[must_use]
    pub fn is_req_attr_bypass(&self, addr: &Address) -> bool {
        self.req_attr_bypass_addrs.contains(addr)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_required_attribute_length == 0 {
            return Err(MarkerError::Configuration(
                "max_required_attribute_length must be > 0".to_string(),
            ));
        }
        self.name_rules.validate()
    }
}

/// Segment rules applied when normalizing attribute names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameRules {
    pub min_segment_length: usize,
    pub max_segment_length: usize,
    pub max_segments: usize,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            min_segment_length: constants::DEFAULT_MIN_SEGMENT_LENGTH,
            max_segment_length: constants::DEFAULT_MAX_SEGMENT_LENGTH,
            max_segments: constants::DEFAULT_MAX_NAME_LEVELS,
        }
    }
}

impl NameRules {
    pub fn validate(&self) -> Result<()> {
        if self.min_segment_length == 0 || self.min_segment_length > self.max_segment_length {
            return Err(MarkerError::Configuration(format!(
                "segment length bounds {}..={} are invalid",
                self.min_segment_length, self.max_segment_length
            )));
        }
        if self.max_segments == 0 {
            return Err(MarkerError::Configuration(
                "max_segments must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
