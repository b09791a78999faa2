//! Default attribute-name normalizer.
//!
//! Names are dot-separated segments: `sub.kyc.example`. Normalization
//! lowercases, trims each segment, and enforces the configured segment rules.

use markergate_restrictions::NameNormalizer;
use markergate_types::{MarkerError, NameRules, Result};

/// Lowercasing, segment-checking normalizer driven by [`NameRules`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNameNormalizer {
    rules: NameRules,
}

impl DefaultNameNormalizer {
    #[must_use]
    pub fn new(rules: NameRules) -> Self {
        Self { rules }
    }

    fn fail(name: &str, reason: String) -> MarkerError {
        MarkerError::NormalizationFailed {
            name: name.to_string(),
            reason,
        }
    }
}

impl NameNormalizer for DefaultNameNormalizer {
    fn normalize(&self, name: &str) -> Result<String> {
        let lowered = name.trim().to_lowercase();
        let segments: Vec<&str> = lowered.split('.').map(str::trim).collect();

        if segments.len() > self.rules.max_segments {
            return Err(Self::fail(
                name,
                format!("more than {} segments", self.rules.max_segments),
            ));
        }
        for segment in &segments {
            let len = segment.chars().count();
            if len == 0 {
                return Err(Self::fail(name, "empty segment".to_string()));
            }
            if len < self.rules.min_segment_length || len > self.rules.max_segment_length {
                return Err(Self::fail(
                    name,
                    format!(
                        "segment {segment:?} length must be between {} and {}",
                        self.rules.min_segment_length, self.rules.max_segment_length
                    ),
                ));
            }
            if let Some(bad) = segment
                .chars()
                .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
            {
                return Err(Self::fail(
                    name,
                    format!("character {bad:?} is not allowed"),
                ));
            }
        }
        Ok(segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(name: &str) -> Result<String> {
        DefaultNameNormalizer::default().normalize(name)
    }

    #[test]
    fn lowercases_and_trims_segments() {
        assert_eq!(norm(" KYC . Example ").unwrap(), "kyc.example");
        assert_eq!(norm("sub-1.kyc.io").unwrap(), "sub-1.kyc.io");
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(norm("kyc..example").is_err());
        assert!(norm("").is_err());
        assert!(norm(".example").is_err());
    }

    #[test]
    fn rejects_bad_characters() {
        let err = norm("kyc_x.example").unwrap_err();
        assert!(matches!(err, MarkerError::NormalizationFailed { .. }));
        assert!(norm("k*c.example").is_err());
    }

    #[test]
    fn enforces_segment_length_and_depth() {
        assert!(norm("a.example").is_err());
        assert!(norm(&"x".repeat(33)).is_err());
        let rules = NameRules {
            min_segment_length: 1,
            max_segment_length: 8,
            max_segments: 2,
        };
        let n = DefaultNameNormalizer::new(rules);
        assert!(n.normalize("a.b").is_ok());
        assert!(n.normalize("a.b.c").is_err());
    }
}
