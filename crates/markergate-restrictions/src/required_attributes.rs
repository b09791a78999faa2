//! Editing and normalizing a marker's required-attribute list.

use markergate_types::{MarkerError, Result, constants::WILDCARD_PREFIX};

use crate::NameNormalizer;

/// Append `to_add` to `current`. Fails on the first name already present,
/// including a name repeated within `to_add`.
pub fn add_required(current: &[String], to_add: &[String]) -> Result<Vec<String>> {
    let mut updated = current.to_vec();
    for name in to_add {
        if updated.contains(name) {
            return Err(MarkerError::AlreadyRequired(name.clone()));
        }
        updated.push(name.clone());
    }
    Ok(updated)
}

/// Remove every name in `to_remove` from `current`, keeping survivors in
/// order. Fails on the first name that is not present.
pub fn remove_required(current: &[String], to_remove: &[String]) -> Result<Vec<String>> {
    if let Some(absent) = to_remove.iter().find(|name| !current.contains(*name)) {
        return Err(MarkerError::NotRequired(absent.clone()));
    }
    Ok(current
        .iter()
        .filter(|name| !to_remove.contains(*name))
        .cloned()
        .collect())
}

/// Normalize each name through `normalizer`, carrying a leading `*.`
/// wildcard across untouched. The raw length is checked against `max_length`.
pub fn normalize_required(
    names: &[String],
    max_length: usize,
    normalizer: &dyn NameNormalizer,
) -> Result<Vec<String>> {
    names
        .iter()
        .map(|raw| {
            if raw.len() > max_length {
                return Err(MarkerError::TooLong {
                    name: raw.clone(),
                    length: raw.len(),
                    max: max_length,
                });
            }
            let (prefix, name) = match raw.strip_prefix(WILDCARD_PREFIX) {
                Some(rest) => (WILDCARD_PREFIX, rest),
                None => ("", raw.as_str()),
            };
            let normalized = normalizer.normalize(name)?;
            Ok(format!("{prefix}{normalized}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    struct Lowercase;

    impl NameNormalizer for Lowercase {
        fn normalize(&self, name: &str) -> Result<String> {
            if name.contains(' ') {
                return Err(MarkerError::NormalizationFailed {
                    name: name.to_string(),
                    reason: "contains whitespace".to_string(),
                });
            }
            Ok(name.to_lowercase())
        }
    }

    #[test]
    fn add_appends_in_order() {
        let updated = add_required(&names(&["a.io"]), &names(&["b.io", "c.io"])).unwrap();
        assert_eq!(updated, names(&["a.io", "b.io", "c.io"]));
    }

    #[test]
    fn add_same_name_twice_fails() {
        let once = add_required(&[], &names(&["kyc.io"])).unwrap();
        let err = add_required(&once, &names(&["kyc.io"])).unwrap_err();
        assert!(matches!(err, MarkerError::AlreadyRequired(n) if n == "kyc.io"));
    }

    #[test]
    fn add_duplicate_within_batch_fails() {
        let err = add_required(&[], &names(&["x.io", "x.io"])).unwrap_err();
        assert!(matches!(err, MarkerError::AlreadyRequired(_)));
    }

    #[test]
    fn remove_keeps_survivor_order() {
        let current = names(&["a.io", "b.io", "c.io", "d.io"]);
        let updated = remove_required(&current, &names(&["c.io", "a.io"])).unwrap();
        assert_eq!(updated, names(&["b.io", "d.io"]));
    }

    #[test]
    fn remove_absent_fails_on_first_absent() {
        let current = names(&["a.io"]);
        let err = remove_required(&current, &names(&["a.io", "z.io", "y.io"])).unwrap_err();
        assert!(matches!(err, MarkerError::NotRequired(n) if n == "z.io"));
    }

    #[test]
    fn normalize_preserves_wildcard() {
        let out = normalize_required(&names(&["*.KYC.Example", "AML.io"]), 100, &Lowercase)
            .unwrap();
        assert_eq!(out, names(&["*.kyc.example", "aml.io"]));
    }

    #[test]
    fn normalize_checks_raw_length() {
        let err = normalize_required(&names(&["*.abcd"]), 5, &Lowercase).unwrap_err();
        assert!(matches!(err, MarkerError::TooLong { length: 6, max: 5, .. }));
        assert!(normalize_required(&names(&["*.abc"]), 5, &Lowercase).is_ok());
    }

    #[test]
    fn normalize_propagates_normalizer_failure() {
        let err = normalize_required(&names(&["bad name"]), 100, &Lowercase).unwrap_err();
        assert!(matches!(err, MarkerError::NormalizationFailed { .. }));
    }
}
