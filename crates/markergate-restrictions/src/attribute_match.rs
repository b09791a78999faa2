//! Required-attribute matching, including `*.` wildcard suffixes.

use markergate_types::constants::WILDCARD_PREFIX;

/// Does `attribute` satisfy `required`?
///
/// A `*.suffix` pattern matches any name ending in `.suffix` (only the `*`
/// is dropped, the `.` stays part of the suffix) and the bare `suffix`
/// itself. Anything else needs an exact match. An empty pattern never matches.
#[must_use]
pub fn matches(required: &str, attribute: &str) -> bool {
    if required.is_empty() {
        return false;
    }
    if let Some(base) = required.strip_prefix(WILDCARD_PREFIX) {
        return attribute.ends_with(&required[1..]) || (!base.is_empty() && attribute == base);
    }
    required == attribute
}

/// Required patterns that no held attribute satisfies, in `required` order.
#[must_use]
pub fn find_missing<S: AsRef<str>>(required: &[String], held: &[S]) -> Vec<String> {
    required
        .iter()
        .filter(|req| !held.iter().any(|attr| matches(req, attr.as_ref())))
        .cloned()
        .collect()
}
