//! Stable identity of an authenticated account.
//!
//! Identities arrive from outside (handshake query, `authenticate` events,
//! message payloads) as loosely typed JSON. [`UserId`] normalizes them to a
//! non-empty string so the rest of the crate never sees an empty identity.

use std::fmt;

use serde::Serialize;

/// Non-empty user identifier.
///
/// Numbers are accepted and stored in their decimal form, so `42` and
/// `"42"` name the same user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parses a raw string. Returns `None` for the empty string.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    /// Extracts an identity from a JSON value.
    ///
    /// Strings and numbers are identities; everything else (`null`,
    /// booleans, arrays, objects) counts as absent.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Self::parse(s),
            serde_json::Value::Number(n) => Self::parse(&number_to_id(n)),
            _ => None,
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Renders a JSON number the way it is written as an identity.
///
/// Integral floats (`1.0`, `1e2`) collapse to their integer form so they
/// name the same user as `1` and `100`.
fn number_to_id(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_string_is_absent() {
        assert!(UserId::parse("").is_none());
        assert!(UserId::from_json(&json!("")).is_none());
    }

    #[test]
    fn whitespace_is_kept_verbatim() {
        let id = UserId::parse(" u1 ");
        assert_eq!(id.as_ref().map(UserId::as_str), Some(" u1 "));
    }

    #[test]
    fn numbers_normalize_to_strings() {
        assert_eq!(UserId::from_json(&json!(42)), UserId::parse("42"));
    }

    #[test]
    fn integral_floats_match_integer_ids() {
        assert_eq!(UserId::from_json(&json!(1.0)), UserId::parse("1"));
        assert_eq!(UserId::from_json(&json!(1e2)), UserId::parse("100"));
        assert_eq!(UserId::from_json(&json!(-0.0)), UserId::parse("0"));
    }

    #[test]
    fn integral_floats_parsed_from_text_match_integer_ids() {
        let Ok(value) = serde_json::from_str::<serde_json::Value>("1e2") else {
            panic!("valid json");
        };
        assert_eq!(UserId::from_json(&value), UserId::parse("100"));
    }

    #[test]
    fn fractional_numbers_keep_their_fraction() {
        assert_eq!(UserId::from_json(&json!(1.5)), UserId::parse("1.5"));
    }

    #[test]
    fn non_scalar_values_are_absent() {
        for value in [json!(null), json!(true), json!([1]), json!({"id": "u1"})] {
            assert!(UserId::from_json(&value).is_none(), "{value}");
        }
    }

    #[test]
    fn ordering_is_lexicographic() {
        let (Some(a), Some(b)) = (UserId::parse("alice"), UserId::parse("bob")) else {
            panic!("valid ids");
        };
        assert!(a < b);
    }
}
