//! Field-level validation results and shared predicates.
//!
//! Validation failures are values, not errors: each check produces a map
//! keyed by stable field name, consumed by the presentation layer to render
//! inline messages and gate forward navigation.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// An ordered map of field name to validation message.
///
/// Serializes as a plain JSON object for the presentation layer; it is
/// produced fresh by validation and never read back in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Get the message for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Check whether a field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields in error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over (field, message) pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// The field names in error, in order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.keys().copied().collect()
    }

    /// Keep only the errors whose field satisfies the predicate.
    pub fn retain_fields(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|field, _| keep(field));
    }

    /// Convert into `Ok(())` when empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Basic email shape: non-empty local part, one `@`, dotted domain.
pub(crate) fn is_email(s: &str) -> bool {
    if s.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Non-empty and composed entirely of ASCII digits.
pub(crate) fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Digits only, with a length in the given inclusive range.
pub(crate) fn is_digits_len(s: &str, min: usize, max: usize) -> bool {
    is_digits(s) && s.len() >= min && s.len() <= max
}

/// `MM/YY` with month 01-12.
pub(crate) fn is_expiry(s: &str) -> bool {
    let Some((month, year)) = s.split_once('/') else {
        return false;
    };
    if !is_digits_len(month, 2, 2) || !is_digits_len(year, 2, 2) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(m) if (1..=12).contains(&m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_map_ordering() {
        let mut errors = ValidationErrors::new();
        errors.add("last_name", "Required");
        errors.add("email", "Invalid email");

        assert_eq!(errors.fields(), vec!["email", "last_name"]);
        assert_eq!(errors.get("email"), Some("Invalid email"));
        assert!(errors.contains("last_name"));
    }

    #[test]
    fn test_serializes_to_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "Required");
        errors.add("cvv", "CVV must be 3-4 digits");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["email"], "Required");
        assert_eq!(json["cvv"], "CVV must be 3-4 digits");
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("email", "Required");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_email("jane@example.com"));
        assert!(is_email("a.b+c@mail.example.co.ke"));

        assert!(!is_email("not-an-email"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("jane@example"));
        assert!(!is_email("jane@.com"));
        assert!(!is_email("ja ne@example.com"));
        assert!(!is_email("jane@@example.com"));
    }

    #[test]
    fn test_digit_predicates() {
        assert!(is_digits("712345678"));
        assert!(!is_digits(""));
        assert!(!is_digits("71234567a"));
        assert!(is_digits_len("1234", 3, 4));
        assert!(!is_digits_len("12", 3, 4));
        assert!(!is_digits_len("12345", 3, 4));
    }

    #[test]
    fn test_expiry_shapes() {
        assert!(is_expiry("01/26"));
        assert!(is_expiry("12/30"));

        assert!(!is_expiry("13/26"));
        assert!(!is_expiry("00/26"));
        assert!(!is_expiry("1/26"));
        assert!(!is_expiry("01-26"));
        assert!(!is_expiry("01/2026"));
    }
}
