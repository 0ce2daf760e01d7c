//! Shipping information record.

use crate::checkout::validate::{is_digits, is_email, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Default dialing prefix for the storefront's market.
pub const DEFAULT_AREA_CODE: &str = "+254";

/// Shipping details collected in the first checkout step.
///
/// All string fields are required non-empty except `area_code`, which
/// carries a fixed default. `save_info` is a persistence preference, not a
/// validated field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingInfo {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// County.
    pub county: String,
    /// Subcounty.
    pub subcounty: String,
    /// Ward.
    pub ward: String,
    /// Street address.
    pub street_address: String,
    /// Phone dialing prefix.
    pub area_code: String,
    /// Phone number, digits only.
    pub phone_number: String,
    /// Whether to remember this record for the next checkout.
    pub save_info: bool,
}

impl ShippingInfo {
    /// Full name for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Serialize to the JSON string persisted on the order header.
    pub fn delivery_address(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Validate all fields, returning an error map keyed by field name.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let required: [(&'static str, &str); 6] = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("county", &self.county),
            ("subcounty", &self.subcounty),
            ("ward", &self.ward),
            ("street_address", &self.street_address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.add(field, "Required");
            }
        }

        if self.email.trim().is_empty() {
            errors.add("email", "Required");
        } else if !is_email(&self.email) {
            errors.add("email", "Enter a valid email address");
        }

        if self.phone_number.trim().is_empty() {
            errors.add("phone_number", "Required");
        } else if !is_digits(&self.phone_number) {
            errors.add("phone_number", "Digits only");
        }

        errors.into_result()
    }
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            county: String::new(),
            subcounty: String::new(),
            ward: String::new(),
            street_address: String::new(),
            area_code: DEFAULT_AREA_CODE.to_string(),
            phone_number: String::new(),
            save_info: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Wanjiru".to_string(),
            last_name: "Kamau".to_string(),
            email: "wanjiru@example.com".to_string(),
            county: "Nairobi".to_string(),
            subcounty: "Westlands".to_string(),
            ward: "Parklands".to_string(),
            street_address: "12 School Lane".to_string(),
            area_code: DEFAULT_AREA_CODE.to_string(),
            phone_number: "712345678".to_string(),
            save_info: false,
        }
    }

    #[test]
    fn test_default_has_area_code() {
        let info = ShippingInfo::default();
        assert_eq!(info.area_code, "+254");
        assert!(!info.save_info);
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(valid_shipping().validate().is_ok());
    }

    #[test]
    fn test_empty_record_flags_required_fields() {
        let errors = ShippingInfo::default().validate().unwrap_err();
        for field in [
            "first_name",
            "last_name",
            "email",
            "county",
            "subcounty",
            "ward",
            "street_address",
            "phone_number",
        ] {
            assert!(errors.contains(field), "missing error for {}", field);
        }
        // area_code carries a fixed default and is never flagged
        assert!(!errors.contains("area_code"));
    }

    #[test]
    fn test_malformed_email_flagged() {
        let mut info = valid_shipping();
        info.email = "not-an-email".to_string();
        let errors = info.validate().unwrap_err();
        assert_eq!(errors.fields(), vec!["email"]);
    }

    #[test]
    fn test_phone_must_be_digits() {
        let mut info = valid_shipping();
        info.phone_number = "07-1234".to_string();
        let errors = info.validate().unwrap_err();
        assert!(errors.contains("phone_number"));
    }

    #[test]
    fn test_delivery_address_round_trips() {
        let info = valid_shipping();
        let json = info.delivery_address().unwrap();
        let back: ShippingInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
