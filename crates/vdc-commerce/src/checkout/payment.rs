//! Payment information as a discriminated union.
//!
//! Fields belonging to the inactive variant do not exist at all, so stale
//! cross-variant data cannot survive a method switch: switching replaces the
//! value wholesale with the empty form of the new variant.

use crate::checkout::validate::{is_digits_len, is_expiry, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment.
    #[default]
    Visa,
    /// M-Pesa mobile money.
    Mpesa,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Visa => "visa",
            PaymentMethod::Mpesa => "mpesa",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Visa => "Visa",
            PaymentMethod::Mpesa => "M-Pesa",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "visa" => Some(PaymentMethod::Visa),
            "mpesa" => Some(PaymentMethod::Mpesa),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment details collected in the second checkout step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "payment_method", rename_all = "lowercase")]
pub enum PaymentInfo {
    /// Card payment details.
    Visa {
        /// Name on the card.
        card_name: String,
        /// Card number, 16 digits.
        card_number: String,
        /// Expiry in MM/YY form.
        expiry_date: String,
        /// Card verification value, 3-4 digits.
        cvv: String,
    },
    /// M-Pesa payment details.
    Mpesa {
        /// M-Pesa phone number, 9-10 digits.
        mpesa_phone_number: String,
    },
}

impl PaymentInfo {
    /// The empty form of the given method, used as the value after a
    /// method switch.
    pub fn empty(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Visa => PaymentInfo::Visa {
                card_name: String::new(),
                card_number: String::new(),
                expiry_date: String::new(),
                cvv: String::new(),
            },
            PaymentMethod::Mpesa => PaymentInfo::Mpesa {
                mpesa_phone_number: String::new(),
            },
        }
    }

    /// The active payment method.
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentInfo::Visa { .. } => PaymentMethod::Visa,
            PaymentInfo::Mpesa { .. } => PaymentMethod::Mpesa,
        }
    }

    /// Field names owned by the given method. Used to drop touched marks
    /// when the method switches.
    pub fn fields_of(method: PaymentMethod) -> &'static [&'static str] {
        match method {
            PaymentMethod::Visa => &["card_name", "card_number", "expiry_date", "cvv"],
            PaymentMethod::Mpesa => &["mpesa_phone_number"],
        }
    }

    /// Validate the active variant only.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match self {
            PaymentInfo::Visa {
                card_name,
                card_number,
                expiry_date,
                cvv,
            } => {
                if card_name.trim().is_empty() {
                    errors.add("card_name", "Required");
                }
                if !is_digits_len(card_number, 16, 16) {
                    errors.add("card_number", "Card number must be 16 digits");
                }
                if !is_expiry(expiry_date) {
                    errors.add("expiry_date", "Use MM/YY");
                }
                if !is_digits_len(cvv, 3, 4) {
                    errors.add("cvv", "CVV must be 3-4 digits");
                }
            }
            PaymentInfo::Mpesa { mpesa_phone_number } => {
                if !is_digits_len(mpesa_phone_number, 9, 10) {
                    errors.add("mpesa_phone_number", "Phone number must be 9-10 digits");
                }
            }
        }

        errors.into_result()
    }
}

impl Default for PaymentInfo {
    fn default() -> Self {
        PaymentInfo::empty(PaymentMethod::Visa)
    }
}
