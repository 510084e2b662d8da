use serde::{Deserialize, Serialize};

/// A card payment request as submitted by the caller.
///
/// Transient and identity-less: it exists for one processing attempt. All
/// fields arrive unvalidated; missing fields fall back to empty or zero
/// values and are caught by validation rather than by the deserializer.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRequest {
    /// Card number, digits with optional space separators.
    pub card_number: String,
    /// Expiry month, expected 1 through 12.
    pub expiry_month: i32,
    /// Expiry year, four digits.
    pub expiry_year: i32,
    /// Currency code, matched case-insensitively.
    pub currency: String,
    /// Amount in the currency's minor unit.
    pub amount: i64,
    /// Card verification value, 3 or 4 digits.
    pub cvv: String,
}
