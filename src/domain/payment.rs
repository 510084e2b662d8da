use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::request::PaymentRequest;

/// Final state of a single processing attempt.
///
/// `Rejected` means validation failed before the bank was contacted and no
/// record was created. `Authorized` and `Declined` carry the bank's decision
/// and always come with a stored record.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum PaymentStatus {
    Rejected,
    Authorized,
    Declined,
}

/// Currencies the gateway accepts.
///
/// Membership is checked against this set directly; anything else is
/// rejected during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Case-insensitive lookup of a currency code.
    ///
    /// Surrounding whitespace is tolerated, the same way codes are
    /// normalised before they are stored.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            "GBP" => Some(Self::Gbp),
            _ => None,
        }
    }
}

/// A processed payment as held by the store.
///
/// Created only once the bank has produced a decision; the record is
/// immutable from then on. The full card number is never kept.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Identifier assigned at creation, unique per record.
    pub id: Uuid,
    /// The bank's decision for this attempt.
    pub status: PaymentStatus,
    /// Last four digits of the card number, as a number.
    pub card_number_last_four: i32,
    /// Expiry month as submitted, 1 through 12.
    pub expiry_month: i32,
    /// Expiry year as submitted.
    pub expiry_year: i32,
    /// Upper-cased currency code.
    pub currency: String,
    /// Amount in the currency's minor unit.
    pub amount: i64,
}

impl Payment {
    /// Builds the record for a request the bank has decided on.
    ///
    /// Assigns a fresh id, keeps only the last four card digits and
    /// upper-cases the currency code.
    pub fn record(request: &PaymentRequest, status: PaymentStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            status,
            card_number_last_four: last_four_digits(&request.card_number),
            expiry_month: request.expiry_month,
            expiry_year: request.expiry_year,
            currency: request.currency.trim().to_uppercase(),
            amount: request.amount,
        }
    }
}

/// Last four digit characters of a card number, as an integer.
///
/// Separators are skipped, so `"1234 5678 9012 3456"` gives `3456`. Leading
/// zeros collapse the same way integer parsing would, `"...0042"` gives `42`.
pub fn last_four_digits(card_number: &str) -> i32 {
    card_number
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0, |acc, d| (acc * 10 + d as i32) % 10_000)
}
