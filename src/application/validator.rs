use chrono::{NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::domain::payment::Currency;
use crate::domain::request::PaymentRequest;

/// Reasons a payment request fails validation, with their fixed messages.
///
/// The messages are part of the API contract; callers see them verbatim in
/// rejection responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request cannot be null")]
    MissingRequest,
    #[error("Invalid card number")]
    InvalidCardNumber,
    #[error("Invalid or expired card expiry date")]
    InvalidExpiry,
    #[error("Unsupported currency '{0}'")]
    UnsupportedCurrency(String),
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Invalid CVV")]
    InvalidCvv,
}

/// Validates payment requests against the gateway's rule set.
///
/// Rules run in a fixed order and the first failure wins; later rules are
/// not evaluated, so a request with several problems reports only the first.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaymentValidator;

impl PaymentValidator {
    pub fn new() -> Self {
        Self
    }

    /// Checks a request, `None` standing for an absent body.
    pub fn validate(&self, request: Option<&PaymentRequest>) -> Result<(), ValidationError> {
        let request = request.ok_or(ValidationError::MissingRequest)?;

        if !is_valid_card_number(&request.card_number) {
            return Err(ValidationError::InvalidCardNumber);
        }
        if !is_valid_expiry(request.expiry_month, request.expiry_year) {
            return Err(ValidationError::InvalidExpiry);
        }
        if Currency::from_code(&request.currency).is_none() {
            return Err(ValidationError::UnsupportedCurrency(request.currency.clone()));
        }
        if request.amount <= 0 {
            return Err(ValidationError::InvalidAmount);
        }
        if !is_valid_cvv(&request.cvv) {
            return Err(ValidationError::InvalidCvv);
        }
        Ok(())
    }
}

/// 14 to 19 digits once spaces are removed; any other character fails.
fn is_valid_card_number(card_number: &str) -> bool {
    let digits: Vec<char> = card_number.chars().filter(|c| *c != ' ').collect();
    (14..=19).contains(&digits.len()) && digits.iter().all(|c| c.is_ascii_digit())
}

/// A card expires at midnight UTC at the start of the last day of its
/// expiry month; that instant must lie strictly in the future. Out-of-range
/// months and years that produce no valid date are simply invalid.
fn is_valid_expiry(month: i32, year: i32) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }
    match month_end(year, month) {
        Some(cutoff) => cutoff > Utc::now().naive_utc(),
        None => false,
    }
}

/// Midnight at the start of the last day of the given month.
fn month_end(year: i32, month: i32) -> Option<NaiveDateTime> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month as u32, 1)?
        .pred_opt()?
        .and_hms_opt(0, 0, 0)
}

/// Exactly 3 or 4 characters, all digits.
fn is_valid_cvv(cvv: &str) -> bool {
    (cvv.len() == 3 || cvv.len() == 4) && cvv.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn next_year() -> i32 {
        Utc::now().year() + 1
    }

    fn valid_request() -> PaymentRequest {
        PaymentRequest {
            card_number: "4111111111111111".to_string(),
            expiry_month: 12,
            expiry_year: next_year(),
            currency: "USD".to_string(),
            amount: 100,
            cvv: "123".to_string(),
        }
    }

    fn validate(request: &PaymentRequest) -> Result<(), ValidationError> {
        PaymentValidator::new().validate(Some(request))
    }

    #[test]
    fn test_valid_request_passes() {
        assert_eq!(validate(&valid_request()), Ok(()));
    }

    #[test]
    fn test_absent_request_is_rejected() {
        let result = PaymentValidator::new().validate(None);
        assert_eq!(result, Err(ValidationError::MissingRequest));
    }

    #[test]
    fn test_card_number_length_bounds() {
        let cases = [
            ("", false),
            ("1234567890123", false),
            ("12345678901234", true),
            ("1234567890123456789", true),
            ("12345678901234567890", false),
        ];

        for (card_number, expected) in cases {
            let request = PaymentRequest {
                card_number: card_number.to_string(),
                ..valid_request()
            };
            assert_eq!(validate(&request).is_ok(), expected, "card {card_number:?}");
        }
    }

    #[test]
    fn test_card_number_spaces_are_ignored() {
        let request = PaymentRequest {
            card_number: "4111 1111 1111 1111".to_string(),
            ..valid_request()
        };
        assert_eq!(validate(&request), Ok(()));
    }

    #[test]
    fn test_card_number_non_digits_are_rejected() {
        for card_number in ["4111-1111-1111-1111", "41111111a1111111"] {
            let request = PaymentRequest {
                card_number: card_number.to_string(),
                ..valid_request()
            };
            assert_eq!(validate(&request), Err(ValidationError::InvalidCardNumber));
        }
    }

    #[test]
    fn test_expiry_month_out_of_range() {
        for month in [0, 13, -1] {
            let request = PaymentRequest {
                expiry_month: month,
                ..valid_request()
            };
            assert_eq!(validate(&request), Err(ValidationError::InvalidExpiry));
        }
    }

    #[test]
    fn test_expiry_in_the_past() {
        let request = PaymentRequest {
            expiry_month: 12,
            expiry_year: Utc::now().year() - 1,
            ..valid_request()
        };
        assert_eq!(validate(&request), Err(ValidationError::InvalidExpiry));
    }

    #[test]
    fn test_expiry_in_the_future() {
        for (month, year) in [(1, next_year()), (12, next_year()), (6, next_year() + 5)] {
            let request = PaymentRequest {
                expiry_month: month,
                expiry_year: year,
                ..valid_request()
            };
            assert_eq!(validate(&request), Ok(()), "expiry {month}/{year}");
        }
    }

    #[test]
    fn test_expiry_year_out_of_calendar_range() {
        let request = PaymentRequest {
            expiry_month: 1,
            expiry_year: 300_000,
            ..valid_request()
        };
        assert_eq!(validate(&request), Err(ValidationError::InvalidExpiry));
    }

    #[test]
    fn test_month_end_covers_leap_years() {
        let cases = [
            (2024, 2, 29),
            (2023, 2, 28),
            (2030, 4, 30),
            (2030, 12, 31),
        ];
        for (year, month, day) in cases {
            let end = month_end(year, month).unwrap();
            assert_eq!(end.date(), NaiveDate::from_ymd_opt(year, month as u32, day).unwrap());
        }
    }

    #[test]
    fn test_unsupported_currency_echoes_the_input() {
        let request = PaymentRequest {
            currency: "JPY".to_string(),
            ..valid_request()
        };
        let result = validate(&request);
        assert_eq!(
            result,
            Err(ValidationError::UnsupportedCurrency("JPY".to_string()))
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Unsupported currency 'JPY'"
        );
    }

    #[test]
    fn test_supported_currencies_ignore_case() {
        for currency in ["usd", "Eur", "GBP"] {
            let request = PaymentRequest {
                currency: currency.to_string(),
                ..valid_request()
            };
            assert_eq!(validate(&request), Ok(()), "currency {currency}");
        }
    }

    #[test]
    fn test_amount_must_be_positive() {
        for amount in [0, -5] {
            let request = PaymentRequest {
                amount,
                ..valid_request()
            };
            assert_eq!(validate(&request), Err(ValidationError::InvalidAmount));
        }
    }

    #[test]
    fn test_cvv_shapes() {
        let cases = [
            ("", false),
            ("12", false),
            ("123", true),
            ("1234", true),
            ("12345", false),
            ("12a", false),
        ];

        for (cvv, expected) in cases {
            let request = PaymentRequest {
                cvv: cvv.to_string(),
                ..valid_request()
            };
            assert_eq!(validate(&request).is_ok(), expected, "cvv {cvv:?}");
        }
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let request = PaymentRequest {
            card_number: "123".to_string(),
            currency: "JPY".to_string(),
            amount: 0,
            ..valid_request()
        };
        assert_eq!(validate(&request), Err(ValidationError::InvalidCardNumber));
    }

    #[test]
    fn test_messages_are_stable() {
        assert_eq!(
            ValidationError::MissingRequest.to_string(),
            "Request cannot be null"
        );
        assert_eq!(
            ValidationError::InvalidCardNumber.to_string(),
            "Invalid card number"
        );
        assert_eq!(
            ValidationError::InvalidExpiry.to_string(),
            "Invalid or expired card expiry date"
        );
        assert_eq!(
            ValidationError::InvalidAmount.to_string(),
            "Amount must be greater than zero"
        );
        assert_eq!(ValidationError::InvalidCvv.to_string(), "Invalid CVV");
    }
}
