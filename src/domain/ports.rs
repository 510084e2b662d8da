use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payment::Payment;
use super::request::PaymentRequest;
use crate::error::Result;

/// Store of processed payments, keyed by their generated id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Inserts a freshly created record. Ids are generated per record, so no
    /// uniqueness conflict can arise.
    async fn add(&self, payment: Payment) -> Result<()>;
    /// Looks up a record; a missing id is `Ok(None)`, never an error.
    async fn get(&self, id: Uuid) -> Result<Option<Payment>>;
}

/// The acquiring bank, reached for an authorization decision.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankGateway: Send + Sync {
    /// Submits one request and returns the bank's decision.
    ///
    /// Transport failures, non-success statuses and unusable response bodies
    /// all surface as errors; there is no partial decision and no retry.
    async fn authorize(&self, request: &PaymentRequest) -> Result<GatewayDecision>;
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type BankGatewayBox = Box<dyn BankGateway>;

/// The bank's answer to an authorization request.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct GatewayDecision {
    /// Whether the bank authorized the payment.
    pub authorized: bool,
    /// Reference issued by the bank, absent when it declines.
    #[serde(with = "nullable_uuid", default)]
    pub authorization_code: Option<Uuid>,
}

/// Wire codec for the bank's nullable authorization code.
///
/// Present values travel as strings and absent values as JSON `null`. An
/// empty or blank string maps to the nil id. Any other string that is not a
/// well-formed id is an error, as is any non-string token.
pub mod nullable_uuid {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S>(value: &Option<Uuid>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(id) => serializer.serialize_str(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(Some(Uuid::nil())),
            Some(raw) => raw
                .parse::<Uuid>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid authorization code '{raw}'"))),
        }
    }
}
