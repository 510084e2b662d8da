use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::domain::ports::{BankGateway, GatewayDecision};
use crate::domain::request::PaymentRequest;
use crate::error::{PaymentError, Result};

/// Wire shape the bank expects for an authorization call.
///
/// The expiry travels as a single `month/year` string with no zero padding,
/// so June 2030 is `"6/2030"`.
#[derive(Debug, Serialize)]
struct BankPaymentRequest<'a> {
    card_number: &'a str,
    expiry_date: String,
    currency: &'a str,
    amount: i64,
    cvv: &'a str,
}

impl<'a> BankPaymentRequest<'a> {
    fn from_request(request: &'a PaymentRequest) -> Self {
        Self {
            card_number: &request.card_number,
            expiry_date: format!("{}/{}", request.expiry_month, request.expiry_year),
            currency: &request.currency,
            amount: request.amount,
            cvv: &request.cvv,
        }
    }
}

/// Bank gateway adapter speaking JSON over HTTP.
///
/// Issues exactly one POST per authorization; the client timeout bounds how
/// long a call may stay in flight. Transport and contract failures come back
/// as errors, never as a partial decision.
pub struct HttpBankGateway {
    http: reqwest::Client,
    url: String,
}

impl HttpBankGateway {
    /// Builds a gateway client for the given authorization endpoint.
    ///
    /// # Arguments
    ///
    /// * `url` - Full URL of the bank's payments endpoint.
    /// * `timeout` - Upper bound on a single authorization call.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl BankGateway for HttpBankGateway {
    async fn authorize(&self, request: &PaymentRequest) -> Result<GatewayDecision> {
        let response = self
            .http
            .post(&self.url)
            .json(&BankPaymentRequest::from_request(request))
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(PaymentError::BankResponseError(
                "bank returned an empty response".to_string(),
            ));
        }

        let decision: GatewayDecision = serde_json::from_slice(&body)
            .map_err(|e| PaymentError::BankResponseError(e.to_string()))?;
        debug!("Bank decision: authorized={}", decision.authorized);
        Ok(decision)
    }
}
