use tracing::{info, warn};
use uuid::Uuid;

use crate::application::validator::{PaymentValidator, ValidationError};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::ports::{BankGatewayBox, PaymentStoreBox};
use crate::domain::request::PaymentRequest;
use crate::error::Result;

/// Message reported alongside a payment the bank declined.
pub const DECLINED_MESSAGE: &str = "Payment is Declined by bank";

/// Outcome of a processing attempt that produced a business answer.
///
/// Bank transport failures are not outcomes; they surface as errors from
/// [`PaymentService::process`] and leave no record behind.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// Validation failed; the bank was not contacted and nothing was stored.
    Rejected(ValidationError),
    /// The bank decided and the record was stored.
    Completed {
        payment: Payment,
        /// `None` when authorized, the fixed decline message otherwise.
        error_message: Option<String>,
    },
}

impl ProcessOutcome {
    /// Status of the attempt, independent of the variant shape.
    pub fn status(&self) -> PaymentStatus {
        match self {
            Self::Rejected(_) => PaymentStatus::Rejected,
            Self::Completed { payment, .. } => payment.status,
        }
    }
}

/// The main entry point for processing card payments.
///
/// `PaymentService` runs the validate, authorize, store pipeline for each
/// request. It owns the storage and bank ports and holds no per-request
/// state, so a single instance serves any number of concurrent calls.
pub struct PaymentService {
    store: PaymentStoreBox,
    gateway: BankGatewayBox,
    validator: PaymentValidator,
}

impl PaymentService {
    /// Creates a new `PaymentService` instance.
    ///
    /// # Arguments
    ///
    /// * `store` - The store for processed payments.
    /// * `gateway` - The bank reached for authorization decisions.
    pub fn new(store: PaymentStoreBox, gateway: BankGatewayBox) -> Self {
        Self {
            store,
            gateway,
            validator: PaymentValidator::new(),
        }
    }

    /// Submits a payment request for processing.
    ///
    /// Validation failures are ordinary outcomes. A failing bank call is an
    /// error for the whole attempt; the record is stored only after the bank
    /// has answered, so an attempt that errors stores nothing.
    pub async fn process(&self, request: PaymentRequest) -> Result<ProcessOutcome> {
        if let Err(reason) = self.validator.validate(Some(&request)) {
            warn!("Payment Rejected: {reason}");
            return Ok(ProcessOutcome::Rejected(reason));
        }

        let decision = self.gateway.authorize(&request).await?;
        let status = if decision.authorized {
            PaymentStatus::Authorized
        } else {
            PaymentStatus::Declined
        };

        let payment = Payment::record(&request, status);
        self.store.add(payment.clone()).await?;
        info!("Payment {} processed with status {:?}", payment.id, status);

        let error_message =
            (status == PaymentStatus::Declined).then(|| DECLINED_MESSAGE.to_string());
        Ok(ProcessOutcome::Completed {
            payment,
            error_message,
        })
    }

    /// Fetches a stored payment; `Ok(None)` means the id is unknown.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Payment>> {
        self.store.get(id).await
    }
}
