use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Proof of a successful charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub transaction_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Invalid payment payload")]
    InvalidPayload,
    #[error("Payment declined: {0}")]
    Declined(String),
}

#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    /// Charge the payment details attached to a booking request.
    ///
    /// `details` is the raw `payment` value of the request (may be `Null`).
    async fn process_payment(&self, details: &Value) -> Result<PaymentReceipt, PaymentError>;
}
