use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;
use wayfare_core::{PaymentAdapter, PaymentError, PaymentReceipt};
use wayfare_shared::{redact_card_number, Masked};

/// Stand-in payment gateway: any payment object is accepted and charged.
pub struct MockPaymentAdapter;

#[async_trait]
impl PaymentAdapter for MockPaymentAdapter {
    async fn process_payment(&self, details: &Value) -> Result<PaymentReceipt, PaymentError> {
        if !details.is_object() {
            return Err(PaymentError::InvalidPayload);
        }

        let card = details
            .get("cardNumber")
            .and_then(Value::as_str)
            .map(redact_card_number)
            .unwrap_or_else(|| "none".to_string());
        info!("Processing mock payment (card {}): {:?}", card, Masked(details));

        Ok(PaymentReceipt {
            transaction_id: format!("txn_{}", Uuid::new_v4().simple()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_object_payment_succeeds() {
        let receipt = MockPaymentAdapter
            .process_payment(&json!({ "token": "tok_visa" }))
            .await
            .unwrap();
        assert!(receipt.transaction_id.starts_with("txn_"));
    }

    #[tokio::test]
    async fn test_transaction_ids_are_unique() {
        let details = json!({ "cardNumber": "4242 4242 4242 4242" });
        let a = MockPaymentAdapter.process_payment(&details).await.unwrap();
        let b = MockPaymentAdapter.process_payment(&details).await.unwrap();
        assert_ne!(a.transaction_id, b.transaction_id);
    }

    #[tokio::test]
    async fn test_non_object_payment_is_rejected() {
        for details in [Value::Null, json!("tok_visa"), json!(42)] {
            let err = MockPaymentAdapter.process_payment(&details).await.unwrap_err();
            assert!(matches!(err, PaymentError::InvalidPayload));
        }
    }
}
