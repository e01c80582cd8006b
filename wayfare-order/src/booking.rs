use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};
use wayfare_core::booking::MISSING_PAYLOAD;
use wayfare_core::{validate_booking_payload, BookingRecord, BookingRepository, CoreError, CoreResult};

/// Validates booking payloads and persists them in minimized form.
pub struct BookingService {
    repository: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }

    /// Validate, strip payment data, append. Validation messages are returned
    /// verbatim; storage failures collapse to a generic persistence error.
    pub async fn execute(&self, details: Value) -> CoreResult<BookingRecord> {
        if let Some(message) = validate_booking_payload(&details) {
            info!("Rejected booking payload: {}", message);
            return Err(CoreError::ValidationError(message.to_string()));
        }
        let Value::Object(payload) = details else {
            return Err(CoreError::ValidationError(MISSING_PAYLOAD.to_string()));
        };

        let record = BookingRecord::from_payload(payload);
        self.repository.append_booking(&record).await.map_err(|e| {
            error!("Failed to persist booking: {}", e);
            CoreError::PersistenceError(e.to_string())
        })?;

        Ok(record)
    }
}
