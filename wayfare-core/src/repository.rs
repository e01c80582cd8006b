use async_trait::async_trait;
use serde_json::Value;

use crate::booking::BookingRecord;

/// Storage for confirmed bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Append a record to the store. The whole store is rewritten; a failure
    /// leaves the previous contents in place.
    async fn append_booking(
        &self,
        record: &BookingRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// All stored bookings, oldest first.
    async fn list_bookings(&self) -> Result<Vec<Value>, Box<dyn std::error::Error + Send + Sync>>;
}
