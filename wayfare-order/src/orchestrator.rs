use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};
use wayfare_core::{
    CoreError, CoreResult, DestinationResolver, FlightOffer, HotelOffer, OfferProvider,
    PaymentAdapter,
};

use crate::booking::BookingService;

pub const UNRESOLVED_DESTINATION: &str = "Could not determine destination from query.";
pub const BOOKING_SUCCESSFUL: &str = "Booking successful";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub destination: Option<String>,
    pub destination_code: Option<String>,
    pub flights: Vec<FlightOffer>,
    pub hotels: Vec<HotelOffer>,
}

#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub transaction_id: String,
    pub message: &'static str,
}

/// Sequences the search and booking flows. Holds no mutable state; every
/// collaborator is injected at construction.
pub struct TravelOrchestrator {
    resolver: Arc<DestinationResolver>,
    flights: Arc<dyn OfferProvider<FlightOffer>>,
    hotels: Arc<dyn OfferProvider<HotelOffer>>,
    payments: Arc<dyn PaymentAdapter>,
    bookings: BookingService,
}

impl TravelOrchestrator {
    pub fn new(
        resolver: Arc<DestinationResolver>,
        flights: Arc<dyn OfferProvider<FlightOffer>>,
        hotels: Arc<dyn OfferProvider<HotelOffer>>,
        payments: Arc<dyn PaymentAdapter>,
        bookings: BookingService,
    ) -> Self {
        Self {
            resolver,
            flights,
            hotels,
            payments,
            bookings,
        }
    }

    /// Resolve the query and fetch flights and hotels concurrently.
    /// `None` when the query names no destination at all, including when
    /// there is no usable query text.
    pub async fn search<'q>(&self, query: impl Into<Option<&'q str>>) -> Option<SearchResults> {
        let query = query.into();
        let resolved = self.resolver.resolve(query);
        if !resolved.is_resolved() {
            info!("No destination in query {:?}", query);
            return None;
        }

        let (flights, hotels) = tokio::join!(
            self.flights.get_offers(&resolved),
            self.hotels.get_offers(&resolved)
        );
        info!(
            "Search {:?} -> {:?}/{:?}: {} flights ({}), {} hotels ({})",
            query,
            resolved.destination,
            resolved.destination_code,
            flights.len(),
            self.flights.name(),
            hotels.len(),
            self.hotels.name()
        );

        Some(SearchResults {
            destination: resolved.destination,
            destination_code: resolved.destination_code,
            flights,
            hotels,
        })
    }

    /// Charge first, then validate and persist. A declined payment returns
    /// before anything is stored; nothing is rolled back afterwards.
    pub async fn book(&self, mut details: Value) -> CoreResult<BookingConfirmation> {
        let payment = details.get("payment").cloned().unwrap_or(Value::Null);
        let receipt = self.payments.process_payment(&payment).await.map_err(|e| {
            warn!("Payment failed: {}", e);
            CoreError::PaymentError(e)
        })?;

        if let Some(fields) = details.as_object_mut() {
            fields.insert("transactionId".to_string(), json!(receipt.transaction_id));
            fields.insert(
                "payment".to_string(),
                json!({ "transactionId": receipt.transaction_id }),
            );
        }

        self.bookings.execute(details).await?;
        info!("Booking confirmed with transaction {}", receipt.transaction_id);

        Ok(BookingConfirmation {
            transaction_id: receipt.transaction_id,
            message: BOOKING_SUCCESSFUL,
        })
    }
}
