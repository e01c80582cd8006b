pub mod booking;
pub mod destination;
pub mod offers;
pub mod payment;
pub mod repository;

pub use booking::{validate_booking_payload, BookingRecord};
pub use destination::{DestinationAlias, DestinationResolver, ResolvedDestination};
pub use offers::{FlightOffer, HotelOffer, OfferId, OfferProvider};
pub use payment::{PaymentAdapter, PaymentError, PaymentReceipt};
pub use repository::BookingRepository;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed booking input; the message is safe to show to callers.
    #[error("{0}")]
    ValidationError(String),
    #[error("Payment failed")]
    PaymentError(#[source] PaymentError),
    /// Storage failure. The detail is for logs only.
    #[error("Failed to save booking")]
    PersistenceError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
