pub mod booking;
pub mod orchestrator;
pub mod payment;

pub use booking::BookingService;
pub use orchestrator::{BookingConfirmation, SearchResults, TravelOrchestrator};
pub use payment::MockPaymentAdapter;
