pub mod pii;

pub use pii::{redact_card_number, Masked};
