pub mod app_config;
pub mod booking_store;

pub use app_config::{Config, ProviderMode};
pub use booking_store::{JsonFileStore, StoreError};
