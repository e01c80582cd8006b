pub mod amadeus;
pub mod hotelbeds;
mod price;
pub mod static_provider;
#[cfg(test)]
mod test_server;

use std::time::Duration;

pub use amadeus::AmadeusFlightProvider;
pub use hotelbeds::HotelbedsHotelProvider;
pub use static_provider::StaticOfferProvider;

/// Key/secret pair for a remote supplier.
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl ApiCredentials {
    /// `None` unless both halves are present and non-empty.
    pub fn from_parts(api_key: Option<String>, api_secret: Option<String>) -> Option<Self> {
        match (api_key, api_secret) {
            (Some(api_key), Some(api_secret)) if !api_key.is_empty() && !api_secret.is_empty() => {
                Some(Self { api_key, api_secret })
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"********")
            .finish()
    }
}

/// Failures inside a remote provider. These never cross the provider
/// boundary; they are logged and turned into an empty offer list.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0} API key or secret not provided")]
    MissingCredentials(&'static str),

    #[error("No usable destination code for {0:?}")]
    MissingDestinationCode(Option<String>),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Shared HTTP client for the remote providers.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
