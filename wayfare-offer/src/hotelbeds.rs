//! Hotel availability from the Hotelbeds booking API (signed requests).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use wayfare_core::{HotelOffer, OfferId, OfferProvider, ResolvedDestination};

use crate::{price, ApiCredentials, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://api.test.hotelbeds.com";

/// City name -> Hotelbeds destination code, used when the resolver produced a
/// city but no code.
const CITY_CODES: &[(&str, &str)] = &[
    ("london", "LON"),
    ("paris", "PAR"),
    ("madrid", "MAD"),
    ("newyork", "NYC"),
    ("new york", "NYC"),
    ("tokyo", "TYO"),
    ("rome", "ROM"),
    ("berlin", "BER"),
    ("dubai", "DXB"),
    ("sydney", "SYD"),
    ("losangeles", "LAX"),
    ("los angeles", "LAX"),
];

pub struct HotelbedsHotelProvider {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<ApiCredentials>,
}

impl HotelbedsHotelProvider {
    pub fn new(client: reqwest::Client, base_url: &str, credentials: Option<ApiCredentials>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    async fn search(&self, destination: &ResolvedDestination) -> Result<Vec<HotelOffer>, ProviderError> {
        let code = destination_code(destination)
            .ok_or_else(|| ProviderError::MissingDestinationCode(destination.destination.clone()))?;
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ProviderError::MissingCredentials("Hotelbeds"))?;

        let now = chrono::Utc::now();
        let check_in = now.date_naive();
        let check_out = check_in + chrono::Duration::days(1);
        let signature = x_signature(&credentials.api_key, &credentials.api_secret, now.timestamp());

        info!("Hotelbeds availability for {} ({} -> {})", code, check_in, check_out);

        let body = self
            .client
            .post(format!("{}/hotel-api/1.0/hotels", self.base_url))
            .header("Api-key", &credentials.api_key)
            .header("X-Signature", signature)
            .header("Accept", "application/json")
            .json(&json!({
                "stay": {
                    "checkIn": check_in.format("%Y-%m-%d").to_string(),
                    "checkOut": check_out.format("%Y-%m-%d").to_string(),
                },
                "occupancies": [{ "rooms": 1, "adults": 1, "children": 0 }],
                "destination": { "code": code },
                "language": "ENG",
                "currency": "USD",
            }))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: AvailabilityResponse = serde_json::from_str(&body)?;
        Ok(normalize_hotels(response))
    }
}

#[async_trait]
impl OfferProvider<HotelOffer> for HotelbedsHotelProvider {
    fn name(&self) -> &str {
        "hotelbeds"
    }

    async fn get_offers(&self, destination: &ResolvedDestination) -> Vec<HotelOffer> {
        match self.search(destination).await {
            Ok(offers) => offers,
            Err(e) => {
                warn!("Hotelbeds API request failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// `X-Signature` header: hex SHA-256 of key, secret and unix seconds.
pub fn x_signature(api_key: &str, api_secret: &str, unix_seconds: i64) -> String {
    let digest = Sha256::digest(format!("{}{}{}", api_key, api_secret, unix_seconds).as_bytes());
    hex::encode(digest)
}

fn destination_code(destination: &ResolvedDestination) -> Option<String> {
    if let Some(code) = destination.destination_code.as_deref().map(str::trim) {
        if !code.is_empty() {
            return Some(code.to_ascii_uppercase());
        }
    }
    let city = destination.destination.as_deref()?.trim().to_lowercase();
    CITY_CODES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, code)| code.to_string())
}

fn normalize_hotels(response: AvailabilityResponse) -> Vec<HotelOffer> {
    response
        .hotels
        .map(|page| page.hotels)
        .unwrap_or_default()
        .into_iter()
        .map(|hotel| HotelOffer {
            id: hotel.code,
            name: hotel.name.map(HotelName::into_text).unwrap_or_default(),
            location: hotel.destination_name.unwrap_or_default(),
            price_per_night: hotel.min_rate.unwrap_or(0.0),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    hotels: Option<HotelsPage>,
}

#[derive(Debug, Deserialize)]
struct HotelsPage {
    #[serde(default)]
    hotels: Vec<HotelbedsHotel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HotelbedsHotel {
    code: OfferId,
    #[serde(default)]
    name: Option<HotelName>,
    #[serde(default)]
    destination_name: Option<String>,
    #[serde(default, deserialize_with = "price::flexible_opt")]
    min_rate: Option<f64>,
}

/// Hotelbeds sends either a plain name or a localized `{ "content": ... }` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HotelName {
    Plain(String),
    Localized { content: String },
}

impl HotelName {
    fn into_text(self) -> String {
        match self {
            HotelName::Plain(name) | HotelName::Localized { content: name } => name,
        }
    }
}
