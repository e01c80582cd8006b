//! Flight offers from the Amadeus self-service API (client-credentials OAuth).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};
use wayfare_core::{FlightOffer, OfferId, OfferProvider, ResolvedDestination};

use crate::{price, ApiCredentials, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";

pub struct AmadeusFlightProvider {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<ApiCredentials>,
    origin: String,
}

impl AmadeusFlightProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        credentials: Option<ApiCredentials>,
        origin: &str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            origin: origin.to_string(),
        }
    }

    async fn fetch_token(&self, credentials: &ApiCredentials) -> Result<String, ProviderError> {
        let body = self
            .client
            .post(format!("{}/v1/security/oauth2/token", self.base_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.api_key.as_str()),
                ("client_secret", credentials.api_secret.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(token.access_token)
    }

    async fn search(&self, destination: &ResolvedDestination) -> Result<Vec<FlightOffer>, ProviderError> {
        let code = destination_code(destination)
            .ok_or_else(|| ProviderError::MissingDestinationCode(destination.destination_code.clone()))?;
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ProviderError::MissingCredentials("Amadeus"))?;

        let token = self.fetch_token(credentials).await?;
        let departure_date = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();

        info!("Amadeus flight search {} -> {} on {}", self.origin, code, departure_date);

        let body = self
            .client
            .get(format!("{}/v2/shopping/flight-offers", self.base_url))
            .bearer_auth(token)
            .query(&[
                ("originLocationCode", self.origin.as_str()),
                ("destinationLocationCode", code.as_str()),
                ("departureDate", departure_date.as_str()),
                ("adults", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: FlightOffersResponse = serde_json::from_str(&body)?;
        Ok(normalize_offers(response.data))
    }
}

#[async_trait]
impl OfferProvider<FlightOffer> for AmadeusFlightProvider {
    fn name(&self) -> &str {
        "amadeus"
    }

    async fn get_offers(&self, destination: &ResolvedDestination) -> Vec<FlightOffer> {
        match self.search(destination).await {
            Ok(offers) => offers,
            Err(e) => {
                warn!("Amadeus API request failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// The resolved provider code, if it is a plain three-letter code.
fn destination_code(destination: &ResolvedDestination) -> Option<String> {
    let code = destination.destination_code.as_deref()?.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

/// Map Amadeus offers onto the common shape using each offer's first
/// itinerary segment. Offers without a segment are skipped.
fn normalize_offers(data: Vec<AmadeusOffer>) -> Vec<FlightOffer> {
    data.into_iter()
        .enumerate()
        .filter_map(|(index, offer)| {
            let segment = offer.itineraries.into_iter().next()?.segments.into_iter().next()?;
            Some(FlightOffer {
                id: offer.id.map(OfferId::Text).unwrap_or(OfferId::Number(index as u64)),
                flight_number: format!("{} {}", segment.carrier_code, segment.number),
                airline: segment.carrier_code,
                from: segment.departure.iata_code,
                to: segment.arrival.iata_code,
                price: offer.price.total,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct FlightOffersResponse {
    #[serde(default)]
    data: Vec<AmadeusOffer>,
}

#[derive(Debug, Deserialize)]
struct AmadeusOffer {
    id: Option<String>,
    #[serde(default)]
    itineraries: Vec<Itinerary>,
    price: AmadeusPrice,
}

#[derive(Debug, Deserialize)]
struct AmadeusPrice {
    #[serde(deserialize_with = "price::flexible")]
    total: f64,
}

#[derive(Debug, Deserialize)]
struct Itinerary {
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Segment {
    carrier_code: String,
    number: String,
    departure: Endpoint,
    arrival: Endpoint,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Endpoint {
    iata_code: String,
}
