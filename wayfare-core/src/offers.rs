use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::destination::ResolvedDestination;

/// Provider-assigned offer identifier. Static tables use numbers, remote
/// suppliers hand out strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OfferId {
    Number(u64),
    Text(String),
}

impl From<u64> for OfferId {
    fn from(id: u64) -> Self {
        OfferId::Number(id)
    }
}

impl From<String> for OfferId {
    fn from(id: String) -> Self {
        OfferId::Text(id)
    }
}

impl From<&str> for OfferId {
    fn from(id: &str) -> Self {
        OfferId::Text(id.to_string())
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferId::Number(n) => write!(f, "{}", n),
            OfferId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: OfferId,
    pub airline: String,
    pub flight_number: String,
    pub from: String,
    pub to: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelOffer {
    pub id: OfferId,
    pub name: String,
    pub location: String,
    pub price_per_night: f64,
}

/// A source of bookable offers for a resolved destination.
///
/// Implementations must not fail past this boundary: network, auth and decode
/// problems are logged and surface as an empty list.
#[async_trait]
pub trait OfferProvider<O>: Send + Sync {
    /// Short name used in logs (e.g. "static-flights", "amadeus").
    fn name(&self) -> &str;

    async fn get_offers(&self, destination: &ResolvedDestination) -> Vec<O>;
}
