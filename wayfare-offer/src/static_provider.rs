use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;
use wayfare_core::{FlightOffer, HotelOffer, OfferProvider, ResolvedDestination};

/// Offers served from a fixed in-memory city table.
///
/// Lookup is an exact match on the trimmed, lowercased destination city; an
/// unknown or missing city yields no offers.
pub struct StaticOfferProvider<O> {
    name: String,
    table: HashMap<String, Vec<O>>,
}

impl<O: Clone> StaticOfferProvider<O> {
    pub fn new<I>(name: &str, table: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<O>)>,
    {
        Self {
            name: name.to_string(),
            table: table
                .into_iter()
                .map(|(city, offers)| (normalize_city(&city), offers))
                .collect(),
        }
    }

    pub fn lookup(&self, city: &str) -> Vec<O> {
        self.table
            .get(&normalize_city(city))
            .cloned()
            .unwrap_or_default()
    }
}

impl StaticOfferProvider<FlightOffer> {
    /// Demo flight table (London, Paris).
    pub fn flights() -> Self {
        Self::new("static-flights", default_flights())
    }
}

impl StaticOfferProvider<HotelOffer> {
    /// Demo hotel table (London, Paris).
    pub fn hotels() -> Self {
        Self::new("static-hotels", default_hotels())
    }
}

#[async_trait]
impl<O> OfferProvider<O> for StaticOfferProvider<O>
where
    O: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_offers(&self, destination: &ResolvedDestination) -> Vec<O> {
        let Some(city) = destination.destination.as_deref() else {
            return Vec::new();
        };
        let offers = self.lookup(city);
        debug!("{}: {} offers for {}", self.name, offers.len(), city);
        offers
    }
}

fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

fn flight(id: u64, airline: &str, number: &str, to: &str, price: f64) -> FlightOffer {
    FlightOffer {
        id: id.into(),
        airline: airline.to_string(),
        flight_number: number.to_string(),
        from: "NYC".to_string(),
        to: to.to_string(),
        price,
    }
}

fn hotel(id: u64, name: &str, location: &str, price_per_night: f64) -> HotelOffer {
    HotelOffer {
        id: id.into(),
        name: name.to_string(),
        location: location.to_string(),
        price_per_night,
    }
}

fn default_flights() -> Vec<(String, Vec<FlightOffer>)> {
    vec![
        (
            "london".to_string(),
            vec![
                flight(1, "British Airways", "BA2490", "LHR", 550.0),
                flight(2, "Virgin Atlantic", "VS4", "LHR", 600.0),
            ],
        ),
        (
            "paris".to_string(),
            vec![flight(3, "Air France", "AF007", "CDG", 580.0)],
        ),
    ]
}

fn default_hotels() -> Vec<(String, Vec<HotelOffer>)> {
    vec![
        (
            "london".to_string(),
            vec![
                hotel(1, "The Savoy", "London", 400.0),
                hotel(2, "The Ritz", "London", 450.0),
            ],
        ),
        (
            "paris".to_string(),
            vec![hotel(3, "Le Bristol", "Paris", 800.0)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_core::DestinationResolver;

    fn city(name: &str) -> ResolvedDestination {
        ResolvedDestination {
            destination: Some(name.to_string()),
            destination_code: None,
        }
    }

    #[tokio::test]
    async fn test_london_offers() {
        let resolved = DestinationResolver::default().resolve("flights to london for 3 nights");

        let flights = StaticOfferProvider::flights().get_offers(&resolved).await;
        let hotels = StaticOfferProvider::hotels().get_offers(&resolved).await;

        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].flight_number, "BA2490");
        assert_eq!(hotels.len(), 2);
        assert_eq!(hotels[1].name, "The Ritz");
    }

    #[tokio::test]
    async fn test_lookup_is_trimmed_and_case_insensitive() {
        let flights = StaticOfferProvider::flights();
        assert_eq!(flights.get_offers(&city("  PARIS ")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_or_missing_city_is_empty() {
        let hotels = StaticOfferProvider::hotels();
        assert!(hotels.get_offers(&city("Atlantis")).await.is_empty());
        assert!(hotels.get_offers(&ResolvedDestination::unresolved()).await.is_empty());

        let code_only = ResolvedDestination {
            destination: None,
            destination_code: Some("JFK".to_string()),
        };
        assert!(hotels.get_offers(&code_only).await.is_empty());
    }

    #[test]
    fn test_custom_table_keys_are_normalized() {
        let provider = StaticOfferProvider::new(
            "custom",
            vec![(" Lisbon ".to_string(), vec![hotel(9, "Bairro Alto", "Lisbon", 210.0)])],
        );
        assert_eq!(provider.lookup("lisbon").len(), 1);
        assert_eq!(OfferProvider::<HotelOffer>::name(&provider), "custom");
    }
}
