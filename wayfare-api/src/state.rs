use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use wayfare_core::{DestinationResolver, FlightOffer, HotelOffer, OfferProvider};
use wayfare_offer::{
    amadeus, build_http_client, hotelbeds, AmadeusFlightProvider, ApiCredentials,
    HotelbedsHotelProvider, ProviderError, StaticOfferProvider,
};
use wayfare_order::{BookingService, MockPaymentAdapter, TravelOrchestrator};
use wayfare_store::app_config::{ServerConfig, SupplierConfig};
use wayfare_store::{Config, JsonFileStore, ProviderMode};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TravelOrchestrator>,
    pub server: ServerConfig,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let (flights, hotels) = providers(config)?;
        let store = Arc::new(JsonFileStore::new(&config.storage.db_path));
        info!("Bookings are stored in {}", store.path().display());

        let orchestrator = TravelOrchestrator::new(
            Arc::new(DestinationResolver::default()),
            flights,
            hotels,
            Arc::new(MockPaymentAdapter),
            BookingService::new(store),
        );

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            server: config.server.clone(),
        })
    }
}

type Providers = (
    Arc<dyn OfferProvider<FlightOffer>>,
    Arc<dyn OfferProvider<HotelOffer>>,
);

fn providers(config: &Config) -> Result<Providers, ProviderError> {
    let providers = &config.providers;
    if providers.mode == ProviderMode::Static {
        info!("Using static offer tables");
        let flights: Arc<dyn OfferProvider<FlightOffer>> = Arc::new(StaticOfferProvider::flights());
        let hotels: Arc<dyn OfferProvider<HotelOffer>> = Arc::new(StaticOfferProvider::hotels());
        return Ok((flights, hotels));
    }

    let client = build_http_client(Duration::from_secs(providers.request_timeout_seconds))?;
    let amadeus_url = base_url(&providers.amadeus, amadeus::DEFAULT_BASE_URL);
    let hotelbeds_url = base_url(&providers.hotelbeds, hotelbeds::DEFAULT_BASE_URL);
    info!("Using remote providers: amadeus={} hotelbeds={}", amadeus_url, hotelbeds_url);
    let flights: Arc<dyn OfferProvider<FlightOffer>> = Arc::new(AmadeusFlightProvider::new(
        client.clone(),
        amadeus_url,
        credentials("Amadeus", &providers.amadeus),
        &providers.flight_origin,
    ));
    let hotels: Arc<dyn OfferProvider<HotelOffer>> = Arc::new(HotelbedsHotelProvider::new(
        client,
        hotelbeds_url,
        credentials("Hotelbeds", &providers.hotelbeds),
    ));
    Ok((flights, hotels))
}

fn base_url<'a>(config: &'a SupplierConfig, default: &'a str) -> &'a str {
    config.base_url.as_deref().unwrap_or(default)
}

fn credentials(supplier: &str, config: &SupplierConfig) -> Option<ApiCredentials> {
    let creds = ApiCredentials::from_parts(config.api_key.clone(), config.api_secret.clone());
    if creds.is_none() {
        warn!("{} credentials missing; searches will return no offers", supplier);
    }
    creds
}
