use crate::config::AppConfig;
use crate::remote::models::{CategoryResponse, CountryResponse, StateResponse};
use crate::remote::{Endpoints, GeoEntry, RemoteError, Transport};
use serde::de::DeserializeOwned;
use tracing::error;
use url::Url;

/// Location and category lookups. Every call degrades to an empty list on
/// failure; an empty result means "no data available".
pub struct GeoClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> GeoClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn from_config(transport: T, config: &AppConfig) -> Result<Self, RemoteError> {
        let endpoints = Endpoints::new(&config.api_base_url, config.site_id.clone())?;
        Ok(Self::new(transport, endpoints))
    }

    pub fn list_states(&self, country_code: &str) -> Vec<GeoEntry> {
        self.lookup::<CountryResponse>("states", self.endpoints.country(country_code))
            .map(|r| r.states)
            .unwrap_or_default()
    }

    pub fn list_cities(&self, state_id: &str) -> Vec<GeoEntry> {
        self.lookup::<StateResponse>("cities", self.endpoints.state(state_id))
            .map(|r| r.cities)
            .unwrap_or_default()
    }

    pub fn list_subcategories(&self, category_id: &str) -> Vec<GeoEntry> {
        self.lookup::<CategoryResponse>("subcategories", self.endpoints.category(category_id))
            .map(|r| r.children_categories)
            .unwrap_or_default()
    }

    fn lookup<R: DeserializeOwned>(&self, what: &str, url: Result<Url, RemoteError>) -> Option<R> {
        let result = url.and_then(|url| {
            let value = self.transport.get_json(&url)?;
            serde_json::from_value::<R>(value).map_err(|e| RemoteError::Decode(e.to_string()))
        });

        match result {
            Ok(response) => Some(response),
            Err(e) => {
                error!(error = %e, "failed to fetch {what}");
                None
            }
        }
    }
}
