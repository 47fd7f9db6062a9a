use crate::domain::SearchFilter;
use crate::remote::RemoteError;
use url::Url;

/// URL builder for the classifieds API.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    site_id: String,
}

impl Endpoints {
    pub fn new(base_url: &str, site_id: impl Into<String>) -> Result<Self, RemoteError> {
        let base = Url::parse(base_url).map_err(|e| RemoteError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            base,
            site_id: site_id.into(),
        })
    }

    /// `/sites/{site}/search` with the filter, offset and limit applied.
    pub fn search(&self, filter: &SearchFilter, offset: usize, limit: usize) -> Result<Url, RemoteError> {
        let mut url = self.endpoint(&["sites", &self.site_id, "search"])?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("category", &filter.category_id)
                .append_pair("buying_mode", filter.mode.as_query())
                .append_pair("offset", &offset.to_string())
                .append_pair("limit", &limit.to_string());

            if let Some(location) = &filter.location {
                query.append_pair("state", &location.state_id);
                if let Some(city_id) = &location.city_id {
                    query.append_pair("city", city_id);
                }
            }

            if let Some(price) = &filter.price {
                query.append_pair("price", &price.as_query());
            }
        }

        Ok(url)
    }

    pub fn country(&self, country_code: &str) -> Result<Url, RemoteError> {
        self.endpoint(&["classified_locations", "countries", country_code])
    }

    pub fn state(&self, state_id: &str) -> Result<Url, RemoteError> {
        self.endpoint(&["classified_locations", "states", state_id])
    }

    pub fn category(&self, category_id: &str) -> Result<Url, RemoteError> {
        self.endpoint(&["categories", category_id])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
