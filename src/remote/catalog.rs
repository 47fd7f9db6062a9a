// catalog.rs
use crate::config::AppConfig;
use crate::domain::SearchFilter;
use crate::remote::{Endpoints, RawListing, RemoteError, SearchPage, Transport};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

/// Why pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page came back with fewer records than the page size.
    ShortPage,
    /// Everything the upstream reported as `paging.total` has been read.
    ReachedTotal,
    /// The configured page ceiling was hit.
    PageLimit,
    /// A page request failed; earlier pages are kept.
    Failed,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub records: Vec<RawListing>,
    pub pages: usize,
    pub reported_total: Option<u64>,
    pub stop_reason: StopReason,
}

/// First page summary, used to show what a filter would return.
#[derive(Debug)]
pub struct Preview {
    pub total: Option<u64>,
    pub sample: Vec<RawListing>,
}

pub struct CatalogClient<T> {
    transport: T,
    endpoints: Endpoints,
    page_size: usize,
    max_pages: usize,
}

impl<T: Transport> CatalogClient<T> {
    pub fn new(transport: T, endpoints: Endpoints, page_size: usize, max_pages: usize) -> Self {
        Self {
            transport,
            endpoints,
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
        }
    }

    pub fn from_config(transport: T, config: &AppConfig) -> Result<Self, RemoteError> {
        let endpoints = Endpoints::new(&config.api_base_url, config.site_id.clone())?;
        Ok(Self::new(transport, endpoints, config.page_size, config.max_pages))
    }

    /// Walks the search results sequentially from offset 0.
    ///
    /// Stops on the first short page, once the reported total is reached, at
    /// the page ceiling, or on the first failed request. A failure never
    /// discards what earlier pages returned.
    pub fn fetch_listings(&self, filter: &SearchFilter) -> FetchOutcome {
        let mut records = Vec::new();
        let mut seen: u64 = 0;
        let mut offset = 0;
        let mut pages = 0;
        let mut reported_total = None;

        let stop_reason = loop {
            if pages >= self.max_pages {
                warn!(pages, max_pages = self.max_pages, "page limit reached, stopping pagination");
                break StopReason::PageLimit;
            }

            let page = match self.request_page(filter, offset) {
                Ok(page) => page,
                Err(e) => {
                    warn!(error = %e, offset, kept = records.len(), "failed to fetch listings page");
                    // Count the attempt only if a request actually went out.
                    if !matches!(e, RemoteError::InvalidUrl(_)) {
                        pages += 1;
                    }
                    break StopReason::Failed;
                }
            };
            pages += 1;

            if let Some(total) = page.paging.as_ref().and_then(|p| p.total) {
                if reported_total.is_none() {
                    info!(total, "upstream reported total");
                }
                reported_total = Some(total);
            }

            let received = page.results.len();
            seen += received as u64;
            records.extend(decode_records(page.results));

            if received < self.page_size {
                break StopReason::ShortPage;
            }
            if reported_total.is_some_and(|total| seen >= total) {
                break StopReason::ReachedTotal;
            }

            offset += self.page_size;
        };

        info!(
            fetched = records.len(),
            pages,
            ?stop_reason,
            "finished fetching listings"
        );

        FetchOutcome {
            records,
            pages,
            reported_total,
            stop_reason,
        }
    }

    /// Requests only the first page and keeps up to `sample_size` records.
    pub fn preview(&self, filter: &SearchFilter, sample_size: usize) -> Option<Preview> {
        match self.request_page(filter, 0) {
            Ok(page) => {
                let total = page.paging.as_ref().and_then(|p| p.total);
                let sample = decode_records(page.results.into_iter().take(sample_size).collect());
                Some(Preview { total, sample })
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch preview page");
                None
            }
        }
    }

    fn request_page(&self, filter: &SearchFilter, offset: usize) -> Result<SearchPage, RemoteError> {
        let url = self.endpoints.search(filter, offset, self.page_size)?;
        debug!(url = %url, "fetching listings page");
        self.get_page(&url)
    }

    fn get_page(&self, url: &Url) -> Result<SearchPage, RemoteError> {
        let value = self.transport.get_json(url)?;
        serde_json::from_value(value).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

/// Decodes each result on its own so one malformed record does not sink the page.
fn decode_records(values: Vec<Value>) -> Vec<RawListing> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawListing>(value) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(error = %e, "skipping undecodable listing record");
                None
            }
        })
        .collect()
}
