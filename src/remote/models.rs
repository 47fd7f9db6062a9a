use serde::Deserialize;
use serde_json::Value;

// search response
//  ├── paging
//  │    └── total
//  └── results[]
//       ├── id
//       ├── site_id
//       ├── title
//       ├── price
//       ├── thumbnail
//       ├── stop_time
//       ├── permalink
//       └── location
//            ├── latitude
//            └── longitude

#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<Value>,
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    pub total: Option<u64>,
}

/// One search result, decoded leniently. Anything may be missing upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    pub id: Option<String>,
    pub site_id: Option<String>,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub stop_time: Option<String>,
    pub permalink: Option<String>,
    pub location: Option<RawLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// `{id, name}` pair used by states, cities and categories alike.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeoEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountryResponse {
    #[serde(default)]
    pub states: Vec<GeoEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StateResponse {
    #[serde(default)]
    pub cities: Vec<GeoEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryResponse {
    #[serde(default)]
    pub children_categories: Vec<GeoEntry>,
}
