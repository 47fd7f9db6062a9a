use crate::remote::RawListing;

/// A geocoded listing as it is persisted in the `items` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub site_id: String,
    pub title: String,
    pub price: Option<f64>,
    pub thumbnail_url: String,
    /// Upstream `stop_time`, kept verbatim.
    pub listing_end_time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub permalink: String,
}

/// Why a raw record could not become a [`Listing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingGeoData,
    MissingId,
}

impl Listing {
    /// Maps a raw search result onto the persisted shape. Records without a
    /// location object, or with either coordinate absent or null, are rejected.
    pub fn from_raw(raw: &RawListing) -> Result<Listing, Rejection> {
        let (latitude, longitude) = raw
            .location
            .as_ref()
            .and_then(|loc| Some((loc.latitude?, loc.longitude?)))
            .ok_or(Rejection::MissingGeoData)?;

        let id = raw
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(Rejection::MissingId)?;

        Ok(Listing {
            id: id.to_string(),
            site_id: raw.site_id.clone().unwrap_or_default(),
            title: raw.title.clone().unwrap_or_default(),
            price: raw.price,
            thumbnail_url: raw.thumbnail.clone().unwrap_or_default(),
            listing_end_time: raw.stop_time.clone().unwrap_or_default(),
            latitude,
            longitude,
            permalink: raw.permalink.clone().unwrap_or_default(),
        })
    }
}

/// Row shape read back for the map.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedListing {
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price: Option<f64>,
    pub permalink: String,
}
