use crate::domain::GeocodedListing;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
}

/// Central Buenos Aires. Only used when there is nothing to average.
pub const DEFAULT_CENTER: MapCenter = MapCenter {
    latitude: -34.6083,
    longitude: -58.3712,
};

/// Arithmetic mean of each axis.
pub fn compute_center(rows: &[GeocodedListing]) -> MapCenter {
    if rows.is_empty() {
        return DEFAULT_CENTER;
    }

    let n = rows.len() as f64;
    let (lat_sum, lon_sum) = rows
        .iter()
        .fold((0.0, 0.0), |(lat, lon), row| (lat + row.latitude, lon + row.longitude));

    MapCenter {
        latitude: lat_sum / n,
        longitude: lon_sum / n,
    }
}
