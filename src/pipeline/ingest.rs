use crate::db::{upsert_many, Database};
use crate::domain::{Listing, Rejection};
use crate::errors::AppError;
use crate::remote::RawListing;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub received: usize,
    pub missing_geo: usize,
    pub missing_id: usize,
    /// Geocoded records superseded by a later record with the same id.
    pub duplicates: usize,
    /// Distinct listings written to the store.
    pub persisted: usize,
}

impl IngestReport {
    /// Records that carried both coordinates.
    pub fn geocoded(&self) -> usize {
        self.received - self.missing_geo
    }
}

/// Keeps the records with a location carrying both coordinates, maps them
/// onto [`Listing`] and collapses repeated ids onto their last occurrence.
fn select_geocoded(raw_records: &[RawListing]) -> (Vec<Listing>, IngestReport) {
    let mut report = IngestReport {
        received: raw_records.len(),
        ..IngestReport::default()
    };

    let listings: Vec<Listing> = raw_records
        .iter()
        .filter_map(|raw| match Listing::from_raw(raw) {
            Ok(listing) => Some(listing),
            Err(Rejection::MissingGeoData) => {
                report.missing_geo += 1;
                None
            }
            Err(Rejection::MissingId) => {
                report.missing_id += 1;
                warn!(title = ?raw.title, "skipping geocoded record without id");
                None
            }
        })
        .collect();

    let mapped = listings.len();
    let unique = keep_last_by_id(listings);
    report.duplicates = mapped - unique.len();

    (unique, report)
}

/// Later records win, the same way INSERT OR REPLACE resolves them.
fn keep_last_by_id(listings: Vec<Listing>) -> Vec<Listing> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Listing> = listings
        .into_iter()
        .rev()
        .filter(|listing| seen.insert(listing.id.clone()))
        .collect();
    unique.reverse();
    unique
}

/// Filters, maps and upserts a batch of raw records.
pub fn ingest(db: &mut Database, raw_records: &[RawListing]) -> Result<IngestReport, AppError> {
    let (listings, mut report) = select_geocoded(raw_records);

    info!(
        received = report.received,
        geocoded = report.geocoded(),
        missing_id = report.missing_id,
        duplicates = report.duplicates,
        "valid items with location data"
    );

    if !listings.is_empty() {
        report.persisted = upsert_many(db, &listings)?;
    }

    Ok(report)
}
