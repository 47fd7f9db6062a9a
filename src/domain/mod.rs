pub mod filter;
pub mod listing;

pub use filter::{PriceRange, PropertyType, SearchFilter, TransactionMode};
pub use listing::{GeocodedListing, Listing, Rejection};
