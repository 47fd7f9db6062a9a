mod catalog;
mod endpoints;
mod geo;
pub(crate) mod models;
mod remote_error;
mod transport;

pub use catalog::{CatalogClient, StopReason};
pub use endpoints::Endpoints;
pub use geo::GeoClient;
pub use models::{GeoEntry, RawListing, SearchPage};
pub use remote_error::RemoteError;
pub use transport::{HttpTransport, Transport};
