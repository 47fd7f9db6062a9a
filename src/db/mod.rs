pub mod connection;
pub mod listings;

pub use connection::Database;
pub use listings::{clear_all, count, ensure_schema, query_geocoded, upsert_many};
