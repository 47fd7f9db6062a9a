use crate::db::connection::Database;
use crate::domain::{GeocodedListing, Listing};
use crate::errors::AppError;
use rusqlite::params;
use tracing::{debug, info};

const SQL_SCHEMA: &str = include_str!("../../sql/schema.sql");

const SQL_UPSERT: &str = r#"
    INSERT OR REPLACE INTO items (
        id, site_id, title, price, thumbnail, created_date, latitude, longitude, permalink
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

const SQL_GEOCODED: &str = r#"
    SELECT title, latitude, longitude, price, permalink
    FROM items
    WHERE latitude IS NOT NULL AND longitude IS NOT NULL
    ORDER BY id
"#;

/// Creates the `items` table if it does not exist yet.
pub fn ensure_schema(db: &Database) -> Result<(), AppError> {
    db.with_conn(|conn| {
        conn.execute_batch(SQL_SCHEMA)
            .map_err(|e| AppError::Db(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })
}

/// Deletes every row, leaving room for the next snapshot.
pub fn clear_all(db: &Database) -> Result<usize, AppError> {
    let removed = db.with_conn(|conn| {
        conn.execute("DELETE FROM items", [])
            .map_err(|e| AppError::Db(e.to_string()))
    })?;

    info!(removed, "cleared listing store");
    Ok(removed)
}

/// Insert-or-replace by `id`, all in one transaction. Callers must hand in
/// geocoded listings only; `Listing` cannot be built without coordinates.
pub fn upsert_many(db: &mut Database, listings: &[Listing]) -> Result<usize, AppError> {
    db.with_conn_mut(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| AppError::Db(e.to_string()))?;

        {
            let mut stmt = tx
                .prepare(SQL_UPSERT)
                .map_err(|e| AppError::Db(e.to_string()))?;

            for listing in listings {
                stmt.execute(params![
                    listing.id,
                    listing.site_id,
                    listing.title,
                    listing.price,
                    listing.thumbnail_url,
                    listing.listing_end_time,
                    listing.latitude,
                    listing.longitude,
                    listing.permalink,
                ])
                .map_err(|e| AppError::Db(format!("Upsert of {} failed: {e}", listing.id)))?;
            }
        }

        tx.commit().map_err(|e| AppError::Db(e.to_string()))?;
        debug!(written = listings.len(), "upserted listings");
        Ok(listings.len())
    })
}

pub fn query_geocoded(db: &Database) -> Result<Vec<GeocodedListing>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(SQL_GEOCODED)
            .map_err(|e| AppError::Db(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(GeocodedListing {
                    title: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    latitude: row.get(1)?,
                    longitude: row.get(2)?,
                    price: row.get(3)?,
                    permalink: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                })
            })
            .map_err(|e| AppError::Db(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| AppError::Db(e.to_string()))?);
        }
        Ok(out)
    })
}

pub fn count(db: &Database) -> Result<usize, AppError> {
    db.with_conn(|conn| {
        conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(|e| AppError::Db(e.to_string()))
    })
}
