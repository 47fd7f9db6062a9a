use crate::db::{ensure_schema, Database};
use crate::domain::Listing;
use crate::errors::AppError;
use crate::map::Viewer;
use crate::remote::models::RawLocation;
use crate::remote::{Endpoints, RawListing, RemoteError, Transport};
use rusqlite::{params, OptionalExtension};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use url::Url;

pub const TEST_BASE_URL: &str = "https://api.test.local";

/// Fresh in-memory store with the production schema applied.
pub fn init_test_db() -> Database {
    let db = Database::open_in_memory()
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    ensure_schema(&db).expect("Failed to apply schema");
    db
}

/// Reads back the full stored row for `id`.
pub fn get_listing(db: &Database, id: &str) -> Result<Option<Listing>, AppError> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT id, site_id, title, price, thumbnail, created_date, latitude, longitude, permalink
             FROM items WHERE id = ?1",
            params![id],
            |row| {
                Ok(Listing {
                    id: row.get(0)?,
                    site_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    price: row.get(3)?,
                    thumbnail_url: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    listing_end_time: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    latitude: row.get(6)?,
                    longitude: row.get(7)?,
                    permalink: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
                })
            },
        )
        .optional()
        .map_err(|e| AppError::Db(e.to_string()))
    })
}

pub fn test_endpoints() -> Endpoints {
    Endpoints::new(TEST_BASE_URL, "MLA").expect("valid test base url")
}

/// Replays scripted responses in order and records every URL requested.
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<Value, RemoteError>>>,
    calls: RefCell<Vec<Url>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<Value, RemoteError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Url> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Transport for MockTransport {
    fn get_json(&self, url: &Url) -> Result<Value, RemoteError> {
        self.calls.borrow_mut().push(url.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Network("no scripted response".into())))
    }
}

pub fn server_error() -> Result<Value, RemoteError> {
    Err(RemoteError::Status {
        status: 500,
        body: "internal error".into(),
    })
}

/// Raw search result as the API returns it.
pub fn raw_record(id: &str, coords: Option<(f64, f64)>) -> Value {
    let mut record = json!({
        "id": id,
        "site_id": "MLA",
        "title": format!("Departamento {id}"),
        "price": 120000,
        "thumbnail": format!("http://img.test/{id}.jpg"),
        "stop_time": "2030-01-01T00:00:00.000Z",
        "permalink": format!("https://listado.test/{id}"),
    });
    if let Some((lat, lon)) = coords {
        record["location"] = json!({ "latitude": lat, "longitude": lon });
    }
    record
}

pub fn search_page(results: Vec<Value>, total: Option<u64>) -> Value {
    json!({
        "paging": { "total": total, "offset": 0, "limit": 50 },
        "results": results,
    })
}

/// Page of `n` geocoded records with ids starting at `start`.
pub fn page_of(n: usize, start: usize, total: Option<u64>) -> Result<Value, RemoteError> {
    let results = (start..start + n)
        .map(|i| raw_record(&format!("MLA{i}"), Some((-34.6, -58.4))))
        .collect();
    Ok(search_page(results, total))
}

pub fn raw_listing(id: &str, latitude: Option<f64>, longitude: Option<f64>) -> RawListing {
    RawListing {
        id: Some(id.to_string()),
        site_id: Some("MLA".into()),
        title: Some(format!("Casa {id}")),
        price: Some(95000.0),
        thumbnail: Some(format!("http://img.test/{id}.jpg")),
        stop_time: Some("2030-01-01T00:00:00.000Z".into()),
        permalink: Some(format!("https://listado.test/{id}")),
        location: Some(RawLocation { latitude, longitude }),
    }
}

pub fn listing(id: &str, latitude: f64, longitude: f64) -> Listing {
    Listing {
        id: id.to_string(),
        site_id: "MLA".into(),
        title: format!("Casa {id}"),
        price: Some(95000.0),
        thumbnail_url: format!("http://img.test/{id}.jpg"),
        listing_end_time: "2030-01-01T00:00:00.000Z".into(),
        latitude,
        longitude,
        permalink: format!("https://listado.test/{id}"),
    }
}

pub fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[derive(Default)]
pub struct RecordingViewer {
    pub opened: RefCell<Vec<PathBuf>>,
}

impl Viewer for RecordingViewer {
    fn open(&self, path: &Path) -> Result<(), AppError> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

pub struct FailingViewer;

impl Viewer for FailingViewer {
    fn open(&self, path: &Path) -> Result<(), AppError> {
        Err(AppError::Viewer(format!("no display for {}", path.display())))
    }
}
