use crate::config::AppConfig;
use crate::db::{query_geocoded, Database};
use crate::errors::AppError;
use crate::map::page::{map_page, MapPageVm, MarkerVm, INITIAL_ZOOM};
use crate::map::popup::listing_popup;
use crate::map::{compute_center, Viewer};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

const PAGE_TITLE: &str = "Mapa de inmuebles";

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Store held no geocoded rows; nothing was written.
    Empty,
    Written { path: PathBuf, markers: usize },
}

pub struct MapRenderer<V> {
    output_path: PathBuf,
    viewer: V,
}

impl<V: Viewer> MapRenderer<V> {
    pub fn new(output_path: impl Into<PathBuf>, viewer: V) -> Self {
        Self {
            output_path: output_path.into(),
            viewer,
        }
    }

    pub fn from_config(config: &AppConfig, viewer: V) -> Self {
        Self::new(config.map_output_path.clone(), viewer)
    }

    /// Writes the map of every geocoded row to the output path and hands it
    /// to the viewer. An empty store is a normal outcome, not an error.
    pub fn render(&self, db: &Database) -> Result<RenderOutcome, AppError> {
        let rows = query_geocoded(db)?;
        if rows.is_empty() {
            info!("no location data to show on the map");
            return Ok(RenderOutcome::Empty);
        }

        info!(rows = rows.len(), "rendering map");

        let markers: Vec<MarkerVm> = rows
            .iter()
            .map(|row| MarkerVm {
                lat: row.latitude,
                lon: row.longitude,
                popup: listing_popup(row).into_string(),
                tooltip: row.title.clone(),
            })
            .collect();

        let page = map_page(&MapPageVm {
            title: PAGE_TITLE,
            center: compute_center(&rows),
            zoom: INITIAL_ZOOM,
            markers: &markers,
            generated_at: Utc::now().to_rfc3339(),
        })?;

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.output_path, page.into_string())?;
        info!(path = %self.output_path.display(), markers = markers.len(), "map written");

        if let Err(e) = self.viewer.open(&self.output_path) {
            warn!(error = %e, "could not open map viewer");
        }

        Ok(RenderOutcome::Written {
            path: self.output_path.clone(),
            markers: markers.len(),
        })
    }
}
