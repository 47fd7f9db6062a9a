use crate::db::{clear_all, ensure_schema, Database};
use crate::domain::SearchFilter;
use crate::errors::AppError;
use crate::map::{MapRenderer, RenderOutcome, Viewer};
use crate::pipeline::{ingest, IngestReport};
use crate::remote::{CatalogClient, StopReason, Transport};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub fetched: usize,
    pub pages: usize,
    pub reported_total: Option<u64>,
    pub stop_reason: StopReason,
    pub ingest: IngestReport,
    /// `None` when nothing was stored and rendering was skipped.
    pub render: Option<RenderOutcome>,
}

/// One snapshot run: clear the store, fetch every page for `filter`, keep the
/// geocoded records and draw them.
pub fn run_snapshot<T, V>(
    catalog: &CatalogClient<T>,
    db: &mut Database,
    renderer: &MapRenderer<V>,
    filter: &SearchFilter,
) -> Result<RunSummary, AppError>
where
    T: Transport,
    V: Viewer,
{
    ensure_schema(db)?;
    clear_all(db)?;

    let outcome = catalog.fetch_listings(filter);
    let report = ingest(db, &outcome.records)?;

    let render = if report.persisted > 0 {
        Some(renderer.render(db)?)
    } else {
        info!("no items to store");
        None
    };

    Ok(RunSummary {
        fetched: outcome.records.len(),
        pages: outcome.pages,
        reported_total: outcome.reported_total,
        stop_reason: outcome.stop_reason,
        ingest: report,
        render,
    })
}
