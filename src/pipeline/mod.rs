mod ingest;
mod run;

pub use ingest::{ingest, IngestReport};
pub use run::{run_snapshot, RunSummary};
