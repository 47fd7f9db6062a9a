pub mod center;
pub mod page;
pub mod popup;
pub mod renderer;
pub mod viewer;

pub use center::{compute_center, MapCenter};
pub use renderer::{MapRenderer, RenderOutcome};
pub use viewer::{NoopViewer, SystemViewer, Viewer};
