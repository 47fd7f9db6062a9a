use crate::errors::AppError;
use std::path::Path;
use std::process::Command;

/// Post-render hook that shows the written artifact.
pub trait Viewer {
    fn open(&self, path: &Path) -> Result<(), AppError>;
}

impl<V: Viewer + ?Sized> Viewer for &V {
    fn open(&self, path: &Path) -> Result<(), AppError> {
        (**self).open(path)
    }
}

/// Hands the file to the host's default handler.
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<(), AppError> {
        let mut command = if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(path);
            c
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]).arg(path);
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(path);
            c
        };

        command
            .spawn()
            .map(|_| ())
            .map_err(|e| AppError::Viewer(format!("failed to open {}: {e}", path.display())))
    }
}

pub struct NoopViewer;

impl Viewer for NoopViewer {
    fn open(&self, _path: &Path) -> Result<(), AppError> {
        Ok(())
    }
}
