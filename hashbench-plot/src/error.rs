use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing a figure
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create plot directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("drawing error: {0}")]
    Draw(String),

    #[error("rasterization error: {0}")]
    Rasterize(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("nothing to plot for {0}")]
    EmptySeries(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(e.to_string())
    }
}

impl RenderError {
    /// Short tag used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::CreateDir { .. } => "create_dir",
            RenderError::Draw(_) => "draw",
            RenderError::Rasterize(_) => "rasterize",
            RenderError::Write { .. } => "write",
            RenderError::EmptySeries(_) => "empty_series",
        }
    }
}
