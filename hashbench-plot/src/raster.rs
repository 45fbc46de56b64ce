//! SVG to PNG rasterization

use crate::RenderError;
use resvg::{tiny_skia, usvg};

/// Reusable SVG rasterizer; system fonts are loaded once
pub(crate) struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Rasterizer {
    pub(crate) fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        tracing::debug!(fonts = options.fontdb.len(), "loaded system fonts");
        Self { options }
    }

    /// Rasterize an SVG document and encode it as PNG
    pub(crate) fn png(&self, svg: &str) -> Result<Vec<u8>, RenderError> {
        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| RenderError::Rasterize(e.to_string()))?;

        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            RenderError::Rasterize(format!(
                "invalid canvas size {}x{}",
                size.width(),
                size.height()
            ))
        })?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Rasterize(e.to_string()))
    }
}
