//! PDFium-backed rasterization

use super::{RasterizedPages, Rasterizer};
use crate::constants::POINTS_PER_INCH;
use crate::types::{DeckError, Result};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

/// Renders PDF pages through a dynamically bound PDFium library.
///
/// The library is bound per call, so the rasterizer itself holds no
/// native state and can move freely between threads.
#[derive(Debug, Clone, Default)]
pub struct PdfiumRasterizer {
    library_dir: Option<PathBuf>,
}

impl PdfiumRasterizer {
    /// Look for PDFium in `vendor/pdfium/lib`, then in system paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for PDFium in `dir` before falling back to system paths
    pub fn with_library_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: Some(dir.into()),
        }
    }

    /// Bind the PDFium library, trying the configured or vendored
    /// directory first, then the system library.
    pub fn bind(&self) -> std::result::Result<Pdfium, PdfiumError> {
        let local_dir = self.library_dir.clone().or_else(|| {
            std::env::current_dir().ok().and_then(|mut p| {
                p.push("vendor/pdfium/lib");
                if p.exists() { Some(p) } else { None }
            })
        });

        if let Some(dir) = local_dir {
            if let Ok(binding) =
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir))
            {
                return Ok(Pdfium::new(binding));
            }
            log::debug!("No usable PDFium in {}, trying system library", dir.display());
        }

        Pdfium::bind_to_system_library().map(Pdfium::new)
    }
}

/// Pixel size of a page rendered at `dpi`, never below one pixel
fn target_pixels(points: f32, dpi: u32) -> i32 {
    let pixels = (points as f64 / POINTS_PER_INCH * dpi as f64).round();
    pixels.max(1.0) as i32
}

impl Rasterizer for PdfiumRasterizer {
    fn rasterize(&self, document: &Path, dpi: u32) -> Result<RasterizedPages> {
        if dpi == 0 {
            return Err(DeckError::Config("DPI must be positive".to_string()));
        }

        let failure = |reason: String| DeckError::Rasterization {
            path: document.to_owned(),
            reason,
        };

        let pdfium = self
            .bind()
            .map_err(|e| failure(format!("PDFium unavailable: {e}")))?;
        let pdf = pdfium
            .load_pdf_from_file(document, None)
            .map_err(|e| failure(e.to_string()))?;

        // Dropping `pages` on an early return removes what was written so far
        let mut pages = RasterizedPages::create(document)?;
        log::debug!(
            "Rendering {} page(s) of {} at {} DPI",
            pdf.pages().len(),
            document.display(),
            dpi
        );

        for (index, page) in pdf.pages().iter().enumerate() {
            let config = PdfRenderConfig::new()
                .set_target_width(target_pixels(page.width().value, dpi))
                .set_maximum_height(target_pixels(page.height().value, dpi));

            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| failure(format!("page {}: {}", index + 1, e)))?;
            pages.push_image(&bitmap.as_image())?;
        }

        Ok(pages)
    }
}
