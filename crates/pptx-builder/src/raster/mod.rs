//! PDF rasterization
//!
//! The deck pipeline only sees the narrow [`Rasterizer`] contract: render
//! every page of a document to an image file, and report the physical size
//! of the first page. Any PDF rendering library can sit behind it.

mod page_size;
mod pages;
#[cfg(feature = "pdfium")]
mod pdfium;

pub use page_size::{document_first_page_size_inches, first_page_size_inches};
pub use pages::RasterizedPages;
#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumRasterizer;

use crate::types::Result;
use std::path::Path;

/// Converts paginated documents into per-page raster images
pub trait Rasterizer {
    /// Render each page of `document` at `dpi` into its own temporary image.
    ///
    /// Pages come back in page order; a document without pages yields an
    /// empty set. On failure nothing is left behind on disk.
    fn rasterize(&self, document: &Path, dpi: u32) -> Result<RasterizedPages>;

    /// Physical size of the first page in inches, or the 16:9 fallback for
    /// a document without pages.
    fn first_page_physical_size(&self, document: &Path) -> Result<(f64, f64)> {
        first_page_size_inches(document)
    }
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn rasterize(&self, document: &Path, dpi: u32) -> Result<RasterizedPages> {
        (**self).rasterize(document, dpi)
    }

    fn first_page_physical_size(&self, document: &Path) -> Result<(f64, f64)> {
        (**self).first_page_physical_size(document)
    }
}
