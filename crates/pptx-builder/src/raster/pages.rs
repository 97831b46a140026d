//! Temporary page images produced by rasterization

use crate::types::{DeckError, Result};
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TEMP_PREFIX: &str = "pptx_pdf_";

/// Page images written to a private temporary directory.
///
/// The directory and everything in it is removed when this value is
/// dropped or [`closed`](RasterizedPages::close), so callers keep it alive
/// until the deck has been built from [`pages`](RasterizedPages::pages).
#[derive(Debug)]
pub struct RasterizedPages {
    source: PathBuf,
    dir: TempDir,
    pages: Vec<PathBuf>,
}

impl RasterizedPages {
    /// Create an empty page set for `source` in a fresh temporary directory
    pub fn create(source: impl Into<PathBuf>) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(TEMP_PREFIX).tempdir()?;
        log::debug!("Created temp dir: {}", dir.path().display());
        Ok(Self {
            source: source.into(),
            dir,
            pages: Vec::new(),
        })
    }

    /// Path for the page at `index` (0-based); names sort in page order
    pub fn page_path(&self, index: usize) -> PathBuf {
        self.dir.path().join(format!("page_{:04}.png", index + 1))
    }

    /// Encode `image` as PNG and append it as the next page
    pub fn push_image(&mut self, image: &DynamicImage) -> Result<&Path> {
        let path = self.page_path(self.pages.len());
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| DeckError::Rasterization {
                path: self.source.clone(),
                reason: format!("could not write page {}: {}", self.pages.len() + 1, e),
            })?;
        log::debug!("Saved page {} to {}", self.pages.len() + 1, path.display());
        self.pages.push(path);
        Ok(&self.pages[self.pages.len() - 1])
    }

    /// The document the pages were rendered from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory holding the page files
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Page image paths in page order
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Remove the temporary directory now, reporting any failure
    pub fn close(self) -> Result<()> {
        let dir = self.dir.path().to_owned();
        self.dir.close()?;
        log::debug!("Removed temp dir: {}", dir.display());
        Ok(())
    }
}
