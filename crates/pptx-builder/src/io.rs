//! Async entry points for the synchronous pipeline

use crate::job::{convert_document, convert_files, convert_image_folder};
use crate::options::DeckOptions;
use crate::raster::Rasterizer;
use crate::types::*;
use std::path::{Path, PathBuf};

/// Build a deck from `images` on the blocking pool
pub async fn build_deck_async(
    images: Vec<PathBuf>,
    destination: impl AsRef<Path>,
    canvas: Canvas,
    mode: PlacementMode,
) -> Result<usize> {
    let destination = destination.as_ref().to_owned();
    tokio::task::spawn_blocking(move || crate::deck::build(&images, &destination, &canvas, mode))
        .await?
}

/// Convert a PDF into a deck on the blocking pool
pub async fn convert_document_async<R>(
    rasterizer: R,
    document: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: DeckOptions,
) -> Result<DeckSummary>
where
    R: Rasterizer + Send + 'static,
{
    options.validate()?;

    let document = document.as_ref().to_owned();
    let output = output.as_ref().to_owned();
    tokio::task::spawn_blocking(move || convert_document(&rasterizer, &document, &output, &options))
        .await?
}

/// Convert an image folder into a deck on the blocking pool
pub async fn convert_image_folder_async(
    folder: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: DeckOptions,
) -> Result<DeckSummary> {
    options.validate()?;

    let folder = folder.as_ref().to_owned();
    let output = output.as_ref().to_owned();
    tokio::task::spawn_blocking(move || convert_image_folder(&folder, &output, &options)).await?
}

/// Convert a batch of PDFs and images into one deck on the blocking pool
pub async fn convert_files_async<R>(
    rasterizer: R,
    files: Vec<PathBuf>,
    output: impl AsRef<Path>,
    options: DeckOptions,
) -> Result<DeckSummary>
where
    R: Rasterizer + Send + 'static,
{
    options.validate()?;

    let output = output.as_ref().to_owned();
    tokio::task::spawn_blocking(move || convert_files(&rasterizer, &files, &output, &options))
        .await?
}
