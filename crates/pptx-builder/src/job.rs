//! Conversion jobs shared by the front ends
//!
//! Each job validates its options, resolves the canvas, feeds an ordered
//! image list to the deck assembler and releases any rasterized pages it
//! created, whether the build succeeded or not.

use crate::collect::{dedup_paths, is_document_path, is_image_path, list_images, sort_by_name};
use crate::constants::DECK_EXTENSION;
use crate::deck::build;
use crate::options::DeckOptions;
use crate::raster::{RasterizedPages, Rasterizer};
use crate::types::*;
use std::path::{Path, PathBuf};

/// Output name used when no better name can be derived
pub const DEFAULT_OUTPUT_NAME: &str = "presentation.pptx";

/// Convert one PDF into a deck, one slide per page.
///
/// Under [`SlideSize::Auto`] the canvas matches the first page.
pub fn convert_document<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    document: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &DeckOptions,
) -> Result<DeckSummary> {
    options.validate()?;
    let document = document.as_ref();
    let output = output.as_ref();
    require_document(document)?;

    let canvas = match options.slide_size.fixed_canvas()? {
        Some(canvas) => canvas,
        None => document_canvas(rasterizer, document)?,
    };

    let pages = rasterizer.rasterize(document, options.dpi)?;
    log::debug!(
        "Rasterized {} page(s) of {} into {}",
        pages.len(),
        document.display(),
        pages.dir().display()
    );

    let built = build(pages.pages(), output, &canvas, options.mode);
    release(pages);
    let slide_count = built?;

    Ok(DeckSummary {
        output_path: output.to_owned(),
        slide_count,
        canvas,
    })
}

/// Convert the images directly inside `folder` into a deck.
///
/// Under [`SlideSize::Auto`] the canvas follows the first image.
pub fn convert_image_folder(
    folder: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &DeckOptions,
) -> Result<DeckSummary> {
    options.validate()?;
    let folder = folder.as_ref();
    let output = output.as_ref();

    let images = list_images(folder)?;
    let Some(first) = images.first() else {
        return Err(DeckError::invalid_input(folder, "no supported images found"));
    };

    let canvas = match options.slide_size.fixed_canvas()? {
        Some(canvas) => canvas,
        None => Canvas::from_first_image(&SourceImage::open(first)?)?.within_slide_limits(),
    };

    let slide_count = build(&images, output, &canvas, options.mode)?;
    Ok(DeckSummary {
        output_path: output.to_owned(),
        slide_count,
        canvas,
    })
}

/// Convert a batch of PDFs and images into a single deck.
///
/// Files are ordered by case-insensitive name and repeated paths are
/// dropped. Every PDF contributes its pages contiguously, in page order.
/// The canvas is only detected when the batch is a single PDF; otherwise
/// [`SlideSize::Auto`] falls back to widescreen.
pub fn convert_files<R, P>(
    rasterizer: &R,
    files: &[P],
    output: impl AsRef<Path>,
    options: &DeckOptions,
) -> Result<DeckSummary>
where
    R: Rasterizer + ?Sized,
    P: AsRef<Path>,
{
    options.validate()?;
    let output = output.as_ref();

    let mut files: Vec<PathBuf> = files.iter().map(|f| f.as_ref().to_owned()).collect();
    sort_by_name(&mut files);
    let files = dedup_paths(files);

    for file in &files {
        if !file.is_file() {
            return Err(DeckError::invalid_input(file, "file not found"));
        }
        if !is_document_path(file) && !is_image_path(file) {
            return Err(DeckError::invalid_input(file, "unsupported file type"));
        }
    }

    let canvas = match (options.slide_size.fixed_canvas()?, files.as_slice()) {
        (Some(canvas), _) => canvas,
        (None, [single]) if is_document_path(single) => document_canvas(rasterizer, single)?,
        (None, _) => Canvas::from_preset(SlidePreset::Widescreen),
    };

    // Rasterized pages stay alive until the deck is written; dropping them
    // on an early return removes their temporary directories.
    let mut rasterized: Vec<RasterizedPages> = Vec::new();
    let mut images: Vec<PathBuf> = Vec::new();
    for file in &files {
        if is_document_path(file) {
            let pages = rasterizer.rasterize(file, options.dpi)?;
            log::debug!("{}: {} page(s)", file.display(), pages.len());
            images.extend_from_slice(pages.pages());
            rasterized.push(pages);
        } else {
            images.push(file.clone());
        }
    }

    if images.is_empty() {
        let path = files.first().cloned().unwrap_or_else(|| output.to_owned());
        return Err(DeckError::invalid_input(path, "no images to convert"));
    }

    let built = build(&images, output, &canvas, options.mode);
    rasterized.into_iter().for_each(release);
    let slide_count = built?;

    Ok(DeckSummary {
        output_path: output.to_owned(),
        slide_count,
        canvas,
    })
}

/// File name for a deck built from `inputs`.
///
/// A non-blank `custom` name wins and gets a `.pptx` extension unless it
/// already has one. A single input lends its stem; anything else is
/// [`DEFAULT_OUTPUT_NAME`].
pub fn output_file_name<P: AsRef<Path>>(custom: Option<&str>, inputs: &[P]) -> String {
    if let Some(name) = custom.map(str::trim).filter(|name| !name.is_empty()) {
        return with_deck_extension(name);
    }

    match inputs {
        [single] => match single.as_ref().file_stem() {
            Some(stem) => format!("{}.{}", stem.to_string_lossy(), DECK_EXTENSION),
            None => DEFAULT_OUTPUT_NAME.to_string(),
        },
        _ => DEFAULT_OUTPUT_NAME.to_string(),
    }
}

/// Append `.pptx` to `name` unless it already ends with it (any case)
pub fn with_deck_extension(name: &str) -> String {
    let suffix = format!(".{}", DECK_EXTENSION);
    if name.to_lowercase().ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

fn require_document(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(DeckError::invalid_input(path, "file not found"));
    }
    if !is_document_path(path) {
        return Err(DeckError::invalid_input(path, "not a PDF document"));
    }
    Ok(())
}

fn document_canvas<R: Rasterizer + ?Sized>(rasterizer: &R, document: &Path) -> Result<Canvas> {
    let (width_in, height_in) = rasterizer.first_page_physical_size(document)?;
    log::debug!(
        "{}: first page is {:.2}\" x {:.2}\"",
        document.display(),
        width_in,
        height_in
    );
    Ok(Canvas::new(width_in, height_in)?.within_slide_limits())
}

fn release(pages: RasterizedPages) {
    let dir = pages.dir().to_owned();
    if let Err(e) = pages.close() {
        log::warn!("Failed to remove {}: {}", dir.display(), e);
    }
}
