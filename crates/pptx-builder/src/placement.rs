//! Image placement on a slide canvas
//!
//! Pure geometry: given an image's pixel size and the canvas size in
//! inches, compute the proportionally scaled size and the centered
//! offset. The same factor is applied to both axes, so no placement ever
//! distorts the image.

use crate::types::{Canvas, DeckError, PlacementMode, PlacementResult, Result};
use std::path::Path;

/// Compute where an image of `image_px` pixels goes on `canvas`.
///
/// Under [`PlacementMode::Fill`] the offsets may be negative; the slide
/// clips whatever overflows its bounds.
///
/// # Errors
/// Returns [`DeckError::DegenerateImage`] when either pixel dimension is
/// zero, rather than producing infinite geometry.
pub fn compute_placement(
    image_px: (u32, u32),
    canvas: &Canvas,
    mode: PlacementMode,
) -> Result<PlacementResult> {
    compute_placement_for(None, image_px, canvas, mode)
}

/// Same as [`compute_placement`], naming `path` in the degenerate-image error.
pub(crate) fn compute_placement_for(
    path: Option<&Path>,
    image_px: (u32, u32),
    canvas: &Canvas,
    mode: PlacementMode,
) -> Result<PlacementResult> {
    let (width_px, height_px) = image_px;
    if width_px == 0 || height_px == 0 {
        return Err(DeckError::DegenerateImage {
            path: path.map(Path::to_owned),
            width: width_px,
            height: height_px,
        });
    }

    let (iw, ih) = (width_px as f64, height_px as f64);
    let (sw, sh) = canvas.dimensions_in();
    let scale = calculate_scale(iw, ih, sw, sh, mode);

    let scaled_width = iw * scale;
    let scaled_height = ih * scale;

    Ok(PlacementResult {
        scaled_width,
        scaled_height,
        offset_x: (sw - scaled_width) / 2.0,
        offset_y: (sh - scaled_height) / 2.0,
        scale,
    })
}

/// Calculate the uniform scale factor for fitting source to target dimensions.
fn calculate_scale(
    src_width: f64,
    src_height: f64,
    target_width: f64,
    target_height: f64,
    mode: PlacementMode,
) -> f64 {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    match mode {
        PlacementMode::Fit => scale_w.min(scale_h),
        PlacementMode::Fill => scale_w.max(scale_h),
    }
}
