//! Shared constants for deck building
//!
//! This module centralizes unit conversions, default sizes and the
//! file-type tables used throughout the pipeline.

// =============================================================================
// Unit Conversion
// =============================================================================

/// English Metric Units per inch (the OOXML drawing unit)
pub const EMU_PER_INCH: f64 = 914_400.0;

/// PDF user-space units per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Resolution assumed for raster images when deriving a canvas from pixels
pub const ASSUMED_IMAGE_DPI: f64 = 96.0;

/// Convert inches to EMU, rounded to the nearest integer unit
#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Convert EMU to inches
#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMU_PER_INCH
}

/// Convert PDF points to inches
#[inline]
pub fn pt_to_inches(pt: f64) -> f64 {
    pt / POINTS_PER_INCH
}

// =============================================================================
// Canvas Defaults
// =============================================================================

/// Fallback canvas for documents without pages (16:9 widescreen)
pub const FALLBACK_CANVAS_INCHES: (f64, f64) = (13.3333, 7.5);

/// Smallest slide edge presentation applications accept
pub const MIN_SLIDE_INCHES: f64 = 1.0;

/// Largest slide edge presentation applications accept
pub const MAX_SLIDE_INCHES: f64 = 56.0;

/// Notes page size written into every deck (7.5" × 10")
pub const NOTES_SIZE_EMU: (i64, i64) = (6_858_000, 9_144_000);

// =============================================================================
// Rasterization
// =============================================================================

/// Default rendering resolution for PDF pages
pub const DEFAULT_DPI: u32 = 300;

/// Highest resolution accepted by option validation
pub const MAX_DPI: u32 = 1200;

// =============================================================================
// File Types
// =============================================================================

/// Raster image extensions accepted as slide sources (lower-case, no dot)
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "tif", "tiff", "webp", "bmp", "gif", "ico", "heic", "heif",
];

/// Paginated document extensions that go through rasterization
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

/// Output extension for decks
pub const DECK_EXTENSION: &str = "pptx";
