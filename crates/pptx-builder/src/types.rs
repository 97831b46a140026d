use crate::constants::{
    ASSUMED_IMAGE_DPI, FALLBACK_CANVAS_INCHES, MAX_SLIDE_INCHES, MIN_SLIDE_INCHES,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Invalid input {}: {reason}", path.display())]
    InvalidInput { path: PathBuf, reason: String },
    #[error("Failed to rasterize {}: {reason}", path.display())]
    Rasterization { path: PathBuf, reason: String },
    #[error(
        "Image{} has degenerate size {width}x{height}",
        path.as_deref().map(|p| format!(" {}", p.display())).unwrap_or_default()
    )]
    DegenerateImage {
        path: Option<PathBuf>,
        width: u32,
        height: u32,
    },
    #[error("Failed to read image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl DeckError {
    pub(crate) fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DeckError::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The file the failure is about, when one is known
    pub fn source_path(&self) -> Option<&Path> {
        match self {
            DeckError::InvalidInput { path, .. }
            | DeckError::Rasterization { path, .. }
            | DeckError::ImageDecode { path, .. }
            | DeckError::Write { path, .. } => Some(path),
            DeckError::DegenerateImage { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;

/// How an image is scaled onto the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlacementMode {
    /// Contain: the whole image is visible, background may show
    #[default]
    Fit,
    /// Cover: the canvas is fully covered, overflow is clipped by the slide
    Fill,
}

/// Physical slide size in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    width_in: f64,
    height_in: f64,
}

impl Canvas {
    /// Create a canvas; both dimensions must be finite and strictly positive
    pub fn new(width_in: f64, height_in: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width_in) || !valid(height_in) {
            return Err(DeckError::Config(format!(
                "Canvas dimensions must be positive, got {width_in} x {height_in}"
            )));
        }
        Ok(Self {
            width_in,
            height_in,
        })
    }

    pub fn from_preset(preset: SlidePreset) -> Self {
        let (width_in, height_in) = preset.dimensions_in();
        Self {
            width_in,
            height_in,
        }
    }

    /// Canvas used when a document reports no pages
    pub fn fallback() -> Self {
        Self {
            width_in: FALLBACK_CANVAS_INCHES.0,
            height_in: FALLBACK_CANVAS_INCHES.1,
        }
    }

    /// Derive a canvas from an image's pixel size at the assumed screen DPI,
    /// turned to landscape.
    pub fn from_first_image(image: &SourceImage) -> Result<Self> {
        let (w, h) = image.dimensions();
        let width_in = w as f64 / ASSUMED_IMAGE_DPI;
        let height_in = h as f64 / ASSUMED_IMAGE_DPI;
        if width_in < height_in {
            Canvas::new(height_in, width_in)
        } else {
            Canvas::new(width_in, height_in)
        }
    }

    /// Scale a detected canvas into the 1" to 56" slide range.
    ///
    /// The aspect ratio is kept unless it is too extreme for the range, in
    /// which case the short edge is pinned to the minimum.
    pub fn within_slide_limits(self) -> Self {
        let longest = self.width_in.max(self.height_in);
        let shortest = self.width_in.min(self.height_in);
        let factor = if longest > MAX_SLIDE_INCHES {
            MAX_SLIDE_INCHES / longest
        } else if shortest < MIN_SLIDE_INCHES {
            (MIN_SLIDE_INCHES / shortest).min(MAX_SLIDE_INCHES / longest)
        } else {
            return self;
        };

        let clamp = |v: f64| (v * factor).clamp(MIN_SLIDE_INCHES, MAX_SLIDE_INCHES);
        let adjusted = Self {
            width_in: clamp(self.width_in),
            height_in: clamp(self.height_in),
        };
        log::debug!(
            "Canvas {:.2}\" x {:.2}\" adjusted to {:.2}\" x {:.2}\"",
            self.width_in,
            self.height_in,
            adjusted.width_in,
            adjusted.height_in
        );
        adjusted
    }

    /// Check the canvas against the 1" to 56" slide size range.
    ///
    /// # Errors
    /// Returns [`DeckError::Config`] naming the size when either edge is
    /// outside the range.
    pub fn check_slide_limits(&self) -> Result<()> {
        let in_range = |v: f64| (MIN_SLIDE_INCHES..=MAX_SLIDE_INCHES).contains(&v);
        if in_range(self.width_in) && in_range(self.height_in) {
            return Ok(());
        }
        Err(DeckError::Config(format!(
            "Slide size {:.2}\" x {:.2}\" is outside the supported {}\" to {}\" range",
            self.width_in, self.height_in, MIN_SLIDE_INCHES, MAX_SLIDE_INCHES
        )))
    }

    pub fn width_in(&self) -> f64 {
        self.width_in
    }

    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    pub fn dimensions_in(&self) -> (f64, f64) {
        (self.width_in, self.height_in)
    }
}

/// Standard slide sizes offered by both front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlidePreset {
    /// 16:9 widescreen (13.33" × 7.5")
    Widescreen,
    /// 4:3 standard (10" × 7.5")
    Standard,
    Letter,
    A4,
    Legal,
    Tabloid,
}

impl SlidePreset {
    /// All presets in menu order
    pub const ALL: [SlidePreset; 6] = [
        SlidePreset::Widescreen,
        SlidePreset::Standard,
        SlidePreset::Letter,
        SlidePreset::A4,
        SlidePreset::Legal,
        SlidePreset::Tabloid,
    ];

    /// Landscape dimensions in inches
    pub fn dimensions_in(self) -> (f64, f64) {
        match self {
            SlidePreset::Widescreen => (13.3333333333, 7.5),
            SlidePreset::Standard => (10.0, 7.5),
            SlidePreset::Letter => (11.0, 8.5),
            SlidePreset::A4 => (11.69, 8.27),
            SlidePreset::Legal => (14.0, 8.5),
            SlidePreset::Tabloid => (17.0, 11.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlidePreset::Widescreen => "16:9 (Widescreen)",
            SlidePreset::Standard => "4:3 (Standard)",
            SlidePreset::Letter => "Letter (11\" x 8.5\")",
            SlidePreset::A4 => "A4 (11.69\" x 8.27\")",
            SlidePreset::Legal => "Legal (14\" x 8.5\")",
            SlidePreset::Tabloid => "Tabloid (17\" x 11\")",
        }
    }
}

/// Slide size selection for a conversion
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlideSize {
    /// Derive the canvas from the first page or image
    #[default]
    Auto,
    Preset(SlidePreset),
    Custom { width_in: f64, height_in: f64 },
}

impl SlideSize {
    /// The fixed canvas for this selection, `None` when it must be detected
    pub fn fixed_canvas(self) -> Result<Option<Canvas>> {
        match self {
            SlideSize::Auto => Ok(None),
            SlideSize::Preset(preset) => Ok(Some(Canvas::from_preset(preset))),
            SlideSize::Custom {
                width_in,
                height_in,
            } => {
                let canvas = Canvas::new(width_in, height_in)?;
                canvas.check_slide_limits()?;
                Ok(Some(canvas))
            }
        }
    }
}

/// Computed size and offset of one image on one canvas, in inches
///
/// Offsets are measured from the top-left corner of the slide and may be
/// negative under [`PlacementMode::Fill`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    pub scaled_width: f64,
    pub scaled_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Uniform factor applied to both axes (inches per pixel)
    pub scale: f64,
}

/// A raster image file and its intrinsic pixel size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    path: PathBuf,
    width_px: u32,
    height_px: u32,
}

impl SourceImage {
    /// Read the pixel dimensions of the image at `path` without decoding it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let decode_err = |source| DeckError::ImageDecode {
            path: path.clone(),
            source,
        };
        let reader = image::ImageReader::open(&path)
            .map_err(|e| DeckError::invalid_input(&path, e.to_string()))?;
        let (width_px, height_px) = reader
            .with_guessed_format()?
            .into_dimensions()
            .map_err(decode_err)?;
        Ok(Self {
            path,
            width_px,
            height_px,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }
}

/// What an input path denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A paginated document (PDF)
    Document,
    /// A directory holding at least one supported image
    ImageFolder,
    Unknown,
}

/// Outcome of a finished conversion
#[derive(Debug, Clone, PartialEq)]
pub struct DeckSummary {
    pub output_path: PathBuf,
    pub slide_count: usize,
    pub canvas: Canvas,
}
