//! Deck assembly
//!
//! This module turns an ordered image list into a finished deck:
//! 1. Create an empty deck at the target canvas size
//! 2. For each image, add a blank slide and place the image on it
//! 3. Serialize the deck to its destination
//!
//! The assembler talks to the output format only through [`SlideSink`].

mod media;
mod parts;
mod pptx;

pub use pptx::{MAX_SLIDE_EMU, MIN_SLIDE_EMU, PptxDeck};

use crate::placement::compute_placement_for;
use crate::types::{Canvas, PlacementMode, Result, SourceImage};
use std::path::Path;

/// Narrow interface to a slide-document library.
///
/// Geometry is in inches, measured from the slide's top-left corner;
/// implementations convert to their own units.
pub trait SlideSink {
    /// Append an empty slide; later placements go onto it
    fn add_blank_slide(&mut self) -> Result<()>;

    /// Place the full, unmodified image at `path` on the last slide
    fn place_image(
        &mut self,
        path: &Path,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Result<()>;

    /// Persist the document to `path`, replacing any existing file
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// Add one slide per image to `sink`, in the given order.
///
/// Returns the number of slides added.
pub fn assemble<S, P>(
    sink: &mut S,
    images: &[P],
    canvas: &Canvas,
    mode: PlacementMode,
) -> Result<usize>
where
    S: SlideSink + ?Sized,
    P: AsRef<Path>,
{
    for (index, image) in images.iter().enumerate() {
        let source = SourceImage::open(image)?;
        let placement =
            compute_placement_for(Some(source.path()), source.dimensions(), canvas, mode)?;
        log::debug!(
            "Slide {}: {} {:?} -> {:.3}\" x {:.3}\" at ({:.3}\", {:.3}\")",
            index + 1,
            source.path().display(),
            source.dimensions(),
            placement.scaled_width,
            placement.scaled_height,
            placement.offset_x,
            placement.offset_y
        );

        sink.add_blank_slide()?;
        sink.place_image(
            source.path(),
            placement.offset_x,
            placement.offset_y,
            placement.scaled_width,
            placement.scaled_height,
        )?;
    }
    Ok(images.len())
}

/// Build a deck at `destination` with one slide per image.
///
/// Image order is preserved as given. Parent directories are created and
/// an existing file at `destination` is replaced; whether that is allowed
/// is the caller's decision. An empty image list still produces a valid,
/// slide-less deck.
pub fn build<P: AsRef<Path>>(
    images: &[P],
    destination: impl AsRef<Path>,
    canvas: &Canvas,
    mode: PlacementMode,
) -> Result<usize> {
    let destination = destination.as_ref();
    let mut deck = PptxDeck::new(canvas)?;
    let slides = assemble(&mut deck, images, canvas, mode)?;
    deck.save(destination)?;
    Ok(slides)
}
