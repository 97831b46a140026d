//! Image bytes embedded in a deck

use crate::types::{DeckError, Result};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// An embedded image part
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MediaPart {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
    pub content_type: &'static str,
}

/// Extension and content type for containers slide decks render directly
fn native_container(format: ImageFormat) -> Option<(&'static str, &'static str)> {
    match format {
        ImageFormat::Png => Some(("png", "image/png")),
        ImageFormat::Jpeg => Some(("jpeg", "image/jpeg")),
        ImageFormat::Gif => Some(("gif", "image/gif")),
        ImageFormat::Bmp => Some(("bmp", "image/bmp")),
        ImageFormat::Tiff => Some(("tiff", "image/tiff")),
        _ => None,
    }
}

/// Whether `bytes` hold a GIF with more than one frame
fn is_animated_gif(bytes: &[u8]) -> bool {
    GifDecoder::new(Cursor::new(bytes))
        .map(|decoder| decoder.into_frames().take(2).filter(std::result::Result::is_ok).count() > 1)
        .unwrap_or(false)
}

/// Load `path` for embedding.
///
/// Natively supported containers are embedded byte-for-byte; anything else
/// the decoder understands is re-encoded to PNG at its original pixel size.
/// Animated GIFs are re-encoded too, keeping only the first frame.
pub(crate) fn load_media(path: &Path) -> Result<MediaPart> {
    let decode_err = |source| DeckError::ImageDecode {
        path: path.to_owned(),
        source,
    };

    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes).ok();

    if let Some((extension, content_type)) = format.and_then(native_container) {
        if format != Some(ImageFormat::Gif) || !is_animated_gif(&bytes) {
            return Ok(MediaPart {
                bytes,
                extension,
                content_type,
            });
        }
    }

    log::debug!("Re-encoding {} as PNG for embedding", path.display());
    let image = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()?
        .decode()
        .map_err(decode_err)?;
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(decode_err)?;
    Ok(MediaPart {
        bytes: png,
        extension: "png",
        content_type: "image/png",
    })
}
