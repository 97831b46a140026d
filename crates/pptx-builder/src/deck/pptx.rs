//! Presentation package writer
//!
//! Collects slides and pictures in memory and serializes them into an
//! OOXML zip container that opens as a `.pptx` deck.

use super::SlideSink;
use super::media::{MediaPart, load_media};
use super::parts::{self, PictureXml};
use crate::constants::{
    EMU_PER_INCH, MAX_SLIDE_INCHES, MIN_SLIDE_INCHES, emu_to_inches, inches_to_emu,
};
use crate::types::{Canvas, DeckError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Slide size limits accepted by presentation applications (1" to 56")
pub const MIN_SLIDE_EMU: i64 = (MIN_SLIDE_INCHES * EMU_PER_INCH) as i64;
pub const MAX_SLIDE_EMU: i64 = (MAX_SLIDE_INCHES * EMU_PER_INCH) as i64;

#[derive(Debug, Clone, PartialEq)]
struct Picture {
    media: usize,
    description: String,
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Slide {
    pictures: Vec<Picture>,
}

/// An in-memory slide deck backed by a fixed canvas
#[derive(Debug)]
pub struct PptxDeck {
    width_emu: i64,
    height_emu: i64,
    slides: Vec<Slide>,
    media: Vec<MediaPart>,
    media_by_path: HashMap<PathBuf, usize>,
}

impl PptxDeck {
    /// Create an empty deck sized to `canvas`.
    ///
    /// # Errors
    /// Returns [`DeckError::Config`] when the canvas is outside the 1" to 56"
    /// range slide decks support.
    pub fn new(canvas: &Canvas) -> Result<Self> {
        canvas.check_slide_limits()?;
        let width_emu = inches_to_emu(canvas.width_in()).clamp(MIN_SLIDE_EMU, MAX_SLIDE_EMU);
        let height_emu = inches_to_emu(canvas.height_in()).clamp(MIN_SLIDE_EMU, MAX_SLIDE_EMU);

        Ok(Self {
            width_emu,
            height_emu,
            slides: Vec::new(),
            media: Vec::new(),
            media_by_path: HashMap::new(),
        })
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slide size in EMU as written to the package
    pub fn slide_size_emu(&self) -> (i64, i64) {
        (self.width_emu, self.height_emu)
    }

    /// Slide size in inches as written to the package
    pub fn slide_size_in(&self) -> (f64, f64) {
        (emu_to_inches(self.width_emu), emu_to_inches(self.height_emu))
    }

    /// Index of the media part for `path`, loading it on first use
    fn media_index(&mut self, path: &Path) -> Result<usize> {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_owned());
        if let Some(&index) = self.media_by_path.get(&key) {
            return Ok(index);
        }
        let media = load_media(path)?;
        self.media.push(media);
        let index = self.media.len() - 1;
        self.media_by_path.insert(key, index);
        Ok(index)
    }

    /// Serialize the package into `writer`
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let xml_options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        // Image containers are already compressed
        let media_options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        let mut media_types: Vec<(&str, &str)> = Vec::new();
        for media in &self.media {
            let entry = (media.extension, media.content_type);
            if !media_types.contains(&entry) {
                media_types.push(entry);
            }
        }

        let slide_count = self.slides.len();
        let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let xml_parts = [
            (
                parts::CONTENT_TYPES.to_string(),
                parts::content_types_xml(slide_count, &media_types),
            ),
            (parts::ROOT_RELS.to_string(), parts::root_rels_xml()),
            (
                parts::PRESENTATION.to_string(),
                parts::presentation_xml(slide_count, self.width_emu, self.height_emu),
            ),
            (
                parts::PRESENTATION_RELS.to_string(),
                parts::presentation_rels_xml(slide_count),
            ),
            (parts::SLIDE_MASTER.to_string(), parts::slide_master_xml()),
            (
                parts::SLIDE_MASTER_RELS.to_string(),
                parts::slide_master_rels_xml(),
            ),
            (parts::SLIDE_LAYOUT.to_string(), parts::slide_layout_xml()),
            (
                parts::SLIDE_LAYOUT_RELS.to_string(),
                parts::slide_layout_rels_xml(),
            ),
            (parts::THEME.to_string(), parts::theme_xml()),
            (parts::PRES_PROPS.to_string(), parts::pres_props_xml()),
            (parts::VIEW_PROPS.to_string(), parts::view_props_xml()),
            (parts::TABLE_STYLES.to_string(), parts::table_styles_xml()),
            (parts::CORE_PROPS.to_string(), parts::core_props_xml(&created)),
            (parts::APP_PROPS.to_string(), parts::app_props_xml(slide_count)),
        ];
        for (name, xml) in &xml_parts {
            put(&mut zip, name, xml.as_bytes(), xml_options)?;
        }

        for (index, slide) in self.slides.iter().enumerate() {
            let number = index + 1;
            let mut rels = Vec::new();
            let mut rel_ids: HashMap<usize, String> = HashMap::new();
            for picture in &slide.pictures {
                if !rel_ids.contains_key(&picture.media) {
                    // rId1 is the slide layout
                    let rel_id = format!("rId{}", rel_ids.len() + 2);
                    let media = &self.media[picture.media];
                    rels.push((
                        rel_id.clone(),
                        parts::media_part(picture.media + 1, media.extension),
                    ));
                    rel_ids.insert(picture.media, rel_id);
                }
            }

            let pictures: Vec<PictureXml<'_>> = slide
                .pictures
                .iter()
                .enumerate()
                .map(|(i, picture)| PictureXml {
                    shape_id: i as u32 + 2,
                    rel_id: &rel_ids[&picture.media],
                    description: &picture.description,
                    x: picture.x,
                    y: picture.y,
                    cx: picture.cx,
                    cy: picture.cy,
                })
                .collect();

            put(
                &mut zip,
                &parts::slide_part(number),
                parts::slide_xml(&pictures).as_bytes(),
                xml_options,
            )?;
            put(
                &mut zip,
                &parts::slide_rels_part(number),
                parts::slide_rels_xml(&rels).as_bytes(),
                xml_options,
            )?;
        }

        for (index, media) in self.media.iter().enumerate() {
            put(
                &mut zip,
                &parts::media_part(index + 1, media.extension),
                &media.bytes,
                media_options,
            )?;
        }

        zip.finish()?;
        Ok(())
    }
}

impl SlideSink for PptxDeck {
    fn add_blank_slide(&mut self) -> Result<()> {
        self.slides.push(Slide::default());
        Ok(())
    }

    fn place_image(
        &mut self,
        image: &Path,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        if self.slides.is_empty() {
            return Err(DeckError::Config(
                "place_image called before add_blank_slide".to_string(),
            ));
        }
        let media = self.media_index(image)?;
        let description = image
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let slide = self.slides.len() - 1;
        self.slides[slide].pictures.push(Picture {
            media,
            description,
            x: inches_to_emu(left),
            y: inches_to_emu(top),
            cx: inches_to_emu(width),
            cy: inches_to_emu(height),
        });
        Ok(())
    }

    /// Write the deck to `path`, replacing any existing file.
    ///
    /// The package is written to a temporary sibling and renamed into
    /// place, so a failure never leaves a partial deck at `path`.
    fn save(&mut self, path: &Path) -> Result<()> {
        let write_err = |source| DeckError::Write {
            path: path.to_owned(),
            source,
        };

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(write_err)?;

        let mut staged = tempfile::Builder::new()
            .prefix(".pptxb-")
            .suffix(".tmp")
            .tempfile_in(parent)
            .map_err(write_err)?;

        self.write_to(staged.as_file_mut()).map_err(|e| match e {
            DeckError::Io(source) | DeckError::Zip(zip::result::ZipError::Io(source)) => {
                write_err(source)
            }
            other => other,
        })?;
        staged.as_file().sync_all().map_err(write_err)?;
        staged.persist(path).map_err(|e| write_err(e.error))?;

        log::debug!("Saved {} slide(s) to {}", self.slides.len(), path.display());
        Ok(())
    }
}

fn put<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    bytes: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(name, options)?;
    zip.write_all(bytes)?;
    Ok(())
}
