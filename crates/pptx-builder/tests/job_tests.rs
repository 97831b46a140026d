mod common;

use common::*;
use image::{DynamicImage, Rgb, RgbImage};
use pptx_builder::*;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Renders each page as a small solid image, shaded by page number
#[derive(Default)]
struct FakeRasterizer {
    temp_dirs: RefCell<Vec<PathBuf>>,
}

impl Rasterizer for FakeRasterizer {
    fn rasterize(&self, document: &Path, dpi: u32) -> Result<RasterizedPages> {
        let doc = lopdf::Document::load(document).map_err(|e| DeckError::Rasterization {
            path: document.to_owned(),
            reason: e.to_string(),
        })?;

        let mut pages = RasterizedPages::create(document)?;
        self.temp_dirs.borrow_mut().push(pages.dir().to_owned());
        for (index, _) in doc.get_pages().iter().enumerate() {
            let shade = (index * 40 % 256) as u8;
            let page = RgbImage::from_pixel(dpi / 10, dpi / 5, Rgb([shade, shade, shade]));
            pages.push_image(&DynamicImage::ImageRgb8(page))?;
        }
        Ok(pages)
    }
}

impl FakeRasterizer {
    fn temp_dirs_removed(&self) -> bool {
        self.temp_dirs.borrow().iter().all(|dir| !dir.exists())
    }
}

fn options() -> DeckOptions {
    DeckOptions {
        dpi: 100,
        ..DeckOptions::default()
    }
}

#[test]
fn test_output_file_name() {
    let one = [PathBuf::from("/data/Quarterly Report.pdf")];
    let two = [PathBuf::from("a.png"), PathBuf::from("b.png")];
    let none: [PathBuf; 0] = [];

    assert_eq!(output_file_name(Some("Deck"), &two), "Deck.pptx");
    assert_eq!(output_file_name(Some("  deck.PPTX "), &one), "deck.PPTX");
    assert_eq!(output_file_name(Some("   "), &one), "Quarterly Report.pptx");
    assert_eq!(output_file_name(None, &one), "Quarterly Report.pptx");
    assert_eq!(output_file_name(None, &two), DEFAULT_OUTPUT_NAME);
    assert_eq!(output_file_name(None, &none), "presentation.pptx");
}

#[test]
fn test_with_deck_extension() {
    assert_eq!(with_deck_extension("slides"), "slides.pptx");
    assert_eq!(with_deck_extension("slides.pptx"), "slides.pptx");
    assert_eq!(with_deck_extension("slides.ppt"), "slides.ppt.pptx");
}

#[test]
fn test_out_of_range_custom_size_fails_before_rasterizing() {
    let dir = TempDir::new().unwrap();
    let pdf = save_pdf(&mut create_test_pdf(&[(612, 792)]), dir.path(), "doc.pdf");
    let output = dir.path().join("doc.pptx");
    let options = DeckOptions {
        slide_size: SlideSize::Custom {
            width_in: 60.0,
            height_in: 7.5,
        },
        ..options()
    };
    let rasterizer = FakeRasterizer::default();

    let result = convert_document(&rasterizer, &pdf, &output, &options);
    assert!(matches!(result, Err(DeckError::Config(_))));
    assert!(rasterizer.temp_dirs.borrow().is_empty());
    assert!(!output.exists());
}

#[test]
fn test_convert_image_folder_auto_size() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "b.png", 960, 480);
    write_png(dir.path(), "A.png", 480, 960);
    fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();
    let output = dir.path().join("folder.pptx");

    let summary = convert_image_folder(dir.path(), &output, &options()).unwrap();

    assert_eq!(summary.slide_count, 2);
    assert_eq!(summary.output_path, output);
    // First image is portrait 480x960 at 96 DPI, turned to landscape
    assert_eq!(summary.canvas.dimensions_in(), (10.0, 5.0));
    assert_eq!(slide_pictures(&output, 1)[0].0, "A.png");
    assert_eq!(slide_pictures(&output, 2)[0].0, "b.png");
}

#[test]
fn test_convert_image_folder_preset_size() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "a.png", 64, 64);
    let output = dir.path().join("preset.pptx");
    let options = DeckOptions {
        slide_size: SlideSize::Preset(SlidePreset::Standard),
        ..options()
    };

    let summary = convert_image_folder(dir.path(), &output, &options).unwrap();

    assert_eq!(summary.canvas.dimensions_in(), (10.0, 7.5));
    assert_eq!(presentation_info(&output).1, (9_144_000, 6_858_000));
}

#[test]
fn test_convert_image_folder_without_images() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("nothing.pptx");

    let result = convert_image_folder(dir.path(), &output, &options());
    assert!(matches!(result, Err(DeckError::InvalidInput { .. })));
    assert!(!output.exists());
}

#[test]
fn test_convert_document_auto_size() {
    let dir = TempDir::new().unwrap();
    let pdf = save_pdf(
        &mut create_test_pdf(&[(792, 612), (792, 612), (792, 612)]),
        dir.path(),
        "landscape.pdf",
    );
    let output = dir.path().join("landscape.pptx");
    let rasterizer = FakeRasterizer::default();

    let summary = convert_document(&rasterizer, &pdf, &output, &options()).unwrap();

    assert_eq!(summary.slide_count, 3);
    assert_eq!(summary.canvas.dimensions_in(), (11.0, 8.5));
    assert_eq!(presentation_info(&output), (3, (10_058_400, 7_772_400)));
    assert!(rasterizer.temp_dirs_removed());
}

#[test]
fn test_convert_empty_document() {
    let dir = TempDir::new().unwrap();
    let pdf = save_pdf(&mut create_test_pdf(&[]), dir.path(), "empty.pdf");
    let output = dir.path().join("empty.pptx");

    let summary = convert_document(&FakeRasterizer::default(), &pdf, &output, &options()).unwrap();

    assert_eq!(summary.slide_count, 0);
    assert_eq!(summary.canvas.dimensions_in(), (13.3333, 7.5));
    assert_eq!(presentation_info(&output).0, 0);
}

#[test]
fn test_convert_document_rejects_bad_inputs() {
    let dir = TempDir::new().unwrap();
    let image = write_png(dir.path(), "a.png", 10, 10);
    let output = dir.path().join("out.pptx");
    let rasterizer = FakeRasterizer::default();

    let missing = convert_document(&rasterizer, dir.path().join("missing.pdf"), &output, &options());
    assert!(matches!(missing, Err(DeckError::InvalidInput { .. })));

    let not_pdf = convert_document(&rasterizer, &image, &output, &options());
    assert!(matches!(not_pdf, Err(DeckError::InvalidInput { .. })));

    let bad_dpi = DeckOptions {
        dpi: 0,
        ..options()
    };
    let invalid = convert_document(&rasterizer, &image, &output, &bad_dpi);
    assert!(matches!(invalid, Err(DeckError::Config(_))));
    assert!(!output.exists());
}

#[test]
fn test_convert_document_failure_cleans_up() {
    let dir = TempDir::new().unwrap();
    let pdf = save_pdf(&mut create_test_pdf(&[(612, 792)]), dir.path(), "doc.pdf");
    // A directory in the way makes the final rename fail
    let output = dir.path().join("blocked.pptx");
    fs::create_dir(&output).unwrap();
    fs::write(output.join("keep"), b"").unwrap();
    let rasterizer = FakeRasterizer::default();

    let result = convert_document(&rasterizer, &pdf, &output, &options());

    assert!(matches!(result, Err(DeckError::Write { .. })));
    assert!(rasterizer.temp_dirs_removed());
}

#[test]
fn test_convert_files_orders_by_name_and_keeps_pages_together() {
    let dir = TempDir::new().unwrap();
    let b_pdf = save_pdf(
        &mut create_test_pdf(&[(612, 792), (612, 792)]),
        dir.path(),
        "b.pdf",
    );
    let a_png = write_png(dir.path(), "A.png", 20, 20);
    let c_png = write_png(dir.path(), "c.png", 20, 20);
    let output = dir.path().join("batch.pptx");
    let rasterizer = FakeRasterizer::default();

    let files = vec![c_png.clone(), b_pdf, a_png.clone(), c_png];
    let summary = convert_files(&rasterizer, &files, &output, &options()).unwrap();

    assert_eq!(summary.slide_count, 4);
    // Several files never auto-detect: widescreen default
    assert_eq!(
        summary.canvas,
        Canvas::from_preset(SlidePreset::Widescreen)
    );
    let descriptions: Vec<String> = (1..=4)
        .map(|n| slide_pictures(&output, n).remove(0).0)
        .collect();
    assert_eq!(
        descriptions,
        vec!["A.png", "page_0001.png", "page_0002.png", "c.png"]
    );
    assert!(rasterizer.temp_dirs_removed());
}

#[test]
fn test_convert_files_single_pdf_auto_size() {
    let dir = TempDir::new().unwrap();
    let pdf = save_pdf(&mut create_test_pdf(&[(612, 792)]), dir.path(), "one.pdf");
    let output = dir.path().join("one.pptx");

    let summary =
        convert_files(&FakeRasterizer::default(), &[&pdf], &output, &options()).unwrap();

    assert_eq!(summary.canvas.dimensions_in(), (8.5, 11.0));
    assert_eq!(summary.slide_count, 1);
}

#[test]
fn test_convert_files_rejects_unsupported_and_empty() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("notes.txt");
    fs::write(&text, b"hello").unwrap();
    let empty_pdf = save_pdf(&mut create_test_pdf(&[]), dir.path(), "empty.pdf");
    let output = dir.path().join("out.pptx");
    let rasterizer = FakeRasterizer::default();

    let unsupported = convert_files(&rasterizer, &[&text], &output, &options());
    assert!(matches!(unsupported, Err(DeckError::InvalidInput { .. })));

    let nothing = convert_files(&rasterizer, &[&empty_pdf], &output, &options());
    assert!(matches!(nothing, Err(DeckError::InvalidInput { .. })));

    let no_files: Vec<PathBuf> = Vec::new();
    let none = convert_files(&rasterizer, &no_files, &output, &options());
    assert!(matches!(none, Err(DeckError::InvalidInput { .. })));

    assert!(!output.exists());
    assert!(rasterizer.temp_dirs_removed());
}

#[tokio::test]
async fn test_convert_image_folder_async() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "a.png", 96, 96);
    let output = dir.path().join("async.pptx");

    let summary = convert_image_folder_async(dir.path(), &output, options())
        .await
        .unwrap();

    assert_eq!(summary.slide_count, 1);
    assert_eq!(summary.canvas.dimensions_in(), (1.0, 1.0));
}

#[tokio::test]
async fn test_convert_document_async_validates_first() {
    let options = DeckOptions {
        dpi: 5000,
        ..DeckOptions::default()
    };

    let result =
        convert_document_async(FakeRasterizer::default(), "unused.pdf", "unused.pptx", options)
            .await;
    assert!(matches!(result, Err(DeckError::Config(_))));
}
