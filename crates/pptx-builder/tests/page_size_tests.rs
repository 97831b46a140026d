mod common;

use common::*;
use lopdf::{Document, Object};
use pptx_builder::raster::document_first_page_size_inches;
use pptx_builder::*;
use tempfile::TempDir;

fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
    assert!(
        (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

fn first_page(doc: &mut Document) -> &mut lopdf::Dictionary {
    let page_id = *doc.get_pages().values().next().unwrap();
    doc.get_object_mut(page_id).unwrap().as_dict_mut().unwrap()
}

#[test]
fn test_letter_page_size() {
    let dir = TempDir::new().unwrap();
    let path = save_pdf(&mut create_test_pdf(&[(612, 792)]), dir.path(), "letter.pdf");

    assert_close(first_page_size_inches(&path).unwrap(), (8.5, 11.0));
}

#[test]
fn test_only_first_page_counts() {
    let doc = create_test_pdf(&[(792, 612), (612, 792)]);
    assert_close(document_first_page_size_inches(&doc).unwrap(), (11.0, 8.5));
}

#[test]
fn test_zero_page_document_falls_back() {
    let dir = TempDir::new().unwrap();
    let path = save_pdf(&mut create_test_pdf(&[]), dir.path(), "empty.pdf");

    assert_close(first_page_size_inches(&path).unwrap(), (13.3333, 7.5));
}

#[test]
fn test_rotation_swaps_axes() {
    let mut doc = create_test_pdf(&[(612, 792)]);
    first_page(&mut doc).set("Rotate", Object::Integer(90));
    assert_close(document_first_page_size_inches(&doc).unwrap(), (11.0, 8.5));

    first_page(&mut doc).set("Rotate", Object::Integer(-180));
    assert_close(document_first_page_size_inches(&doc).unwrap(), (8.5, 11.0));
}

#[test]
fn test_crop_box_wins_over_media_box() {
    let mut doc = create_test_pdf(&[(612, 792)]);
    first_page(&mut doc).set(
        "CropBox",
        Object::Array(vec![
            Object::Real(36.0),
            Object::Real(36.0),
            Object::Real(576.0),
            Object::Real(756.0),
        ]),
    );
    assert_close(document_first_page_size_inches(&doc).unwrap(), (7.5, 10.0));
}

#[test]
fn test_media_box_inherited_from_page_tree() {
    let mut doc = create_test_pdf(&[(612, 792)]);
    let media_box = first_page(&mut doc).remove(b"MediaBox").unwrap();

    let page_id = *doc.get_pages().values().next().unwrap();
    let parent_id = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Parent")
        .unwrap()
        .as_reference()
        .unwrap();
    doc.get_object_mut(parent_id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("MediaBox", media_box);

    assert_close(document_first_page_size_inches(&doc).unwrap(), (8.5, 11.0));
}

#[test]
fn test_unreadable_document_is_rasterization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"%PDF-1.7 nothing else").unwrap();

    match first_page_size_inches(&path) {
        Err(DeckError::Rasterization { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("Expected Rasterization error, got {:?}", other),
    }
}
