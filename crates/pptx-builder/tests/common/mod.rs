#![allow(dead_code)]

use image::{Rgb, RgbImage};
use lopdf::{Dictionary, Document, Object, Stream};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Write a solid PNG of `width` x `height` pixels
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([200, 40, 40]))
        .save(&path)
        .unwrap();
    path
}

fn media_box(width_pt: i64, height_pt: i64) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(width_pt),
        Object::Integer(height_pt),
    ])
}

/// Build a PDF whose pages carry the given MediaBox sizes in points
pub fn create_test_pdf(page_sizes: &[(i64, i64)]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for &(width, height) in page_sizes {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("MediaBox", media_box(width, height)),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_sizes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Save `doc` to `dir/name`
pub fn save_pdf(doc: &mut Document, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// Read one part of a saved deck as text
pub fn read_part(deck: &Path, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(deck).unwrap()).unwrap();
    let mut xml = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

/// Names of every part in a saved deck
pub fn part_names(deck: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(deck).unwrap()).unwrap();
    archive.file_names().map(str::to_string).collect()
}

/// Slide count and `(cx, cy)` slide size as recorded in presentation.xml
pub fn presentation_info(deck: &Path) -> (usize, (i64, i64)) {
    let xml = read_part(deck, "ppt/presentation.xml");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let slides = doc
        .descendants()
        .filter(|n| n.has_tag_name("sldId"))
        .count();
    let size = doc
        .descendants()
        .find(|n| n.has_tag_name("sldSz"))
        .unwrap();
    let cx = size.attribute("cx").unwrap().parse().unwrap();
    let cy = size.attribute("cy").unwrap().parse().unwrap();
    (slides, (cx, cy))
}

/// Every picture on slide `number` as `(description, off x, off y, ext cx, ext cy)`
pub fn slide_pictures(deck: &Path, number: usize) -> Vec<(String, i64, i64, i64, i64)> {
    let xml = read_part(deck, &format!("ppt/slides/slide{}.xml", number));
    let doc = roxmltree::Document::parse(&xml).unwrap();
    doc.descendants()
        .filter(|n| n.has_tag_name("pic"))
        .map(|pic| {
            let descr = pic
                .descendants()
                .find(|n| n.has_tag_name("cNvPr"))
                .and_then(|n| n.attribute("descr"))
                .unwrap_or_default()
                .to_string();
            let off = pic.descendants().find(|n| n.has_tag_name("off")).unwrap();
            let ext = pic.descendants().find(|n| n.has_tag_name("ext")).unwrap();
            let attr = |node: roxmltree::Node, name: &str| -> i64 {
                node.attribute(name).unwrap().parse().unwrap()
            };
            (
                descr,
                attr(off, "x"),
                attr(off, "y"),
                attr(ext, "cx"),
                attr(ext, "cy"),
            )
        })
        .collect()
}
