//! Physical page size lookup
//!
//! Reads the first page's visible box straight from the PDF object tree,
//! so canvas detection works without a rendering backend.

use crate::constants::{FALLBACK_CANVAS_INCHES, pt_to_inches};
use crate::types::{DeckError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

/// Page-tree depth limit when resolving inherited attributes
const MAX_INHERIT_DEPTH: usize = 32;

/// Size of the first page in inches (72 points per inch).
///
/// The CropBox is preferred over the MediaBox, either may be inherited from
/// a parent page-tree node, and a quarter-turn /Rotate swaps the axes.
/// A document without pages yields the 16:9 fallback.
pub fn first_page_size_inches(path: impl AsRef<Path>) -> Result<(f64, f64)> {
    let path = path.as_ref();
    let failure = |reason: String| DeckError::Rasterization {
        path: path.to_owned(),
        reason,
    };
    let doc = Document::load(path).map_err(|e| failure(e.to_string()))?;
    document_first_page_size_inches(&doc).map_err(failure)
}

/// Same as [`first_page_size_inches`] for an already loaded document
pub fn document_first_page_size_inches(
    doc: &Document,
) -> std::result::Result<(f64, f64), String> {
    let Some(&page_id) = doc.get_pages().values().next() else {
        log::debug!("Document has no pages, using fallback canvas");
        return Ok(FALLBACK_CANVAS_INCHES);
    };

    let (width_pt, height_pt) = page_box_dimensions(doc, page_id)?;
    let rotation = inherited(doc, page_id, b"Rotate")
        .and_then(|obj| obj.as_i64().ok())
        .unwrap_or(0)
        .rem_euclid(360);

    let (width_pt, height_pt) = if rotation == 90 || rotation == 270 {
        (height_pt, width_pt)
    } else {
        (width_pt, height_pt)
    };

    Ok((pt_to_inches(width_pt), pt_to_inches(height_pt)))
}

fn page_box_dimensions(
    doc: &Document,
    page_id: ObjectId,
) -> std::result::Result<(f64, f64), String> {
    let page_box = inherited(doc, page_id, b"CropBox")
        .or_else(|| inherited(doc, page_id, b"MediaBox"))
        .and_then(|obj| obj.as_array().ok())
        .ok_or_else(|| "first page has no MediaBox".to_string())?;

    let coords: Vec<f64> = page_box
        .iter()
        .filter_map(|obj| extract_number(resolve(doc, obj)))
        .collect();
    match coords.as_slice() {
        [x0, y0, x1, y1] => Ok(((x1 - x0).abs(), (y1 - y0).abs())),
        _ => Err(format!("malformed page box: {page_box:?}")),
    }
}

/// Look up `key` on the page or the nearest ancestor that defines it
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut dict: &Dictionary = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_INHERIT_DEPTH {
        if let Ok(obj) = dict.get(key) {
            return Some(resolve(doc, obj));
        }
        let parent = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
        dict = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}
