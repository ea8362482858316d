//! Element access for Pascal VOC annotation files
//!
//! Lookups only consider the direct children of a node, matched by local tag
//! name. `find_one` enforces the "exactly one" cardinality that every
//! mandatory VOC field is held to.

use roxmltree::{Document, Node, ParsingOptions};
use std::fs;
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::types::{BndBox, ImageSize, VocAnnotation, VocObject};
use crate::utils::basename;

/// Read an annotation file into memory
pub fn read_document_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse XML text, allowing a DOCTYPE header as some labeling tools emit one
pub fn parse_document<'i>(path: &Path, text: &'i str) -> Result<Document<'i>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options).map_err(|source| ConvertError::Xml {
        path: path.to_path_buf(),
        source,
    })
}

/// All direct children of `node` named `name`, in document order
pub fn find_all<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Vec<Node<'a, 'i>> {
    node.children()
        .filter(|child| child.is_element() && child.tag_name().name() == name)
        .collect()
}

/// The single direct child of `node` named `name`
pub fn find_one<'a, 'i>(node: Node<'a, 'i>, name: &str, path: &Path) -> Result<Node<'a, 'i>> {
    let mut found = find_all(node, name);
    match found.len() {
        1 => Ok(found.remove(0)),
        0 => Err(ConvertError::MissingElement {
            path: path.to_path_buf(),
            parent: node.tag_name().name().to_string(),
            name: name.to_string(),
        }),
        count => Err(ConvertError::Cardinality {
            path: path.to_path_buf(),
            name: name.to_string(),
            expected: 1,
            found: count,
        }),
    }
}

/// Text content of an element; an empty element reads as ""
pub fn element_text<'a>(node: Node<'a, '_>) -> &'a str {
    node.text().unwrap_or_default()
}

/// Text content of an element that must not be empty
pub fn required_text<'a>(node: Node<'a, '_>, path: &Path) -> Result<&'a str> {
    node.text().ok_or_else(|| ConvertError::MissingElement {
        path: path.to_path_buf(),
        parent: node.tag_name().name().to_string(),
        name: "text".to_string(),
    })
}

/// Integer value of the single child `name`
pub fn child_int(node: Node, name: &str, path: &Path) -> Result<i64> {
    let text = element_text(find_one(node, name, path)?);
    text.trim()
        .parse::<i64>()
        .map_err(|_| invalid_number(path, name, text))
}

/// Coordinate value of the single child `name`: parsed as a float, truncated toward zero
///
/// Values outside the `i64` range are rejected rather than saturated.
pub fn child_coord(node: Node, name: &str, path: &Path) -> Result<i64> {
    let text = element_text(find_one(node, name, path)?);
    match text.trim().parse::<f64>() {
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
        Ok(value) if value >= i64::MIN as f64 && value < i64::MAX as f64 => {
            Ok(value.trunc() as i64)
        }
        _ => Err(invalid_number(path, name, text)),
    }
}

fn invalid_number(path: &Path, name: &str, value: &str) -> ConvertError {
    ConvertError::InvalidNumber {
        path: path.to_path_buf(),
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Category names of every `object` in a file, in document order
pub fn read_object_names(path: &Path) -> Result<Vec<String>> {
    let text = read_document_text(path)?;
    let doc = parse_document(path, &text)?;
    find_all(doc.root_element(), "object")
        .into_iter()
        .map(|object| find_one(object, "name", path).map(|name| element_text(name).to_string()))
        .collect()
}

/// Read and validate a whole VOC annotation file
pub fn read_voc_annotation(path: &Path) -> Result<VocAnnotation> {
    let text = read_document_text(path)?;
    let doc = parse_document(path, &text)?;
    let root = doc.root_element();

    // A single <path> wins over <filename>; several are ambiguous
    let paths = find_all(root, "path");
    let file_name = match paths.as_slice() {
        [source] => basename(required_text(*source, path)?).to_string(),
        [] => required_text(find_one(root, "filename", path)?, path)?.to_string(),
        _ => {
            return Err(ConvertError::AmbiguousPath {
                path: path.to_path_buf(),
                count: paths.len(),
            })
        }
    };

    let size_node = find_one(root, "size", path)?;
    let size = ImageSize {
        width: child_int(size_node, "width", path)?,
        height: child_int(size_node, "height", path)?,
    };

    let objects = find_all(root, "object")
        .into_iter()
        .map(|object| read_object(object, path))
        .collect::<Result<Vec<_>>>()?;

    Ok(VocAnnotation {
        file_name,
        size,
        objects,
    })
}

fn read_object(object: Node, path: &Path) -> Result<VocObject> {
    let name = element_text(find_one(object, "name", path)?).to_string();
    let bndbox = find_one(object, "bndbox", path)?;
    Ok(VocObject {
        name,
        bndbox: BndBox {
            xmin: child_coord(bndbox, "xmin", path)?,
            ymin: child_coord(bndbox, "ymin", path)?,
            xmax: child_coord(bndbox, "xmax", path)?,
            ymax: child_coord(bndbox, "ymax", path)?,
        },
    })
}
