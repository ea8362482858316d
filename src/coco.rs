//! COCO format data structures
//!
//! Field declaration order is the serialized key order, so the emitted
//! document keeps a stable layout between runs.

use serde::{Deserialize, Serialize};

/// Image identifier: the file stem, or an integer once a start ID is configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageId {
    Int(i64),
    Name(String),
}

/// COCO image information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub file_name: String,
    pub height: i64,
    pub width: i64,
    pub id: ImageId,
}

/// COCO annotation information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub area: i64,
    pub iscrowd: u8,
    pub image_id: ImageId,
    pub bbox: [i64; 4], // [x, y, width, height]
    pub category_id: i64,
    pub id: i64,
    pub ignore: u8,
    pub segmentation: Vec<Vec<f64>>,
}

impl Annotation {
    /// Axis-aligned box annotation; crowd and ignore flags are always 0
    pub fn new(id: i64, image_id: ImageId, category_id: i64, bbox: [i64; 4], area: i64) -> Self {
        Self {
            area,
            iscrowd: 0,
            image_id,
            bbox,
            category_id,
            id,
            ignore: 0,
            segmentation: Vec::new(),
        }
    }
}

/// COCO category information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub supercategory: String,
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: String) -> Self {
        Self {
            supercategory: "none".to_string(),
            id,
            name,
        }
    }
}

/// Complete COCO instances document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocoFile {
    pub images: Vec<Image>,
    #[serde(rename = "type")]
    pub kind: String,
    pub annotations: Vec<Annotation>,
    pub categories: Vec<Category>,
}

impl Default for CocoFile {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            kind: "instances".to_string(),
            annotations: Vec::new(),
            categories: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_key_order() {
        let annotation =
            Annotation::new(1, ImageId::Name("img1".to_string()), 1, [9, 9, 40, 50], 2000);
        let json = serde_json::to_string(&annotation).unwrap();
        assert_eq!(
            json,
            r#"{"area":2000,"iscrowd":0,"image_id":"img1","bbox":[9,9,40,50],"category_id":1,"id":1,"ignore":0,"segmentation":[]}"#
        );
    }

    #[test]
    fn test_image_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&ImageId::Int(100)).unwrap(), "100");
        assert_eq!(
            serde_json::to_string(&ImageId::Name("a".to_string())).unwrap(),
            r#""a""#
        );
    }

    #[test]
    fn test_empty_document_layout() {
        let json = serde_json::to_string(&CocoFile::default()).unwrap();
        assert_eq!(
            json,
            r#"{"images":[],"type":"instances","annotations":[],"categories":[]}"#
        );
    }
}
