// Glob pattern for annotation files inside the input directory
pub const XML_PATTERN: &str = "*.xml";

// Image dimensions from the <size> element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: i64,
    pub height: i64,
}

// Raw <bndbox> corners, truncated to integers but not yet offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BndBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

// One <object> entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocObject {
    pub name: String,
    pub bndbox: BndBox,
}

// The validated content of a single VOC annotation file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocAnnotation {
    pub file_name: String,
    pub size: ImageSize,
    pub objects: Vec<VocObject>,
}
