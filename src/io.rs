use glob::{glob_with, MatchOptions, Pattern};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::coco::CocoFile;
use crate::error::{ConvertError, Result};
use crate::types::XML_PATTERN;

/// List the `*.xml` files directly inside `xml_dir`
///
/// Entries come back sorted by path, so repeated runs see the same order.
/// Hidden files are skipped.
pub fn collect_xml_files(xml_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/{}",
        Pattern::escape(&xml_dir.to_string_lossy()),
        XML_PATTERN
    );
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    glob_with(&pattern, options)?
        .map(|entry| {
            entry.map_err(|e| {
                let path = e.path().to_path_buf();
                ConvertError::Io {
                    path,
                    source: e.into_error(),
                }
            })
        })
        .collect()
}

/// Serialize the document, compact or indented by `indent` spaces
pub fn to_json_bytes(coco: &CocoFile, indent: Option<usize>) -> Result<Vec<u8>> {
    match indent {
        None => Ok(serde_json::to_vec(coco)?),
        Some(width) => {
            let indent = " ".repeat(width);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut buf = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            coco.serialize(&mut serializer)?;
            Ok(buf)
        }
    }
}

/// Write the document to `json_file`, creating its parent directories
///
/// Serialization finishes before anything touches the filesystem.
pub fn write_coco_file(json_file: &Path, coco: &CocoFile, indent: Option<usize>) -> Result<()> {
    let bytes = to_json_bytes(coco, indent)?;
    let io_error = |source| ConvertError::Io {
        path: json_file.to_path_buf(),
        source,
    };

    if let Some(parent) = json_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(json_file, bytes).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coco::Category;

    #[test]
    fn test_collect_xml_files_sorted_non_recursive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        for name in ["b.xml", "a.xml", "c.txt", ".hidden.xml"] {
            fs::write(dir.join(name), "<annotation/>").unwrap();
        }
        fs::create_dir(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/d.xml"), "<annotation/>").unwrap();

        let files = collect_xml_files(dir).unwrap();
        assert_eq!(files, vec![dir.join("a.xml"), dir.join("b.xml")]);
    }

    #[test]
    fn test_to_json_bytes_indent() {
        let coco = CocoFile {
            categories: vec![Category::new(1, "cat".to_string())],
            ..CocoFile::default()
        };

        let compact = String::from_utf8(to_json_bytes(&coco, None).unwrap()).unwrap();
        assert!(!compact.contains('\n'));

        let pretty = String::from_utf8(to_json_bytes(&coco, Some(2)).unwrap()).unwrap();
        assert!(pretty.starts_with("{\n  \"images\": [],\n  \"type\": \"instances\""));
        assert!(pretty.contains("\n      \"supercategory\": \"none\""));

        let flat = String::from_utf8(to_json_bytes(&coco, Some(0)).unwrap()).unwrap();
        assert!(flat.starts_with("{\n\"images\": []"));
    }

    #[test]
    fn test_write_coco_file_creates_parents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let json_file = temp_dir.path().join("out/annotations/instances.json");
        write_coco_file(&json_file, &CocoFile::default(), None).unwrap();
        assert!(json_file.exists());
    }
}
