use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments parser for converting Pascal VOC XML to COCO JSON.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Convert Pascal VOC annotation to COCO format.", long_about = None)]
pub struct Args {
    /// Directory path to xml files
    pub xml_dir: PathBuf,

    /// Output COCO format json file
    pub json_file: PathBuf,

    /// Image start ID; image IDs are file names without extension when omitted
    #[arg(long = "start_image_id", allow_negative_numbers = true)]
    pub start_image_id: Option<i64>,

    /// Bounding Box start ID
    #[arg(long = "start_bbox_id", default_value_t = 1, allow_negative_numbers = true)]
    pub start_bbox_id: i64,

    /// Specify a category list, one name per line
    #[arg(long = "category")]
    pub category: Option<PathBuf>,

    /// COCO format json indent
    #[arg(long = "indent")]
    pub indent: Option<usize>,

    /// Bounding Box offset, added to xmin and ymin
    #[arg(long = "bbox_offset", default_value_t = -1, allow_negative_numbers = true)]
    pub bbox_offset: i64,
}

impl Args {
    /// Converter parameters carried by these arguments
    pub fn to_convert_config(&self) -> ConvertConfig {
        ConvertConfig {
            start_image_id: self.start_image_id,
            start_bbox_id: self.start_bbox_id,
            bbox_offset: self.bbox_offset,
        }
    }
}

/// Parameters for assigning IDs and adjusting coordinates during conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertConfig {
    pub start_image_id: Option<i64>,
    pub start_bbox_id: i64,
    pub bbox_offset: i64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            start_image_id: None,
            start_bbox_id: 1,
            bbox_offset: -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["voc2coco", "Annotations", "out.json"]).unwrap();
        assert_eq!(args.to_convert_config(), ConvertConfig::default());
        assert_eq!(args.indent, None);
        assert_eq!(args.category, None);
    }

    #[test]
    fn test_negative_and_explicit_values() {
        let args = Args::try_parse_from([
            "voc2coco",
            "Annotations",
            "out.json",
            "--start_image_id",
            "100",
            "--start_bbox_id",
            "5",
            "--bbox_offset",
            "-2",
            "--indent",
            "4",
            "--category",
            "classes.txt",
        ])
        .unwrap();
        let config = args.to_convert_config();
        assert_eq!(config.start_image_id, Some(100));
        assert_eq!(config.start_bbox_id, 5);
        assert_eq!(config.bbox_offset, -2);
        assert_eq!(args.indent, Some(4));
        assert_eq!(args.category, Some(PathBuf::from("classes.txt")));
    }

    #[test]
    fn test_missing_positionals_rejected() {
        assert!(Args::try_parse_from(["voc2coco", "Annotations"]).is_err());
    }
}
