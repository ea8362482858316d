//! Pascal VOC to COCO format converter
//!
//! This library converts a directory of Pascal VOC XML annotations into a
//! single COCO instances JSON file for object detection training.

pub mod category;
pub mod coco;
pub mod config;
pub mod conversion;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;
pub mod xml;

use log::{info, warn};

// Re-export commonly used types and functions
pub use category::CategoryTable;
pub use coco::{Annotation, Category, CocoFile, Image, ImageId};
pub use config::{Args, ConvertConfig};
pub use conversion::{convert_xml_to_json, Converter};
pub use error::{ConvertError, Result};
pub use io::{collect_xml_files, write_coco_file};

use utils::create_progress_bar;

/// Run a whole conversion as described by `args`
///
/// Nothing is written unless every file converts.
pub fn run(args: &Args) -> Result<()> {
    if !args.xml_dir.is_dir() {
        warn!(
            "The specified xml_dir does not exist: {}",
            args.xml_dir.display()
        );
    }
    let xml_files = collect_xml_files(&args.xml_dir)?;

    let categories = match &args.category {
        Some(category_file) => CategoryTable::from_list_file(category_file)?,
        None => CategoryTable::from_annotation_files(&xml_files)?,
    };

    info!("Number of xml files: {}", xml_files.len());

    let pb = create_progress_bar(xml_files.len() as u64, "Convert XML to JSON");
    let coco = convert_xml_to_json(&xml_files, categories, args.to_convert_config(), &pb);
    pb.finish_and_clear();
    let coco = coco?;

    write_coco_file(&args.json_file, &coco, args.indent)?;
    info!("Success: {}", args.json_file.display());
    Ok(())
}
