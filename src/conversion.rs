use indicatif::ProgressBar;
use log::debug;
use std::path::{Path, PathBuf};

use crate::category::CategoryTable;
use crate::coco::{Annotation, CocoFile, Image, ImageId};
use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::types::{BndBox, VocAnnotation};
use crate::utils::strip_extension;
use crate::xml::read_voc_annotation;

/// Sequential ID source that reports exhaustion instead of wrapping
#[derive(Debug, Clone, Copy)]
struct IdCounter {
    next: Option<i64>,
}

impl IdCounter {
    fn new(start: i64) -> Self {
        Self { next: Some(start) }
    }

    /// Hand out the current ID and advance
    fn take(&mut self, xml_file: &Path, name: &str) -> Result<i64> {
        let id = self.next.ok_or_else(|| overflow(xml_file, name))?;
        self.next = id.checked_add(1);
        Ok(id)
    }
}

/// Accumulates COCO records across a run
///
/// The bounding box counter is global to the run; the image counter, when
/// enabled, advances once per file regardless of its object count.
#[derive(Debug)]
pub struct Converter {
    config: ConvertConfig,
    categories: CategoryTable,
    image_ids: Option<IdCounter>,
    bbox_ids: IdCounter,
    images: Vec<Image>,
    annotations: Vec<Annotation>,
}

impl Converter {
    pub fn new(categories: CategoryTable, config: ConvertConfig) -> Self {
        Self {
            config,
            categories,
            image_ids: config.start_image_id.map(IdCounter::new),
            bbox_ids: IdCounter::new(config.start_bbox_id),
            images: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Read one annotation file and add its records
    pub fn add_file(&mut self, xml_file: &Path) -> Result<()> {
        let annotation = read_voc_annotation(xml_file)?;
        self.add_annotation(xml_file, &annotation)
    }

    /// Add the image and bounding boxes of an already parsed annotation
    pub fn add_annotation(&mut self, xml_file: &Path, annotation: &VocAnnotation) -> Result<()> {
        let image_id = match self.image_ids.as_mut() {
            Some(counter) => ImageId::Int(counter.take(xml_file, "image id")?),
            None => ImageId::Name(strip_extension(&annotation.file_name).to_string()),
        };

        self.images.push(Image {
            file_name: annotation.file_name.clone(),
            height: annotation.size.height,
            width: annotation.size.width,
            id: image_id.clone(),
        });

        for object in &annotation.objects {
            let category_id = self.categories.get_or_insert(&object.name);
            let bbox = offset_bbox(xml_file, &object.name, object.bndbox, self.config.bbox_offset)?;
            let area = bbox[2]
                .checked_mul(bbox[3])
                .ok_or_else(|| overflow(xml_file, "bbox area"))?;
            let id = self.bbox_ids.take(xml_file, "bbox id")?;
            self.annotations
                .push(Annotation::new(id, image_id.clone(), category_id, bbox, area));
        }

        debug!(
            "{}: image {:?} with {} objects",
            xml_file.display(),
            image_id,
            annotation.objects.len()
        );
        Ok(())
    }

    /// Finish the run, emitting one category per table entry
    pub fn finish(self) -> CocoFile {
        CocoFile {
            images: self.images,
            annotations: self.annotations,
            categories: self.categories.to_categories(),
            ..CocoFile::default()
        }
    }
}

fn overflow(xml_file: &Path, name: &str) -> ConvertError {
    ConvertError::Overflow {
        path: xml_file.to_path_buf(),
        name: name.to_string(),
    }
}

/// Apply `offset` to the min corner and convert to `[x, y, width, height]`
///
/// The box must keep a positive extent on both axes once offset.
pub fn offset_bbox(xml_file: &Path, name: &str, bndbox: BndBox, offset: i64) -> Result<[i64; 4]> {
    let offset_coord = |value: i64| {
        value
            .checked_add(offset)
            .ok_or_else(|| overflow(xml_file, "bbox offset"))
    };
    let xmin = offset_coord(bndbox.xmin)?;
    let ymin = offset_coord(bndbox.ymin)?;
    let BndBox { xmax, ymax, .. } = bndbox;

    if xmax <= xmin || ymax <= ymin {
        return Err(ConvertError::InvalidBbox {
            path: xml_file.to_path_buf(),
            name: name.to_string(),
            xmin,
            ymin,
            xmax,
            ymax,
        });
    }

    // Positive after the check above, so only the subtraction itself can overflow
    let extent = |max: i64, min: i64| {
        max.checked_sub(min)
            .ok_or_else(|| overflow(xml_file, "bbox extent"))
    };
    Ok([xmin, ymin, extent(xmax, xmin)?, extent(ymax, ymin)?])
}

/// Convert every file in order, stopping at the first error
pub fn convert_xml_to_json(
    xml_files: &[PathBuf],
    categories: CategoryTable,
    config: ConvertConfig,
    pb: &ProgressBar,
) -> Result<CocoFile> {
    let mut converter = Converter::new(categories, config);
    for xml_file in xml_files {
        converter.add_file(xml_file)?;
        pb.inc(1);
    }
    Ok(converter.finish())
}
