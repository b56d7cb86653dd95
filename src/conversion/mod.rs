//! COCO → YOLO conversion of a single document.
//!
//! Every annotation becomes exactly one label row in the label file of its
//! image. Class indices come from [`ClassMap`]: distinct category names in
//! sorted order, numbered from zero.
//!
//! Rows are buffered per label file and flushed only after the whole
//! document resolved, so a dangling id or a zero-sized image aborts the
//! split before anything is written.

mod classes;
mod lookup;
pub mod report;

pub use classes::ClassMap;
pub use report::{
    ConversionCounts, ConversionIssue, ConversionIssueCode, ConversionReport, ConversionSeverity,
};

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::ir::io_coco_json::read_coco_json;
use crate::ir::io_yolo::{label_file_name, LabelBuffer, YoloLabelRow};
use crate::ir::{CategoryId, Dataset, ImageId};
use crate::progress::create_progress_bar;
use lookup::Lookup;

/// Result of converting one COCO document.
#[derive(Clone, Debug)]
pub struct SplitConversion {
    /// Sorted distinct category names; index = YOLO class id.
    pub class_names: Vec<String>,
    pub report: ConversionReport,
}

/// Converts the COCO document at `coco_json` into YOLO label files under
/// `output_dir`.
///
/// `images_dir` is only read when [`ConvertOptions::check_images`] is set.
/// `output_dir` is created if needed; files already in it are left alone
/// except for the label files this run writes.
pub fn convert_coco_to_yolo(
    coco_json: &Path,
    images_dir: &Path,
    output_dir: &Path,
    opts: &ConvertOptions,
) -> Result<SplitConversion, ConvertError> {
    info!("Converting annotations from {}...", coco_json.display());
    let dataset = read_coco_json(coco_json)?;
    convert_dataset(&dataset, images_dir, output_dir, opts)
}

/// Converts an already loaded document. See [`convert_coco_to_yolo`].
pub fn convert_dataset(
    dataset: &Dataset,
    images_dir: &Path,
    output_dir: &Path,
    opts: &ConvertOptions,
) -> Result<SplitConversion, ConvertError> {
    fs::create_dir_all(output_dir).map_err(ConvertError::Io)?;

    let lookup = Lookup::build(dataset);
    let class_map = ClassMap::from_dataset(dataset);
    let mut report = ConversionReport::new();
    let mut buffer = LabelBuffer::new();
    let mut annotated: BTreeSet<ImageId> = BTreeSet::new();

    let pb = create_progress_bar(
        dataset.annotations.len() as u64,
        "annotations",
        opts.show_progress,
    );

    for (index, ann) in dataset.annotations.iter().enumerate() {
        let image = lookup.image(index, ann.image_id)?;
        if image.width == 0 || image.height == 0 {
            return Err(ConvertError::InvalidImageDimensions {
                image_id: image.id,
                width: image.width,
                height: image.height,
            });
        }

        let name = lookup.category_name(index, ann.category_id)?;
        let class_id = class_map
            .index_of(name)
            .ok_or(ConvertError::MissingCategoryRef {
                annotation: index,
                category_id: ann.category_id,
            })?;

        let label_name =
            label_file_name(&image.file_name).ok_or_else(|| ConvertError::InvalidFileName {
                image_id: image.id,
                file_name: image.file_name.clone(),
            })?;

        let (width, height) = (f64::from(image.width), f64::from(image.height));
        if !ann.bbox.fits_within(width, height) {
            if opts.strict_bounds {
                return Err(ConvertError::BBoxOutOfBounds {
                    annotation: index,
                    image_id: image.id,
                });
            }
            report.add(ConversionIssue::warning(
                ConversionIssueCode::BBoxOutOfBounds,
                format!(
                    "annotation #{} box {:?} leaves image {} ({}x{})",
                    index,
                    ann.bbox.to_array(),
                    image.id,
                    image.width,
                    image.height
                ),
            ));
        }

        buffer.push(
            label_name,
            YoloLabelRow {
                class_id,
                bbox: ann.bbox.to_yolo(width, height),
            },
        );
        annotated.insert(image.id);
        pb.inc(1);
    }
    pb.finish_and_clear();

    note_shared_names(dataset, &mut report);

    let unannotated = dataset
        .images
        .iter()
        .filter(|img| !annotated.contains(&img.id))
        .count();
    if unannotated > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::ImagesWithoutAnnotations,
            format!("{unannotated} image(s) without annotations get no label file"),
        ));
    }

    if opts.check_images {
        check_image_files(dataset, &annotated, images_dir, &mut report);
    }

    let label_rows = buffer.row_count();
    let label_files = buffer.flush(output_dir, opts.write_mode)?;

    report.counts = ConversionCounts {
        images: dataset.images.len(),
        categories: dataset.categories.len(),
        classes: class_map.len(),
        annotations: dataset.annotations.len(),
        label_files,
        label_rows,
    };

    let out_of_bounds = report.count_of(ConversionIssueCode::BBoxOutOfBounds);
    if out_of_bounds > 0 {
        warn!(
            "{} box(es) extend past their image; normalized values outside [0, 1] were written",
            out_of_bounds
        );
    }
    info!(
        "Wrote {} label rows to {} files in {}",
        label_rows,
        label_files,
        output_dir.display()
    );

    Ok(SplitConversion {
        class_names: class_map.into_names(),
        report,
    })
}

/// Adds an info note for every name carried by more than one category id.
fn note_shared_names(dataset: &Dataset, report: &mut ConversionReport) {
    let mut ids_by_name: BTreeMap<&str, BTreeSet<CategoryId>> = BTreeMap::new();
    for cat in &dataset.categories {
        ids_by_name.entry(cat.name.as_str()).or_default().insert(cat.id);
    }

    for (name, ids) in ids_by_name.into_iter().filter(|(_, ids)| ids.len() > 1) {
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        report.add(ConversionIssue::info(
            ConversionIssueCode::SharedCategoryName,
            format!(
                "categories {} share the name '{}' and map to one class",
                ids.join(", "),
                name
            ),
        ));
    }
}

fn check_image_files(
    dataset: &Dataset,
    annotated: &BTreeSet<ImageId>,
    images_dir: &Path,
    report: &mut ConversionReport,
) {
    for image in dataset
        .images
        .iter()
        .filter(|img| annotated.contains(&img.id))
    {
        let path = images_dir.join(&image.file_name);
        if !path.is_file() {
            debug!("missing image file {}", path.display());
            report.add(ConversionIssue::warning(
                ConversionIssueCode::MissingImageFile,
                format!("image {} not found at {}", image.id, path.display()),
            ));
        }
    }
}
