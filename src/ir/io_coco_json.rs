//! COCO JSON reader.
//!
//! COCO bounding boxes use `[x, y, width, height]` where `(x, y)` is the
//! top-left corner in absolute pixels. The reader keeps that layout as
//! [`BBoxXYWH<Pixel>`] so the YOLO conversion sees the stored numbers
//! unchanged.
//!
//! Only `images`, `annotations` and `categories` are required. Other
//! top-level keys and per-record extras (`info`, `licenses`, `area`,
//! `iscrowd`, `supercategory`, ...) are accepted and ignored.
//! `segmentation` is skipped during parsing.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::IgnoredAny;
use serde::Deserialize;

use super::model::{Annotation, Category, Dataset, Image};
use super::{BBoxXYWH, CategoryId, ImageId, Pixel};
use crate::error::ConvertError;

// ============================================================================
// COCO Schema Types (internal to this module)
// ============================================================================

#[derive(Debug, Deserialize)]
struct CocoDataset {
    images: Vec<CocoImage>,
    annotations: Vec<CocoAnnotation>,
    categories: Vec<CocoCategory>,
}

#[derive(Debug, Deserialize)]
struct CocoImage {
    id: u64,
    width: u32,
    height: u32,
    file_name: String,
}

#[derive(Debug, Deserialize)]
struct CocoCategory {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CocoAnnotation {
    image_id: u64,
    category_id: u64,

    /// `[x, y, width, height]` with `(x, y)` as top-left corner.
    bbox: [f64; 4],

    /// Polygons or RLE. Accepted in any shape and skipped without being
    /// materialized.
    #[serde(default)]
    #[allow(dead_code)]
    segmentation: IgnoredAny,
}

// ============================================================================
// Public API
// ============================================================================

/// Reads a dataset from a COCO JSON file.
///
/// # Errors
/// Returns [`ConvertError::Io`] if the file cannot be opened and
/// [`ConvertError::CocoJsonParse`] if it is not a COCO detection document.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use coco2yolo::ir::io_coco_json::read_coco_json;
///
/// let dataset = read_coco_json(Path::new("instances_train.json"))?;
/// # Ok::<(), coco2yolo::ConvertError>(())
/// ```
pub fn read_coco_json(path: &Path) -> Result<Dataset, ConvertError> {
    let file = File::open(path).map_err(ConvertError::Io)?;
    let reader = BufReader::new(file);

    let coco: CocoDataset =
        serde_json::from_reader(reader).map_err(|source| ConvertError::CocoJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(coco_to_ir(coco))
}

/// Reads a dataset from a COCO JSON string.
pub fn from_coco_str(json: &str) -> Result<Dataset, serde_json::Error> {
    let coco: CocoDataset = serde_json::from_str(json)?;
    Ok(coco_to_ir(coco))
}

/// Reads a dataset from a COCO JSON byte slice.
pub fn from_coco_slice(bytes: &[u8]) -> Result<Dataset, serde_json::Error> {
    let coco: CocoDataset = serde_json::from_slice(bytes)?;
    Ok(coco_to_ir(coco))
}

// ============================================================================
// Conversion: COCO -> IR
// ============================================================================

fn coco_to_ir(coco: CocoDataset) -> Dataset {
    let images = coco
        .images
        .into_iter()
        .map(|img| Image::new(ImageId::new(img.id), img.file_name, img.width, img.height))
        .collect();

    let categories = coco
        .categories
        .into_iter()
        .map(|cat| Category::new(CategoryId::new(cat.id), cat.name))
        .collect();

    let annotations = coco
        .annotations
        .into_iter()
        .map(|ann| {
            Annotation::new(
                ImageId::new(ann.image_id),
                CategoryId::new(ann.category_id),
                BBoxXYWH::<Pixel>::from_array(ann.bbox),
            )
        })
        .collect();

    Dataset {
        images,
        categories,
        annotations,
    }
}

// ============================================================================
// Tests
// ============================================================================
