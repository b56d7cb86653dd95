use std::path::PathBuf;
use thiserror::Error;

use crate::ir::{CategoryId, ImageId};

/// The main error type for coco2yolo operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse COCO JSON from {path}: {source}")]
    CocoJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Annotation #{annotation} references missing image {image_id}")]
    MissingImageRef { annotation: usize, image_id: ImageId },

    #[error("Annotation #{annotation} references missing category {category_id}")]
    MissingCategoryRef {
        annotation: usize,
        category_id: CategoryId,
    },

    #[error("Image {image_id} has invalid dimensions {width}x{height} (must be positive)")]
    InvalidImageDimensions {
        image_id: ImageId,
        width: u32,
        height: u32,
    },

    #[error("Image {image_id} has file name '{file_name}' with no usable stem for a label file")]
    InvalidFileName { image_id: ImageId, file_name: String },

    #[error("Annotation #{annotation} on image {image_id} has a box outside the image bounds")]
    BBoxOutOfBounds { annotation: usize, image_id: ImageId },

    #[error(
        "Class names of split '{split}' differ from the reference split: expected {expected:?}, found {found:?}"
    )]
    ClassListMismatch {
        split: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Failed to write data.yaml to {path}: {source}")]
    DataYamlWrite {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to render summary as JSON: {0}")]
    ReportJson(#[source] serde_json::Error),

    #[error("Unknown split '{0}' (supported: train, val, test)")]
    UnknownSplit(String),
}
