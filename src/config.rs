//! Run configuration: where the splits live and how they are converted.
//!
//! The defaults reproduce the fixed dataset layout
//!
//! ```text
//! <root>/<split>/annotations/instances_<split>.json
//! <root>/<split>/images/
//! <root>/labels/<split>/
//! ```
//!
//! with `root = food_recognition_2022_dataset` and the class list written
//! to `food_classes.txt` in the working directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConvertError;
pub use crate::ir::io_yolo::WriteMode;

pub const DEFAULT_DATASET_ROOT: &str = "food_recognition_2022_dataset";
pub const DEFAULT_CLASS_FILE: &str = "food_classes.txt";

/// One of the fixed dataset partitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    /// Every split, in processing order.
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    pub fn name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Split {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "val" | "valid" | "validation" => Ok(Split::Val),
            "test" => Ok(Split::Test),
            _ => Err(ConvertError::UnknownSplit(s.to_string())),
        }
    }
}

/// Paths used for one split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitLayout {
    /// COCO document to read.
    pub annotations_file: PathBuf,
    /// Image directory. Only consulted by [`ConvertOptions::check_images`].
    pub images_dir: PathBuf,
    /// Directory receiving one `.txt` file per image.
    pub labels_dir: PathBuf,
}

impl SplitLayout {
    pub fn for_split(root: &Path, split: Split) -> Self {
        let split_dir = root.join(split.name());
        Self {
            annotations_file: split_dir
                .join("annotations")
                .join(format!("instances_{}.json", split.name())),
            images_dir: split_dir.join("images"),
            labels_dir: root.join("labels").join(split.name()),
        }
    }
}

/// Options for converting a single COCO document.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub write_mode: WriteMode,

    /// Fail on boxes that leave the image instead of reporting them.
    pub strict_bounds: bool,

    /// Warn about annotated images missing from the images directory.
    pub check_images: bool,

    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            write_mode: WriteMode::Overwrite,
            strict_bounds: false,
            check_images: false,
            show_progress: true,
        }
    }
}

/// Configuration for a full multi-split run.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub dataset_root: PathBuf,

    /// Splits to convert. The first one is the class-name reference.
    pub splits: Vec<Split>,

    /// Destination of the class list.
    pub class_file: PathBuf,

    /// Log differing class lists instead of failing.
    pub allow_class_mismatch: bool,

    /// Also write `<dataset_root>/data.yaml`, which points at
    /// `images/<split>` next to the generated `labels/<split>`.
    pub write_data_yaml: bool,

    pub options: ConvertOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_root: PathBuf::from(DEFAULT_DATASET_ROOT),
            splits: Split::ALL.to_vec(),
            class_file: PathBuf::from(DEFAULT_CLASS_FILE),
            allow_class_mismatch: false,
            write_data_yaml: false,
            options: ConvertOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// A default configuration rooted at `dataset_root`.
    pub fn with_root(dataset_root: impl Into<PathBuf>) -> Self {
        Self {
            dataset_root: dataset_root.into(),
            ..Default::default()
        }
    }

    pub fn layout(&self, split: Split) -> SplitLayout {
        SplitLayout::for_split(&self.dataset_root, split)
    }

    pub fn data_yaml_path(&self) -> PathBuf {
        self.dataset_root.join("data.yaml")
    }
}
