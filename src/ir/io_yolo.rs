//! YOLO label and class-list writer.
//!
//! Each image gets one `<stem>.txt` file in the labels directory, one row
//! per box: `class_id cx cy w h` with six decimals. Class names go to a
//! plain list (index = line number) and, optionally, to an Ultralytics
//! `data.yaml`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{BBoxCXCYWH, Normalized};
use crate::error::ConvertError;

pub const LABEL_EXTENSION: &str = "txt";

/// How label files that already exist on disk are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate each label file the first time this run writes it.
    #[default]
    Overwrite,
    /// Append to whatever is already there. Re-running a conversion into
    /// the same directory duplicates every row.
    Append,
}

/// One line of a YOLO label file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YoloLabelRow {
    pub class_id: usize,
    pub bbox: BBoxCXCYWH<Normalized>,
}

impl fmt::Display for YoloLabelRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.6} {:.6} {:.6} {:.6}",
            self.class_id,
            self.bbox.cx(),
            self.bbox.cy(),
            self.bbox.width,
            self.bbox.height
        )
    }
}

/// Label file name for an image: the last path component of `file_name`
/// with its final extension replaced by `.txt`.
///
/// Returns `None` when `file_name` has no stem: the empty string or a name
/// ending in `..`. A trailing `/` is ignored, so `a.jpg/` gives `a.txt`.
pub fn label_file_name(file_name: &str) -> Option<PathBuf> {
    let mut name = Path::new(file_name).file_stem()?.to_os_string();
    name.push(".");
    name.push(LABEL_EXTENSION);
    Some(PathBuf::from(name))
}

/// Rows grouped by label file, in the order they were pushed.
///
/// Rows are kept in memory until [`LabelBuffer::flush`] so that every file
/// is opened exactly once per run.
#[derive(Debug, Default)]
pub struct LabelBuffer {
    files: BTreeMap<PathBuf, Vec<YoloLabelRow>>,
    rows: usize,
}

impl LabelBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `row` for the label file `label_name` (relative to the labels
    /// directory).
    pub fn push(&mut self, label_name: PathBuf, row: YoloLabelRow) {
        self.files.entry(label_name).or_default().push(row);
        self.rows += 1;
    }

    /// Number of distinct label files queued.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of rows queued across all files.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Rows queued for one label file.
    pub fn rows_for(&self, label_name: &Path) -> &[YoloLabelRow] {
        self.files
            .get(label_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Writes every queued file into `labels_dir` and returns the number of
    /// files written.
    pub fn flush(self, labels_dir: &Path, mode: WriteMode) -> Result<usize, ConvertError> {
        let count = self.files.len();

        for (label_name, rows) in self.files {
            let path = labels_dir.join(label_name);
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .append(mode == WriteMode::Append)
                .truncate(mode == WriteMode::Overwrite)
                .open(&path)
                .map_err(ConvertError::Io)?;
            let mut writer = BufWriter::new(file);

            for row in rows {
                writeln!(writer, "{row}").map_err(ConvertError::Io)?;
            }
            writer.flush().map_err(ConvertError::Io)?;
        }

        Ok(count)
    }
}

/// Writes class names one per line. Line `i` names class `i`.
pub fn write_class_file(path: &Path, names: &[String]) -> Result<(), ConvertError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ConvertError::Io)?;
    }

    let mut body = String::new();
    for name in names {
        body.push_str(name);
        body.push('\n');
    }
    fs::write(path, body).map_err(ConvertError::Io)
}

/// Contents of an Ultralytics `data.yaml`.
///
/// Ultralytics locates a label by replacing the last `/images/` of an image
/// path with `/labels/`. Split entries must therefore be `images/<split>`
/// for the labels written to `labels/<split>`, and the images have to live
/// at `<path>/images/<split>`.
#[derive(Debug, Serialize)]
pub struct DataYaml {
    /// Dataset root the split paths are relative to.
    pub path: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub train: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub val: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    /// Number of classes.
    pub nc: usize,

    pub names: BTreeMap<usize, String>,
}

impl DataYaml {
    pub fn new(path: impl Into<PathBuf>, names: &[String]) -> Self {
        Self {
            path: path.into(),
            train: None,
            val: None,
            test: None,
            nc: names.len(),
            names: names.iter().cloned().enumerate().collect(),
        }
    }
}

pub fn write_data_yaml(path: &Path, data: &DataYaml) -> Result<(), ConvertError> {
    let yaml = serde_yaml::to_string(data).map_err(|source| ConvertError::DataYamlWrite {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, yaml).map_err(ConvertError::Io)
}
