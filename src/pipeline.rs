//! Multi-split driver.
//!
//! Loads every configured split, checks that they share one class
//! vocabulary, converts them one after another and writes the class list.

use std::fmt;
use std::path::PathBuf;

use log::{info, warn};
use serde::Serialize;

use crate::config::{PipelineConfig, Split, SplitLayout};
use crate::conversion::{convert_dataset, ClassMap, ConversionReport};
use crate::error::ConvertError;
use crate::ir::io_coco_json::read_coco_json;
use crate::ir::io_yolo::{write_class_file, write_data_yaml, DataYaml};
use crate::ir::Dataset;

/// Outcome of one converted split.
#[derive(Clone, Debug, Serialize)]
pub struct SplitSummary {
    pub split: Split,
    pub annotations_file: PathBuf,
    pub labels_dir: PathBuf,
    pub class_names: Vec<String>,
    pub report: ConversionReport,
}

/// Outcome of a full run.
#[derive(Clone, Debug, Serialize)]
pub struct PipelineSummary {
    /// Class names written to the class file (taken from the first split).
    pub class_names: Vec<String>,
    pub class_file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_yaml: Option<PathBuf>,
    pub splits: Vec<SplitSummary>,
}

impl PipelineSummary {
    pub fn class_count(&self) -> usize {
        self.class_names.len()
    }

    pub fn annotation_count(&self) -> usize {
        self.splits
            .iter()
            .map(|s| s.report.counts.annotations)
            .sum()
    }
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for split in &self.splits {
            writeln!(
                f,
                "{}: {} -> {}",
                split.split,
                split.annotations_file.display(),
                split.labels_dir.display()
            )?;
            write!(f, "{}", split.report)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Class names written to {}",
            self.class_file.display()
        )?;
        if let Some(path) = &self.data_yaml {
            writeln!(f, "Dataset config written to {}", path.display())?;
        }
        writeln!(f, "Total classes: {}", self.class_count())?;
        writeln!(f, "Annotation conversion complete!")
    }
}

struct LoadedSplit {
    split: Split,
    layout: SplitLayout,
    dataset: Dataset,
    classes: ClassMap,
}

/// Runs the conversion for every split in `config`.
///
/// All documents are loaded and their class lists compared before any label
/// file is written. A split whose names differ from the first split's fails
/// the run with [`ConvertError::ClassListMismatch`], unless
/// `allow_class_mismatch` is set, in which case the difference is logged and
/// each split keeps its own numbering.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary, ConvertError> {
    let mut loaded = Vec::with_capacity(config.splits.len());
    for &split in &config.splits {
        let layout = config.layout(split);
        info!(
            "Loading {} annotations from {}",
            split,
            layout.annotations_file.display()
        );
        let dataset = read_coco_json(&layout.annotations_file)?;
        let classes = ClassMap::from_dataset(&dataset);
        loaded.push(LoadedSplit {
            split,
            layout,
            dataset,
            classes,
        });
    }

    let reference = loaded
        .first()
        .map(|l| l.classes.clone())
        .unwrap_or_default();
    for other in loaded.iter().skip(1) {
        check_class_consistency(
            &reference,
            other.split,
            &other.classes,
            config.allow_class_mismatch,
        )?;
    }

    let mut splits = Vec::with_capacity(loaded.len());
    for LoadedSplit {
        split,
        layout,
        dataset,
        ..
    } in loaded
    {
        info!(
            "Converting {} split ({} annotations)",
            split,
            dataset.annotations.len()
        );
        let conversion = convert_dataset(
            &dataset,
            &layout.images_dir,
            &layout.labels_dir,
            &config.options,
        )?;
        splits.push(SplitSummary {
            split,
            annotations_file: layout.annotations_file,
            labels_dir: layout.labels_dir,
            class_names: conversion.class_names,
            report: conversion.report,
        });
    }

    let class_names = reference.into_names();
    write_class_file(&config.class_file, &class_names)?;
    info!(
        "Saved {} class names to {}",
        class_names.len(),
        config.class_file.display()
    );

    let data_yaml = if config.write_data_yaml {
        let path = config.data_yaml_path();
        write_data_yaml(&path, &data_yaml_for(config, &class_names))?;
        info!("Wrote {}", path.display());
        Some(path)
    } else {
        None
    };

    info!("Total classes: {}", class_names.len());

    Ok(PipelineSummary {
        class_names,
        class_file: config.class_file.clone(),
        data_yaml,
        splits,
    })
}

/// Compares a split's class list against the reference list.
pub fn check_class_consistency(
    reference: &ClassMap,
    split: Split,
    found: &ClassMap,
    allow_mismatch: bool,
) -> Result<(), ConvertError> {
    if reference == found {
        return Ok(());
    }

    if allow_mismatch {
        warn!(
            "Class names are inconsistent across splits: '{}' has {} class(es), reference has {}",
            split,
            found.len(),
            reference.len()
        );
        return Ok(());
    }

    Err(ConvertError::ClassListMismatch {
        split: split.to_string(),
        expected: reference.names().to_vec(),
        found: found.names().to_vec(),
    })
}

/// Split entries are `images/<split>` so that Ultralytics, which swaps the
/// last `images` component for `labels`, lands on `labels/<split>`.
fn data_yaml_for(config: &PipelineConfig, class_names: &[String]) -> DataYaml {
    let mut data = DataYaml::new(&config.dataset_root, class_names);
    for &split in &config.splits {
        let images = format!("images/{}", split.name());
        match split {
            Split::Train => data.train = Some(images),
            Split::Val => data.val = Some(images),
            Split::Test => data.test = Some(images),
        }
    }
    data
}
