//! coco2yolo: convert COCO detection annotations into YOLO label files.
//!
//! For each split of a dataset laid out as
//! `<root>/<split>/annotations/instances_<split>.json`, every annotation's
//! pixel box `[x, y, w, h]` becomes a normalized `class cx cy w h` row in
//! `<root>/labels/<split>/<image stem>.txt`. Class indices are assigned by
//! sorting the distinct category names, and the resulting list is written
//! to a class file.
//!
//! # Modules
//!
//! - [`ir`]: typed COCO model, COCO reader, YOLO writer
//! - [`conversion`]: single-document conversion and its report
//! - [`pipeline`]: the multi-split driver
//! - [`config`]: dataset layout and options
//! - [`error`]: error type

pub mod config;
pub mod conversion;
pub mod error;
pub mod ir;
pub mod pipeline;
mod progress;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use config::{ConvertOptions, PipelineConfig, Split, WriteMode};
pub use error::ConvertError;

/// Convert the train/val/test COCO annotations of a dataset into YOLO labels.
#[derive(Parser)]
#[command(name = "coco2yolo")]
#[command(version, about)]
struct Cli {
    /// Dataset root holding <split>/annotations/instances_<split>.json.
    #[arg(long, default_value = config::DEFAULT_DATASET_ROOT)]
    root: PathBuf,

    /// Where to write the class names, one per line.
    #[arg(long, default_value = config::DEFAULT_CLASS_FILE)]
    class_file: PathBuf,

    /// Split to convert (repeatable). The first split is the class-name reference.
    #[arg(long = "split", default_values = ["train", "val", "test"])]
    splits: Vec<Split>,

    /// Append to existing label files instead of replacing them.
    #[arg(long)]
    append: bool,

    /// Warn instead of failing when splits have different class names.
    #[arg(long)]
    allow_class_mismatch: bool,

    /// Fail on boxes that extend past their image.
    #[arg(long)]
    strict_bounds: bool,

    /// Warn about annotated images missing from <root>/<split>/images.
    #[arg(long)]
    check_images: bool,

    /// Also write <root>/data.yaml for Ultralytics training. Its split entries
    /// are images/<split>, pairing with labels/<split>, so training expects the
    /// images under <root>/images/<split>.
    #[arg(long)]
    data_yaml: bool,

    /// Hide progress bars.
    #[arg(long, short)]
    quiet: bool,

    /// Format of the final summary.
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<&Cli> for PipelineConfig {
    fn from(cli: &Cli) -> Self {
        PipelineConfig {
            dataset_root: cli.root.clone(),
            splits: cli.splits.clone(),
            class_file: cli.class_file.clone(),
            allow_class_mismatch: cli.allow_class_mismatch,
            write_data_yaml: cli.data_yaml,
            options: ConvertOptions {
                write_mode: if cli.append {
                    WriteMode::Append
                } else {
                    WriteMode::Overwrite
                },
                strict_bounds: cli.strict_bounds,
                check_images: cli.check_images,
                show_progress: !cli.quiet,
            },
        }
    }
}

/// Run the coco2yolo CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();
    let config = PipelineConfig::from(&cli);

    let summary = pipeline::run_pipeline(&config)?;

    match cli.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary).map_err(ConvertError::ReportJson)?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{summary}"),
    }

    Ok(())
}
