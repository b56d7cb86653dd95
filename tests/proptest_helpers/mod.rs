#![allow(dead_code)]

use coco2yolo::ir::{Annotation, BBoxXYWH, Category, Dataset, Image};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Tolerance for a pixel box recovered from a six-decimal YOLO row.
pub fn eps_yolo(image_w: u32, image_h: u32) -> f64 {
    image_w.max(image_h) as f64 * 1e-6
}

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Datasets whose boxes lie inside their images. Category names are drawn
/// from a small alphabet so that shared names show up regularly.
pub fn arb_dataset(
    max_images: usize,
    max_categories: usize,
    max_annotations: usize,
) -> BoxedStrategy<Dataset> {
    let sizes = prop::collection::vec((1u32..4000, 1u32..4000), 1..=max_images);
    let names = prop::collection::vec("[a-e]{1,3}", 1..=max_categories);

    (sizes, names)
        .prop_flat_map(move |(sizes, names)| {
            let anns = prop::collection::vec(
                (
                    0..sizes.len(),
                    0..names.len(),
                    0.0f64..1.0,
                    0.0f64..1.0,
                    0.0f64..=1.0,
                    0.0f64..=1.0,
                ),
                0..=max_annotations,
            );
            (Just(sizes), Just(names), anns)
        })
        .prop_map(|(sizes, names, anns)| {
            let images = sizes
                .iter()
                .enumerate()
                .map(|(i, &(w, h))| Image::new(i as u64 + 1, format!("img_{i:03}.jpg"), w, h))
                .collect();
            let categories = names
                .iter()
                .enumerate()
                .map(|(i, name)| Category::new(i as u64 + 1, name.clone()))
                .collect();
            let annotations = anns
                .into_iter()
                .map(|(img, cat, fx, fy, fw, fh)| {
                    let (w, h) = sizes[img];
                    let (w, h) = (f64::from(w), f64::from(h));
                    let (x, y) = (fx * w, fy * h);
                    let bbox = BBoxXYWH::new(x, y, fw * (w - x), fh * (h - y));
                    Annotation::new(img as u64 + 1, cat as u64 + 1, bbox)
                })
                .collect();
            Dataset {
                images,
                categories,
                annotations,
            }
        })
        .boxed()
}

/// Parses one `class cx cy w h` label row.
pub fn parse_row(line: &str) -> Result<(usize, [f64; 4]), String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 5 {
        return Err(format!("expected 5 fields, got {}: '{line}'", parts.len()));
    }
    let class_id = parts[0]
        .parse::<usize>()
        .map_err(|e| format!("bad class id in '{line}': {e}"))?;
    let mut values = [0.0; 4];
    for (slot, raw) in values.iter_mut().zip(&parts[1..]) {
        *slot = raw
            .parse::<f64>()
            .map_err(|e| format!("bad number in '{line}': {e}"))?;
    }
    Ok((class_id, values))
}
