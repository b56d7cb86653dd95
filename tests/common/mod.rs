#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

/// Builds a COCO document. Images are `(id, width, height, file_name)`,
/// categories `(id, name)`, annotations `(image_id, category_id, bbox)`.
pub fn coco_doc(
    images: &[(u64, u32, u32, &str)],
    categories: &[(u64, &str)],
    annotations: &[(u64, u64, [f64; 4])],
) -> Value {
    json!({
        "info": {"description": "test fixture"},
        "images": images
            .iter()
            .map(|(id, w, h, name)| json!({"id": id, "width": w, "height": h, "file_name": name}))
            .collect::<Vec<_>>(),
        "categories": categories
            .iter()
            .map(|(id, name)| json!({"id": id, "name": name, "supercategory": "food"}))
            .collect::<Vec<_>>(),
        "annotations": annotations
            .iter()
            .enumerate()
            .map(|(i, (image_id, category_id, bbox))| json!({
                "id": i + 1,
                "image_id": image_id,
                "category_id": category_id,
                "bbox": bbox,
                "segmentation": [[bbox[0], bbox[1], bbox[0] + bbox[2], bbox[1], bbox[0] + bbox[2], bbox[1] + bbox[3]]],
                "area": bbox[2] * bbox[3],
                "iscrowd": 0
            }))
            .collect::<Vec<_>>(),
    })
}

pub fn write_json(path: &Path, doc: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, serde_json::to_vec_pretty(doc).expect("serialize doc")).expect("write json");
}

/// Writes `doc` to `<root>/<split>/annotations/instances_<split>.json` and
/// creates the split's image directory.
pub fn write_split(root: &Path, split: &str, doc: &Value) -> PathBuf {
    let path = root
        .join(split)
        .join("annotations")
        .join(format!("instances_{split}.json"));
    write_json(&path, doc);
    fs::create_dir_all(root.join(split).join("images")).expect("create images dir");
    path
}

/// A two-class document used for every split of the sample dataset.
pub fn food_doc(file_prefix: &str) -> Value {
    let a = format!("{file_prefix}_001.jpg");
    let b = format!("{file_prefix}_002.jpg");
    coco_doc(
        &[(1, 100, 200, a.as_str()), (2, 640, 480, b.as_str())],
        &[(10, "water"), (3, "bread")],
        &[
            (1, 10, [10.0, 20.0, 30.0, 40.0]),
            (2, 3, [0.0, 0.0, 640.0, 480.0]),
            (1, 3, [50.0, 100.0, 50.0, 100.0]),
        ],
    )
}

pub fn write_food_dataset(root: &Path) {
    for split in ["train", "val", "test"] {
        write_split(root, split, &food_doc(split));
    }
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read file")
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn txt_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    files
}
