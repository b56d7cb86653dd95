//! In-memory model of one COCO detection document.
//!
//! Only what the YOLO conversion consumes is kept. Everything else in the
//! document (info, licenses, segmentation, areas) is dropped by the reader.

use super::bbox::BBoxXYWH;
use super::ids::{CategoryId, ImageId};
use super::space::Pixel;

/// One split's worth of images, categories and annotations.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub images: Vec<Image>,
    pub categories: Vec<Category>,
    /// Annotations in source-document order.
    pub annotations: Vec<Annotation>,
}

/// An image record.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub id: ImageId,

    /// File name as written in the document, possibly with directories.
    pub file_name: String,

    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,
}

impl Image {
    pub fn new(
        id: impl Into<ImageId>,
        file_name: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            width,
            height,
        }
    }
}

/// A category record. Several ids may share one name.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A bounding box annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub image_id: ImageId,
    pub category_id: CategoryId,

    /// Box in pixel space, exactly as stored in the document.
    pub bbox: BBoxXYWH<Pixel>,
}

impl Annotation {
    pub fn new(
        image_id: impl Into<ImageId>,
        category_id: impl Into<CategoryId>,
        bbox: BBoxXYWH<Pixel>,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            category_id: category_id.into(),
            bbox,
        }
    }
}

impl Dataset {
    /// Category names in document order, duplicates included.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|cat| cat.name.as_str())
    }
}
