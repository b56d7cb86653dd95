//! Id lookup tables built once per document.

use std::collections::HashMap;

use crate::error::ConvertError;
use crate::ir::{CategoryId, Dataset, Image, ImageId};

/// Image id → image record and category id → category name.
///
/// When an id appears twice in the document the later record wins.
pub(crate) struct Lookup<'a> {
    images: HashMap<ImageId, &'a Image>,
    categories: HashMap<CategoryId, &'a str>,
}

impl<'a> Lookup<'a> {
    pub(crate) fn build(dataset: &'a Dataset) -> Self {
        let images = dataset.images.iter().map(|img| (img.id, img)).collect();
        let categories = dataset
            .categories
            .iter()
            .map(|cat| (cat.id, cat.name.as_str()))
            .collect();

        Self { images, categories }
    }

    /// Image referenced by annotation number `annotation`.
    pub(crate) fn image(
        &self,
        annotation: usize,
        image_id: ImageId,
    ) -> Result<&'a Image, ConvertError> {
        self.images
            .get(&image_id)
            .copied()
            .ok_or(ConvertError::MissingImageRef {
                annotation,
                image_id,
            })
    }

    /// Category name referenced by annotation number `annotation`.
    pub(crate) fn category_name(
        &self,
        annotation: usize,
        category_id: CategoryId,
    ) -> Result<&'a str, ConvertError> {
        self.categories
            .get(&category_id)
            .copied()
            .ok_or(ConvertError::MissingCategoryRef {
                annotation,
                category_id,
            })
    }
}
