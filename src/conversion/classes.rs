//! Dense YOLO class indices derived from category names.

use crate::ir::Dataset;

/// Distinct category names in sorted order. A name's position is its YOLO
/// class index.
///
/// Indices depend only on the set of names: category ids, their order in
/// the document, gaps between them and repeated names do not matter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassMap {
    names: Vec<String>,
}

impl ClassMap {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_names(dataset.category_names())
    }

    /// Class index of `name`, if it is part of the vocabulary.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .ok()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}
