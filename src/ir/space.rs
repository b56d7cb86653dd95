//! Coordinate space markers.
//!
//! COCO boxes live in pixel space, YOLO boxes in image-relative space.
//! Tagging boxes with one of these uninhabited types keeps the two apart.

use std::fmt;

/// Absolute pixel coordinates, origin at the top-left corner of the image.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Coordinates divided by the image width (x) or height (y).
///
/// Boxes inside the image fall in `[0, 1]`; nothing enforces that.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
