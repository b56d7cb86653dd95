//! Bounding box types for the two layouts this crate deals with.
//!
//! COCO stores a box as its top-left corner plus size, in pixels
//! ([`BBoxXYWH<Pixel>`]). YOLO stores the box center plus size, divided by
//! the image dimensions ([`BBoxCXCYWH<Normalized>`]).
//!
//! Neither constructor checks that sizes are positive or that the box lies
//! inside the image. Out-of-bounds boxes are representable so the converter
//! can report them instead of failing while parsing.

use super::coord::Coord;
use super::{Normalized, Pixel};

/// A box given by its top-left corner and its size.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYWH<TSpace> {
    pub origin: Coord<TSpace>,
    pub width: f64,
    pub height: f64,
}

impl<TSpace> BBoxXYWH<TSpace> {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Coord::new(x, y),
            width,
            height,
        }
    }

    /// Builds a box from a COCO `[x, y, width, height]` array.
    #[inline]
    pub fn from_array([x, y, width, height]: [f64; 4]) -> Self {
        Self::new(x, y, width, height)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.origin.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.origin.y
    }

    /// Right edge. Less than `x()` when the width is negative.
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.origin.x + self.width
    }

    /// Bottom edge. Less than `y()` when the height is negative.
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.origin.y + self.height
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.origin.x, self.origin.y, self.width, self.height]
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYWH<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYWH")
            .field("x", &self.origin.x)
            .field("y", &self.origin.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl BBoxXYWH<Pixel> {
    /// Converts a pixel box into a YOLO center box.
    ///
    /// `cx = (x + w / 2) / W`, `cy = (y + h / 2) / H`, `w / W`, `h / H`.
    /// No clamping is applied. Callers must reject zero image dimensions
    /// first; this function happily returns infinities.
    pub fn to_yolo(&self, image_width: f64, image_height: f64) -> BBoxCXCYWH<Normalized> {
        BBoxCXCYWH::new(
            (self.origin.x + self.width / 2.0) / image_width,
            (self.origin.y + self.height / 2.0) / image_height,
            self.width / image_width,
            self.height / image_height,
        )
    }

    /// Returns true if the box has non-negative size and lies entirely in
    /// a `image_width` x `image_height` image.
    pub fn fits_within(&self, image_width: f64, image_height: f64) -> bool {
        self.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
            && self.origin.x >= 0.0
            && self.origin.y >= 0.0
            && self.xmax() <= image_width
            && self.ymax() <= image_height
    }
}

/// A box given by its center and its size.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxCXCYWH<TSpace> {
    pub center: Coord<TSpace>,
    pub width: f64,
    pub height: f64,
}

impl<TSpace> BBoxCXCYWH<TSpace> {
    #[inline]
    pub fn new(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            center: Coord::new(cx, cy),
            width,
            height,
        }
    }

    #[inline]
    pub fn cx(&self) -> f64 {
        self.center.x
    }

    #[inline]
    pub fn cy(&self) -> f64 {
        self.center.y
    }
}

impl<TSpace> std::fmt::Debug for BBoxCXCYWH<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxCXCYWH")
            .field("cx", &self.center.x)
            .field("cy", &self.center.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl BBoxCXCYWH<Normalized> {
    /// Inverse of [`BBoxXYWH::to_yolo`], up to floating-point error.
    pub fn to_pixel(&self, image_width: f64, image_height: f64) -> BBoxXYWH<Pixel> {
        let width = self.width * image_width;
        let height = self.height * image_height;
        BBoxXYWH::new(
            self.center.x * image_width - width / 2.0,
            self.center.y * image_height - height / 2.0,
            width,
            height,
        )
    }
}
