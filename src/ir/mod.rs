//! Typed representation of COCO detection data and the YOLO label format.
//!
//! The reader in [`io_coco_json`] turns a COCO document into a [`Dataset`];
//! the writer in [`io_yolo`] renders label rows and class files. Boxes carry
//! their coordinate space as a type parameter, so a pixel box cannot be
//! written where a normalized one is expected.
//!
//! # Example
//!
//! ```
//! use coco2yolo::ir::{Annotation, BBoxXYWH, Category, Dataset, Image, Pixel};
//!
//! let dataset = Dataset {
//!     images: vec![Image::new(1u64, "a.jpg", 100, 200)],
//!     categories: vec![Category::new(5u64, "pizza")],
//!     annotations: vec![Annotation::new(
//!         1u64,
//!         5u64,
//!         BBoxXYWH::<Pixel>::new(10.0, 20.0, 30.0, 40.0),
//!     )],
//! };
//! let yolo = dataset.annotations[0].bbox.to_yolo(100.0, 200.0);
//! assert_eq!(yolo.cx(), 0.25);
//! ```

mod bbox;
mod coord;
mod ids;
pub mod io_coco_json;
pub mod io_yolo;
mod model;
mod space;

pub use bbox::{BBoxCXCYWH, BBoxXYWH};
pub use coord::Coord;
pub use ids::{CategoryId, ImageId};
pub use model::{Annotation, Category, Dataset, Image};
pub use space::{Normalized, Pixel};
