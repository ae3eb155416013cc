#![deny(bare_trait_objects)]

//! 2D vector paths and geometric queries.
//!
//! This meta-crate (`vellum`) reexports the following sub-crates for convenience:
//!
//! * **vellum_path** - Path storage, the mutable builder and the immutable
//!   copy-on-write path value, including shape synthesis (rectangles,
//!   rounded rectangles, ellipses and arcs).
//! * **vellum_algorithms** - Point containment and rectangle detection.
//! * **vellum_geom** - Line segment, bezier curve and arc math on top of
//!   [euclid](https://docs.rs/euclid).
//!
//! Each `vellum_<name>` crate is reexported as a `<name>` module.
//!
//! # Examples
//!
//! ```
//! use vellum::math::{point, rect};
//! use vellum::{contains_point, to_axis_aligned_rectangle, FillRule, Path};
//!
//! let mut builder = Path::builder();
//! builder.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0), None);
//! let path = builder.build();
//!
//! assert!(contains_point(&path, point(5.0, 5.0), FillRule::NonZero, None));
//! assert_eq!(
//!     to_axis_aligned_rectangle(&path),
//!     Some(rect(0.0, 0.0, 10.0, 10.0))
//! );
//! ```
//!
//! # Feature flags
//!
//! Serialization of the plain data types using serde can be enabled on each
//! crate with the `serialization` feature flag (disabled by default).

pub use vellum_algorithms as algorithms;

pub use crate::algorithms::path;
pub use crate::path::geom;

pub use crate::path::math;
pub use crate::path::{FillRule, MutablePath, Path, PathElement, PathEvent};

pub use crate::algorithms::hit_test::{contains_point, hit_test_path};
pub use crate::algorithms::rect::to_axis_aligned_rectangle;
