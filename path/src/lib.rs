#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]

//! Data structures to store, build and iterate over 2D paths.
//!
//! A path is a sequence of subpaths, each made of move/line/quadratic
//! bezier/cubic bezier/close elements. [MutablePath] is the construction
//! API; [Path] is the immutable, cheaply clonable, hashable value the rest
//! of the system consumes. The two share storage copy-on-write: cloning and
//! snapshotting never copy the buffers, mutating a shared builder does.
//!
//! This crate is reexported in vellum.
//!
//! # Examples
//!
//! ```
//! use vellum_path::Path;
//! use vellum_path::math::point;
//!
//! let mut builder = Path::builder();
//! builder.move_to(point(0.0, 0.0), None);
//! builder.line_to(point(1.0, 2.0), None);
//! builder.line_to(point(2.0, 0.0), None);
//! builder.close();
//!
//! let path = builder.build();
//!
//! for element in path.elements() {
//!     println!("{:?}", element);
//! }
//! ```

pub use vellum_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
mod events;
pub mod path;

pub use crate::events::{PathElement, PathEvent};
#[doc(inline)]
pub use crate::path::{Elements, Iter, MutablePath, Path};

pub use crate::geom::math;

/// The fill rule defines how to determine what is inside and what is outside
/// of a shape.
///
/// See the SVG specification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    EvenOdd,
    NonZero,
}

impl FillRule {
    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }
}
