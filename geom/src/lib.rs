#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Line segment, quadratic/cubic bezier and circular arc math on top of
//! [euclid](https://docs.rs/euclid).
//!
//! This crate is reexported in vellum.

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub use euclid;

pub mod arc;
pub mod cubic_bezier;
pub mod line;
pub mod quadratic_bezier;

#[doc(inline)]
pub use crate::arc::Arc;
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;

/// Cap on the number of times a curve is halved while flattening.
pub(crate) const MAX_FLATTEN_RECURSION: u32 = 16;

pub mod math {
    //! f32 versions of the euclid types used everywhere. The other vellum
    //! crates reexport this module.

    use crate::euclid;

    /// Alias for `euclid::default::Point2D<f32>`.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for `euclid::default::Vector2D<f32>`.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for `euclid::default::Size2D<f32>`.
    pub type Size = euclid::default::Size2D<f32>;

    /// Alias for `euclid::default::Rect<f32>`.
    pub type Rect = euclid::default::Rect<f32>;

    /// Alias for `euclid::default::Transform2D<f32>`.
    pub type Transform = euclid::default::Transform2D<f32>;

    /// An angle in radians (f32).
    pub type Angle = euclid::Angle<f32>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Size::new(w, h)`.
    #[inline]
    pub fn size(w: f32, h: f32) -> Size {
        Size::new(w, h)
    }

    /// Shorthand for `Rect::new(Point::new(x, y), Size::new(w, h))`.
    #[inline]
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect {
            origin: point(x, y),
            size: size(w, h),
        }
    }

    /// The sentinel rectangle reported as the bounding box of an empty path.
    ///
    /// Distinct from any rectangle with a finite origin, including zero-sized
    /// ones.
    #[inline]
    pub fn null_rect() -> Rect {
        rect(f32::INFINITY, f32::INFINITY, 0.0, 0.0)
    }

    /// Whether `r` is the [null_rect] sentinel.
    #[inline]
    pub fn is_null_rect(r: &Rect) -> bool {
        r.origin.x == f32::INFINITY && r.origin.y == f32::INFINITY
    }

    #[test]
    fn null_rect_sentinel() {
        assert!(is_null_rect(&null_rect()));
        assert!(!is_null_rect(&rect(0.0, 0.0, 0.0, 0.0)));
        assert!(!is_null_rect(&rect(1.0, 2.0, 3.0, 4.0)));
    }
}
