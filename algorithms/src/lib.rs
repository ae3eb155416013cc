#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Geometric queries over 2D paths.
//!
//! This crate is reexported in vellum.

pub use vellum_path as path;

pub mod rect;

pub use crate::path::geom;
pub use crate::path::math;
