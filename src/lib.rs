//! Planar arrangements of circles and ellipses.
//!
//! Shapes are intersected pairwise in closed form (each pair is carried into
//! one shape's unit-circle frame by an affine projection), the intersection
//! points become nodes, boundary arcs between them become edges, and a
//! constrained depth-first traversal enumerates the regions of the
//! arrangement, each with an exact area.

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod arrangement;
pub mod circle;
pub mod component;
pub mod conic;
pub mod edge;
pub mod ellipses;
pub mod error;
pub mod fmt;
pub mod math;
pub mod node;
pub mod r2;
pub mod region;
pub mod segment;
pub mod shape;
pub mod transform;

pub use arrangement::Arrangement;
pub use circle::Circle;
pub use conic::Conic;
pub use ellipses::{xyrr::XYRR, xyrrt::XYRRT};
pub use error::{ArrangementError, ShapeError};
pub use r2::R2;
pub use region::{Arc, Region};
pub use shape::{circle, xyrr, xyrrt, Shape};
