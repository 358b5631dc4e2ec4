//! Plot3D Core Library - Projection math and the 3-D plot model
//!
//! This library provides the stateless core of the toolkit: world, view
//! and perspective transforms, sampled grids, and axes whose draw entry
//! points project 3-D data into flat depth-tagged primitives.

pub mod artist;
pub mod axes;
pub mod contour;
pub mod error;
pub mod grid;
pub mod gridfile;
pub mod proj;

// Re-export commonly used types
pub use artist::{Artist, Axis, Color, Prim2d, Scene2d, ScreenPoint};
pub use axes::{Axes3d, Pivot, QuiverStyle, SurfaceStyle};
pub use error::PlotError;
pub use grid::{arange, linspace, meshgrid, sample_surface, Grid};
pub use gridfile::parse_grid;
