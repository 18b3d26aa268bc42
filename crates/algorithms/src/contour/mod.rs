//! Contour tracing and georeferencing
//!
//! - [`find_contours`] - sub-pixel iso-level tracing with marching squares
//! - [`project_contour`] - pixel-space contour to georeferenced coastline

mod project;
mod trace;

pub use project::{project_contour, project_contours};
pub use trace::{find_contours, FindContours, FindContoursParams, SaddleConnect};
