//! Connected-component analysis for water masks
//!
//! Three passes build on the same flood-fill labeling:
//! - **label_components**: number the connected regions of one class
//! - **clean_components**: flip regions smaller than a threshold to the
//!   opposite class (classifier speckle, stray puddles, noise islands)
//! - **identify_ocean**: keep only water regions that touch the image
//!   border, separating open sea from inland lakes and ponds

mod clean;
mod label;
mod ocean;

pub use clean::{clean_components, CleanComponents, CleanComponentsParams, CleanSummary};
pub use label::{label_components, LabelComponents, LabelComponentsParams, LabeledComponents};
pub use ocean::{identify_ocean, IdentifyOcean, IdentifyOceanParams, OceanMask};
