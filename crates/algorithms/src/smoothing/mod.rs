//! Mask smoothing algorithms
//!
//! Classified water masks come off a per-pixel classifier with speckle:
//! isolated misclassified cells and ragged class boundaries. Majority
//! smoothing removes both before any geometry is traced.

mod majority;

pub use majority::{majority_filter, MajorityFilter, MajorityFilterParams};
