//! Business logic services.

pub mod assignments;
pub mod distance;

pub use distance::{DistanceEstimator, RandomDistance};
