//! Scale module - axis domains and value mapping

mod domain;

pub use domain::{compute_domain, AxisDomain, Bounds, ScaleError, MAX_PADDING, MIN_PADDING};
