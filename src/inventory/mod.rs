//! Dataset file inventory

mod scan;

pub use scan::*;
