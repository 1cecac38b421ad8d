//! Report building: aggregation, consolidation, CSV projection

pub mod analysis;
pub mod consolidate;
pub mod csv;

pub use analysis::{Analysis, analyze};
pub use consolidate::{Consolidated, LocationReport, LocationShare};
