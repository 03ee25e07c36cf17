//! Course-mapping hours aggregation.
//!
//! Flat mapping records are bucketed per (class, term, academic year),
//! filtered, and summarised into hours assigned against hours needed. Nothing
//! in this module performs I/O; records arrive already parsed by
//! [`crate::parser`].

pub mod aggregate;
pub mod coverage;
pub mod filters;
pub mod hours;
pub mod legacy;
pub mod types;
pub mod utility;

pub use aggregate::{aggregate, course_hours_index};
pub use filters::{FilterOptions, MappingFilters, filter_options};
pub use hours::compute_hours_for_entry;
pub use types::{CourseHours, CourseMappingRecord, CourseMetadata, MappingGroup};
