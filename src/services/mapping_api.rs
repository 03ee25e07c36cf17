//! Trait for the admin API endpoints the summaries are computed from.

use anyhow::Result;
use mapping_hours::mapping::types::{CourseMappingRecord, CourseMetadata};

/// Abstraction over the course-mapping backend.
#[async_trait::async_trait]
pub trait MappingApi {
    /// Returns every course mapping, across all pages.
    async fn list_course_mappings(&self) -> Result<Vec<CourseMappingRecord>>;

    /// Returns every course with its subject hours, across all pages.
    async fn list_courses(&self) -> Result<Vec<CourseMetadata>>;
}
