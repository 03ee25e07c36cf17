//! Data types used by the aggregation pipeline.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::stats::GroupStats;

/// Identifier as received from the API. Numeric ids are stored in their
/// decimal string form so `1` and `"1"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(pub String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Reference to the class a mapping belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRef {
    pub id: Id,
    pub name: Option<String>,
}

/// Reference to the course a mapping teaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRef {
    pub id: Id,
    pub name: Option<String>,
    pub hours: Option<u32>,
}

/// Recruitment status of a mapping.
///
/// Values outside the four known states are kept verbatim in
/// [`MappingStatus::Other`] and never count as pending or accepted. `Other`
/// values compare ignoring ASCII case, like the known states do when parsed.
#[derive(Debug, Clone, Serialize)]
pub enum MappingStatus {
    Pending,
    Contacting,
    Accepted,
    Rejected,
    Other(String),
}

impl MappingStatus {
    /// Case-insensitive parse; never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "contacting" => Self::Contacting,
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Contacting => "Contacting",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Other(raw) => raw,
        }
    }

    /// Position in the canonical listing order; unknown statuses sort last.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Contacting => 1,
            Self::Accepted => 2,
            Self::Rejected => 3,
            Self::Other(_) => 4,
        }
    }
}

impl PartialEq for MappingStatus {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Other(a), Self::Other(b)) => a.eq_ignore_ascii_case(b),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

impl Eq for MappingStatus {}

impl Hash for MappingStatus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let Self::Other(raw) = self {
            raw.to_ascii_lowercase().hash(state);
        }
    }
}

impl Default for MappingStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One class + course + lecturer teaching assignment.
///
/// Optional fields mirror what older API records may omit. Group counts are
/// kept signed so that negative input survives parsing and is clamped in one
/// place, see [`crate::mapping::legacy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CourseMappingRecord {
    pub id: Option<Id>,
    pub class_ref: Option<ClassRef>,
    pub course_ref: Option<CourseRef>,
    pub lecturer_id: Option<Id>,
    pub term: String,
    pub academic_year: String,
    pub status: MappingStatus,
    pub type_hours: Option<String>,
    pub theory_groups: Option<i64>,
    pub theory_hours: Option<String>,
    pub theory_combined: Option<bool>,
    pub lab_groups: Option<i64>,
    pub legacy_group_count: Option<i64>,
    pub hours: Option<u32>,
}

impl CourseMappingRecord {
    pub fn class_id(&self) -> Option<&Id> {
        self.class_ref.as_ref().map(|c| &c.id)
    }

    pub fn course_id(&self) -> Option<&Id> {
        self.course_ref.as_ref().map(|c| &c.id)
    }

    pub fn has_lecturer(&self) -> bool {
        self.lecturer_id.is_some()
    }
}

/// Catalog entry for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseMetadata {
    pub id: Id,
    pub name: Option<String>,
    pub hours: u32,
}

/// Canonical subject hours keyed by course id.
pub type CourseHours = HashMap<Id, u32>;

/// Summary for one (class, term, academic year) bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingGroup {
    pub key: String,
    pub class_ref: Option<ClassRef>,
    pub term: String,
    pub academic_year: String,
    pub entries: Vec<CourseMappingRecord>,
    pub stats: GroupStats,
}

impl MappingGroup {
    /// Display name of the class, empty when unresolved.
    pub fn class_name(&self) -> &str {
        self.class_ref
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or("")
    }
}
