//! Filters applied inside each bucket and discovery of their possible values.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::mapping::types::{CourseMappingRecord, MappingStatus};

/// Sentinel accepted by every filter to disable it.
pub const ALL: &str = "ALL";

/// A single equality filter that may be switched off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

impl Filter<String> {
    /// `"ALL"` (any case) or an empty value disables the filter.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL) {
            Filter::All
        } else {
            Filter::Only(raw.to_string())
        }
    }
}

impl Filter<MappingStatus> {
    pub fn parse_status(raw: &str) -> Self {
        match Filter::<String>::parse(raw) {
            Filter::All => Filter::All,
            Filter::Only(s) => Filter::Only(MappingStatus::parse(&s)),
        }
    }
}

/// Filters for the mapping summary screen. All tests are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingFilters {
    pub academic_year: Filter<String>,
    pub term: Filter<String>,
    pub status: Filter<MappingStatus>,
}

impl MappingFilters {
    pub fn new(academic_year: &str, term: &str, status: &str) -> Self {
        Self {
            academic_year: Filter::<String>::parse(academic_year),
            term: Filter::<String>::parse(term),
            status: Filter::<MappingStatus>::parse_status(status),
        }
    }

    pub fn matches(&self, record: &CourseMappingRecord) -> bool {
        self.academic_year.matches(&record.academic_year)
            && self.term.matches(&record.term)
            && self.status.matches(&record.status)
    }
}

/// Distinct filter values present in a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Newest first.
    pub academic_years: Vec<String>,
    pub terms: Vec<String>,
    /// Known statuses in workflow order, then any others alphabetically.
    pub statuses: Vec<String>,
}

/// Collects the academic years, terms and statuses that occur in `records`.
/// Blank values are skipped.
pub fn filter_options(records: &[CourseMappingRecord]) -> FilterOptions {
    let mut years = BTreeSet::new();
    let mut terms = BTreeSet::new();
    let mut statuses = BTreeSet::new();

    for r in records {
        if !r.academic_year.is_empty() {
            years.insert(r.academic_year.clone());
        }
        if !r.term.is_empty() {
            terms.insert(r.term.clone());
        }
        if !r.status.as_str().is_empty() {
            statuses.insert((r.status.rank(), r.status.as_str().to_string()));
        }
    }

    FilterOptions {
        academic_years: years.into_iter().rev().collect(),
        terms: terms.into_iter().collect(),
        statuses: statuses.into_iter().map(|(_, s)| s).collect(),
    }
}
