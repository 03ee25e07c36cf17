use serde::Serialize;
use std::collections::HashMap;

use crate::mapping::coverage::{Coverage, coverage};
use crate::mapping::hours::{compute_hours_for_entry, groups_required};
use crate::mapping::types::{CourseHours, CourseMappingRecord, Id, MappingStatus};
use crate::mapping::utility::pct;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupStats {
    pub total: usize,
    pub pending: usize,
    /// Accepted and with a lecturer attached.
    pub assigned: usize,
    /// Hours of accepted entries only.
    pub hours_assigned: u32,
    /// Per course: largest group requirement times the course's subject hours.
    pub hours_needed: u32,
}

impl GroupStats {
    pub fn from_entries(entries: &[CourseMappingRecord], course_hours: &CourseHours) -> Self {
        let mut s = GroupStats {
            total: entries.len(),
            ..Default::default()
        };

        // course id -> largest group requirement seen in this bucket
        let mut max_groups: HashMap<&Id, u32> = HashMap::new();

        for e in entries {
            match e.status {
                MappingStatus::Pending => s.pending += 1,
                MappingStatus::Accepted => {
                    if e.has_lecturer() {
                        s.assigned += 1;
                    }
                    s.hours_assigned = s.hours_assigned.saturating_add(compute_hours_for_entry(e));
                }
                _ => {}
            }

            if let Some(course_id) = e.course_id() {
                let groups = groups_required(e);
                let slot = max_groups.entry(course_id).or_insert(0);
                *slot = (*slot).max(groups);
            }
        }

        s.hours_needed = max_groups
            .into_iter()
            .map(|(id, groups)| groups.saturating_mul(course_hours.get(id).copied().unwrap_or(0)))
            .fold(0u32, u32::saturating_add);

        s
    }

    pub fn coverage_pct(&self) -> f64 {
        pct(self.hours_assigned, self.hours_needed)
    }

    pub fn coverage(&self) -> Coverage {
        coverage(self.hours_assigned, self.hours_needed)
    }
}
