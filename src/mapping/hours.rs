use crate::mapping::legacy::{LAB_GROUP_HOURS, TeachingLoad};
use crate::mapping::types::CourseMappingRecord;

/// Instructional hours attributable to one mapping, regardless of status.
///
/// Theory counts the per-group duration once when the groups are taught as a
/// combined session, otherwise once per group. Each lab group adds 30 hours.
/// When neither yields anything, the hours stored on the record or on its
/// course reference are used.
pub fn compute_hours_for_entry(entry: &CourseMappingRecord) -> u32 {
    let load = TeachingLoad::from_record(entry);
    let per_group = load.theory_duration.unwrap_or(0);

    let theory = if load.theory_groups == 0 {
        0
    } else if load.theory_combined {
        per_group
    } else {
        per_group.saturating_mul(load.theory_groups)
    };
    let lab = load.lab_groups.saturating_mul(LAB_GROUP_HOURS);

    let total = theory.saturating_add(lab);
    if total > 0 {
        return total;
    }

    entry
        .hours
        .or_else(|| entry.course_ref.as_ref().and_then(|c| c.hours))
        .unwrap_or(0)
}

/// Largest simultaneous group requirement of one mapping.
pub fn groups_required(entry: &CourseMappingRecord) -> u32 {
    let load = TeachingLoad::from_record(entry);
    match load.theory_groups.max(load.lab_groups) {
        0 => load.legacy_group_count,
        n => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::types::{CourseRef, Id};

    fn theory(groups: i64, hours: &str, combined: bool) -> CourseMappingRecord {
        CourseMappingRecord {
            theory_groups: Some(groups),
            theory_hours: Some(hours.to_string()),
            theory_combined: Some(combined),
            ..Default::default()
        }
    }

    #[test]
    fn test_combined_theory_counts_once() {
        assert_eq!(compute_hours_for_entry(&theory(3, "15h", true)), 15);
        assert_eq!(compute_hours_for_entry(&theory(3, "15h", false)), 45);
        assert_eq!(compute_hours_for_entry(&theory(2, "30h", true)), 30);
    }

    #[test]
    fn test_lab_is_never_combined() {
        let r = CourseMappingRecord {
            lab_groups: Some(2),
            theory_combined: Some(true),
            ..Default::default()
        };
        assert_eq!(compute_hours_for_entry(&r), 60);
    }

    #[test]
    fn test_theory_and_lab_both_contribute() {
        let r = CourseMappingRecord {
            lab_groups: Some(1),
            ..theory(2, "15h", false)
        };
        assert_eq!(compute_hours_for_entry(&r), 60);
    }

    #[test]
    fn test_invalid_theory_hours_gives_no_theory() {
        assert_eq!(compute_hours_for_entry(&theory(2, "20h", false)), 0);
    }

    #[test]
    fn test_falls_back_to_stored_hours() {
        let r = CourseMappingRecord {
            hours: Some(12),
            ..Default::default()
        };
        assert_eq!(compute_hours_for_entry(&r), 12);

        let r = CourseMappingRecord {
            course_ref: Some(CourseRef {
                id: Id::from("7"),
                name: None,
                hours: Some(45),
            }),
            ..Default::default()
        };
        assert_eq!(compute_hours_for_entry(&r), 45);
        assert_eq!(compute_hours_for_entry(&CourseMappingRecord::default()), 0);
    }

    #[test]
    fn test_legacy_records_compute_hours() {
        let r = CourseMappingRecord {
            type_hours: Some("Theory (15h)".into()),
            legacy_group_count: Some(2),
            ..Default::default()
        };
        assert_eq!(compute_hours_for_entry(&r), 30);
    }

    #[test]
    fn test_groups_required_takes_max_then_legacy() {
        let r = CourseMappingRecord {
            theory_groups: Some(2),
            lab_groups: Some(3),
            ..Default::default()
        };
        assert_eq!(groups_required(&r), 3);

        let r = CourseMappingRecord {
            legacy_group_count: Some(4),
            ..Default::default()
        };
        assert_eq!(groups_required(&r), 4);
    }
}
