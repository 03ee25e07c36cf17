//! Normalization of structured and pre-migration teaching fields.
//!
//! Older records carry only a free-text `type_hours` descriptor such as
//! `"Theory (15h)"` plus a bare `group_count`. Newer ones carry
//! `theory_groups` / `theory_hours` / `lab_groups`. Everything that reads the
//! legacy text lives here, so dropping legacy support touches one function.

use crate::mapping::types::CourseMappingRecord;

/// Hours per lab group. Lab sessions are never combined.
pub const LAB_GROUP_HOURS: u32 = 30;

/// Effective teaching load of a single record after resolving legacy fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeachingLoad {
    /// Per-group theory duration, 15 or 30. `None` when unknown or invalid.
    pub theory_duration: Option<u32>,
    pub theory_groups: u32,
    pub theory_combined: bool,
    pub lab_groups: u32,
    pub legacy_group_count: u32,
}

impl TeachingLoad {
    pub fn from_record(record: &CourseMappingRecord) -> Self {
        let text = record
            .type_hours
            .as_deref()
            .unwrap_or("")
            .to_ascii_lowercase();
        let legacy_group_count = clamp(record.legacy_group_count);

        let theory_duration = match record.theory_hours.as_deref().map(str::trim) {
            Some("15h") => Some(15),
            Some("30h") => Some(30),
            Some(_) => None,
            None if text.contains("15h") => Some(15),
            None if text.contains("30h") => Some(30),
            None => None,
        };

        let theory_groups = match record.theory_groups {
            Some(n) => clamp(Some(n)),
            None if mentions_theory(&text) => legacy_group_count,
            None => 0,
        };

        let lab_groups = match record.lab_groups {
            Some(n) => clamp(Some(n)),
            None if mentions_lab(&text) => legacy_group_count,
            None => 0,
        };

        Self {
            theory_duration,
            theory_groups,
            theory_combined: record.theory_combined.unwrap_or(false),
            lab_groups,
            legacy_group_count,
        }
    }
}

fn mentions_theory(text: &str) -> bool {
    text.contains("theory") || text.contains("15h")
}

fn mentions_lab(text: &str) -> bool {
    text.contains("lab") || text.contains("30h")
}

fn clamp(value: Option<i64>) -> u32 {
    value
        .unwrap_or(0)
        .clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CourseMappingRecord {
        CourseMappingRecord::default()
    }

    #[test]
    fn test_structured_fields_win_over_legacy_text() {
        let r = CourseMappingRecord {
            type_hours: Some("Lab (30h)".into()),
            theory_groups: Some(2),
            theory_hours: Some("15h".into()),
            lab_groups: Some(0),
            legacy_group_count: Some(5),
            ..record()
        };
        let load = TeachingLoad::from_record(&r);

        assert_eq!(load.theory_duration, Some(15));
        assert_eq!(load.theory_groups, 2);
        assert_eq!(load.lab_groups, 0);
    }

    #[test]
    fn test_legacy_theory_text_uses_group_count() {
        let r = CourseMappingRecord {
            type_hours: Some("Theory (15h)".into()),
            legacy_group_count: Some(3),
            ..record()
        };
        let load = TeachingLoad::from_record(&r);

        assert_eq!(load.theory_duration, Some(15));
        assert_eq!(load.theory_groups, 3);
        assert_eq!(load.lab_groups, 0);
    }

    #[test]
    fn test_legacy_lab_text_uses_group_count() {
        let r = CourseMappingRecord {
            type_hours: Some("LAB (30H)".into()),
            legacy_group_count: Some(2),
            ..record()
        };
        let load = TeachingLoad::from_record(&r);

        assert_eq!(load.theory_groups, 0);
        assert_eq!(load.lab_groups, 2);
    }

    #[test]
    fn test_invalid_theory_hours_blocks_text_inference() {
        let r = CourseMappingRecord {
            type_hours: Some("Theory (15h)".into()),
            theory_hours: Some("45h".into()),
            ..record()
        };

        assert_eq!(TeachingLoad::from_record(&r).theory_duration, None);
    }

    #[test]
    fn test_negative_counts_clamp_to_zero() {
        let r = CourseMappingRecord {
            theory_groups: Some(-4),
            lab_groups: Some(-1),
            legacy_group_count: Some(-2),
            ..record()
        };
        let load = TeachingLoad::from_record(&r);

        assert_eq!(load.theory_groups, 0);
        assert_eq!(load.lab_groups, 0);
        assert_eq!(load.legacy_group_count, 0);
    }

    #[test]
    fn test_empty_record_has_no_load() {
        assert_eq!(TeachingLoad::from_record(&record()), TeachingLoad::default());
    }
}
