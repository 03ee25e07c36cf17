use crate::mapping::filters::MappingFilters;
use crate::mapping::types::{CourseHours, CourseMappingRecord, CourseMetadata, MappingGroup};
use crate::mapping::utility::group_by;
use crate::stats::GroupStats;

/// Bucket id used for records without a class reference.
pub const UNKNOWN_CLASS: &str = "unknown";

/// Groups mapping records by (class, term, academic year), filters each
/// bucket and computes its [`GroupStats`].
///
/// Buckets left empty by the filters are dropped. Groups are ordered by
/// academic year descending, then class name ascending. The inputs are only
/// read, so repeated calls with the same arguments give the same result.
pub fn aggregate(
    records: &[CourseMappingRecord],
    course_hours: &CourseHours,
    filters: &MappingFilters,
) -> Vec<MappingGroup> {
    let buckets = group_by(records, |&r| bucket_key(r));

    let mut groups: Vec<MappingGroup> = buckets
        .into_iter()
        .filter_map(|(key, bucket)| {
            let entries: Vec<CourseMappingRecord> = bucket
                .into_iter()
                .filter(|r| filters.matches(r))
                .cloned()
                .collect();
            let first = entries.first()?;

            let class_ref = entries.iter().find_map(|r| r.class_ref.clone());
            let term = first.term.clone();
            let academic_year = first.academic_year.clone();
            let stats = GroupStats::from_entries(&entries, course_hours);

            Some(MappingGroup {
                key,
                class_ref,
                term,
                academic_year,
                entries,
                stats,
            })
        })
        .collect();

    // stable: equal keys keep first-seen order
    groups.sort_by(|a, b| {
        b.academic_year
            .cmp(&a.academic_year)
            .then_with(|| a.class_name().cmp(b.class_name()))
    });

    groups
}

/// `"{class}-{term}-{academic_year}"`. Tuples that format to the same text
/// share one bucket, so group keys are unique.
fn bucket_key(r: &CourseMappingRecord) -> String {
    format!(
        "{}-{}-{}",
        r.class_id().map_or(UNKNOWN_CLASS, |id| id.as_str()),
        r.term,
        r.academic_year
    )
}

/// Builds the course-hours lookup. A later duplicate id overwrites an earlier one.
pub fn course_hours_index(courses: &[CourseMetadata]) -> CourseHours {
    courses.iter().map(|c| (c.id.clone(), c.hours)).collect()
}
