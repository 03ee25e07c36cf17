//! JSON parser for course-mapping API payloads.
//!
//! API records are loosely typed: ids may be numbers or strings, counts may be
//! numeric strings, nested references may be missing. Everything is coerced
//! into the strict types of [`crate::mapping::types`] here, and malformed
//! fields fall back to defaults instead of failing the record.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use crate::mapping::types::{
    ClassRef, CourseMappingRecord, CourseMetadata, CourseRef, Id, MappingStatus,
};

/// One page of a list endpoint.
#[derive(Debug, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub total_pages: Option<u64>,
    pub has_more: Option<bool>,
}

/// Splits a list response into its items and pagination hints.
///
/// Accepts a bare JSON array or an object carrying the array under `data` or
/// `items`. Hints are read from the top level, then from `meta` and
/// `pagination`. Any other shape is an empty page.
pub fn parse_page(value: Value) -> Page {
    match value {
        Value::Array(items) => Page {
            items,
            ..Default::default()
        },
        Value::Object(mut obj) => {
            let items = ["data", "items"]
                .iter()
                .find_map(|k| match obj.remove(*k) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                })
                .unwrap_or_default();

            let envelope = Value::Object(obj);
            let sources = [&envelope, &envelope["meta"], &envelope["pagination"]];
            let total_pages = sources
                .into_iter()
                .find_map(|v| first_count(v, &["totalPages", "total_pages"]))
                .map(|n| n.max(0) as u64);
            let has_more = sources
                .into_iter()
                .find_map(|v| first_flag(v, &["hasMore", "has_more"]));

            Page {
                items,
                total_pages,
                has_more,
            }
        }
        _ => Page::default(),
    }
}

/// Converts one API mapping object. Returns `None` only for non-objects.
pub fn parse_mapping_record(item: &Value) -> Option<CourseMappingRecord> {
    if !item.is_object() {
        return None;
    }

    let class = &item["class"];
    let class_ref = as_id(&item["class_id"])
        .or_else(|| as_id(&class["id"]))
        .map(|id| ClassRef {
            id,
            name: first_text(&[&class["name"], &class["class_name"], &item["class_name"]]),
        });

    let course = &item["course"];
    let course_ref = as_id(&item["course_id"])
        .or_else(|| as_id(&course["id"]))
        .map(|id| CourseRef {
            id,
            name: first_text(&[&course["name"], &course["course_name"], &item["course_name"]]),
            hours: as_hours(&course["hours"]),
        });

    let lecturer_id =
        as_id(&item["lecturer_profile_id"]).or_else(|| as_id(&item["lecturer"]["id"]));

    let theory_combined = as_flag(&item["theory_combined"])
        .or_else(|| as_flag(&item["theory_15h_combined"]));

    Some(CourseMappingRecord {
        id: as_id(&item["id"]),
        class_ref,
        course_ref,
        lecturer_id,
        term: as_label(&item["term"]).unwrap_or_default(),
        academic_year: as_label(&item["academic_year"]).unwrap_or_default(),
        status: as_text(&item["status"])
            .map(|s| MappingStatus::parse(&s))
            .unwrap_or_default(),
        type_hours: as_text(&item["type_hours"]),
        theory_groups: as_count(&item["theory_groups"]),
        theory_hours: as_text(&item["theory_hours"]),
        theory_combined,
        lab_groups: as_count(&item["lab_groups"]),
        legacy_group_count: as_count(&item["group_count"]),
        hours: as_hours(&item["hours"]),
    })
}

/// Converts one API course object. Returns `None` when it has no id.
pub fn parse_course(item: &Value) -> Option<CourseMetadata> {
    Some(CourseMetadata {
        id: as_id(&item["id"])?,
        name: first_text(&[&item["name"], &item["course_name"]]),
        hours: as_hours(&item["hours"]).unwrap_or(0),
    })
}

/// Parses a full mapping document (bare array or `data` envelope).
///
/// # Errors
///
/// Returns an error if `bytes` is not valid JSON.
pub fn parse_mappings(bytes: &[u8]) -> Result<Vec<CourseMappingRecord>> {
    let value: Value = serde_json::from_slice(bytes).context("mapping payload is not JSON")?;
    Ok(mappings_from_items(&parse_page(value).items))
}

/// Parses a full course document (bare array or `data` envelope).
///
/// # Errors
///
/// Returns an error if `bytes` is not valid JSON.
pub fn parse_courses(bytes: &[u8]) -> Result<Vec<CourseMetadata>> {
    let value: Value = serde_json::from_slice(bytes).context("course payload is not JSON")?;
    Ok(courses_from_items(&parse_page(value).items))
}

pub fn mappings_from_items(items: &[Value]) -> Vec<CourseMappingRecord> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let record = parse_mapping_record(item);
            if record.is_none() {
                warn!(index, "Skipping mapping item that is not an object");
            }
            record
        })
        .collect()
}

pub fn courses_from_items(items: &[Value]) -> Vec<CourseMetadata> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let course = parse_course(item);
            if course.is_none() {
                warn!(index, "Skipping course item without an id");
            }
            course
        })
        .collect()
}

fn first_count(v: &Value, names: &[&str]) -> Option<i64> {
    names.iter().find_map(|n| as_count(&v[*n]))
}

fn first_flag(v: &Value, names: &[&str]) -> Option<bool> {
    names.iter().find_map(|n| v[*n].as_bool())
}

fn as_id(v: &Value) -> Option<Id> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(Id::new(s.trim())),
        Value::Number(n) => Some(Id::new(number_label(n))),
        _ => None,
    }
}

/// Whole-number floats render without a fraction, so `1.0` reads as `1`.
fn number_label(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Text or number rendered as text, e.g. a term sent as `1` or `"1"`.
fn as_label(v: &Value) -> Option<String> {
    match v {
        Value::Number(n) => Some(number_label(n)),
        other => as_text(other),
    }
}

fn first_text(candidates: &[&Value]) -> Option<String> {
    candidates.iter().find_map(|v| as_text(v))
}

/// Finite number, or a string holding one, truncated towards zero.
fn as_count(v: &Value) -> Option<i64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then(|| n.trunc() as i64)
}

/// Non-negative hour count; negative values clamp to zero.
fn as_hours(v: &Value) -> Option<u32> {
    as_count(v).map(|n| n.clamp(0, u32::MAX as i64) as u32)
}

fn as_flag(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
