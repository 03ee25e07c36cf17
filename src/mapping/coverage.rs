use serde::Serialize;
use std::fmt;

/// How far the assigned hours of a group go towards the hours it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Coverage {
    /// Nothing needed and nothing assigned.
    NotRequired,
    Unstaffed,
    Partial,
    Complete,
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Coverage::NotRequired => "not_required",
            Coverage::Unstaffed => "unstaffed",
            Coverage::Partial => "partial",
            Coverage::Complete => "complete",
        })
    }
}

/// Classifies assigned vs needed hours.
///
/// | assigned | needed | level       |
/// |----------|--------|-------------|
/// | 0        | 0      | NotRequired |
/// | 0        | > 0    | Unstaffed   |
/// | < needed | > 0    | Partial     |
/// | >= needed| any    | Complete    |
pub fn coverage(assigned: u32, needed: u32) -> Coverage {
    match (assigned, needed) {
        (0, 0) => Coverage::NotRequired,
        (0, _) => Coverage::Unstaffed,
        (a, n) if a < n => Coverage::Partial,
        _ => Coverage::Complete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_boundaries() {
        assert_eq!(coverage(0, 0), Coverage::NotRequired);
        assert_eq!(coverage(0, 60), Coverage::Unstaffed);
        assert_eq!(coverage(1, 60), Coverage::Partial);
        assert_eq!(coverage(59, 60), Coverage::Partial);
        assert_eq!(coverage(60, 60), Coverage::Complete);
        assert_eq!(coverage(90, 60), Coverage::Complete);
        assert_eq!(coverage(15, 0), Coverage::Complete);
    }

    #[test]
    fn test_display() {
        assert_eq!(Coverage::Unstaffed.to_string(), "unstaffed");
    }
}
