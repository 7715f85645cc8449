//! Schema drift detection.
//!
//! Structurally diffs an expected schema against an actual one. Findings are
//! never merged: a field whose type and requiredness both changed yields two
//! findings. Output is sorted by field name and then stably re-sorted by
//! category declaration order, so findings are grouped by category with field
//! names ascending inside each group. Identical inputs always produce
//! identical lists.

use contracts_core::{DriftCategory, DriftFinding, Schema};
use std::collections::BTreeSet;
use tracing::debug;

/// Diffs two field schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriftDetector;

impl DriftDetector {
    /// Creates a new drift detector.
    pub fn new() -> Self {
        Self
    }

    /// Returns every difference between `expected` and `actual`, in
    /// deterministic order.
    pub fn detect(&self, expected: &Schema, actual: &Schema) -> Vec<DriftFinding> {
        let names: BTreeSet<&String> = expected.keys().chain(actual.keys()).collect();
        let mut findings = Vec::new();

        for name in names {
            match (expected.get(name), actual.get(name)) {
                (Some(spec), None) => findings.push(DriftFinding::removed(name.as_str(), spec)),
                (None, Some(spec)) => findings.push(DriftFinding::added(name.as_str(), spec)),
                (Some(before), Some(after)) => {
                    if before.field_type != after.field_type {
                        findings.push(DriftFinding::type_changed(
                            name.as_str(),
                            before.field_type.as_str(),
                            after.field_type.as_str(),
                        ));
                    }
                    if before.required != after.required {
                        findings.push(DriftFinding::required_changed(
                            name.as_str(),
                            before.required,
                            after.required,
                        ));
                    }
                }
                (None, None) => {}
            }
        }

        findings.sort_by(|a, b| a.field_name.cmp(&b.field_name));
        findings.sort_by_key(|f| f.category);

        debug!(
            "Drift detection: {} expected field(s), {} actual field(s), {} finding(s)",
            expected.len(),
            actual.len(),
            findings.len()
        );

        findings
    }
}

/// Distinct categories present in `findings`, in category declaration order.
pub fn distinct_categories(findings: &[DriftFinding]) -> Vec<DriftCategory> {
    findings
        .iter()
        .map(|f| f.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts_core::{FieldSpec, FindingValue};
    use pretty_assertions::assert_eq;

    fn schema(fields: &[(&str, &str, bool)]) -> Schema {
        fields
            .iter()
            .map(|(name, ty, required)| (name.to_string(), FieldSpec::new(*ty, *required)))
            .collect()
    }

    #[test]
    fn test_identical_schemas() {
        let s = schema(&[("a", "int", true), ("b", "string", false)]);
        assert!(DriftDetector::new().detect(&s, &s).is_empty());
    }

    #[test]
    fn test_added_and_type_changed_order() {
        let expected = schema(&[("a", "int", true)]);
        let actual = schema(&[("b", "int", false), ("a", "string", true)]);

        let findings = DriftDetector::new().detect(&expected, &actual);

        assert_eq!(
            findings,
            vec![
                DriftFinding::added("b", &FieldSpec::new("int", false)),
                DriftFinding::type_changed("a", "int", "string"),
            ]
        );
    }

    #[test]
    fn test_grouped_by_category_then_name() {
        let expected = schema(&[("b", "int", true), ("d", "int", true), ("c", "int", false)]);
        let actual = schema(&[("a", "int", true), ("b", "long", true), ("c", "long", true)]);

        let findings = DriftDetector::new().detect(&expected, &actual);
        let order: Vec<(DriftCategory, &str)> = findings
            .iter()
            .map(|f| (f.category, f.field_name.as_str()))
            .collect();

        assert_eq!(
            order,
            vec![
                (DriftCategory::FieldAdded, "a"),
                (DriftCategory::FieldRemoved, "d"),
                (DriftCategory::TypeChanged, "b"),
                (DriftCategory::TypeChanged, "c"),
                (DriftCategory::RequiredChanged, "c"),
            ]
        );
    }

    #[test]
    fn test_removed_field() {
        let expected = schema(&[("a", "int", true), ("gone", "string", true)]);
        let actual = schema(&[("a", "int", true)]);

        let findings = DriftDetector::new().detect(&expected, &actual);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, DriftCategory::FieldRemoved);
        assert_eq!(findings[0].field_name, "gone");
        assert_eq!(
            findings[0].previous,
            Some(FindingValue::Field(FieldSpec::new("string", true)))
        );
        assert_eq!(findings[0].current, None);
    }

    #[test]
    fn test_both_changes_are_separate_findings() {
        let expected = schema(&[("a", "int", false)]);
        let actual = schema(&[("a", "string", true)]);

        let findings = DriftDetector::new().detect(&expected, &actual);
        assert_eq!(
            findings,
            vec![
                DriftFinding::type_changed("a", "int", "string"),
                DriftFinding::required_changed("a", false, true),
            ]
        );
    }

    #[test]
    fn test_type_comparison_is_exact() {
        let expected = schema(&[("a", "int", true)]);
        let actual = schema(&[("a", "INT", true)]);
        let findings = DriftDetector::new().detect(&expected, &actual);
        assert_eq!(findings[0].category, DriftCategory::TypeChanged);
    }

    #[test]
    fn test_empty_expected_everything_added() {
        let actual = schema(&[("z", "int", true), ("m", "int", true)]);
        let findings = DriftDetector::new().detect(&Schema::new(), &actual);
        let names: Vec<&str> = findings.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["m", "z"]);
        assert!(findings.iter().all(|f| f.category == DriftCategory::FieldAdded));
    }

    #[test]
    fn test_distinct_categories() {
        let findings = vec![
            DriftFinding::type_changed("a", "int", "string"),
            DriftFinding::added("b", &FieldSpec::new("int", false)),
            DriftFinding::added("c", &FieldSpec::new("int", false)),
            DriftFinding::required_changed("d", true, false),
        ];
        assert_eq!(
            distinct_categories(&findings),
            vec![
                DriftCategory::FieldAdded,
                DriftCategory::TypeChanged,
                DriftCategory::RequiredChanged,
            ]
        );
    }
}
