//! Record filtering by activity type and year.

use crate::manifest::ActivityRecord;

/// Filter lists built from the command line. Both predicates default to
/// true when their list is empty.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub types: Vec<String>,
    pub years: Vec<String>,
}

impl FilterConfig {
    /// Case-insensitive membership of the record's type in the type filter.
    pub fn matches_type(&self, record: &ActivityRecord) -> bool {
        self.types.is_empty()
            || self
                .types
                .iter()
                .any(|filter| filter.eq_ignore_ascii_case(&record.activity_type))
    }

    /// Exact string match of the record's year (first 4 characters of the
    /// date) against the year filter. No calendar parsing.
    pub fn matches_year(&self, record: &ActivityRecord) -> bool {
        self.years.is_empty() || self.years.iter().any(|filter| filter == record.year())
    }

    /// A record is processed only when both predicates pass.
    pub fn matches(&self, record: &ActivityRecord) -> bool {
        self.matches_year(record) && self.matches_type(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(activity_type: &str, date: &str) -> ActivityRecord {
        ActivityRecord {
            id: "1".to_string(),
            date: date.to_string(),
            activity_type: activity_type.to_string(),
            filename: "1.gpx".to_string(),
        }
    }

    fn types(values: &[&str]) -> FilterConfig {
        FilterConfig {
            types: values.iter().map(|v| v.to_string()).collect(),
            years: Vec::new(),
        }
    }

    fn years(values: &[&str]) -> FilterConfig {
        FilterConfig {
            types: Vec::new(),
            years: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn empty_filters_match_everything() {
        let filters = FilterConfig::default();
        assert!(filters.matches(&record("Run", "2021-05-01")));
    }

    #[test]
    fn type_match_is_case_insensitive() {
        let filters = types(&["run"]);
        assert!(filters.matches_type(&record("Run", "2021-05-01")));

        let filters = types(&["RIDE"]);
        assert!(filters.matches_type(&record("ride", "2021-05-01")));
    }

    #[test]
    fn type_mismatch_fails() {
        let filters = types(&["Ride"]);
        assert!(!filters.matches_type(&record("Run", "2021-05-01")));
    }

    #[test]
    fn type_matches_any_element() {
        let filters = types(&["Ride", "run"]);
        assert!(filters.matches_type(&record("Run", "2021-05-01")));
    }

    #[test]
    fn year_compares_only_the_first_four_characters() {
        let filters = years(&["2021"]);
        assert!(filters.matches_year(&record("Run", "2021-05-01")));

        let filters = years(&["2020"]);
        assert!(!filters.matches_year(&record("Run", "2021-05-01")));
    }

    #[test]
    fn year_filter_longer_than_four_characters_never_matches() {
        let filters = years(&["2021-05"]);
        assert!(!filters.matches_year(&record("Run", "2021-05-01")));
    }

    #[test]
    fn both_predicates_must_pass() {
        let filters = FilterConfig {
            types: vec!["Run".to_string()],
            years: vec!["2021".to_string()],
        };
        assert!(filters.matches(&record("Run", "2021-05-01")));
        assert!(!filters.matches(&record("Run", "2020-05-01")));
        assert!(!filters.matches(&record("Ride", "2021-05-01")));
    }
}
