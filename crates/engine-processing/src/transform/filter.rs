use super::pipeline::Filter;
use model::records::row::Row;

pub const AGE_COLUMN: &str = "age";

/// Stands in for any age that cannot be read as an integer.
pub const SENTINEL_AGE: i64 = -1;

/// The row's age as an integer, or [`SENTINEL_AGE`] when the column is
/// absent, blank or not an integer. Surrounding whitespace is ignored.
pub fn parse_age(row: &Row) -> i64 {
    row.get_value(AGE_COLUMN)
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(SENTINEL_AGE)
}

/// Keeps rows whose age (or sentinel) is at least `min_age`.
///
/// With a non-negative threshold this drops every row with an unusable
/// age; with a negative one those rows are kept.
pub struct MinAgeFilter {
    min_age: i64,
}

impl MinAgeFilter {
    pub fn new(min_age: i64) -> Self {
        Self { min_age }
    }
}

impl Filter for MinAgeFilter {
    fn should_keep(&self, row: &Row) -> bool {
        parse_age(row) >= self.min_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::FieldValue;

    fn with_age(age: &str) -> Row {
        Row::new(vec![FieldValue::new("id", "1"), FieldValue::new("age", age)])
    }

    #[test]
    fn parses_integers_with_surrounding_whitespace() {
        assert_eq!(parse_age(&with_age("42")), 42);
        assert_eq!(parse_age(&with_age("  7 ")), 7);
        assert_eq!(parse_age(&with_age("+3")), 3);
        assert_eq!(parse_age(&with_age("-12")), -12);
    }

    #[test]
    fn unparsable_values_become_sentinel() {
        for raw in ["", "   ", "abc", "12.5", "1e3", "1_000", "99999999999999999999"] {
            assert_eq!(parse_age(&with_age(raw)), SENTINEL_AGE, "value {raw:?}");
        }
    }

    #[test]
    fn missing_age_column_becomes_sentinel() {
        let row = Row::new(vec![FieldValue::new("id", "1")]);
        assert_eq!(parse_age(&row), SENTINEL_AGE);
    }

    #[test]
    fn threshold_is_inclusive() {
        let filter = MinAgeFilter::new(18);
        assert!(!filter.should_keep(&with_age("17")));
        assert!(filter.should_keep(&with_age("18")));
    }

    #[test]
    fn sentinel_is_excluded_at_zero_and_kept_below() {
        assert!(!MinAgeFilter::new(0).should_keep(&with_age("abc")));
        assert!(MinAgeFilter::new(-1).should_keep(&with_age("abc")));
        assert!(MinAgeFilter::new(-5).should_keep(&with_age("abc")));
    }
}
