use crate::data::datatable::DataValue;
use std::cmp::Ordering;

/// Utility function to compare two DataValues, handling all types.
/// This centralizes comparison logic so the sort stage has a single
/// three-way ordering to flip for descending order.
pub fn compare_datavalues(a: &DataValue, b: &DataValue) -> Ordering {
    match (a, b) {
        // Integer comparisons
        (DataValue::Integer(a), DataValue::Integer(b)) => a.cmp(b),

        // Float comparisons
        (DataValue::Float(a), DataValue::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),

        // String comparisons
        (DataValue::String(a), DataValue::String(b)) => a.cmp(b),

        // Boolean comparisons
        (DataValue::Boolean(a), DataValue::Boolean(b)) => a.cmp(b),

        // DateTime comparisons (ISO 8601 strings order lexicographically)
        (DataValue::DateTime(a), DataValue::DateTime(b)) => a.cmp(b),

        // Null handling
        (DataValue::Null, DataValue::Null) => Ordering::Equal,
        (DataValue::Null, _) => Ordering::Less,
        (_, DataValue::Null) => Ordering::Greater,

        // Cross-type comparisons - consistent ordering:
        // Null < Boolean < Integer/Float < String < DateTime
        (DataValue::Boolean(_), _) => Ordering::Less,
        (_, DataValue::Boolean(_)) => Ordering::Greater,

        (DataValue::Integer(i), DataValue::Float(f)) => {
            // Compare actual numeric values, not types
            (*i as f64).partial_cmp(f).unwrap_or(Ordering::Equal)
        }
        (DataValue::Float(f), DataValue::Integer(i)) => {
            f.partial_cmp(&(*i as f64)).unwrap_or(Ordering::Equal)
        }
        (DataValue::Integer(_), _) => Ordering::Less,
        (_, DataValue::Integer(_)) => Ordering::Greater,
        (DataValue::Float(_), _) => Ordering::Less,
        (_, DataValue::Float(_)) => Ordering::Greater,

        (DataValue::String(_), DataValue::DateTime(_)) => Ordering::Less,
        (DataValue::DateTime(_), DataValue::String(_)) => Ordering::Greater,
    }
}

/// Compare DataValues with optional values (handling None)
pub fn compare_optional_datavalues(a: Option<&DataValue>, b: Option<&DataValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_datavalues(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_comparison() {
        assert_eq!(
            compare_datavalues(&DataValue::Integer(1), &DataValue::Integer(2)),
            Ordering::Less
        );
        assert_eq!(
            compare_datavalues(&DataValue::Integer(2), &DataValue::Integer(2)),
            Ordering::Equal
        );
        assert_eq!(
            compare_datavalues(&DataValue::Integer(3), &DataValue::Integer(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_string_comparison() {
        assert_eq!(
            compare_datavalues(
                &DataValue::String("apple".to_string()),
                &DataValue::String("banana".to_string())
            ),
            Ordering::Less
        );
    }

    #[test]
    fn test_numeric_cross_comparison() {
        assert_eq!(
            compare_datavalues(&DataValue::Integer(2), &DataValue::Float(1.5)),
            Ordering::Greater
        );
        assert_eq!(
            compare_datavalues(&DataValue::Float(1.5), &DataValue::Integer(2)),
            Ordering::Less
        );
    }

    #[test]
    fn test_datetime_comparison() {
        assert_eq!(
            compare_datavalues(
                &DataValue::DateTime("2024-01-01".to_string()),
                &DataValue::DateTime("2024-02-01".to_string())
            ),
            Ordering::Less
        );
    }

    #[test]
    fn test_null_comparison() {
        assert_eq!(
            compare_datavalues(&DataValue::Null, &DataValue::Integer(1)),
            Ordering::Less
        );
        assert_eq!(
            compare_datavalues(&DataValue::Integer(1), &DataValue::Null),
            Ordering::Greater
        );
        assert_eq!(
            compare_datavalues(&DataValue::Null, &DataValue::Null),
            Ordering::Equal
        );
    }

    #[test]
    fn test_optional_comparison() {
        assert_eq!(
            compare_optional_datavalues(None, Some(&DataValue::Integer(1))),
            Ordering::Less
        );
        assert_eq!(compare_optional_datavalues(None, None), Ordering::Equal);
    }
}
