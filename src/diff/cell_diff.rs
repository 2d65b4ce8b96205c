//! Cell-level comparison logic

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Decides whether an actual cell value satisfies the expected one
pub trait CellComparator: Send + Sync {
    fn equal(&self, expected: &str, actual: &str) -> bool;
}

impl<F> CellComparator for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn equal(&self, expected: &str, actual: &str) -> bool {
        self(expected, actual)
    }
}

/// Exact string equality, used for every column without a registered comparator
pub fn exact_match(expected: &str, actual: &str) -> bool {
    expected == actual
}

/// Comparators that can be named in keyed options and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinComparator {
    Exact,
    IgnoreCase,
    IgnoreWhitespace,
    NumericTolerance(f64),
}

impl CellComparator for BuiltinComparator {
    fn equal(&self, expected: &str, actual: &str) -> bool {
        match self {
            BuiltinComparator::Exact => exact_match(expected, actual),
            BuiltinComparator::IgnoreCase => expected.to_lowercase() == actual.to_lowercase(),
            BuiltinComparator::IgnoreWhitespace => expected.trim() == actual.trim(),
            BuiltinComparator::NumericTolerance(tolerance) => {
                match (expected.trim().parse::<f64>(), actual.trim().parse::<f64>()) {
                    (Ok(a), Ok(b)) => (a - b).abs() <= *tolerance,
                    _ => exact_match(expected, actual),
                }
            }
        }
    }
}

impl FromStr for BuiltinComparator {
    type Err = String;

    /// Accepts `exact`, `ignore-case`, `ignore-whitespace` and `numeric-tolerance:<f64>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };

        match (name.to_lowercase().as_str(), arg) {
            ("exact", None) => Ok(BuiltinComparator::Exact),
            ("ignore-case", None) => Ok(BuiltinComparator::IgnoreCase),
            ("ignore-whitespace", None) => Ok(BuiltinComparator::IgnoreWhitespace),
            ("numeric-tolerance" | "numeric", Some(arg)) => arg
                .trim()
                .parse::<f64>()
                .map(BuiltinComparator::NumericTolerance)
                .map_err(|_| format!("Invalid numeric tolerance: {}", arg)),
            _ => Err(format!("Unknown comparator: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equality() {
        assert!(BuiltinComparator::Exact.equal("hello", "hello"));
        assert!(!BuiltinComparator::Exact.equal("hello", "Hello"));
        assert!(!BuiltinComparator::Exact.equal("1", "1.0"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(BuiltinComparator::IgnoreCase.equal("Hello", "hELLO"));
        assert!(!BuiltinComparator::IgnoreCase.equal("Hello", "Help"));
    }

    #[test]
    fn test_whitespace_insensitive() {
        assert!(BuiltinComparator::IgnoreWhitespace.equal(" a ", "a"));
        assert!(!BuiltinComparator::IgnoreWhitespace.equal("a b", "ab"));
    }

    #[test]
    fn test_numeric_tolerance() {
        let comparator = BuiltinComparator::NumericTolerance(0.01);
        assert!(comparator.equal("1.0", "1.005"));
        assert!(!comparator.equal("1.0", "1.02"));
        assert!(comparator.equal("n/a", "n/a"));
        assert!(!comparator.equal("n/a", "1.0"));
    }

    #[test]
    fn test_closures_are_comparators() {
        let plus_ten = |expected: &str, actual: &str| {
            matches!(
                (expected.parse::<i64>(), actual.parse::<i64>()),
                (Ok(e), Ok(a)) if a == e + 10
            )
        };
        assert!(plus_ten.equal("1", "11"));
        assert!(!plus_ten.equal("1", "1"));
    }

    #[test]
    fn test_parse_builtin_names() {
        assert_eq!("exact".parse::<BuiltinComparator>(), Ok(BuiltinComparator::Exact));
        assert_eq!(
            "Ignore-Case".parse::<BuiltinComparator>(),
            Ok(BuiltinComparator::IgnoreCase)
        );
        assert_eq!(
            "numeric-tolerance:0.5".parse::<BuiltinComparator>(),
            Ok(BuiltinComparator::NumericTolerance(0.5))
        );
        assert!("numeric:abc".parse::<BuiltinComparator>().is_err());
        assert!("fuzzy".parse::<BuiltinComparator>().is_err());
    }
}
