//! Column-name predicates for dynamic column selection.

use std::fmt;

use regex::Regex;

/// Decides whether a column takes part in a predicate-matched aggregation.
///
/// Implemented for closures, [`NameContains`] and compiled [`Regex`]es.
pub trait ColumnPredicate {
    fn matches(&self, name: &str) -> bool;

    /// Text used when reporting that nothing matched.
    fn describe(&self) -> String {
        "predicate".to_string()
    }
}

impl<F> ColumnPredicate for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, name: &str) -> bool {
        self(name)
    }
}

impl ColumnPredicate for Regex {
    fn matches(&self, name: &str) -> bool {
        self.is_match(name)
    }

    fn describe(&self) -> String {
        format!("pattern /{}/", self.as_str())
    }
}

/// Case-insensitive substring match on the column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameContains {
    needle: String,
}

impl NameContains {
    pub fn new(needle: &str) -> Self {
        Self {
            needle: needle.to_lowercase(),
        }
    }
}

impl ColumnPredicate for NameContains {
    fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.needle)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NameContains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "names containing '{}'", self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_contains_ignores_case() {
        let predicate = NameContains::new("AGE");
        assert!(predicate.matches("bio_age_5_17"));
        assert!(predicate.matches("Age_0_5"));
        assert!(!predicate.matches("district"));
    }

    #[test]
    fn test_closure_predicate() {
        let predicate = |name: &str| name.ends_with("_17");
        assert!(predicate.matches("demo_age_5_17"));
        assert!(!predicate.matches("demo_age_17_"));
    }

    #[test]
    fn test_regex_predicate() {
        let predicate = Regex::new(r"^bio_age_\d+").unwrap();
        assert!(ColumnPredicate::matches(&predicate, "bio_age_5_17"));
        assert!(!ColumnPredicate::matches(&predicate, "age_5_17"));
        assert_eq!(predicate.describe(), r"pattern /^bio_age_\d+/");
    }
}
