//! Category rules and validated rule sets.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::category::defaults;
use crate::error::{Result, RubrikaError};

/// Column name of the catch-all indicator used by the built-in rule set.
pub const DEFAULT_UNCATEGORIZED_COLUMN: &str = "Без категории";

/// A named category with the trigger words that make it fire.
///
/// Triggers are expected in canonical form: lowercase base forms, or
/// space-separated base forms for phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category name; also the name of its indicator column.
    pub name: String,
    /// Trigger tokens and phrases.
    #[serde(default)]
    pub triggers: Vec<String>,
}

impl CategoryRule {
    /// Create a rule. Duplicate triggers are dropped, first occurrence wins.
    pub fn new<N, I, T>(name: N, triggers: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut seen = AHashSet::new();
        let triggers: Vec<String> = triggers
            .into_iter()
            .map(|trigger| trigger.into())
            .filter(|trigger: &String| seen.insert(trigger.clone()))
            .collect();

        CategoryRule {
            name: name.into(),
            triggers,
        }
    }

    /// Whether `trigger` is one of this rule's literal triggers.
    pub fn has_trigger(&self, trigger: &str) -> bool {
        self.triggers.iter().any(|t| t == trigger)
    }
}

/// An ordered, validated collection of category rules.
///
/// Rule order is the order of the indicator columns; the uncategorized column
/// always comes last. A set is immutable once built: replacing the
/// configuration means building a new set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    rules: Vec<CategoryRule>,
    uncategorized_column: String,
}

impl CategorySet {
    /// Build a set using [`DEFAULT_UNCATEGORIZED_COLUMN`].
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self> {
        Self::with_uncategorized_column(rules, DEFAULT_UNCATEGORIZED_COLUMN)
    }

    /// Build a set with a custom uncategorized column name.
    ///
    /// Fails with a configuration error when there are no rules, a name is
    /// empty or repeated, or a rule is named like the uncategorized column.
    pub fn with_uncategorized_column<S: Into<String>>(
        rules: Vec<CategoryRule>,
        uncategorized_column: S,
    ) -> Result<Self> {
        let uncategorized_column = uncategorized_column.into();

        if rules.is_empty() {
            return Err(RubrikaError::configuration("No categories configured"));
        }
        if uncategorized_column.trim().is_empty() {
            return Err(RubrikaError::configuration(
                "Uncategorized column name must not be empty",
            ));
        }

        let mut names = AHashSet::with_capacity(rules.len());
        for rule in &rules {
            if rule.name.trim().is_empty() {
                return Err(RubrikaError::configuration("Category name must not be empty"));
            }
            if rule.name == uncategorized_column {
                return Err(RubrikaError::configuration(format!(
                    "Category '{}' clashes with the uncategorized column name",
                    rule.name
                )));
            }
            if !names.insert(rule.name.as_str()) {
                return Err(RubrikaError::configuration(format!(
                    "Category '{}' is defined more than once",
                    rule.name
                )));
            }
        }

        Ok(CategorySet {
            rules,
            uncategorized_column,
        })
    }

    /// The categories shipped with the crate.
    pub fn builtin() -> Self {
        CategorySet {
            rules: defaults::builtin_rules(),
            uncategorized_column: DEFAULT_UNCATEGORIZED_COLUMN.to_string(),
        }
    }

    /// Rules in definition order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Iterate rules in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryRule> {
        self.rules.iter()
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Number of categories (not counting uncategorized).
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a validated set; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Name of the catch-all indicator column.
    pub fn uncategorized_column(&self) -> &str {
        &self.uncategorized_column
    }

    /// Every column a classification pass writes, in output order.
    pub fn output_columns(&self) -> Vec<String> {
        self.rules
            .iter()
            .map(|rule| rule.name.clone())
            .chain(std::iter::once(self.uncategorized_column.clone()))
            .collect()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a CategorySet {
    type Item = &'a CategoryRule;
    type IntoIter = std::slice::Iter<'a, CategoryRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_deduplicates_triggers() {
        let rule = CategoryRule::new("Скорость", ["быстро", "сразу", "быстро"]);
        assert_eq!(rule.triggers, vec!["быстро", "сразу"]);
        assert!(rule.has_trigger("сразу"));
        assert!(!rule.has_trigger("медленно"));
    }

    #[test]
    fn test_output_columns_order() {
        let set = CategorySet::new(vec![
            CategoryRule::new("B", ["b"]),
            CategoryRule::new("A", ["a"]),
        ])
        .unwrap();

        assert_eq!(set.output_columns(), vec!["B", "A", DEFAULT_UNCATEGORIZED_COLUMN]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("A").unwrap().triggers, vec!["a"]);
    }

    #[test]
    fn test_empty_set_rejected() {
        let result = CategorySet::new(Vec::new());
        assert!(matches!(result, Err(RubrikaError::Configuration(_))));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = CategorySet::new(vec![
            CategoryRule::new("A", ["a"]),
            CategoryRule::new("A", ["b"]),
        ]);
        assert!(matches!(result, Err(RubrikaError::Configuration(_))));
    }

    #[test]
    fn test_uncategorized_clash_rejected() {
        let result = CategorySet::with_uncategorized_column(
            vec![CategoryRule::new("Other", ["x"])],
            "Other",
        );
        assert!(result.is_err());

        let result = CategorySet::new(vec![CategoryRule::new("  ", ["x"])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_builtin_set() {
        let set = CategorySet::builtin();
        assert_eq!(set.len(), 5);
        assert_eq!(set.uncategorized_column(), DEFAULT_UNCATEGORIZED_COLUMN);
        assert_eq!(set.rules()[0].name, "Нравится скорость отработки заявок");

        // The builtin set passes its own validation.
        let rebuilt = CategorySet::new(set.rules().to_vec()).unwrap();
        assert_eq!(rebuilt, set);
    }
}
