//! Conversion registry

use std::collections::HashMap;
use tracing::trace;
use unitconv_core::{ConversionKey, UnitId};
use crate::ConversionRule;

/// Mapping from ordered unit pairs to conversion rules.
///
/// Built once, then shared read-only. There is no implicit identity rule
/// and no automatic inverse: every direction of every pair is its own
/// entry. The registry does not look at unit categories, so correctness of
/// category confinement depends on what gets registered.
#[derive(Debug, Clone, Default)]
pub struct ConversionRegistry {
    rules: HashMap<ConversionKey, ConversionRule>,
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_rule(
        mut self,
        source: impl Into<UnitId>,
        destination: impl Into<UnitId>,
        rule: ConversionRule,
    ) -> Self {
        self.register(ConversionKey::new(source, destination), rule);
        self
    }

    /// Insert or overwrite the rule for `key`. Last write wins; the
    /// replaced rule, if any, is returned.
    pub fn register(&mut self, key: ConversionKey, rule: ConversionRule) -> Option<ConversionRule> {
        trace!(%key, %rule, "registering conversion rule");
        self.rules.insert(key, rule)
    }

    pub fn lookup(&self, key: &ConversionKey) -> Option<&ConversionRule> {
        self.rules.get(key)
    }

    /// Look up a rule by borrowed labels
    pub fn get(&self, source: &str, destination: &str) -> Option<&ConversionRule> {
        self.lookup(&ConversionKey::new(source, destination))
    }

    pub fn contains(&self, key: &ConversionKey) -> bool {
        self.rules.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All registered keys, sorted
    pub fn keys(&self) -> Vec<&ConversionKey> {
        let mut keys: Vec<&ConversionKey> = self.rules.keys().collect();
        keys.sort();
        keys
    }

    /// Every destination reachable from `source`, sorted
    pub fn destinations_for(&self, source: &str) -> Vec<&UnitId> {
        let mut destinations: Vec<&UnitId> = self.rules.keys()
            .filter(|k| k.source.as_str() == source)
            .map(|k| &k.destination)
            .collect();
        destinations.sort();
        destinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inch_to_cm() -> ConversionRegistry {
        ConversionRegistry::new().with_rule("in", "cm", ConversionRule::scale(2.54))
    }

    #[test]
    fn test_lookup_registered() {
        let registry = inch_to_cm();
        let rule = registry.get("in", "cm").unwrap();
        assert_eq!(rule.apply(1.0), 2.54);
    }

    #[test]
    fn test_lookup_is_order_sensitive() {
        let registry = inch_to_cm();

        assert!(registry.get("in", "cm").is_some());
        assert!(registry.get("cm", "in").is_none());
    }

    #[test]
    fn test_no_implicit_identity() {
        let registry = inch_to_cm();
        assert!(registry.get("in", "in").is_none());
        assert!(registry.get("cm", "cm").is_none());
    }

    #[test]
    fn test_exact_label_match() {
        let registry = inch_to_cm();
        assert!(registry.get("IN", "cm").is_none());
        assert!(registry.get("in ", "cm").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = inch_to_cm();
        let previous = registry.register(ConversionKey::new("in", "cm"), ConversionRule::scale(3.0));

        assert_eq!(previous.unwrap().apply(1.0), 2.54);
        assert_eq!(registry.get("in", "cm").unwrap().apply(1.0), 3.0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_category_agnostic() {
        // Nothing stops a length -> temperature entry
        let registry = ConversionRegistry::new()
            .with_rule("in", "°F", ConversionRule::affine(1.0, 0.0));
        assert!(registry.get("in", "°F").is_some());
    }

    #[test]
    fn test_keys_and_destinations() {
        let registry = inch_to_cm()
            .with_rule("in", "mm", ConversionRule::scale(25.4))
            .with_rule("cm", "in", ConversionRule::divide(2.54));

        let keys: Vec<String> = registry.keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["cm -> in", "in -> cm", "in -> mm"]);

        let destinations: Vec<&str> = registry.destinations_for("in").iter().map(|u| u.as_str()).collect();
        assert_eq!(destinations, vec!["cm", "mm"]);
        assert!(registry.destinations_for("mm").is_empty());
    }

    #[test]
    fn test_empty() {
        let registry = ConversionRegistry::default();
        assert!(registry.is_empty());
        assert!(!registry.contains(&ConversionKey::new("in", "cm")));
    }
}
