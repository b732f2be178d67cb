//! Seed data - the unit catalog and the built-in conversion rules

use serde::Serialize;
use unitconv_core::{Category, ConversionKey, UnitId};
use crate::{ConversionRegistry, ConversionRule};

/// Display labels for the built-in units.
///
/// These are the exact strings the registry is keyed on.
pub mod labels {
    pub const INCHES: &str = "Inches (in)";
    pub const CENTIMETERS: &str = "Centimeters (cm)";
    pub const POUNDS: &str = "Pounds (lb)";
    pub const KILOGRAMS: &str = "Kilograms (kg)";
    pub const CELSIUS: &str = "Celsius (°C)";
    pub const FAHRENHEIT: &str = "Fahrenheit (°F)";
}

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Kilograms per pound
pub const KG_PER_POUND: f64 = 0.453592;

/// Fahrenheit degrees per Celsius degree
pub const FAHRENHEIT_PER_CELSIUS: f64 = 1.8;

/// Water freezing point in Fahrenheit
pub const FAHRENHEIT_FREEZING: f64 = 32.0;

/// Build the registry populated with the built-in rules
pub fn build_registry() -> ConversionRegistry {
    let mut registry = ConversionRegistry::new();
    register_length_rules(&mut registry);
    register_mass_rules(&mut registry);
    register_temperature_rules(&mut registry);
    tracing::debug!(rules = registry.len(), "built conversion registry");
    registry
}

fn register(registry: &mut ConversionRegistry, source: &str, destination: &str, rule: ConversionRule) {
    registry.register(ConversionKey::new(source, destination), rule);
}

fn register_length_rules(registry: &mut ConversionRegistry) {
    register(registry, labels::INCHES, labels::CENTIMETERS, ConversionRule::scale(CM_PER_INCH));
    register(registry, labels::CENTIMETERS, labels::INCHES, ConversionRule::divide(CM_PER_INCH));
}

fn register_mass_rules(registry: &mut ConversionRegistry) {
    register(registry, labels::POUNDS, labels::KILOGRAMS, ConversionRule::scale(KG_PER_POUND));
    register(registry, labels::KILOGRAMS, labels::POUNDS, ConversionRule::divide(KG_PER_POUND));
}

fn register_temperature_rules(registry: &mut ConversionRegistry) {
    register(
        registry,
        labels::CELSIUS,
        labels::FAHRENHEIT,
        ConversionRule::affine(FAHRENHEIT_PER_CELSIUS, FAHRENHEIT_FREEZING),
    );
    register(
        registry,
        labels::FAHRENHEIT,
        labels::CELSIUS,
        ConversionRule::inverse_affine(FAHRENHEIT_PER_CELSIUS, FAHRENHEIT_FREEZING),
    );
}

/// One selectable unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub label: UnitId,
    pub category: Category,
}

/// Ordered list of the units a front end offers for selection
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    entries: Vec<CatalogEntry>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Catalog of the built-in units, in display order
    pub fn standard() -> Self {
        UnitCatalog::new()
            .with_unit(labels::INCHES, Category::Length)
            .with_unit(labels::CENTIMETERS, Category::Length)
            .with_unit(labels::POUNDS, Category::Mass)
            .with_unit(labels::KILOGRAMS, Category::Mass)
            .with_unit(labels::CELSIUS, Category::Temperature)
            .with_unit(labels::FAHRENHEIT, Category::Temperature)
    }

    /// Add a unit. A label already present keeps its first position and
    /// takes the new category.
    pub fn with_unit(mut self, label: impl Into<UnitId>, category: Category) -> Self {
        let label = label.into();
        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => entry.category = category,
            None => self.entries.push(CatalogEntry { label, category }),
        }
        self
    }

    pub fn units(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Get all units in a category
    pub fn by_category(&self, category: Category) -> Vec<&UnitId> {
        self.entries.iter()
            .filter(|e| e.category == category)
            .map(|e| &e.label)
            .collect()
    }

    pub fn category_of(&self, label: &str) -> Option<Category> {
        self.entries.iter()
            .find(|e| e.label.as_str() == label)
            .map(|e| e.category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
