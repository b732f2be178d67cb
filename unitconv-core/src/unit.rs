//! Unit identifiers and conversion keys

use std::fmt;
use serde::{Deserialize, Serialize};

/// Opaque label naming a unit, e.g. "Centimeters (cm)".
///
/// Equality is exact string equality. No trimming or case folding is
/// applied, so the labels handed in by a caller must match the labels
/// used when the registry was populated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(label: impl Into<String>) -> Self {
        UnitId(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(s: &str) -> Self {
        UnitId(s.to_string())
    }
}

impl From<String> for UnitId {
    fn from(s: String) -> Self {
        UnitId(s)
    }
}

/// Ordered (source, destination) pair identifying one direction of conversion.
///
/// `(A, B)` and `(B, A)` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversionKey {
    pub source: UnitId,
    pub destination: UnitId,
}

impl ConversionKey {
    pub fn new(source: impl Into<UnitId>, destination: impl Into<UnitId>) -> Self {
        ConversionKey {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// The same pair in the opposite direction
    pub fn reversed(&self) -> Self {
        ConversionKey {
            source: self.destination.clone(),
            destination: self.source.clone(),
        }
    }

    pub fn is_same_unit(&self) -> bool {
        self.source == self.destination
    }
}

impl fmt::Display for ConversionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// Measurement category, used for organizing the unit catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Mass,
    Temperature,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Mass => "mass",
            Category::Temperature => "temperature",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
