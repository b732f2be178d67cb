//! Conversion rules

use std::fmt;

/// Pure numeric transformation for one ordered unit pair.
///
/// Affine rules follow the factor/offset convention:
/// `Affine` computes `value * factor + offset` and `InverseAffine`
/// computes `(value - offset) / factor`. Keeping the division form
/// explicit means "cm -> in" is `value / 2.54` exactly, not
/// `value * (1 / 2.54)`.
#[derive(Clone, Copy)]
pub enum ConversionRule {
    Affine { factor: f64, offset: f64 },
    InverseAffine { factor: f64, offset: f64 },
    Function(fn(f64) -> f64),
}

impl ConversionRule {
    /// Proportional rule: `value * factor`
    pub const fn scale(factor: f64) -> Self {
        ConversionRule::Affine { factor, offset: 0.0 }
    }

    /// Proportional rule: `value / divisor`
    pub const fn divide(divisor: f64) -> Self {
        ConversionRule::InverseAffine { factor: divisor, offset: 0.0 }
    }

    pub const fn affine(factor: f64, offset: f64) -> Self {
        ConversionRule::Affine { factor, offset }
    }

    pub const fn inverse_affine(factor: f64, offset: f64) -> Self {
        ConversionRule::InverseAffine { factor, offset }
    }

    pub const fn function(f: fn(f64) -> f64) -> Self {
        ConversionRule::Function(f)
    }

    /// Apply the rule to a value
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            ConversionRule::Affine { factor, offset } => value * factor + offset,
            ConversionRule::InverseAffine { factor, offset } => (value - offset) / factor,
            ConversionRule::Function(f) => f(value),
        }
    }

    /// The rule for the opposite direction, when it can be stated.
    ///
    /// The registry never calls this on its own; both directions of a pair
    /// must be registered explicitly.
    pub fn inverse(&self) -> Option<ConversionRule> {
        match *self {
            ConversionRule::Affine { factor, offset } if factor != 0.0 => {
                Some(ConversionRule::InverseAffine { factor, offset })
            }
            ConversionRule::InverseAffine { factor, offset } if factor != 0.0 => {
                Some(ConversionRule::Affine { factor, offset })
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConversionRule::Affine { factor, offset } => f
                .debug_struct("Affine")
                .field("factor", &factor)
                .field("offset", &offset)
                .finish(),
            ConversionRule::InverseAffine { factor, offset } => f
                .debug_struct("InverseAffine")
                .field("factor", &factor)
                .field("offset", &offset)
                .finish(),
            ConversionRule::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl fmt::Display for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConversionRule::Affine { factor, offset } if offset == 0.0 => write!(f, "x * {}", factor),
            ConversionRule::Affine { factor, offset } => write!(f, "x * {} + {}", factor, offset),
            ConversionRule::InverseAffine { factor, offset } if offset == 0.0 => write!(f, "x / {}", factor),
            ConversionRule::InverseAffine { factor, offset } => write!(f, "(x - {}) / {}", offset, factor),
            ConversionRule::Function(_) => f.write_str("f(x)"),
        }
    }
}
