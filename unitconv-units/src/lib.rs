//! Unitconv Units - Conversion registry and evaluator
//!
//! The registry maps an ordered (source, destination) pair of unit labels
//! to a conversion rule. The evaluator parses raw text, looks up the rule
//! and formats the result.
//!
//! Built-in pairs (both directions registered):
//! - Length: Inches (in) / Centimeters (cm)
//! - Mass: Pounds (lb) / Kilograms (kg)
//! - Temperature: Celsius (°C) / Fahrenheit (°F)

mod rule;
mod registry;
mod units;
mod convert;

pub use rule::ConversionRule;
pub use registry::ConversionRegistry;
pub use units::{build_registry, labels, CatalogEntry, UnitCatalog};
pub use convert::{convert, convert_value, format_value, parse_input};

pub use unitconv_core::{ConversionError, ConversionKey, UnitId};
