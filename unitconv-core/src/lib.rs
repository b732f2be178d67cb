//! Unitconv Core - Fundamental types
//!
//! This crate provides the core types shared by the registry, the
//! evaluator and the server:
//! - `UnitId`: Opaque unit label, compared character for character
//! - `ConversionKey`: Ordered (source, destination) pair
//! - `Category`: Measurement category used by the unit catalog
//! - `ConversionError`: Typed conversion failures
//! - `ErrorReport`: Structured, serializable form of a failure

mod unit;
mod error;

pub use unit::{UnitId, ConversionKey, Category};
pub use error::{ConversionError, ErrorReport, codes};
