//! # jnipeer Model
//!
//! Metadata model of managed (JVM) classes consumed by the peer generator.
//!
//! This crate provides:
//! - Type descriptors and compile-time constant values
//! - Class, field and method definitions
//! - A class registry with parent resolution and subtype queries
//! - Root-first flattening of inherited fields
//! - An XML model reader and model validation

pub mod class;
pub mod error;
pub mod flatten;
pub mod model;
pub mod parser;
pub mod types;
pub mod validation;

pub use class::{Field, ManagedClass, Method, NamespacePath, Parameter};
pub use error::{ModelError, ParseError};
pub use flatten::flatten_fields;
pub use model::ClassModel;
pub use parser::{parse_model, parse_model_file};
pub use types::{ArrayType, ConstantValue, PrimitiveKind, TypeDescriptor};
pub use validation::validate_model;
