//! # jnipeer
//!
//! Generator of C++ native peer classes for managed (JVM) classes.
//!
//! A native peer wraps a handle to a managed object and forwards calls to the
//! object's tagged methods through JNI. Method and class lookups are cached
//! once per process.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jnipeer::prelude::*;
//! use std::path::Path;
//!
//! let model = parse_model_file(Path::new("car.xml"))?;
//! let config = GeneratorConfig::new("generated").emit_constants(true);
//! let report = Generator::new(&model, &config).generate()?;
//! println!("{} artifacts written", report.written());
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Managed class model, XML model reader and validation
//! - [`codegen`] - Type mapping, mangling, peer emission and artifact writing

pub mod prelude;

/// Managed class model.
pub mod model {
    pub use jnipeer_model::*;
}

/// Native peer code generation.
pub mod codegen {
    pub use jnipeer_codegen::*;
}

// Re-export commonly used items at the crate root
pub use jnipeer_codegen::{CodegenError, GenerationReport, Generator, GeneratorConfig, HostFamily};
pub use jnipeer_model::{ClassModel, parse_model, parse_model_file};
