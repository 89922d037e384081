//! Prelude module for convenient imports.
//!
//! ```ignore
//! use jnipeer::prelude::*;
//! ```

// Model types
pub use jnipeer_model::{
    ClassModel, ConstantValue, Field, ManagedClass, Method, ModelError, NamespacePath, Parameter,
    ParseError, PrimitiveKind, TypeDescriptor, parse_model, parse_model_file, validate_model,
};

// Generation types
pub use jnipeer_codegen::cpp::{MangleContext, NativeTypeCategory, PeerGenerator, PeerSource};
pub use jnipeer_codegen::{
    ArtifactWriter, CodegenError, GenerationReport, Generator, GeneratorConfig, HostFamily,
    WriteOutcome,
};
