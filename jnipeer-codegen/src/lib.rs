//! # jnipeer Codegen
//!
//! C++ native peer generation from managed class models.
//!
//! This crate provides:
//! - Managed to native type mapping and descriptor encoding
//! - Identifier mangling for native symbols
//! - Peer declaration and definition generation
//! - Constant `#define` formatting
//! - A change-detecting artifact writer

pub mod config;
pub mod cpp;
pub mod error;
pub mod generator;
pub mod writer;

pub use config::{GeneratorConfig, HostFamily};
pub use error::{CodegenError, EXIT_INTERNAL_BUG, EXIT_USER_ERROR};
pub use generator::{ArtifactRecord, GenerationReport, Generator};
pub use writer::{ArtifactWriter, WriteOutcome};

/// Renders peer sources from a model XML string.
///
/// # Arguments
/// * `xml` - Model document content
/// * `config` - Generator configuration
///
/// # Returns
/// Generated sources, one per tagged class.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn render_from_xml(
    xml: &str,
    config: &GeneratorConfig,
) -> Result<Vec<cpp::PeerSource>, CodegenError> {
    let model = jnipeer_model::parse_model(xml)?;
    Generator::new(&model, config).render()
}

/// Generates peer artifacts from a model XML file into the configured
/// output directory.
///
/// # Arguments
/// * `path` - Path to the model document
/// * `config` - Generator configuration
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, generation, or writing fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: &GeneratorConfig,
) -> Result<GenerationReport, CodegenError> {
    let model = jnipeer_model::parse_model_file(path)?;
    Generator::new(&model, config).generate()
}
