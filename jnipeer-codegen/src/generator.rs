//! Run driver tying generation and writing together.

use crate::config::GeneratorConfig;
use crate::cpp::{PeerGenerator, PeerSource};
use crate::error::CodegenError;
use crate::writer::{ArtifactWriter, WriteOutcome};
use jnipeer_model::{ClassModel, validate_model};
use std::collections::HashMap;
use std::path::PathBuf;

/// One artifact handled during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    /// Qualified name of the class the artifact was generated for.
    pub class_name: String,
    /// Path of the artifact.
    pub path: PathBuf,
    /// What the writer did.
    pub outcome: WriteOutcome,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Artifacts in generation order (declaration before definition).
    pub artifacts: Vec<ArtifactRecord>,
}

impl GenerationReport {
    /// Returns the number of classes peers were generated for.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.artifacts.len() / 2
    }

    /// Returns the number of artifacts written to disk.
    #[must_use]
    pub fn written(&self) -> usize {
        self.artifacts.iter().filter(|a| a.outcome.was_written()).count()
    }

    /// Returns the number of artifacts left untouched.
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.artifacts.len() - self.written()
    }
}

/// Peer generator for a whole model.
pub struct Generator<'a> {
    model: &'a ClassModel,
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(model: &'a ClassModel, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Generates the sources of every tagged class in model order, without
    /// touching the file system.
    ///
    /// # Errors
    /// Returns `CodegenError` if the model is invalid, a class cannot be
    /// generated, or two classes produce the same artifact name.
    pub fn render(&self) -> Result<Vec<PeerSource>, CodegenError> {
        validate_model(self.model)?;

        let peers = PeerGenerator::new(self.model, self.config);
        let mut base_names: HashMap<String, String> = HashMap::new();
        let mut sources = Vec::new();

        for class in self.model.tagged_classes() {
            tracing::debug!(class = %class.qualified_name, "generating peer");
            let source = peers.generate(class)?;

            if let Some(first) = base_names.get(&source.base_name) {
                return Err(CodegenError::SymbolCollision {
                    scope: self.config.output_dir().display().to_string(),
                    symbol: source.base_name,
                    first: first.clone(),
                    second: class.qualified_name.clone(),
                });
            }
            base_names.insert(source.base_name.clone(), class.qualified_name.clone());
            sources.push(source);
        }
        Ok(sources)
    }

    /// Generates every tagged class and writes `<base>.h` and `<base>.cpp`
    /// into the output directory.
    ///
    /// All sources are rendered before the first artifact is written.
    ///
    /// # Errors
    /// Returns `CodegenError` if rendering fails or an artifact cannot be
    /// written.
    pub fn generate(&self) -> Result<GenerationReport, CodegenError> {
        let sources = self.render()?;
        let writer = ArtifactWriter::new(self.config.is_forced(), self.config.is_verbose());
        let mut report = GenerationReport::default();

        for source in &sources {
            let artifacts = [
                (format!("{}.h", source.base_name), &source.header),
                (format!("{}.cpp", source.base_name), &source.source),
            ];
            for (file_name, content) in artifacts {
                let path = self.config.output_dir().join(file_name);
                let outcome = writer.write(&path, content)?;
                report.artifacts.push(ArtifactRecord {
                    class_name: source.class_name.clone(),
                    path,
                    outcome,
                });
            }
        }

        tracing::info!(
            classes = report.class_count(),
            written = report.written(),
            unchanged = report.unchanged(),
            "generation finished"
        );
        Ok(report)
    }
}
