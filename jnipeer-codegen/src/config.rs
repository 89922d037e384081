//! Generator configuration.
//!
//! A [`GeneratorConfig`] is built once per run and passed by reference to the
//! emitter and writer. It is never mutated after construction.

use jnipeer_model::NamespacePath;
use std::path::{Path, PathBuf};

/// Operating system family the generated sources are produced on.
///
/// Selects the 64-bit literal suffix and the line separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostFamily {
    /// Windows hosts (MSVC toolchain conventions).
    Windows,
    /// Every other host.
    Unix,
}

impl HostFamily {
    /// Detects the family of the running process.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::consts::OS == "windows" {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Returns the suffix for 64-bit integer literals.
    #[must_use]
    pub const fn long_suffix(&self) -> &'static str {
        match self {
            // MSVC accepts i64, not LL.
            Self::Windows => "i64",
            Self::Unix => "LL",
        }
    }

    /// Returns the line separator of generated files.
    #[must_use]
    pub const fn line_separator(&self) -> &'static str {
        match self {
            Self::Windows => "\r\n",
            Self::Unix => "\n",
        }
    }
}

/// Run-scoped generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    output_dir: PathBuf,
    force: bool,
    verbose: bool,
    namespace_override: Option<NamespacePath>,
    precompiled_header: Option<String>,
    host: HostFamily,
    disambiguate_overloads: bool,
    emit_constants: bool,
}

impl GeneratorConfig {
    /// Creates a configuration writing into `output_dir`, with the host
    /// family detected from the running process.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            force: false,
            verbose: false,
            namespace_override: None,
            precompiled_header: None,
            host: HostFamily::detect(),
            disambiguate_overloads: false,
            emit_constants: false,
        }
    }

    /// Always write artifacts, even when their content is unchanged.
    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Log one line per artifact describing what the writer did.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Generates every peer into this namespace instead of the class's own.
    #[must_use]
    pub fn namespace_override(mut self, namespace: Option<NamespacePath>) -> Self {
        self.namespace_override = namespace;
        self
    }

    /// Includes this precompiled header first in every definition file.
    #[must_use]
    pub fn precompiled_header(mut self, header: Option<String>) -> Self {
        self.precompiled_header = header;
        self
    }

    /// Sets the host family explicitly.
    #[must_use]
    pub fn host(mut self, host: HostFamily) -> Self {
        self.host = host;
        self
    }

    /// Appends a parameter signature suffix to overloaded method symbols.
    #[must_use]
    pub fn disambiguate_overloads(mut self, enabled: bool) -> Self {
        self.disambiguate_overloads = enabled;
        self
    }

    /// Emits `#define`s for static final constants into declaration files.
    #[must_use]
    pub fn emit_constants(mut self, enabled: bool) -> Self {
        self.emit_constants = enabled;
        self
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns true if artifacts are always written.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.force
    }

    /// Returns true if writer diagnostics are enabled.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Returns the namespace override, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&NamespacePath> {
        self.namespace_override.as_ref()
    }

    /// Returns the precompiled header path, if any.
    #[must_use]
    pub fn pch(&self) -> Option<&str> {
        self.precompiled_header.as_deref()
    }

    /// Returns the host family.
    #[must_use]
    pub const fn host_family(&self) -> HostFamily {
        self.host
    }

    /// Returns true if overloaded method symbols are disambiguated.
    #[must_use]
    pub const fn disambiguates_overloads(&self) -> bool {
        self.disambiguate_overloads
    }

    /// Returns true if constant `#define`s are emitted.
    #[must_use]
    pub const fn emits_constants(&self) -> bool {
        self.emit_constants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_family_tokens() {
        assert_eq!(HostFamily::Windows.long_suffix(), "i64");
        assert_eq!(HostFamily::Unix.long_suffix(), "LL");
        assert_eq!(HostFamily::Windows.line_separator(), "\r\n");
        assert_eq!(HostFamily::Unix.line_separator(), "\n");
    }

    #[test]
    fn test_host_family_detect_matches_target() {
        let expected = if cfg!(windows) {
            HostFamily::Windows
        } else {
            HostFamily::Unix
        };
        assert_eq!(HostFamily::detect(), expected);
    }

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::new("out");
        assert_eq!(config.output_dir(), Path::new("out"));
        assert!(!config.is_forced());
        assert!(!config.is_verbose());
        assert!(config.namespace().is_none());
        assert!(config.pch().is_none());
        assert!(!config.disambiguates_overloads());
        assert!(!config.emits_constants());
    }

    #[test]
    fn test_config_builder() {
        let config = GeneratorConfig::new("out")
            .force(true)
            .verbose(true)
            .namespace_override(NamespacePath::parse("Peers.Generated"))
            .precompiled_header(Some("stdafx.h".to_string()))
            .host(HostFamily::Windows)
            .disambiguate_overloads(true)
            .emit_constants(true);

        assert!(config.is_forced());
        assert!(config.is_verbose());
        assert_eq!(
            config.namespace().map(NamespacePath::dotted).as_deref(),
            Some("Peers.Generated")
        );
        assert_eq!(config.pch(), Some("stdafx.h"));
        assert_eq!(config.host_family(), HostFamily::Windows);
        assert!(config.disambiguates_overloads());
        assert!(config.emits_constants());
    }
}
