//! jnipeer command-line interface.
//!
//! Generates `<Name>ManagedPeer.h` / `.cpp` pairs for every tagged class of
//! the given model documents.

use clap::Parser;
use jnipeer_codegen::{CodegenError, GenerationReport, Generator, GeneratorConfig};
use jnipeer_model::{ModelError, NamespacePath, parse_model_file};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jnipeer")]
#[command(about = "Generate C++ native peers for managed classes")]
#[command(version)]
struct Cli {
    /// Output directory for generated files
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    directory: PathBuf,

    /// Precompiled header included first in every definition file
    #[arg(long, value_name = "HEADER")]
    pch: Option<String>,

    /// Namespace for every peer, overriding the class tags (e.g. `JNI.Peers`)
    #[arg(long, value_name = "NAMESPACE")]
    namespace: Option<String>,

    /// Always write files, even when unchanged
    #[arg(long)]
    force: bool,

    /// Report what happened to every file
    #[arg(short, long)]
    verbose: bool,

    /// Emit #define blocks for static final constants
    #[arg(long)]
    constants: bool,

    /// Give overloaded methods distinct native names
    #[arg(long)]
    disambiguate_overloads: bool,

    /// Model documents to generate from
    #[arg(required = true, value_name = "MODEL")]
    models: Vec<PathBuf>,
}

impl Cli {
    fn config(&self) -> Result<GeneratorConfig, CodegenError> {
        let namespace = match &self.namespace {
            Some(text) => Some(
                NamespacePath::parse(text)
                    .filter(NamespacePath::is_valid_identifier_path)
                    .ok_or_else(|| ModelError::InvalidNamespace {
                        class: "--namespace".to_string(),
                        namespace: text.clone(),
                    })?,
            ),
            None => None,
        };

        Ok(GeneratorConfig::new(&self.directory)
            .force(self.force)
            .verbose(self.verbose)
            .namespace_override(namespace)
            .precompiled_header(self.pch.clone())
            .disambiguate_overloads(self.disambiguate_overloads)
            .emit_constants(self.constants))
    }
}

fn run(cli: &Cli) -> Result<Vec<(PathBuf, GenerationReport)>, CodegenError> {
    let config = cli.config()?;
    std::fs::create_dir_all(config.output_dir())
        .map_err(|e| CodegenError::io(config.output_dir(), e))?;

    let mut reports = Vec::with_capacity(cli.models.len());
    for path in &cli.models {
        tracing::info!(model = %path.display(), "reading model");
        let model = parse_model_file(path)?;
        let report = Generator::new(&model, &config).generate()?;
        reports.push((path.clone(), report));
    }
    Ok(reports)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(reports) => {
            for (path, report) in &reports {
                println!(
                    "{}: {} peer(s), {} file(s) written, {} unchanged",
                    path.display(),
                    report.class_count(),
                    report.written(),
                    report.unchanged()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("jnipeer: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jnipeer_codegen::EXIT_USER_ERROR;
    use std::ffi::OsStr;

    const MODEL: &str = r#"<model>
    <class name="com.jnitest.Car" tagged="true" namespace="JNI.Test">
        <method name="getCost" returns="double" tagged="true"/>
    </class>
</model>"#;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "jnipeer",
            "-d",
            "out",
            "--pch",
            "stdafx.h",
            "--namespace",
            "Peers.Gen",
            "--force",
            "-v",
            "--constants",
            "--disambiguate-overloads",
            "car.xml",
        ])
        .expect("Failed to parse arguments");

        let config = cli.config().expect("Failed to build config");
        assert_eq!(config.output_dir(), std::path::Path::new("out"));
        assert_eq!(config.pch(), Some("stdafx.h"));
        assert_eq!(config.namespace().map(NamespacePath::dotted).as_deref(), Some("Peers.Gen"));
        assert!(config.is_forced());
        assert!(config.is_verbose());
        assert!(config.emits_constants());
        assert!(config.disambiguates_overloads());
    }

    #[test]
    fn test_cli_requires_model() {
        assert!(Cli::try_parse_from(["jnipeer", "-d", "out"]).is_err());
    }

    #[test]
    fn test_invalid_namespace_is_user_error() {
        let cli = Cli::try_parse_from(["jnipeer", "-d", "out", "--namespace", "1Bad", "m.xml"])
            .expect("Failed to parse arguments");
        let err = cli.config().unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USER_ERROR);
    }

    #[test]
    fn test_run_creates_output_directory() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let model_path = dir.path().join("car.xml");
        std::fs::write(&model_path, MODEL).expect("Failed to write model");
        let out = dir.path().join("generated").join("peers");

        let cli = Cli::try_parse_from([
            OsStr::new("jnipeer"),
            OsStr::new("-d"),
            out.as_os_str(),
            model_path.as_os_str(),
        ])
        .expect("Failed to parse arguments");

        let reports = run(&cli).expect("Failed to run");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].1.written(), 2);
        assert!(out.join("CarManagedPeer.h").exists());
        assert!(out.join("CarManagedPeer.cpp").exists());
    }
}
