//! Pipeline orchestration.
//!
//! The pipeline is:
//! 1. Load: glob patterns -> parsed schema documents
//! 2. Registry: every complex type and remote class across all schemas
//! 3. Normalize: schema documents -> schema IR
//! 4. Codegen: schema IR + registry -> Go AST units
//! 5. Write: units grouped per schema, printed and written
//!
//! Every file is rendered before the first one is written.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::ir::{codegen_schema, ensure_package_names_unique, normalize_schema};
use crate::loader::{LoadedSchema, load_all};
use crate::registry::TypeRegistry;
use crate::writer::{OutputFile, check_collisions, render_schema_files, write_files};

/// Summary of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Schema files loaded.
    pub schemas: usize,
    /// Remote classes declared across all schemas.
    pub classes: usize,
    /// Complex type declarations, overridden ones included.
    pub complex_types: usize,
    /// Event names listed by remote classes. Events generate no code.
    pub events: usize,
    /// Output paths in generation order.
    pub files: Vec<PathBuf>,
}

impl Report {
    fn new(schemas: &[LoadedSchema], files: &[OutputFile]) -> Self {
        let docs = schemas.iter().map(|s| &s.document);
        Self {
            schemas: schemas.len(),
            classes: docs.clone().map(|d| d.remote_classes.len()).sum(),
            complex_types: docs.clone().map(|d| d.complex_types.len()).sum(),
            events: docs
                .flat_map(|d| &d.remote_classes)
                .map(|c| c.events.len())
                .sum(),
            files: files.iter().map(|f| f.path.clone()).collect(),
        }
    }
}

/// Render every output file for an already loaded schema set.
pub fn compile_schemas(schemas: &[LoadedSchema], config: &GeneratorConfig) -> Result<Vec<OutputFile>> {
    let registry = TypeRegistry::build(schemas, config.codegen.allow_type_overrides)?;
    if !registry.contains(&config.codegen.root_class) {
        warn!(
            root = %config.codegen.root_class,
            "Root class is not declared by any schema"
        );
    }

    let normalized = schemas
        .iter()
        .map(normalize_schema)
        .collect::<Result<Vec<_>>>()?;

    let units = normalized
        .iter()
        .map(|schema| codegen_schema(schema, &registry, &config.codegen))
        .collect::<Result<Vec<_>>>()?;
    ensure_package_names_unique(&units)?;

    let mut files = Vec::new();
    for (schema, units) in normalized.iter().zip(&units) {
        files.extend(render_schema_files(&schema.source, units, config));
    }
    check_collisions(&files)?;
    debug!(files = files.len(), "Rendered all outputs");
    Ok(files)
}

/// Validate the configuration, load the schemas and render all files.
pub fn compile(config: &GeneratorConfig) -> Result<(Report, Vec<OutputFile>)> {
    config.validate()?;
    let schemas = load_all(&config.input_root, &config.schema_globs)?;
    let files = compile_schemas(&schemas, config)?;
    Ok((Report::new(&schemas, &files), files))
}

/// Run the whole pipeline without writing anything.
pub fn check(config: &GeneratorConfig) -> Result<Report> {
    let (report, _) = compile(config)?;
    Ok(report)
}

/// Run the whole pipeline and write the generated files.
pub fn generate(config: &GeneratorConfig) -> Result<Report> {
    let (report, files) = compile(config)?;
    write_files(&files)?;
    info!(
        schemas = report.schemas,
        files = report.files.len(),
        output = %config.output_dir.display(),
        "Generated bindings"
    );
    Ok(report)
}
