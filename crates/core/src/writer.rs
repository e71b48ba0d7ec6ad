//! Output writer: groups rendered units per schema into Go files.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::{KmdError, Result};
use crate::ir::types::GoFile;
use crate::ir::{Emit, RenderedUnit, SchemaUnits};

/// A fully rendered output file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Destination under the output directory.
    pub path: PathBuf,
    /// Schema the file was generated from.
    pub source: PathBuf,
    /// Complete Go source text.
    pub contents: String,
}

/// Output file stem for a schema: suffix stripped, dots to underscores,
/// lower-cased. `elements.PlayerEndpoint.kmd.json` -> `elements_playerendpoint`.
pub fn output_stem(schema: &Path, suffix: &str) -> String {
    let name = schema
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = name.strip_suffix(suffix).unwrap_or(&name);
    base.replace('.', "_").to_lowercase()
}

fn assemble(units: &[RenderedUnit], package: &str, header: &str) -> String {
    let imports: BTreeSet<&String> = units.iter().flat_map(|u| &u.imports).collect();
    let file = GoFile {
        header: vec![header.to_string()],
        package: package.to_string(),
        imports: imports.into_iter().cloned().collect(),
        decls: units.iter().flat_map(|u| u.decls.iter().cloned()).collect(),
    };
    file.emit()
}

/// Render the files of one schema: `<stem>.go` always, plus
/// `<stem>_<suffix>.go` when the schema declares complex types.
pub fn render_schema_files(
    source: &Path,
    units: &SchemaUnits,
    config: &GeneratorConfig,
) -> Vec<OutputFile> {
    let stem = output_stem(source, &config.codegen.schema_suffix);
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    let header = format!("Code generated by kmdgen from {file_name}. DO NOT EDIT.");

    let mut files = vec![OutputFile {
        path: config.output_dir.join(format!("{stem}.go")),
        source: source.to_path_buf(),
        contents: assemble(&units.classes, &config.package_name, &header),
    }];

    if !units.complex_types.is_empty() {
        files.push(OutputFile {
            path: config
                .output_dir
                .join(format!("{stem}_{}.go", config.codegen.complex_types_suffix)),
            source: source.to_path_buf(),
            contents: assemble(&units.complex_types, &config.package_name, &header),
        });
    }

    for file in &files {
        debug!(path = %file.path.display(), source = %source.display(), "Rendered output");
    }
    files
}

/// Two schemas must never render to the same file.
pub fn check_collisions(files: &[OutputFile]) -> Result<()> {
    let mut seen: HashMap<&Path, &Path> = HashMap::new();
    for file in files {
        if let Some(previous) = seen.insert(&file.path, &file.source) {
            return Err(KmdError::Config(format!(
                "{} and {} both map to output file {}",
                previous.display(),
                file.source.display(),
                file.path.display()
            )));
        }
    }
    Ok(())
}

/// Write every file, creating the output directory on demand.
pub fn write_files(files: &[OutputFile]) -> Result<()> {
    for file in files {
        if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| KmdError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&file.path, &file.contents).map_err(|source| KmdError::Write {
            path: file.path.clone(),
            source,
        })?;
        info!(path = %file.path.display(), "Wrote");
    }
    Ok(())
}
