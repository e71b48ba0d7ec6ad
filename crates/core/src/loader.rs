//! Schema loading: glob expansion and JSON parsing.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{KmdError, Result};
use crate::idl::KmdDocument;

/// A parsed schema together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    /// Path the schema was read from.
    pub path: PathBuf,
    /// Parsed contents.
    pub document: KmdDocument,
}

/// Expand `patterns` relative to `root` into concrete schema paths.
///
/// Matches are sorted per pattern and a path matched by several patterns is
/// kept at its first position. Pattern order is preserved across patterns.
pub fn resolve_globs(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for pattern in patterns {
        let full = root.join(pattern);
        let entries = glob::glob(&full.to_string_lossy())
            .map_err(|e| KmdError::Config(format!("invalid schema glob `{pattern}`: {e}")))?;

        let mut matched = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| KmdError::SchemaRead {
                path: e.path().to_path_buf(),
                source: e.into(),
            })?;
            if path.is_file() {
                matched.push(path);
            }
        }
        matched.sort();

        if matched.is_empty() {
            warn!(pattern = %pattern, "Schema pattern matched no files");
        } else {
            debug!(pattern = %pattern, count = matched.len(), "Expanded schema pattern");
        }

        for path in matched {
            if seen.insert(path.clone()) {
                paths.push(path);
            }
        }
    }

    if paths.is_empty() {
        return Err(KmdError::Config(format!(
            "no schema files matched {} under {}",
            patterns.join(", "),
            root.display()
        )));
    }
    Ok(paths)
}

/// Parse one schema document.
///
/// Literal newlines are flattened to spaces first: the format tolerates
/// multi-line `doc` strings that strict JSON rejects.
pub fn parse_document(path: &Path, contents: &str) -> Result<KmdDocument> {
    let flattened = contents.replace("\r\n", " ").replace(['\n', '\r'], " ");
    serde_json::from_str(&flattened).map_err(|e| KmdError::parse(path, e.to_string()))
}

/// Read and parse a single schema file.
pub fn load_schema(path: &Path) -> Result<LoadedSchema> {
    let contents = std::fs::read_to_string(path).map_err(|source| KmdError::SchemaRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_document(path, &contents)?;
    debug!(
        path = %path.display(),
        classes = document.remote_classes.len(),
        complex_types = document.complex_types.len(),
        "Parsed schema"
    );
    Ok(LoadedSchema {
        path: path.to_path_buf(),
        document,
    })
}

/// Resolve every pattern and load the matched schemas in order.
pub fn load_all(root: &Path, patterns: &[String]) -> Result<Vec<LoadedSchema>> {
    resolve_globs(root, patterns)?
        .iter()
        .map(|path| load_schema(path))
        .collect()
}
