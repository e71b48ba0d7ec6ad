//! Generator configuration, read from `kmdgen.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{KmdError, Result};
use crate::ir::utils::is_go_identifier;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "kmdgen.toml";

/// Top-level generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory the schema globs are resolved against.
    #[serde(default = "default_input_root")]
    pub input_root: PathBuf,
    /// Schema file patterns, expanded in order.
    #[serde(default)]
    pub schema_globs: Vec<String>,
    /// Directory the generated files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Go package clause of every generated file.
    #[serde(default = "default_package_name")]
    pub package_name: String,
    /// Code shape options, the `[codegen]` table.
    #[serde(default)]
    pub codegen: CodegenOptions,
}

/// Knobs that change the shape of the generated Go code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct CodegenOptions {
    /// The model root: gets no capability interface and holds the connection handle.
    pub root_class: String,
    /// Stripped from schema file names to form output stems.
    pub schema_suffix: String,
    /// Appended to the stem of the file holding a schema's complex types.
    pub complex_types_suffix: String,
    /// Rendering of optional types.
    pub optional_style: OptionalStyle,
    /// Failure result of non-primitive returns.
    pub return_policy: ReturnPolicy,
    /// Let a later complex-type declaration replace an earlier one with the same name.
    pub allow_type_overrides: bool,
}

/// How `T<>` / `"optional": true` is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionalStyle {
    /// Same Go type as the inner type.
    #[default]
    Bare,
    /// `*T` for primitives, enums and value structs.
    Pointer,
}

/// What a method with a non-primitive return yields when the transport fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnPolicy {
    /// `nil, err`; value structs are returned through a pointer.
    #[default]
    Absent,
    /// A zero-valued placeholder paired with the transport error.
    ZeroValue,
}

fn default_input_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("kurento")
}

fn default_package_name() -> String {
    "kurento".to_string()
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            root_class: "MediaObject".to_string(),
            schema_suffix: ".kmd.json".to_string(),
            complex_types_suffix: "complex_types".to_string(),
            optional_style: OptionalStyle::default(),
            return_policy: ReturnPolicy::default(),
            allow_type_overrides: false,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_root: default_input_root(),
            schema_globs: Vec::new(),
            output_dir: default_output_dir(),
            package_name: default_package_name(),
            codegen: CodegenOptions::default(),
        }
    }
}

impl GeneratorConfig {
    /// Read a configuration file. Relative `inputRoot` and `outputDir` are
    /// resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KmdError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config: Self = toml::from_str(&contents)
            .map_err(|e| KmdError::Config(format!("{}: {e}", path.display())))?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if config.input_root.is_relative() {
                config.input_root = dir.join(&config.input_root);
            }
            if config.output_dir.is_relative() {
                config.output_dir = dir.join(&config.output_dir);
            }
        }

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Reject settings that would produce an invalid Go package.
    pub fn validate(&self) -> Result<()> {
        if self.schema_globs.is_empty() {
            return Err(KmdError::Config(
                "at least one schema glob is required".to_string(),
            ));
        }
        if let Some(blank) = self.schema_globs.iter().find(|g| g.trim().is_empty()) {
            return Err(KmdError::Config(format!("empty schema glob `{blank}`")));
        }
        if !is_go_identifier(&self.package_name) {
            return Err(KmdError::Config(format!(
                "package name `{}` is not a valid Go identifier",
                self.package_name
            )));
        }
        if !is_go_identifier(&self.codegen.root_class) {
            return Err(KmdError::Config(format!(
                "root class `{}` is not a valid identifier",
                self.codegen.root_class
            )));
        }
        if self.codegen.schema_suffix.is_empty() {
            return Err(KmdError::Config("schema suffix must not be empty".to_string()));
        }
        if self.codegen.complex_types_suffix.is_empty()
            || !self
                .codegen
                .complex_types_suffix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(KmdError::Config(format!(
                "complex types suffix `{}` must be alphanumeric",
                self.codegen.complex_types_suffix
            )));
        }
        Ok(())
    }
}
