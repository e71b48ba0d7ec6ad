//! Options shared by every subcommand.

use std::path::{Path, PathBuf};

use clap::Args;
use kmdgen_core::config::DEFAULT_CONFIG_FILE;
use kmdgen_core::{GeneratorConfig, KmdError, Result};
use tracing::debug;

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Configuration file. Defaults to ./kmdgen.toml when present"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long = "schema",
        value_name = "GLOB",
        help = "Schema glob relative to the input root; repeatable, replaces the configured list"
    )]
    pub schemas: Vec<String>,
    #[arg(long, value_name = "DIR", help = "Directory the schema globs are resolved against")]
    pub input_root: Option<PathBuf>,
    #[arg(long, value_name = "DIR", help = "Directory the Go files are written to")]
    pub output_dir: Option<PathBuf>,
    #[arg(long = "package", value_name = "NAME", help = "Go package name of the generated files")]
    pub package: Option<String>,
}

impl ConfigArgs {
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let cwd = std::env::current_dir().map_err(|e| {
            KmdError::Config(format!("cannot determine the working directory: {e}"))
        })?;
        self.resolve_in(&cwd)
    }

    /// `--config`, else `<cwd>/kmdgen.toml` if present, else defaults; flags
    /// override whatever the file says.
    fn resolve_in(&self, cwd: &Path) -> Result<GeneratorConfig> {
        let default_file = cwd.join(DEFAULT_CONFIG_FILE);
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None if default_file.is_file() => GeneratorConfig::load(&default_file)?,
            None => GeneratorConfig::default(),
        };

        if !self.schemas.is_empty() {
            config.schema_globs.clone_from(&self.schemas);
        }
        if let Some(root) = &self.input_root {
            config.input_root.clone_from(root);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(package) = &self.package {
            config.package_name.clone_from(package);
        }

        debug!(
            input_root = %config.input_root.display(),
            output_dir = %config.output_dir.display(),
            globs = config.schema_globs.len(),
            "Resolved configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_flags_only_without_config_file() {
        let cwd = TempDir::new().unwrap();
        let args = ConfigArgs {
            schemas: vec!["*.kmd.json".into()],
            ..ConfigArgs::default()
        };
        let config = args.resolve_in(cwd.path()).unwrap();
        assert_eq!(config.schema_globs, vec!["*.kmd.json"]);
        assert_eq!(config.package_name, "kurento");
        assert_eq!(config.output_dir, PathBuf::from("kurento"));
    }

    #[test]
    fn test_default_config_file_is_picked_up() {
        let cwd = TempDir::new().unwrap();
        fs::write(
            cwd.path().join(DEFAULT_CONFIG_FILE),
            "schemaGlobs = [\"core.kmd.json\"]\npackageName = \"media\"\n",
        )
        .unwrap();
        let config = ConfigArgs::default().resolve_in(cwd.path()).unwrap();
        assert_eq!(config.schema_globs, vec!["core.kmd.json"]);
        assert_eq!(config.package_name, "media");
        assert_eq!(config.output_dir, cwd.path().join("kurento"));
    }

    #[test]
    fn test_flags_override_file() {
        let cwd = TempDir::new().unwrap();
        let file = cwd.path().join("custom.toml");
        fs::write(
            &file,
            "schemaGlobs = [\"core.kmd.json\"]\noutputDir = \"gen\"\n",
        )
        .unwrap();
        let args = ConfigArgs {
            config: Some(file),
            schemas: vec!["a.kmd.json".into(), "b.kmd.json".into()],
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..ConfigArgs::default()
        };
        let config = args.resolve_in(cwd.path()).unwrap();
        assert_eq!(config.schema_globs, vec!["a.kmd.json", "b.kmd.json"]);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.input_root, cwd.path().join("."));
    }

    #[test]
    fn test_invalid_config_file() {
        let cwd = TempDir::new().unwrap();
        fs::write(cwd.path().join(DEFAULT_CONFIG_FILE), "schemaGlobz = []\n").unwrap();
        let err = ConfigArgs::default().resolve_in(cwd.path()).unwrap_err();
        assert!(matches!(err, KmdError::Config(_)));
    }
}
