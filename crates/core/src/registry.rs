//! Symbol table over every type declared in the schema corpus.
//!
//! Built once, before any code is generated, so that each referenced name can
//! be classified as an enum, a plain value struct or a remote class no matter
//! which file declares it.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{KmdError, Result};
use crate::loader::LoadedSchema;

/// How a referenced type name is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// String-backed enum.
    Enum,
    /// Plain value struct, passed by value.
    Value,
    /// Remote object, referenced through its capability interface.
    RemoteClass,
}

/// One registered declaration.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    /// Rendering category.
    pub kind: TypeKind,
    /// Schema file that declared the type.
    pub origin: PathBuf,
    /// Position of the declaration in its file's `complexTypes` or
    /// `remoteClasses` list.
    pub index: usize,
    /// Declared base type, if any.
    pub extends: Option<String>,
}

/// Every complex type and remote class of the corpus, keyed by name.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: BTreeMap<String, TypeEntry>,
}

impl TypeRegistry {
    /// Register all complex types, then all remote classes, then check that
    /// every `extends` resolves and no chain loops.
    pub fn build(schemas: &[LoadedSchema], allow_overrides: bool) -> Result<Self> {
        let mut registry = Self::default();

        for schema in schemas {
            for (index, ty) in schema.document.complex_types.iter().enumerate() {
                let kind = if ty.is_enum() {
                    TypeKind::Enum
                } else {
                    TypeKind::Value
                };
                let entry = TypeEntry {
                    kind,
                    origin: schema.path.clone(),
                    index,
                    extends: ty.base().map(str::to_string),
                };
                registry.register_complex(&ty.name, entry, allow_overrides)?;
            }
        }

        for schema in schemas {
            for (index, class) in schema.document.remote_classes.iter().enumerate() {
                let entry = TypeEntry {
                    kind: TypeKind::RemoteClass,
                    origin: schema.path.clone(),
                    index,
                    extends: class.base().map(str::to_string),
                };
                registry.register_class(&class.name, entry)?;
            }
        }

        registry.validate_hierarchy()?;
        debug!(types = registry.entries.len(), "Built type registry");
        Ok(registry)
    }

    fn register_complex(&mut self, name: &str, entry: TypeEntry, allow_overrides: bool) -> Result<()> {
        if let Some(existing) = self.entries.get(name) {
            if !allow_overrides {
                return Err(duplicate(name, &existing.origin, &entry.origin));
            }
            warn!(
                name = %name,
                first = %existing.origin.display(),
                second = %entry.origin.display(),
                "Complex type redeclared, later declaration wins"
            );
        }
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    fn register_class(&mut self, name: &str, entry: TypeEntry) -> Result<()> {
        if let Some(existing) = self.entries.get(name) {
            return Err(duplicate(name, &existing.origin, &entry.origin));
        }
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    fn validate_hierarchy(&self) -> Result<()> {
        for (name, entry) in &self.entries {
            let Some(base) = &entry.extends else {
                continue;
            };
            let expected = match entry.kind {
                TypeKind::RemoteClass => TypeKind::RemoteClass,
                TypeKind::Value => TypeKind::Value,
                TypeKind::Enum => continue,
            };
            match self.entries.get(base) {
                Some(base_entry) if base_entry.kind == expected => {}
                _ => return Err(KmdError::unresolved(base, format!("{name} (extends)"))),
            }
        }

        for name in self.entries.keys() {
            let mut visited = HashSet::new();
            let mut current = name.as_str();
            while let Some(base) = self.entries.get(current).and_then(|e| e.extends.as_deref()) {
                if !visited.insert(current) {
                    return Err(KmdError::InheritanceCycle(name.clone()));
                }
                current = base;
            }
        }
        Ok(())
    }

    /// Entry registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&TypeEntry> {
        self.entries.get(name)
    }

    /// Look up a name referenced from `context`, failing if it is unknown.
    pub fn resolve(&self, name: &str, context: &str) -> Result<&TypeEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| KmdError::unresolved(name, context))
    }

    /// Whether any declaration uses `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

fn duplicate(name: &str, first: &Path, second: &Path) -> KmdError {
    KmdError::DuplicateType {
        name: name.to_string(),
        first: first.to_path_buf(),
        second: second.to_path_buf(),
    }
}
