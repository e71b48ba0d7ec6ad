//! Normalized schema IR.
//!
//! Every type expression has been parsed into a [`TypeRef`], defaults are
//! synthesized and docs are split into clean lines. Nothing here knows about
//! Go: whether a name is a value or a remote reference is decided later
//! against the registry.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Text,
    Int,
    Int64,
    Float,
    Boolean,
}

/// Canonical form of a schema type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(Primitive),
    /// Reference to a complex type or remote class, resolved during codegen.
    Named(String),
    /// `T[]`
    Collection(Box<TypeRef>),
    /// `T<>`, or a parameter flagged `"optional": true`
    Optional(Box<TypeRef>),
}

impl TypeRef {
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeRef::Optional(_))
    }

    /// The type with any outer optional marker removed.
    pub fn required(&self) -> &TypeRef {
        match self {
            TypeRef::Optional(inner) => inner.required(),
            other => other,
        }
    }

    pub fn optional(self) -> TypeRef {
        if self.is_optional() {
            self
        } else {
            TypeRef::Optional(Box::new(self))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// A property, parameter or constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIR {
    /// Name as written in the schema; also the wire key.
    pub name: String,
    pub ty: TypeRef,
    /// `None` for references and collections without a schema default.
    pub default: Option<DefaultValue>,
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnIR {
    pub ty: TypeRef,
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodIR {
    pub name: String,
    pub doc: Vec<String>,
    pub params: Vec<FieldIR>,
    pub ret: Option<ReturnIR>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassIR {
    pub name: String,
    pub doc: Vec<String>,
    pub extends: Option<String>,
    pub properties: Vec<FieldIR>,
    pub methods: Vec<MethodIR>,
    pub constructor: Vec<FieldIR>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComplexKind {
    Enum { values: Vec<String> },
    Struct {
        extends: Option<String>,
        fields: Vec<FieldIR>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexTypeIR {
    pub name: String,
    pub doc: Vec<String>,
    pub kind: ComplexKind,
}

/// One schema file, normalized. Declaration order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaIR {
    pub source: PathBuf,
    pub classes: Vec<ClassIR>,
    pub complex_types: Vec<ComplexTypeIR>,
}
