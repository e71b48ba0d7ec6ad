//! Normalization from parsed schema documents to the schema IR.
//!
//! This module handles the IDL-specific logic:
//! - Type expression parsing (`String`, `int`, `Foo[]`, `Foo<>`, ...)
//! - Default value synthesis
//! - Documentation markup cleanup

use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::error::{KmdError, Result};
use crate::idl::{ComplexType, Method, Property, RemoteClass};
use crate::loader::LoadedSchema;

use super::model::{
    ClassIR, ComplexKind, ComplexTypeIR, DefaultValue, FieldIR, MethodIR, Primitive, ReturnIR,
    SchemaIR, TypeRef,
};

/// Interpreted-text roles stripped from documentation.
const DOC_MARKUP: [&str; 5] = [":rom:cls:", ":rom:meth:", ":rom:attr:", ":rom:evt:", ":term:"];

/// Doc lines are wrapped to this width before being printed as `//` comments.
pub const DOC_LINE_WIDTH: usize = 79;

/// Parse a raw type expression into its canonical form.
pub fn parse_type_expr(raw: &str) -> Result<TypeRef, String> {
    let expr = raw.trim();
    if expr.is_empty() {
        return Err("empty type expression".to_string());
    }

    if let Some(inner) = expr.strip_suffix("[]") {
        return Ok(TypeRef::Collection(Box::new(parse_type_expr(inner)?)));
    }
    if let Some(inner) = expr.strip_suffix("<>") {
        return Ok(TypeRef::Optional(Box::new(parse_type_expr(inner)?)));
    }

    let primitive = match expr {
        "String" | "string" => Some(Primitive::Text),
        "float" | "double" => Some(Primitive::Float),
        "boolean" => Some(Primitive::Boolean),
        "int" => Some(Primitive::Int),
        "int64" => Some(Primitive::Int64),
        _ => None,
    };
    if let Some(p) = primitive {
        return Ok(TypeRef::Primitive(p));
    }

    let mut chars = expr.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(TypeRef::Named(expr.to_string()))
    } else {
        Err(format!("invalid type expression `{raw}`"))
    }
}

/// Zero value for primitives; references and collections get none.
pub fn zero_value(ty: &TypeRef) -> Option<DefaultValue> {
    match ty.required() {
        TypeRef::Primitive(Primitive::Text) => Some(DefaultValue::Text(String::new())),
        TypeRef::Primitive(Primitive::Int | Primitive::Int64) => Some(DefaultValue::Int(0)),
        TypeRef::Primitive(Primitive::Float) => Some(DefaultValue::Float(0.0)),
        TypeRef::Primitive(Primitive::Boolean) => Some(DefaultValue::Bool(false)),
        TypeRef::Named(_) | TypeRef::Collection(_) | TypeRef::Optional(_) => None,
    }
}

/// Convert a schema-supplied default, falling back to the zero value when it
/// does not fit the declared type.
fn schema_default(value: &Value, ty: &TypeRef, context: &str) -> Option<DefaultValue> {
    let converted = match (ty.required(), value) {
        (_, Value::Null) => return zero_value(ty),
        (TypeRef::Primitive(Primitive::Text) | TypeRef::Named(_), Value::String(s)) => {
            Some(DefaultValue::Text(s.clone()))
        }
        (TypeRef::Primitive(Primitive::Boolean), Value::Bool(b)) => Some(DefaultValue::Bool(*b)),
        (TypeRef::Primitive(Primitive::Int | Primitive::Int64), Value::Number(n)) => {
            n.as_i64().map(DefaultValue::Int)
        }
        (TypeRef::Primitive(Primitive::Float), Value::Number(n)) => {
            n.as_f64().map(DefaultValue::Float)
        }
        _ => None,
    };

    if converted.is_none() {
        warn!(context = %context, default = %value, "Ignoring default value that does not fit its type");
        return zero_value(ty);
    }
    converted
}

/// Clean documentation markup and split it into comment lines.
pub fn format_doc(raw: &str) -> Vec<String> {
    let mut doc = raw.to_string();
    for token in DOC_MARKUP {
        doc = doc.replace(token, "");
    }
    let doc = doc.replace("``", "\"").replace("/*", "").replace("*/", "");

    let mut lines = Vec::new();
    for line in doc.lines() {
        // Width is counted in characters, not bytes.
        let mut current = String::new();
        let mut width = 0;
        for word in line.split_whitespace() {
            let word_width = word.chars().count();
            if width > 0 && width + 1 + word_width > DOC_LINE_WIDTH {
                lines.push(std::mem::take(&mut current));
                width = 0;
            }
            if width > 0 {
                current.push(' ');
                width += 1;
            }
            current.push_str(word);
            width += word_width;
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn normalize_field(prop: &Property, context: &str, path: &Path) -> Result<FieldIR> {
    let mut ty = parse_type_expr(&prop.type_expr)
        .map_err(|message| KmdError::parse(path, format!("{context}: {message}")))?;
    if prop.optional {
        ty = ty.optional();
    }
    let default = match &prop.default_value {
        Some(value) => schema_default(value, &ty, context),
        None => zero_value(&ty),
    };
    Ok(FieldIR {
        name: prop.name.clone(),
        ty,
        default,
        doc: format_doc(&prop.doc),
    })
}

fn normalize_method(class: &str, method: &Method, path: &Path) -> Result<MethodIR> {
    let params = method
        .params
        .iter()
        .map(|p| normalize_field(p, &format!("{class}.{}({})", method.name, p.name), path))
        .collect::<Result<Vec<_>>>()?;

    let ret = match &method.ret {
        Some(ret) if !ret.type_expr.trim().is_empty() => {
            let ty = parse_type_expr(&ret.type_expr).map_err(|message| {
                KmdError::parse(path, format!("{class}.{} return: {message}", method.name))
            })?;
            Some(ReturnIR {
                ty,
                doc: format_doc(&ret.doc),
            })
        }
        _ => None,
    };

    Ok(MethodIR {
        name: method.name.clone(),
        doc: format_doc(&method.doc),
        params,
        ret,
    })
}

fn normalize_class(class: &RemoteClass, path: &Path) -> Result<ClassIR> {
    let name = &class.name;
    let properties = class
        .properties
        .iter()
        .map(|p| normalize_field(p, &format!("{name}.{}", p.name), path))
        .collect::<Result<Vec<_>>>()?;
    let methods = class
        .methods
        .iter()
        .map(|m| normalize_method(name, m, path))
        .collect::<Result<Vec<_>>>()?;
    let constructor = class
        .constructor_params()
        .iter()
        .map(|p| normalize_field(p, &format!("{name}(constructor {})", p.name), path))
        .collect::<Result<Vec<_>>>()?;

    Ok(ClassIR {
        name: name.clone(),
        doc: format_doc(&class.doc),
        extends: class.base().map(str::to_string),
        properties,
        methods,
        constructor,
    })
}

fn normalize_complex(ty: &ComplexType, path: &Path) -> Result<ComplexTypeIR> {
    let kind = if ty.is_enum() {
        ComplexKind::Enum {
            values: ty.values.clone(),
        }
    } else {
        let fields = ty
            .properties
            .iter()
            .map(|p| normalize_field(p, &format!("{}.{}", ty.name, p.name), path))
            .collect::<Result<Vec<_>>>()?;
        ComplexKind::Struct {
            extends: ty.base().map(str::to_string),
            fields,
        }
    };

    Ok(ComplexTypeIR {
        name: ty.name.clone(),
        doc: format_doc(&ty.doc),
        kind,
    })
}

/// Normalize one loaded schema into IR, preserving declaration order.
pub fn normalize_schema(schema: &LoadedSchema) -> Result<SchemaIR> {
    let path = schema.path.as_path();
    let complex_types = schema
        .document
        .complex_types
        .iter()
        .map(|ty| normalize_complex(ty, path))
        .collect::<Result<Vec<_>>>()?;
    let classes = schema
        .document
        .remote_classes
        .iter()
        .map(|class| normalize_class(class, path))
        .collect::<Result<Vec<_>>>()?;

    Ok(SchemaIR {
        source: schema.path.clone(),
        classes,
        complex_types,
    })
}
