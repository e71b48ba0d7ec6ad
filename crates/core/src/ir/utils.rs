//! Identifier helpers for Go code generation.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Go keywords; never valid as identifiers.
pub static GO_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "chan",
        "const",
        "continue",
        "default",
        "defer",
        "else",
        "fallthrough",
        "for",
        "func",
        "go",
        "goto",
        "if",
        "import",
        "interface",
        "map",
        "package",
        "range",
        "return",
        "select",
        "struct",
        "switch",
        "type",
        "var",
    ]
    .into_iter()
    .collect()
});

/// Names a parameter must not shadow: predeclared identifiers used by the
/// generated method bodies plus the locals and packages those bodies declare.
pub static GO_RESERVED_LOCALS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // predeclared
        "bool",
        "string",
        "int",
        "int64",
        "float64",
        "error",
        "nil",
        "true",
        "false",
        "len",
        "make",
        "new",
        "append",
        // generated locals and imports
        "elem",
        "req",
        "params",
        "response",
        "value",
        "ret",
        "result",
        "fmt",
        "reflect",
    ]
    .into_iter()
    .collect()
});

pub fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !GO_KEYWORDS.contains(name)
}

/// Replace characters that cannot appear in an identifier with `_`.
/// Prepends `_` if the result would start with a digit.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Exported Go name for a field or method: `videoInfo` -> `VideoInfo`.
pub fn exported_name(name: &str) -> String {
    let sanitized = sanitize_identifier(name);
    if sanitized.starts_with('_') {
        // `_x` is never exported; `X_x` is.
        format!("X{sanitized}")
    } else {
        capitalize_first(&sanitized)
    }
}

/// Local parameter name. Keywords and reserved locals get a `_` prefix.
pub fn param_name(name: &str) -> String {
    let sanitized = sanitize_identifier(name);
    if GO_KEYWORDS.contains(sanitized.as_str()) || GO_RESERVED_LOCALS.contains(sanitized.as_str())
    {
        format!("_{sanitized}")
    } else {
        sanitized
    }
}

/// Enum constant name: `Color` + `dark-red` -> `COLOR_DARK_RED`.
pub fn enum_constant_name(type_name: &str, value: &str) -> String {
    let value = value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>();
    format!("{}_{}", type_name.to_uppercase(), value.to_uppercase())
}

/// Escape a string for a Go interpreted string literal.
pub fn escape_go_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
