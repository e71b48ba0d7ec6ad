//! Go code emission via the Emit trait.
//!
//! Each AST type implements `Emit`; printing is purely mechanical. Output is
//! gofmt-shaped: tab indentation, one map entry per line, `//` doc comments.

use super::types::{
    BinOp, GoConst, GoDecl, GoExpr, GoField, GoFile, GoFunc, GoLiteral, GoMethodSig, GoParam,
    GoStmt, GoType, GoTypeDecl, GoTypeKind,
};
use super::utils::escape_go_string;

/// Trait for emitting Go code from AST nodes.
pub trait Emit {
    fn emit(&self) -> String;
}

fn indent_str(indent: usize) -> String {
    "\t".repeat(indent)
}

fn emit_doc(lines: &[String], indent: usize) -> String {
    let prefix = indent_str(indent);
    lines
        .iter()
        .map(|line| format!("{}// {}\n", prefix, line))
        .collect()
}

fn emit_results(results: &[GoType]) -> String {
    match results {
        [] => String::new(),
        [single] => format!(" {}", single.emit()),
        many => format!(
            " ({})",
            many.iter().map(|t| t.emit()).collect::<Vec<_>>().join(", ")
        ),
    }
}

fn emit_params(params: &[GoParam]) -> String {
    params.iter().map(|p| p.emit()).collect::<Vec<_>>().join(", ")
}

// =============================================================================
// Types and literals
// =============================================================================

impl Emit for GoType {
    fn emit(&self) -> String {
        match self {
            GoType::Ident(name) => name.clone(),
            GoType::Slice(inner) => format!("[]{}", inner.emit()),
            GoType::Pointer(inner) => format!("*{}", inner.emit()),
            GoType::Map(key, value) => format!("map[{}]{}", key.emit(), value.emit()),
        }
    }
}

impl Emit for GoLiteral {
    fn emit(&self) -> String {
        match self {
            GoLiteral::String(s) => format!("\"{}\"", escape_go_string(s)),
            GoLiteral::Int(i) => i.to_string(),
            // Keep a decimal point so the value stays float64 inside interface{}.
            GoLiteral::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
            GoLiteral::Float(f) => f.to_string(),
            GoLiteral::Bool(b) => b.to_string(),
            GoLiteral::Nil => "nil".to_string(),
        }
    }
}

impl Emit for BinOp {
    fn emit(&self) -> String {
        match self {
            BinOp::NotEqual => "!=".to_string(),
            BinOp::Greater => ">".to_string(),
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for GoExpr {
    fn emit(&self) -> String {
        self.emit_at(0)
    }
}

impl GoExpr {
    /// Emit at the given indentation level; only multi-line map literals use it.
    pub fn emit_at(&self, indent: usize) -> String {
        match self {
            GoExpr::Ident(name) => name.clone(),
            GoExpr::Literal(lit) => lit.emit(),
            GoExpr::Selector { expr, field } => format!("{}.{}", expr.emit_at(indent), field),
            GoExpr::Call { func, args } => {
                let args_str = args
                    .iter()
                    .map(|a| a.emit_at(indent))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({})", func.emit_at(indent), args_str)
            }
            GoExpr::Index { expr, index } => {
                format!("{}[{}]", expr.emit_at(indent), index.emit_at(indent))
            }
            GoExpr::MapLit { ty, entries } => {
                if entries.is_empty() {
                    return format!("{}{{}}", ty.emit());
                }
                let inner = indent_str(indent + 1);
                let mut output = format!("{}{{\n", ty.emit());
                for (key, value) in entries {
                    output.push_str(&format!(
                        "{}{}: {},\n",
                        inner,
                        key.emit_at(indent + 1),
                        value.emit_at(indent + 1)
                    ));
                }
                output.push_str(&format!("{}}}", indent_str(indent)));
                output
            }
            GoExpr::Composite(ty) => format!("{}{{}}", ty.emit()),
            GoExpr::BinOp { left, op, right } => format!(
                "{} {} {}",
                left.emit_at(indent),
                op.emit(),
                right.emit_at(indent)
            ),
            GoExpr::Not(expr) => format!("!{}", expr.emit_at(indent)),
            GoExpr::AddrOf(expr) => format!("&{}", expr.emit_at(indent)),
            GoExpr::TypeAssert { expr, ty } => format!("{}.({})", expr.emit_at(indent), ty.emit()),
            GoExpr::Receive(expr) => format!("<-{}", expr.emit_at(indent)),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for GoStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl GoStmt {
    /// Emit with specified indentation level (one tab per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = indent_str(indent);
        match self {
            GoStmt::Define { names, value } => {
                format!("{}{} := {}\n", prefix, names.join(", "), value.emit_at(indent))
            }
            GoStmt::Assign { target, value } => format!(
                "{}{} = {}\n",
                prefix,
                target.emit_at(indent),
                value.emit_at(indent)
            ),
            GoStmt::Return(values) if values.is_empty() => format!("{}return\n", prefix),
            GoStmt::Return(values) => {
                let values_str = values
                    .iter()
                    .map(|v| v.emit_at(indent))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}return {}\n", prefix, values_str)
            }
            GoStmt::If { cond, body } => {
                let mut output = format!("{}if {} {{\n", prefix, cond.emit_at(indent));
                for stmt in body {
                    output.push_str(&stmt.emit_indented(indent + 1));
                }
                output.push_str(&format!("{}}}\n", prefix));
                output
            }
            GoStmt::ForRange {
                key,
                value,
                expr,
                body,
            } => {
                let mut output = format!(
                    "{}for {}, {} := range {} {{\n",
                    prefix,
                    key,
                    value,
                    expr.emit_at(indent)
                );
                for stmt in body {
                    output.push_str(&stmt.emit_indented(indent + 1));
                }
                output.push_str(&format!("{}}}\n", prefix));
                output
            }
            GoStmt::Var { name, ty } => format!("{}var {} {}\n", prefix, name, ty.emit()),
            GoStmt::Comment(text) => format!("{}// {}\n", prefix, text),
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl Emit for GoParam {
    fn emit(&self) -> String {
        format!("{} {}", self.name, self.ty.emit())
    }
}

impl Emit for GoMethodSig {
    fn emit(&self) -> String {
        format!(
            "{}({}){}",
            self.name,
            emit_params(&self.params),
            emit_results(&self.results)
        )
    }
}

impl Emit for GoField {
    fn emit(&self) -> String {
        let mut output = emit_doc(&self.doc, 1);
        match &self.name {
            Some(name) => output.push_str(&format!("\t{} {}\n", name, self.ty.emit())),
            None => output.push_str(&format!("\t{}\n", self.ty.emit())),
        }
        output
    }
}

impl Emit for GoTypeDecl {
    fn emit(&self) -> String {
        let mut output = emit_doc(&self.doc, 0);
        match &self.kind {
            GoTypeKind::Struct(fields) if fields.is_empty() => {
                output.push_str(&format!("type {} struct{{}}\n", self.name));
            }
            GoTypeKind::Struct(fields) => {
                output.push_str(&format!("type {} struct {{\n", self.name));
                for (i, field) in fields.iter().enumerate() {
                    // Blank line before a documented field, as gofmt'd code reads.
                    if i > 0 && !field.doc.is_empty() {
                        output.push('\n');
                    }
                    output.push_str(&field.emit());
                }
                output.push_str("}\n");
            }
            GoTypeKind::Interface { embeds, methods } if embeds.is_empty() && methods.is_empty() => {
                output.push_str(&format!("type {} interface{{}}\n", self.name));
            }
            GoTypeKind::Interface { embeds, methods } => {
                output.push_str(&format!("type {} interface {{\n", self.name));
                for embed in embeds {
                    output.push_str(&format!("\t{}\n", embed));
                }
                for method in methods {
                    output.push_str(&format!("\t{}\n", method.emit()));
                }
                output.push_str("}\n");
            }
            GoTypeKind::Named(underlying) => {
                output.push_str(&format!("type {} {}\n", self.name, underlying.emit()));
            }
        }
        output
    }
}

impl Emit for GoConst {
    fn emit(&self) -> String {
        format!("{} {} = {}", self.name, self.ty, self.value.emit())
    }
}

impl Emit for GoFunc {
    fn emit(&self) -> String {
        let mut output = emit_doc(&self.doc, 0);
        output.push_str("func ");
        if let Some(receiver) = &self.receiver {
            output.push_str(&format!("({} {}) ", receiver.name, receiver.ty.emit()));
        }
        output.push_str(&format!(
            "{}({}){}",
            self.name,
            emit_params(&self.params),
            emit_results(&self.results)
        ));
        if self.body.is_empty() {
            output.push_str(" {}\n");
        } else {
            output.push_str(" {\n");
            for stmt in &self.body {
                output.push_str(&stmt.emit_indented(1));
            }
            output.push_str("}\n");
        }
        output
    }
}

impl Emit for GoDecl {
    fn emit(&self) -> String {
        match self {
            GoDecl::Type(decl) => decl.emit(),
            GoDecl::Func(func) => func.emit(),
            GoDecl::Consts(consts) if consts.is_empty() => String::new(),
            GoDecl::Consts(consts) => {
                let mut output = "const (\n".to_string();
                for c in consts {
                    output.push_str(&format!("\t{}\n", c.emit()));
                }
                output.push_str(")\n");
                output
            }
        }
    }
}

// =============================================================================
// File
// =============================================================================

impl Emit for GoFile {
    fn emit(&self) -> String {
        let mut output = emit_doc(&self.header, 0);
        if !self.header.is_empty() {
            output.push('\n');
        }

        output.push_str(&format!("package {}\n", self.package));

        match self.imports.as_slice() {
            [] => {}
            [single] => output.push_str(&format!("\nimport \"{}\"\n", escape_go_string(single))),
            many => {
                output.push_str("\nimport (\n");
                for import in many {
                    output.push_str(&format!("\t\"{}\"\n", escape_go_string(import)));
                }
                output.push_str(")\n");
            }
        }

        for decl in &self.decls {
            let text = decl.emit();
            if !text.is_empty() {
                output.push('\n');
                output.push_str(&text);
            }
        }

        output
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::types::GoReceiver;

    fn params_expr() -> GoExpr {
        GoExpr::ident("params")
    }

    #[test]
    fn test_emit_types() {
        assert_eq!(GoType::ident("string").emit(), "string");
        assert_eq!(GoType::slice(GoType::ident("IShape")).emit(), "[]IShape");
        assert_eq!(GoType::pointer(GoType::ident("Point")).emit(), "*Point");
        assert_eq!(GoType::params_map().emit(), "map[string]interface{}");
    }

    #[test]
    fn test_emit_literals() {
        assert_eq!(GoLiteral::String("say \"hi\"".into()).emit(), "\"say \\\"hi\\\"\"");
        assert_eq!(GoLiteral::Int(2000).emit(), "2000");
        assert_eq!(GoLiteral::Float(0.0).emit(), "0.0");
        assert_eq!(GoLiteral::Float(1.5).emit(), "1.5");
        assert_eq!(GoLiteral::Bool(false).emit(), "false");
        assert_eq!(GoLiteral::Nil.emit(), "nil");
    }

    #[test]
    fn test_emit_map_literal_multiline() {
        let stmt = GoStmt::Assign {
            target: GoExpr::ident("req").index(GoExpr::string("params")),
            value: GoExpr::MapLit {
                ty: GoType::params_map(),
                entries: vec![
                    (GoExpr::string("operation"), GoExpr::string("move")),
                    (
                        GoExpr::string("object"),
                        GoExpr::ident("elem").select("Id"),
                    ),
                ],
            },
        };
        let expected = "\treq[\"params\"] = map[string]interface{}{\n\t\t\"operation\": \"move\",\n\t\t\"object\": elem.Id,\n\t}\n";
        assert_eq!(stmt.emit(), expected);
    }

    #[test]
    fn test_emit_empty_map_literal() {
        let expr = GoExpr::MapLit {
            ty: GoType::params_map(),
            entries: vec![],
        };
        assert_eq!(expr.emit(), "map[string]interface{}{}");
    }

    #[test]
    fn test_emit_if_and_range() {
        let stmt = GoStmt::If {
            cond: GoExpr::ident("to").bin(BinOp::NotEqual, GoExpr::string("")),
            body: vec![GoStmt::Assign {
                target: params_expr().index(GoExpr::string("to")),
                value: GoExpr::ident("to"),
            }],
        };
        assert_eq!(
            stmt.emit(),
            "\tif to != \"\" {\n\t\tparams[\"to\"] = to\n\t}\n"
        );

        let stmt = GoStmt::ForRange {
            key: "key".into(),
            value: "value".into(),
            expr: GoExpr::ident("options"),
            body: vec![],
        };
        assert_eq!(stmt.emit(), "\tfor key, value := range options {\n\t}\n");
    }

    #[test]
    fn test_emit_returns() {
        assert_eq!(GoStmt::Return(vec![]).emit(), "\treturn\n");
        let stmt = GoStmt::Return(vec![
            GoExpr::Literal(GoLiteral::Nil),
            GoExpr::ident("response").select("Error"),
        ]);
        assert_eq!(stmt.emit(), "\treturn nil, response.Error\n");
    }

    #[test]
    fn test_emit_type_assert_and_receive() {
        let expr = GoExpr::ident("response")
            .select("Result")
            .index(GoExpr::string("value"));
        let expr = GoExpr::TypeAssert {
            expr: Box::new(expr),
            ty: GoType::ident("string"),
        };
        assert_eq!(expr.emit(), "response.Result[\"value\"].(string)");

        let expr = GoExpr::Receive(Box::new(
            GoExpr::ident("elem")
                .select("connection")
                .select("Request")
                .call(vec![GoExpr::ident("req")]),
        ));
        assert_eq!(expr.emit(), "<-elem.connection.Request(req)");
    }

    #[test]
    fn test_emit_struct_and_interface() {
        let decl = GoTypeDecl {
            doc: vec!["A point.".into()],
            name: "Point".into(),
            kind: GoTypeKind::Struct(vec![
                GoField {
                    name: Some("X".into()),
                    ty: GoType::ident("int"),
                    doc: vec![],
                },
                GoField {
                    name: Some("Y".into()),
                    ty: GoType::ident("int"),
                    doc: vec!["Vertical.".into()],
                },
            ]),
        };
        assert_eq!(
            decl.emit(),
            "// A point.\ntype Point struct {\n\tX int\n\n\t// Vertical.\n\tY int\n}\n"
        );

        let decl = GoTypeDecl {
            doc: vec![],
            name: "IShape".into(),
            kind: GoTypeKind::Interface {
                embeds: vec!["IBase".into()],
                methods: vec![GoMethodSig {
                    name: "Move".into(),
                    params: vec![GoParam {
                        name: "to".into(),
                        ty: GoType::ident("Point"),
                    }],
                    results: vec![GoType::error()],
                }],
            },
        };
        assert_eq!(
            decl.emit(),
            "type IShape interface {\n\tIBase\n\tMove(to Point) error\n}\n"
        );

        let empty = GoTypeDecl {
            doc: vec![],
            name: "IRoot".into(),
            kind: GoTypeKind::Interface {
                embeds: vec![],
                methods: vec![],
            },
        };
        assert_eq!(empty.emit(), "type IRoot interface{}\n");
    }

    #[test]
    fn test_emit_results() {
        assert_eq!(emit_results(&[]), "");
        assert_eq!(emit_results(&[GoType::error()]), " error");
        assert_eq!(
            emit_results(&[GoType::ident("string"), GoType::error()]),
            " (string, error)"
        );
    }

    #[test]
    fn test_emit_file_envelope() {
        let file = GoFile {
            header: vec!["Code generated by kmdgen from core.kmd.json. DO NOT EDIT.".into()],
            package: "kurento".into(),
            imports: vec!["fmt".into(), "reflect".into()],
            decls: vec![
                GoDecl::Type(GoTypeDecl {
                    doc: vec![],
                    name: "Color".into(),
                    kind: GoTypeKind::Named(GoType::ident("string")),
                }),
                GoDecl::Consts(vec![GoConst {
                    name: "COLOR_RED".into(),
                    ty: "Color".into(),
                    value: GoLiteral::String("RED".into()),
                }]),
                GoDecl::Consts(vec![]),
            ],
        };
        let expected = "// Code generated by kmdgen from core.kmd.json. DO NOT EDIT.\n\npackage kurento\n\nimport (\n\t\"fmt\"\n\t\"reflect\"\n)\n\ntype Color string\n\nconst (\n\tCOLOR_RED Color = \"RED\"\n)\n";
        assert_eq!(file.emit(), expected);
    }

    #[test]
    fn test_emit_single_import_and_func() {
        let file = GoFile {
            header: vec![],
            package: "kurento".into(),
            imports: vec!["fmt".into()],
            decls: vec![GoDecl::Func(GoFunc {
                doc: vec![],
                receiver: Some(GoReceiver {
                    name: "t".into(),
                    ty: GoType::ident("Color"),
                }),
                name: "String".into(),
                params: vec![],
                results: vec![GoType::ident("string")],
                body: vec![GoStmt::Return(vec![
                    GoExpr::ident("string").call(vec![GoExpr::ident("t")]),
                ])],
            })],
        };
        assert_eq!(
            file.emit(),
            "package kurento\n\nimport \"fmt\"\n\nfunc (t Color) String() string {\n\treturn string(t)\n}\n"
        );
    }
}
