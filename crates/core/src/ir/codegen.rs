//! Code generation from schema IR to Go AST.
//!
//! This is the second pass: every referenced name is resolved against the
//! complete registry, which decides between a plain value (`Point`) and a
//! capability reference (`IShape`). The generated AST is then printed via the
//! `Emit` trait.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, info};

use crate::config::{CodegenOptions, OptionalStyle, ReturnPolicy};
use crate::error::{KmdError, Result};
use crate::registry::{TypeKind, TypeRegistry};

use super::model::{
    ClassIR, ComplexKind, ComplexTypeIR, DefaultValue, FieldIR, MethodIR, Primitive, SchemaIR,
    TypeRef,
};
use super::types::{
    BinOp, GoConst, GoDecl, GoExpr, GoField, GoFunc, GoLiteral, GoMethodSig, GoParam, GoReceiver,
    GoStmt, GoType, GoTypeDecl, GoTypeKind,
};
use super::utils::{enum_constant_name, exported_name, param_name};

/// Declarations rendered for one complex type or remote class.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedUnit {
    /// Schema name of the type or class.
    pub name: String,
    /// Top-level declarations, in output order.
    pub decls: Vec<GoDecl>,
    /// Packages the declarations use.
    pub imports: BTreeSet<String>,
}

/// Rendered units of one schema, split by destination file.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaUnits {
    /// Units of `<stem>.go`.
    pub classes: Vec<RenderedUnit>,
    /// Units of `<stem>_<suffix>.go`.
    pub complex_types: Vec<RenderedUnit>,
}

/// A type reference after registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolved {
    Primitive(Primitive),
    Enum(String),
    Value(String),
    Remote(String),
    Collection(Box<Resolved>),
    Optional(Box<Resolved>),
}

impl Resolved {
    fn required(&self) -> &Resolved {
        match self {
            Resolved::Optional(inner) => inner.required(),
            other => other,
        }
    }

    /// Slices and interfaces already have a native absent value.
    fn is_nillable(&self) -> bool {
        matches!(self.required(), Resolved::Remote(_) | Resolved::Collection(_))
    }
}

struct ResolvedParam<'m> {
    go_name: String,
    field: &'m FieldIR,
    resolved: Resolved,
}

struct ResolvedMethod<'m> {
    ir: &'m MethodIR,
    go_name: String,
    params: Vec<ResolvedParam<'m>>,
    ret: Option<Resolved>,
}

/// Generate Go units for every complex type and remote class of a schema.
pub fn codegen_schema(
    schema: &SchemaIR,
    registry: &TypeRegistry,
    options: &CodegenOptions,
) -> Result<SchemaUnits> {
    let generator = Codegen::new(registry, options);
    let complex_types = schema
        .complex_types
        .iter()
        .enumerate()
        .filter(|(index, ty)| {
            // An overridden declaration is emitted only where the winner sits.
            let owned = registry
                .get(&ty.name)
                .is_none_or(|entry| entry.origin == schema.source && entry.index == *index);
            if !owned {
                debug!(name = %ty.name, source = %schema.source.display(), "Skipping overridden type");
            }
            owned
        })
        .map(|(_, ty)| generator.complex_type_unit(ty))
        .collect::<Result<Vec<_>>>()?;
    let classes = schema
        .classes
        .iter()
        .map(|class| generator.class_unit(class))
        .collect::<Result<Vec<_>>>()?;
    Ok(SchemaUnits {
        classes,
        complex_types,
    })
}

/// Code builder bound to a complete registry.
#[derive(Debug)]
pub struct Codegen<'a> {
    registry: &'a TypeRegistry,
    options: &'a CodegenOptions,
}

impl<'a> Codegen<'a> {
    /// Bind a generator to `registry` and the codegen options.
    pub fn new(registry: &'a TypeRegistry, options: &'a CodegenOptions) -> Self {
        Self { registry, options }
    }

    // =========================================================================
    // Type resolution
    // =========================================================================

    fn resolve(&self, ty: &TypeRef, context: &str) -> Result<Resolved> {
        Ok(match ty {
            TypeRef::Primitive(p) => Resolved::Primitive(*p),
            TypeRef::Named(name) => match self.registry.resolve(name, context)?.kind {
                TypeKind::Enum => Resolved::Enum(name.clone()),
                TypeKind::Value => Resolved::Value(name.clone()),
                TypeKind::RemoteClass => Resolved::Remote(name.clone()),
            },
            TypeRef::Collection(inner) => {
                Resolved::Collection(Box::new(self.resolve(inner, context)?))
            }
            TypeRef::Optional(inner) => Resolved::Optional(Box::new(self.resolve(inner, context)?)),
        })
    }

    fn go_type(&self, resolved: &Resolved) -> GoType {
        match resolved {
            Resolved::Primitive(p) => primitive_type(*p),
            Resolved::Enum(name) | Resolved::Value(name) => GoType::ident(name),
            Resolved::Remote(name) => GoType::ident(capability_name(name)),
            Resolved::Collection(inner) => GoType::slice(self.go_type(inner)),
            Resolved::Optional(inner) => {
                let inner_ty = self.go_type(inner);
                if self.is_pointer_optional(resolved) && !matches!(inner_ty, GoType::Pointer(_)) {
                    GoType::pointer(inner_ty)
                } else {
                    inner_ty
                }
            }
        }
    }

    fn is_pointer_optional(&self, resolved: &Resolved) -> bool {
        self.options.optional_style == OptionalStyle::Pointer
            && matches!(resolved, Resolved::Optional(inner) if !inner.is_nillable())
    }

    /// Declared return type; value structs go through a pointer when an
    /// absent result must be expressible.
    fn return_type(&self, resolved: &Resolved) -> GoType {
        let ty = self.go_type(resolved);
        match (resolved.required(), self.options.return_policy, &ty) {
            (Resolved::Value(_), ReturnPolicy::Absent, GoType::Ident(_)) => GoType::pointer(ty),
            _ => ty,
        }
    }

    fn resolve_method<'m>(&self, class: &str, method: &'m MethodIR) -> Result<ResolvedMethod<'m>> {
        let params = method
            .params
            .iter()
            .map(|field| -> Result<ResolvedParam<'m>> {
                let context = format!("{class}.{}({})", method.name, field.name);
                Ok(ResolvedParam {
                    go_name: param_name(&field.name),
                    field,
                    resolved: self.resolve(&field.ty, &context)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        ensure_unique(
            &format!("{class}.{}", method.name),
            "parameter",
            params.iter().map(|p| p.go_name.clone()),
        )?;

        let ret = method
            .ret
            .as_ref()
            .map(|ret| self.resolve(&ret.ty, &format!("{class}.{} return", method.name)))
            .transpose()?;

        Ok(ResolvedMethod {
            ir: method,
            go_name: exported_name(&method.name),
            params,
            ret,
        })
    }

    // =========================================================================
    // Complex types
    // =========================================================================

    pub fn complex_type_unit(&self, ty: &ComplexTypeIR) -> Result<RenderedUnit> {
        debug!(name = %ty.name, "Rendering complex type");
        let decls = match &ty.kind {
            ComplexKind::Enum { values } => enum_decls(ty, values)?,
            ComplexKind::Struct { extends, fields } => {
                let mut go_fields = Vec::new();
                if let Some(base) = extends {
                    go_fields.push(GoField {
                        name: None,
                        ty: GoType::ident(base),
                        doc: Vec::new(),
                    });
                }
                for field in fields {
                    let resolved = self.resolve(&field.ty, &format!("{}.{}", ty.name, field.name))?;
                    go_fields.push(GoField {
                        name: Some(exported_name(&field.name)),
                        ty: self.go_type(&resolved),
                        doc: field.doc.clone(),
                    });
                }
                // An embedded struct is addressed by its type name.
                ensure_unique(
                    &ty.name,
                    "field",
                    extends
                        .iter()
                        .cloned()
                        .chain(go_fields.iter().filter_map(|f| f.name.clone())),
                )?;
                vec![GoDecl::Type(GoTypeDecl {
                    doc: ty.doc.clone(),
                    name: ty.name.clone(),
                    kind: GoTypeKind::Struct(go_fields),
                })]
            }
        };
        Ok(RenderedUnit {
            name: ty.name.clone(),
            decls,
            imports: BTreeSet::new(),
        })
    }

    // =========================================================================
    // Remote classes
    // =========================================================================

    pub fn class_unit(&self, class: &ClassIR) -> Result<RenderedUnit> {
        info!("Generating {}", class.name);
        let mut imports = BTreeSet::new();
        let is_root = class.name == self.options.root_class;

        let methods = class
            .methods
            .iter()
            .map(|m| self.resolve_method(&class.name, m))
            .collect::<Result<Vec<_>>>()?;

        let mut fields = Vec::new();
        match &class.extends {
            Some(base) => fields.push(GoField {
                name: None,
                ty: GoType::ident(base),
                doc: Vec::new(),
            }),
            None => fields.push(GoField {
                name: Some("connection".to_string()),
                ty: GoType::pointer(GoType::ident("Connection")),
                doc: Vec::new(),
            }),
        }
        for prop in &class.properties {
            let resolved = self.resolve(&prop.ty, &format!("{}.{}", class.name, prop.name))?;
            fields.push(GoField {
                name: Some(exported_name(&prop.name)),
                ty: self.go_type(&resolved),
                doc: prop.doc.clone(),
            });
        }

        ensure_unique(
            &class.name,
            "member",
            class
                .extends
                .iter()
                .cloned()
                .chain(class.properties.iter().map(|p| exported_name(&p.name)))
                .chain(methods.iter().map(|m| m.go_name.clone())),
        )?;

        let mut decls = Vec::new();
        if !is_root {
            decls.push(GoDecl::Type(self.capability_interface(class, &methods)));
        }
        decls.push(GoDecl::Type(GoTypeDecl {
            doc: class.doc.clone(),
            name: class.name.clone(),
            kind: GoTypeKind::Struct(fields),
        }));
        decls.push(GoDecl::Func(self.constructor_params_func(class, &mut imports)?));
        for method in &methods {
            decls.push(GoDecl::Func(self.method_stub(&class.name, method, &mut imports)));
        }

        Ok(RenderedUnit {
            name: class.name.clone(),
            decls,
            imports,
        })
    }

    fn capability_interface(&self, class: &ClassIR, methods: &[ResolvedMethod<'_>]) -> GoTypeDecl {
        let embeds = class
            .extends
            .iter()
            .filter(|base| **base != self.options.root_class)
            .map(|base| capability_name(base))
            .collect();
        let methods = methods
            .iter()
            .map(|m| GoMethodSig {
                name: m.go_name.clone(),
                params: self.go_params(m),
                results: self.results(m),
            })
            .collect();

        GoTypeDecl {
            doc: vec![format!(
                "{} is implemented by {} and every class extending it.",
                capability_name(&class.name),
                class.name
            )],
            name: capability_name(&class.name),
            kind: GoTypeKind::Interface { embeds, methods },
        }
    }

    fn go_params(&self, method: &ResolvedMethod<'_>) -> Vec<GoParam> {
        method
            .params
            .iter()
            .map(|p| GoParam {
                name: p.go_name.clone(),
                ty: self.go_type(&p.resolved),
            })
            .collect()
    }

    fn results(&self, method: &ResolvedMethod<'_>) -> Vec<GoType> {
        match &method.ret {
            Some(ret) => vec![self.return_type(ret), GoType::error()],
            None => vec![GoType::error()],
        }
    }

    /// `getConstructorParams`: seeds defaults and back-references, then lets
    /// caller options override them.
    fn constructor_params_func(
        &self,
        class: &ClassIR,
        imports: &mut BTreeSet<String>,
    ) -> Result<GoFunc> {
        let body = if class.constructor.is_empty() {
            vec![GoStmt::Return(vec![GoExpr::ident("options")])]
        } else {
            let mut entries = Vec::new();
            for param in &class.constructor {
                let context = format!("{}(constructor {})", class.name, param.name);
                let resolved = self.resolve(&param.ty, &context)?;
                let seeded = match (resolved.required(), &param.default) {
                    (Resolved::Remote(_), _) => Some(sprintf(GoExpr::ident("from"), imports)),
                    (Resolved::Primitive(_), Some(default)) => {
                        Some(GoExpr::Literal(default_literal(default)))
                    }
                    (Resolved::Enum(name), Some(DefaultValue::Text(value))) => {
                        Some(GoExpr::ident(name).call(vec![GoExpr::string(value)]))
                    }
                    _ => None,
                };
                if let Some(value) = seeded {
                    entries.push((GoExpr::string(&param.name), value));
                }
            }

            vec![
                GoStmt::Define {
                    names: vec!["ret".to_string()],
                    value: GoExpr::MapLit {
                        ty: GoType::params_map(),
                        entries,
                    },
                },
                GoStmt::ForRange {
                    key: "key".to_string(),
                    value: "value".to_string(),
                    expr: GoExpr::ident("options"),
                    body: vec![GoStmt::Assign {
                        target: GoExpr::ident("ret").index(GoExpr::ident("key")),
                        value: GoExpr::ident("value"),
                    }],
                },
                GoStmt::Return(vec![GoExpr::ident("ret")]),
            ]
        };

        Ok(GoFunc {
            doc: vec![
                "getConstructorParams returns the parameters sent on creation.".to_string(),
                "Values in options take precedence over synthesized ones.".to_string(),
            ],
            receiver: Some(GoReceiver {
                name: "elem".to_string(),
                ty: GoType::pointer(GoType::ident(&class.name)),
            }),
            name: "getConstructorParams".to_string(),
            params: vec![
                GoParam {
                    name: "from".to_string(),
                    ty: GoType::ident(capability_name(&self.options.root_class)),
                },
                GoParam {
                    name: "options".to_string(),
                    ty: GoType::params_map(),
                },
            ],
            results: vec![GoType::params_map()],
            body,
        })
    }

    fn method_stub(
        &self,
        class: &str,
        method: &ResolvedMethod<'_>,
        imports: &mut BTreeSet<String>,
    ) -> GoFunc {
        let mut doc = method.ir.doc.clone();
        if let Some(ret) = &method.ir.ret
            && !ret.doc.is_empty()
        {
            doc.push("Returns:".to_string());
            doc.extend(ret.doc.iter().cloned());
        }

        let mut body = vec![GoStmt::Define {
            names: vec!["req".to_string()],
            value: GoExpr::ident("elem").select("getInvokeRequest").call(vec![]),
        }];

        let mut payload = vec![
            (GoExpr::string("operation"), GoExpr::string(&method.ir.name)),
            (GoExpr::string("object"), GoExpr::ident("elem").select("Id")),
        ];

        if !method.params.is_empty() {
            body.push(GoStmt::Define {
                names: vec!["params".to_string()],
                value: GoExpr::MapLit {
                    ty: GoType::params_map(),
                    entries: Vec::new(),
                },
            });
            for param in &method.params {
                body.push(GoStmt::If {
                    cond: self.sparse_guard(&param.resolved, &param.go_name, imports),
                    body: vec![GoStmt::Assign {
                        target: GoExpr::ident("params").index(GoExpr::string(&param.field.name)),
                        value: wire_value(&param.resolved, &param.go_name, imports),
                    }],
                });
            }
            payload.push((GoExpr::string("operationParams"), GoExpr::ident("params")));
        }

        body.push(GoStmt::Assign {
            target: GoExpr::ident("req").index(GoExpr::string("params")),
            value: GoExpr::MapLit {
                ty: GoType::params_map(),
                entries: payload,
            },
        });
        body.push(GoStmt::Comment("call server and wait for the response".to_string()));
        body.push(GoStmt::Define {
            names: vec!["response".to_string()],
            value: GoExpr::Receive(Box::new(
                GoExpr::ident("elem")
                    .select("connection")
                    .select("Request")
                    .call(vec![GoExpr::ident("req")]),
            )),
        });
        body.extend(self.return_stmts(method.ret.as_ref()));

        GoFunc {
            doc,
            receiver: Some(GoReceiver {
                name: "elem".to_string(),
                ty: GoType::pointer(GoType::ident(class)),
            }),
            name: method.go_name.clone(),
            params: self.go_params(method),
            results: self.results(method),
            body,
        }
    }

    /// Condition under which an argument is put on the wire. Zero values are
    /// omitted from the request.
    fn sparse_guard(
        &self,
        resolved: &Resolved,
        var: &str,
        imports: &mut BTreeSet<String>,
    ) -> GoExpr {
        let ident = GoExpr::ident(var);
        let nil = GoExpr::Literal(GoLiteral::Nil);
        if self.is_pointer_optional(resolved) {
            return ident.bin(BinOp::NotEqual, nil);
        }
        match resolved.required() {
            Resolved::Primitive(Primitive::Text) | Resolved::Enum(_) => {
                ident.bin(BinOp::NotEqual, GoExpr::string(""))
            }
            Resolved::Primitive(Primitive::Int | Primitive::Int64 | Primitive::Float) => {
                ident.bin(BinOp::NotEqual, GoExpr::Literal(GoLiteral::Int(0)))
            }
            Resolved::Primitive(Primitive::Boolean) => ident,
            Resolved::Value(_) => {
                imports.insert("reflect".to_string());
                GoExpr::Not(Box::new(
                    GoExpr::ident("reflect")
                        .select("ValueOf")
                        .call(vec![ident])
                        .select("IsZero")
                        .call(vec![]),
                ))
            }
            Resolved::Collection(_) => GoExpr::ident("len")
                .call(vec![ident])
                .bin(BinOp::Greater, GoExpr::Literal(GoLiteral::Int(0))),
            Resolved::Remote(_) | Resolved::Optional(_) => ident.bin(BinOp::NotEqual, nil),
        }
    }

    fn return_stmts(&self, ret: Option<&Resolved>) -> Vec<GoStmt> {
        let transport_error = || GoExpr::ident("response").select("Error");
        let Some(resolved) = ret else {
            return vec![GoStmt::Return(vec![transport_error()])];
        };
        let ty = self.return_type(resolved);

        let scalar = match resolved.required() {
            Resolved::Primitive(Primitive::Text) => Some(("string", None)),
            Resolved::Primitive(Primitive::Boolean) => Some(("bool", None)),
            Resolved::Primitive(Primitive::Float) => Some(("float64", None)),
            // JSON numbers decode as float64.
            Resolved::Primitive(Primitive::Int) => Some(("float64", Some("int".to_string()))),
            Resolved::Primitive(Primitive::Int64) => Some(("float64", Some("int64".to_string()))),
            Resolved::Enum(name) => Some(("string", Some(name.clone()))),
            _ => None,
        };

        if let Some((asserted, conversion)) = scalar {
            let mut stmts = vec![GoStmt::Define {
                names: vec!["value".to_string(), "_".to_string()],
                value: GoExpr::TypeAssert {
                    expr: Box::new(
                        GoExpr::ident("response")
                            .select("Result")
                            .index(GoExpr::string("value")),
                    ),
                    ty: GoType::ident(asserted),
                },
            }];
            let mut value = GoExpr::ident("value");
            if let Some(target) = conversion {
                value = GoExpr::ident(target).call(vec![value]);
            }
            if matches!(ty, GoType::Pointer(_)) {
                stmts.push(GoStmt::Define {
                    names: vec!["result".to_string()],
                    value,
                });
                value = GoExpr::AddrOf(Box::new(GoExpr::ident("result")));
            }
            stmts.push(GoStmt::Return(vec![value, transport_error()]));
            return stmts;
        }

        // Value structs, collections and capability references carry no
        // decoded payload; only their shape is produced.
        let is_remote = matches!(resolved.required(), Resolved::Remote(_));
        let placeholder = match &ty {
            GoType::Pointer(inner) => {
                GoExpr::AddrOf(Box::new(GoExpr::Composite(inner.as_ref().clone())))
            }
            other => GoExpr::Composite(other.clone()),
        };
        let mut stmts = Vec::new();

        if self.options.return_policy == ReturnPolicy::Absent {
            stmts.push(GoStmt::If {
                cond: transport_error().bin(BinOp::NotEqual, GoExpr::Literal(GoLiteral::Nil)),
                body: vec![GoStmt::Return(vec![
                    GoExpr::Literal(GoLiteral::Nil),
                    transport_error(),
                ])],
            });
        }

        if is_remote {
            stmts.push(GoStmt::Var {
                name: "ret".to_string(),
                ty,
            });
        } else {
            stmts.push(GoStmt::Define {
                names: vec!["ret".to_string()],
                value: placeholder,
            });
        }

        let err = match self.options.return_policy {
            ReturnPolicy::Absent => GoExpr::Literal(GoLiteral::Nil),
            ReturnPolicy::ZeroValue => transport_error(),
        };
        stmts.push(GoStmt::Return(vec![GoExpr::ident("ret"), err]));
        stmts
    }
}

fn enum_decls(ty: &ComplexTypeIR, values: &[String]) -> Result<Vec<GoDecl>> {
    let constants: Vec<GoConst> = values
        .iter()
        .map(|value| GoConst {
            name: enum_constant_name(&ty.name, value),
            ty: ty.name.clone(),
            value: GoLiteral::String(value.clone()),
        })
        .collect();
    ensure_unique(&ty.name, "enum constant", constants.iter().map(|c| c.name.clone()))?;

    let mut decls = vec![
        GoDecl::Type(GoTypeDecl {
            doc: ty.doc.clone(),
            name: ty.name.clone(),
            kind: GoTypeKind::Named(GoType::ident("string")),
        }),
        GoDecl::Func(GoFunc {
            doc: vec!["String implements fmt.Stringer.".to_string()],
            receiver: Some(GoReceiver {
                name: "t".to_string(),
                ty: GoType::ident(&ty.name),
            }),
            name: "String".to_string(),
            params: Vec::new(),
            results: vec![GoType::ident("string")],
            body: vec![GoStmt::Return(vec![
                GoExpr::ident("string").call(vec![GoExpr::ident("t")]),
            ])],
        }),
    ];
    if !constants.is_empty() {
        decls.push(GoDecl::Consts(constants));
    }
    Ok(decls)
}

fn primitive_type(p: Primitive) -> GoType {
    GoType::ident(match p {
        Primitive::Text => "string",
        Primitive::Int => "int",
        Primitive::Int64 => "int64",
        Primitive::Float => "float64",
        Primitive::Boolean => "bool",
    })
}

fn capability_name(class: &str) -> String {
    format!("I{class}")
}

fn default_literal(default: &DefaultValue) -> GoLiteral {
    match default {
        DefaultValue::Text(s) => GoLiteral::String(s.clone()),
        DefaultValue::Int(i) => GoLiteral::Int(*i),
        DefaultValue::Float(f) => GoLiteral::Float(*f),
        DefaultValue::Bool(b) => GoLiteral::Bool(*b),
    }
}

/// `fmt.Sprintf("%s", expr)`: remote objects travel as their text form.
fn sprintf(expr: GoExpr, imports: &mut BTreeSet<String>) -> GoExpr {
    imports.insert("fmt".to_string());
    GoExpr::ident("fmt")
        .select("Sprintf")
        .call(vec![GoExpr::string("%s"), expr])
}

fn wire_value(resolved: &Resolved, var: &str, imports: &mut BTreeSet<String>) -> GoExpr {
    if matches!(resolved.required(), Resolved::Remote(_)) {
        sprintf(GoExpr::ident(var), imports)
    } else {
        GoExpr::ident(var)
    }
}

/// The generated files share one Go package, so every package-level name
/// (types and enum constants) may be declared by one unit only.
pub fn ensure_package_names_unique(schemas: &[SchemaUnits]) -> Result<()> {
    let mut declared: HashMap<String, &str> = HashMap::new();
    let units = schemas
        .iter()
        .flat_map(|schema| schema.complex_types.iter().chain(&schema.classes));
    for unit in units {
        for name in unit.decls.iter().flat_map(package_names) {
            if let Some(first) = declared.insert(name.clone(), &unit.name) {
                return Err(KmdError::template(
                    &unit.name,
                    format!("`{name}` is already declared by {first}"),
                ));
            }
        }
    }
    Ok(())
}

fn package_names(decl: &GoDecl) -> Vec<String> {
    match decl {
        GoDecl::Type(ty) => vec![ty.name.clone()],
        GoDecl::Consts(consts) => consts.iter().map(|c| c.name.clone()).collect(),
        GoDecl::Func(func) if func.receiver.is_none() => vec![func.name.clone()],
        GoDecl::Func(_) => Vec::new(),
    }
}

fn ensure_unique(unit: &str, what: &str, names: impl IntoIterator<Item = String>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.clone()) {
            return Err(KmdError::template(
                unit,
                format!("duplicate {what} `{name}`"),
            ));
        }
    }
    Ok(())
}
