//! Go AST for code generation.
//!
//! This module defines just enough of Go to express the generated bindings:
//! - GoType: type expressions (identifiers, slices, pointers, maps)
//! - GoExpr / GoStmt: method bodies
//! - GoDecl / GoFile: top-level declarations and the file envelope

/// Go type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoType {
    /// Named or predeclared type: `string`, `Point`, `IShape`, `interface{}`
    Ident(String),
    /// `[]T`
    Slice(Box<GoType>),
    /// `*T`
    Pointer(Box<GoType>),
    /// `map[K]V`
    Map(Box<GoType>, Box<GoType>),
}

impl GoType {
    pub fn ident(name: impl Into<String>) -> Self {
        GoType::Ident(name.into())
    }

    pub fn slice(inner: GoType) -> Self {
        GoType::Slice(Box::new(inner))
    }

    pub fn pointer(inner: GoType) -> Self {
        GoType::Pointer(Box::new(inner))
    }

    /// `map[string]interface{}`, the payload type of every request.
    pub fn params_map() -> Self {
        GoType::Map(
            Box::new(GoType::ident("string")),
            Box::new(GoType::ident("interface{}")),
        )
    }

    pub fn error() -> Self {
        GoType::ident("error")
    }
}

/// Go literal value
#[derive(Debug, Clone, PartialEq)]
pub enum GoLiteral {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    NotEqual,
    Greater,
}

/// Go expression
#[derive(Debug, Clone, PartialEq)]
pub enum GoExpr {
    Ident(String),
    Literal(GoLiteral),
    /// `x.field`
    Selector { expr: Box<GoExpr>, field: String },
    /// `f(a, b)`
    Call { func: Box<GoExpr>, args: Vec<GoExpr> },
    /// `x[i]`
    Index { expr: Box<GoExpr>, index: Box<GoExpr> },
    /// Map literal, printed one entry per line.
    MapLit {
        ty: GoType,
        entries: Vec<(GoExpr, GoExpr)>,
    },
    /// Empty composite literal `T{}`
    Composite(GoType),
    BinOp {
        left: Box<GoExpr>,
        op: BinOp,
        right: Box<GoExpr>,
    },
    /// `!x`
    Not(Box<GoExpr>),
    /// `&x`
    AddrOf(Box<GoExpr>),
    /// `x.(T)`
    TypeAssert { expr: Box<GoExpr>, ty: GoType },
    /// `<-ch`
    Receive(Box<GoExpr>),
}

impl GoExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        GoExpr::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        GoExpr::Literal(GoLiteral::String(value.into()))
    }

    pub fn select(self, field: impl Into<String>) -> Self {
        GoExpr::Selector {
            expr: Box::new(self),
            field: field.into(),
        }
    }

    pub fn call(self, args: Vec<GoExpr>) -> Self {
        GoExpr::Call {
            func: Box::new(self),
            args,
        }
    }

    pub fn index(self, index: GoExpr) -> Self {
        GoExpr::Index {
            expr: Box::new(self),
            index: Box::new(index),
        }
    }

    pub fn bin(self, op: BinOp, right: GoExpr) -> Self {
        GoExpr::BinOp {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }
}

/// Go statement
#[derive(Debug, Clone, PartialEq)]
pub enum GoStmt {
    /// `a, b := value`
    Define { names: Vec<String>, value: GoExpr },
    /// `target = value`
    Assign { target: GoExpr, value: GoExpr },
    Return(Vec<GoExpr>),
    If { cond: GoExpr, body: Vec<GoStmt> },
    /// `for key, value := range expr { ... }`
    ForRange {
        key: String,
        value: String,
        expr: GoExpr,
        body: Vec<GoStmt>,
    },
    /// `var name T`
    Var { name: String, ty: GoType },
    Comment(String),
}

/// Struct field; `name: None` embeds the type.
#[derive(Debug, Clone, PartialEq)]
pub struct GoField {
    pub name: Option<String>,
    pub ty: GoType,
    pub doc: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoParam {
    pub name: String,
    pub ty: GoType,
}

/// Interface method signature
#[derive(Debug, Clone, PartialEq)]
pub struct GoMethodSig {
    pub name: String,
    pub params: Vec<GoParam>,
    pub results: Vec<GoType>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GoTypeKind {
    Struct(Vec<GoField>),
    Interface {
        embeds: Vec<String>,
        methods: Vec<GoMethodSig>,
    },
    /// `type X underlying`
    Named(GoType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoTypeDecl {
    pub doc: Vec<String>,
    pub name: String,
    pub kind: GoTypeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoConst {
    pub name: String,
    pub ty: String,
    pub value: GoLiteral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoReceiver {
    pub name: String,
    pub ty: GoType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoFunc {
    pub doc: Vec<String>,
    pub receiver: Option<GoReceiver>,
    pub name: String,
    pub params: Vec<GoParam>,
    pub results: Vec<GoType>,
    pub body: Vec<GoStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GoDecl {
    Type(GoTypeDecl),
    /// Grouped `const ( ... )` block
    Consts(Vec<GoConst>),
    Func(GoFunc),
}

/// One output file.
#[derive(Debug, Clone, PartialEq)]
pub struct GoFile {
    /// Comment lines printed above the package clause.
    pub header: Vec<String>,
    pub package: String,
    /// Import paths, printed in the given order.
    pub imports: Vec<String>,
    pub decls: Vec<GoDecl>,
}
