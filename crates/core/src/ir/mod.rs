//! Intermediate representation for IDL to Go code generation.
//!
//! Three layers:
//! 1. Schema IR: normalized classes, methods, fields and complex types (Go-agnostic)
//! 2. Go AST: types, expressions, statements, declarations
//! 3. Emission: Go AST to source text via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `model`: schema IR (ClassIR, MethodIR, FieldIR, ComplexTypeIR, TypeRef)
//! - `normalize`: parsed schema -> schema IR
//! - `types`: Go AST (GoType, GoExpr, GoStmt, GoDecl, GoFile)
//! - `codegen`: schema IR + registry -> Go AST
//! - `emit`: Go AST -> code strings
//! - `utils`: identifier helpers shared across modules

mod codegen;
mod emit;
mod model;
mod normalize;
pub mod types;
pub mod utils;

pub use codegen::{RenderedUnit, SchemaUnits, codegen_schema, ensure_package_names_unique};
pub use emit::Emit;
pub use normalize::normalize_schema;
