//! Go client bindings generator for Kurento module descriptors (`*.kmd.json`).
//!
//! Schemas are loaded from glob patterns, every declared type is registered in
//! a corpus-wide type registry, each schema is normalized into IR and then
//! printed as Go through a small AST. [`compile`], [`check`] and [`generate`]
//! are the pipeline entry points.

mod compiler;
pub mod config;
pub mod error;
mod idl;
mod ir;
mod loader;
mod registry;
mod writer;

pub use compiler::{Report, check, compile, generate};
pub use config::{CodegenOptions, GeneratorConfig, OptionalStyle, ReturnPolicy};
pub use error::{KmdError, Result};
pub use writer::OutputFile;
