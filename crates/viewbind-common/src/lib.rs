//! Common types and utilities for the viewbind binder generator.
//!
//! This crate provides foundational types used across all viewbind crates:
//! - Java type names (`ClassName`, `TypeName`) and the best-guess type resolver
//! - Well-known framework and runtime class names (`names`)
//! - Diagnostics reported by front ends

// Type names and the textual type resolver
pub mod type_name;
pub use type_name::{ClassName, Primitive, TypeName, TypeNameError};

// Framework capability and runtime helper names
pub mod names;

// Front-end diagnostics
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, diagnostic_messages,
    format_message,
};

#[cfg(test)]
#[path = "../tests/type_name_tests.rs"]
mod type_name_tests;
#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
