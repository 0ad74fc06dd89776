//! Java source emission for viewbind.
//!
//! Binder synthesis builds an `IRFile`; this crate turns it into Java text.
//! - `ir`: the tree of declarations, statements and expressions
//! - `imports`: import collection and simple-name spelling
//! - `ir_printer`: the printer itself

pub mod ir;
pub use ir::{IRClass, IRField, IRFile, IRMethod, IRMethodKind, IRNode, IRParam, Modifiers};

pub mod imports;
pub use imports::ImportScope;

pub mod ir_printer;
mod ir_printer_helpers;
pub use ir_printer::{IRPrinter, PrinterOptions};

#[cfg(test)]
#[path = "../tests/ir_printer_tests.rs"]
mod ir_printer_tests;
#[cfg(test)]
#[path = "../tests/imports_tests.rs"]
mod imports_tests;
