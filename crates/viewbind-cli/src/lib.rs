//! Command-line front end for viewbind.
//!
//! Reads binding manifests, validates them against the listener registry,
//! and writes one generated binder per target type.

pub mod args;
pub mod driver;
pub mod manifest;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "../tests/manifest_tests.rs"]
mod manifest_tests;
#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;
#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tracing_config_tests;
