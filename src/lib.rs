//! Scriptlet: object-layout back-end for a class-based language compiled to a
//! prototype-based script runtime.
//!
//! The emitter itself lives in `scriptlet-emitter`; diagnostics in
//! `scriptlet-common`. This crate wires them to the outside world: a JSON
//! hand-off for whole batches and the `scriptlet` command-line tool.

pub use scriptlet_common as common;
pub use scriptlet_emitter as emitter;

// JSON hand-off - batch in, script text + orders + diagnostics out
pub mod batch_json;
pub use batch_json::{CompileRequest, CompiledBatch, compile, compile_json, parse_request};

// Command-line arguments for the `scriptlet` binary
#[cfg(feature = "cli")]
pub mod args;

// Tracing configuration (text / tree / JSON output for debugging)
#[cfg(feature = "cli")]
pub mod tracing_config;
