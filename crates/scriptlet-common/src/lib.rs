//! Common types shared across the scriptlet crates.
//!
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message table, reporter seam)

pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, DiagnosticReporter, diagnostic_codes,
    diagnostic_messages, format_message,
};
