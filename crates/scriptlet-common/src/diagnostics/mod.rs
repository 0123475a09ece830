//! Diagnostic types and message lookup.
//!
//! Message data lives in `data.rs`. Diagnostics are handed to an error-reporting
//! collaborator through the `DiagnosticReporter` seam; nothing in the back-end
//! aborts on a diagnostic.

use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Message = 2,
}

/// A diagnostic produced by the back-end: a `(code, message, offending symbol)` triple
/// plus its category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub message_text: String,
    /// Fully qualified name of the offending member, e.g. `App.Program.main`.
    pub symbol: String,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(code: u32, message: String, symbol: String) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            message_text: message,
            symbol,
        }
    }

    /// Create a diagnostic from the message table, filling `{0}`, `{1}`, ... with `args`.
    ///
    /// Unknown codes produce an error whose text is the bare code.
    #[must_use]
    pub fn from_code(code: u32, symbol: impl Into<String>, args: &[&str]) -> Self {
        match get_diagnostic_message(code) {
            Some(def) => Self {
                category: def.category,
                code,
                message_text: format_message(def.message, args),
                symbol: symbol.into(),
            },
            None => Self::error(code, format!("SC{code}"), symbol.into()),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = match self.category {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Message => "message",
        };
        write!(
            f,
            "{category} SC{}: {} ({})",
            self.code, self.message_text, self.symbol
        )
    }
}

/// Receiver for diagnostics produced while emitting a batch.
pub trait DiagnosticReporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticReporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

#[cfg(test)]
#[path = "../../tests/diagnostics.rs"]
mod tests;
