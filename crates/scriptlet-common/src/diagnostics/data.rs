//! Diagnostic message table.
//!
//! Codes in the 7800 range belong to the object-layout back-end.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const ENTRY_POINT_CANNOT_HAVE_PARAMETERS: u32 = 7801;
    pub const ENTRY_POINT_MUST_BE_A_NORMAL_METHOD: u32 = 7802;
}

pub mod diagnostic_messages {
    pub const ENTRY_POINT_CANNOT_HAVE_PARAMETERS: &str =
        "The entry point method '{0}' cannot have any parameters.";
    pub const ENTRY_POINT_MUST_BE_A_NORMAL_METHOD: &str =
        "The entry point method '{0}' must be implemented as a normal method.";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::ENTRY_POINT_CANNOT_HAVE_PARAMETERS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ENTRY_POINT_CANNOT_HAVE_PARAMETERS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ENTRY_POINT_MUST_BE_A_NORMAL_METHOD,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ENTRY_POINT_MUST_BE_A_NORMAL_METHOD,
    },
];
