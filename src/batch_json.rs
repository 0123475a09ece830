//! JSON hand-off for one emission batch.
//!
//! Input:
//!
//! ```json
//! {
//!   "options": { "globalObject": "window" },
//!   "types": [
//!     { "name": { "namespace": ["App"], "nesting": ["Program"] },
//!       "kind": { "Class": { "static_methods": [ ... ] } } }
//!   ]
//! }
//! ```
//!
//! `options` may be omitted or partial. Types are listed in declaration order;
//! a `TypeRef` target is the position of the referenced type in `types`.

use anyhow::{Context, Result};
use scriptlet_common::{Diagnostic, DiagnosticCategory};
use scriptlet_emitter::{EmitOptions, TypeBatch, TypeDeclaration, TypeId, emit_batch};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompileRequest {
    #[serde(default)]
    pub options: EmitOptions,
    pub types: Vec<TypeDeclaration>,
}

/// Result of compiling one batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledBatch {
    pub text: String,
    /// Qualified names in the order their fragments were placed.
    pub declaration_order: Vec<String>,
    /// Qualified names in the order their static-init blocks were placed.
    pub static_init_order: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledBatch {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }
}

pub fn parse_request(input: &str) -> Result<CompileRequest> {
    serde_json::from_str(input).context("failed to parse batch JSON")
}

#[tracing::instrument(level = "debug", skip_all, fields(types = request.types.len()))]
pub fn compile(request: CompileRequest) -> CompiledBatch {
    let batch = TypeBatch::from_declarations(request.types);
    let emitted = emit_batch(&batch, &request.options);
    let names = |order: &[TypeId]| -> Vec<String> {
        order.iter().map(|id| batch.qualified_name(*id)).collect()
    };

    CompiledBatch {
        text: emitted.to_text(),
        declaration_order: names(&emitted.declaration_order),
        static_init_order: names(&emitted.static_init_order),
        diagnostics: emitted.diagnostics,
    }
}

/// Parse a batch from JSON and compile it.
pub fn compile_json(input: &str) -> Result<CompiledBatch> {
    Ok(compile(parse_request(input)?))
}
