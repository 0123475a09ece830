//! Batch orchestrator.
//!
//! Sequences one emission run:
//!
//! 1. Namespace tree -> baseline display order
//! 2. Scheduler -> declaration order and static-initialization order
//! 3. Per type, in declaration order: namespace registration (first use only)
//!    followed by the type fragment or its special form
//! 4. Static-init statements, in static-initialization order
//! 5. The entry-point invocation, if one resolves
//!
//! The run is a pure function of the batch and options. Diagnostics never stop
//! it; they are returned alongside the statements.

use crate::declarations::{TypeBatch, TypeDeclaration, TypeId, TypeKind, TypeMarker};
use crate::namespaces::{NamespaceRegistrar, NamespaceTree};
use crate::options::EmitOptions;
use crate::scheduler::{ReferenceGraph, declaration_order};
use crate::transforms::ir::IRNode;
use crate::transforms::ir_printer::IRPrinter;
use crate::transforms::special_forms::{
    attach_static_methods, entry_point_invocation, resources_literal, rewrite_test_fixture,
};
use crate::transforms::type_ir::TypeEmitter;
use scriptlet_common::Diagnostic;

/// Everything one emission run produces.
#[derive(Debug, Clone)]
pub struct EmittedBatch {
    /// Ordered statement fragments for the text emitter.
    pub statements: Vec<IRNode>,
    /// Order in which type fragments were placed.
    pub declaration_order: Vec<TypeId>,
    /// Order in which static-init blocks were placed.
    pub static_init_order: Vec<TypeId>,
    pub diagnostics: Vec<Diagnostic>,
}

impl EmittedBatch {
    /// Render the statements with `IRPrinter`.
    pub fn to_text(&self) -> String {
        IRPrinter::emit_statements(&self.statements)
    }
}

pub struct BatchEmitter<'a> {
    batch: &'a TypeBatch,
    options: &'a EmitOptions,
}

impl<'a> BatchEmitter<'a> {
    pub const fn new(batch: &'a TypeBatch, options: &'a EmitOptions) -> Self {
        Self { batch, options }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(types = self.batch.len()))]
    pub fn emit(&self) -> EmittedBatch {
        let baseline = NamespaceTree::build(self.batch).display_order();
        let declaration_order = declaration_order(self.batch, &baseline);
        let static_init_order = ReferenceGraph::build(self.batch).static_init_order();
        tracing::debug!(
            ?declaration_order,
            ?static_init_order,
            "scheduled batch"
        );

        let emitter = TypeEmitter::new(self.batch, self.options);
        let mut registrar = NamespaceRegistrar::new(self.options);
        let mut statements = Vec::new();

        for &id in &declaration_order {
            let Some(decl) = self.batch.get(id) else {
                continue;
            };
            if requires_namespace(decl)
                && let Some(namespace) = decl.name.namespace_path()
            {
                statements.extend(registrar.ensure(&namespace));
            }
            statements.extend(self.fragment(&emitter, id, decl));
        }

        for &id in &static_init_order {
            if let Some(decl) = self.batch.get(id) {
                statements.extend(scheduled_static_init(decl).iter().cloned());
            }
        }

        let mut diagnostics = Vec::new();
        statements.extend(entry_point_invocation(
            self.batch,
            self.options,
            &mut diagnostics,
        ));

        EmittedBatch {
            statements,
            declaration_order,
            static_init_order,
            diagnostics,
        }
    }

    fn fragment(&self, emitter: &TypeEmitter<'_>, id: TypeId, decl: &TypeDeclaration) -> Vec<IRNode> {
        match &decl.marker {
            TypeMarker::None => emitter.emit_type(id, decl),
            TypeMarker::TestFixture => match &decl.kind {
                TypeKind::Class(def) => {
                    let rewritten = TypeDeclaration {
                        kind: TypeKind::Class(rewrite_test_fixture(def, self.options)),
                        ..decl.clone()
                    };
                    emitter.emit_type(id, &rewritten)
                }
                TypeKind::Interface(_) | TypeKind::Enum(_) => emitter.emit_type(id, decl),
            },
            TypeMarker::GlobalMethods => {
                let target = IRNode::dotted(&self.options.global_object);
                self.detached_statics(emitter, decl, &target)
            }
            TypeMarker::Mixin(target) => self.detached_statics(emitter, decl, target),
            TypeMarker::Resources(entries) => {
                let mut out = emitter.banner(decl);
                out.push(resources_literal(self.batch.type_ref(id), entries));
                out
            }
        }
    }

    fn detached_statics(
        &self,
        emitter: &TypeEmitter<'_>,
        decl: &TypeDeclaration,
        target: &IRNode,
    ) -> Vec<IRNode> {
        let mut out = emitter.banner(decl);
        if let Some(def) = decl.class_definition() {
            out.extend(attach_static_methods(def, target));
        }
        out
    }
}

/// Emit one batch with `options`.
pub fn emit_batch(batch: &TypeBatch, options: &EmitOptions) -> EmittedBatch {
    BatchEmitter::new(batch, options).emit()
}

/// Whether the type's fragment assigns to its own qualified name.
const fn requires_namespace(decl: &TypeDeclaration) -> bool {
    matches!(
        decl.marker,
        TypeMarker::None | TypeMarker::TestFixture | TypeMarker::Resources(_)
    )
}

/// Static-init statements that run in the trailing static-init sequence.
///
/// Generic types keep theirs inside the instance factory; resources holders
/// fold their constants into the literal.
fn scheduled_static_init(decl: &TypeDeclaration) -> &[IRNode] {
    if decl.is_generic() || matches!(decl.marker, TypeMarker::Resources(_)) {
        return &[];
    }
    decl.class_definition()
        .map(|def| def.static_init.as_slice())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../tests/batch_emitter.rs"]
mod tests;
