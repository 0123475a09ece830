//! Object-layout emitter for the scriptlet back-end.
//!
//! Takes a batch of fully resolved, already-named type declarations and
//! produces the ordered statement fragments that emulate them on a
//! prototype-based runtime:
//!
//! - `declarations`: the input arena (`TypeBatch`, `TypeDeclaration`, `TypeId`)
//! - `type_references`: collects in-batch types mentioned by member bodies
//! - `namespaces`: namespace tree, display order, namespace registration
//! - `scheduler`: declaration order and cycle-safe static-initialization order
//! - `transforms`: output IR, type fragments, special forms, IR printer
//! - `batch_emitter`: sequences all of the above for one batch

pub mod batch_emitter;
pub mod declarations;
pub mod namespaces;
pub mod options;
pub mod scheduler;
pub mod transforms;
pub mod type_references;

pub use batch_emitter::{BatchEmitter, EmittedBatch, emit_batch};
pub use declarations::{
    ClassDefinition, Constructor, EnumDefinition, EnumMember, EnumMemberValue, Method,
    MethodSemantics, NamedConstructor, ResourceEntry, TestMetadata, TypeBatch, TypeDeclaration,
    TypeId, TypeKind, TypeMarker, TypeName,
};
pub use options::{EmitOptions, TestFunctionNames};
pub use transforms::ir::{IRNode, IRParam, IRProperty, IRPropertyKey, TypeRef};
pub use transforms::ir_printer::IRPrinter;
