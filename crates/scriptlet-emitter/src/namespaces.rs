//! Namespace tree builder and display orderer.
//!
//! Types are grouped by dotted namespace path into a tree. A pre-order walk of
//! the tree gives the baseline display order: a namespace's own types come
//! before its child namespaces, siblings are ordered lexically, and nested
//! declarations sort right after their outer type.
//!
//! ```text
//! (global)      C
//! App           App.Main, App.Main$Helper
//! App.Models    App.Models.Customer
//! Lib           Lib.Util
//! ```

use crate::declarations::{TypeBatch, TypeId};
use crate::options::EmitOptions;
use crate::transforms::ir::IRNode;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct NamespaceNode {
    types: Vec<TypeId>,
    children: BTreeMap<String, NamespaceNode>,
}

/// Types of one batch grouped by namespace path.
#[derive(Debug)]
pub struct NamespaceTree<'a> {
    batch: &'a TypeBatch,
    root: NamespaceNode,
}

impl<'a> NamespaceTree<'a> {
    pub fn build(batch: &'a TypeBatch) -> Self {
        let mut root = NamespaceNode::default();
        for (id, decl) in batch.iter() {
            let node = decl
                .name
                .namespace
                .iter()
                .fold(&mut root, |node, segment| {
                    node.children.entry(segment.clone()).or_default()
                });
            node.types.push(id);
        }
        Self { batch, root }
    }

    /// Baseline display order of every type in the batch.
    pub fn display_order(&self) -> Vec<TypeId> {
        let mut order = Vec::with_capacity(self.batch.len());
        self.collect(&self.root, &mut order);
        order
    }

    fn collect(&self, node: &NamespaceNode, order: &mut Vec<TypeId>) {
        let mut types = node.types.clone();
        // Vec<String> ordering puts `Outer` before `Outer$Inner` before `OuterX`.
        types.sort_by(|a, b| {
            let a_nesting = self.batch.get(*a).map(|d| &d.name.nesting);
            let b_nesting = self.batch.get(*b).map(|d| &d.name.nesting);
            a_nesting.cmp(&b_nesting).then(a.cmp(b))
        });
        order.extend(types);
        for child in node.children.values() {
            self.collect(child, order);
        }
    }
}

/// Issues "ensure namespace exists" statements the first time a namespace is needed.
///
/// Registering `A.B` creates `A` as well, so every prefix of a registered path
/// counts as existing.
#[derive(Debug)]
pub struct NamespaceRegistrar<'o> {
    options: &'o EmitOptions,
    existing: FxHashSet<String>,
}

impl<'o> NamespaceRegistrar<'o> {
    pub fn new(options: &'o EmitOptions) -> Self {
        Self {
            options,
            existing: FxHashSet::default(),
        }
    }

    /// Statement registering `namespace`, or `None` if it already exists.
    pub fn ensure(&mut self, namespace: &str) -> Option<IRNode> {
        if namespace.is_empty() || self.existing.contains(namespace) {
            return None;
        }
        let mut prefix = String::new();
        for segment in namespace.split('.') {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(segment);
            self.existing.insert(prefix.clone());
        }
        tracing::trace!(namespace, "registering namespace");
        Some(IRNode::expr_stmt(IRNode::method_call(
            IRNode::dotted(&self.options.type_system),
            "registerNamespace",
            vec![IRNode::string(namespace)],
        )))
    }
}

#[cfg(test)]
#[path = "../tests/namespaces.rs"]
mod tests;
