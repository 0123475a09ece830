//! Type-reference scanner.
//!
//! Walks member bodies and collects the in-batch types they mention through
//! `IRNode::TypeRef`. External references (no `target`) are ignored; they can
//! never constrain ordering within a batch.

use crate::declarations::{ClassDefinition, TypeId};
use crate::transforms::ir::IRNode;
use rustc_hash::FxHashSet;

/// Accumulates the in-batch types referenced by the nodes it visits.
#[derive(Debug, Default)]
pub struct TypeReferenceFinder {
    found: FxHashSet<TypeId>,
}

impl TypeReferenceFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit_all(&mut self, nodes: &[IRNode]) {
        for node in nodes {
            self.visit(node);
        }
    }

    pub fn visit(&mut self, node: &IRNode) {
        match node {
            IRNode::TypeRef(type_ref) => {
                if let Some(target) = type_ref.target {
                    self.found.insert(target);
                }
            }

            IRNode::NumericLiteral(_)
            | IRNode::StringLiteral(_)
            | IRNode::BooleanLiteral(_)
            | IRNode::NullLiteral
            | IRNode::Undefined
            | IRNode::Identifier(_)
            | IRNode::This
            | IRNode::Comment { .. } => {}

            IRNode::BinaryExpr { left, right, .. } => {
                self.visit(left);
                self.visit(right);
            }
            IRNode::PrefixUnaryExpr { operand, .. } => self.visit(operand),
            IRNode::CallExpr { callee, arguments } | IRNode::NewExpr { callee, arguments } => {
                self.visit(callee);
                self.visit_all(arguments);
            }
            IRNode::PropertyAccess { object, .. } => self.visit(object),
            IRNode::ElementAccess { object, index } => {
                self.visit(object);
                self.visit(index);
            }
            IRNode::ConditionalExpr {
                condition,
                when_true,
                when_false,
            } => {
                self.visit(condition);
                self.visit(when_true);
                self.visit(when_false);
            }
            IRNode::Parenthesized(inner)
            | IRNode::ExpressionStatement(inner)
            | IRNode::ThrowStatement(inner) => self.visit(inner),
            IRNode::ArrayLiteral(items)
            | IRNode::Block(items)
            | IRNode::Sequence(items)
            | IRNode::FunctionExpr { body: items, .. } => self.visit_all(items),
            IRNode::ObjectLiteral(properties) => {
                for prop in properties {
                    self.visit(&prop.value);
                }
            }
            IRNode::VarDecl { initializer, .. } | IRNode::ReturnStatement(initializer) => {
                if let Some(init) = initializer {
                    self.visit(init);
                }
            }
            IRNode::IfStatement {
                condition,
                then_branch,
                else_branch,
            } => {
                self.visit(condition);
                self.visit(then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit(else_branch);
                }
            }
        }
    }

    /// Found types in ascending id (declaration) order.
    pub fn into_sorted(self) -> Vec<TypeId> {
        let mut ids: Vec<TypeId> = self.found.into_iter().collect();
        ids.sort_unstable();
        ids
    }
}

/// In-batch types mentioned anywhere in `nodes`, in declaration order.
pub fn collect_type_references(nodes: &[IRNode]) -> Vec<TypeId> {
    let mut finder = TypeReferenceFinder::new();
    finder.visit_all(nodes);
    finder.into_sorted()
}

/// In-batch types named by a class's base and interface references.
pub fn heritage_references(def: &ClassDefinition) -> Vec<TypeId> {
    let mut finder = TypeReferenceFinder::new();
    if let Some(base) = &def.base {
        finder.visit(base);
    }
    finder.visit_all(&def.interfaces);
    finder.into_sorted()
}

#[cfg(test)]
#[path = "../tests/type_references.rs"]
mod tests;
