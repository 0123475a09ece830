//! IR Printer - renders IR nodes as JavaScript text
//!
//! The back-end hands structured fragments to the downstream text emitter; this
//! printer exists so fragments can be inspected in tests and diagnostics.
//! Layout is fixed: four-space indentation, multi-line function bodies and
//! object literals, double-quoted strings.

#[path = "ir_printer_helpers.rs"]
mod helpers;

use crate::transforms::ir::{IRNode, IRParam, IRProperty, IRPropertyKey};

/// Renders `IRNode` trees to text.
pub struct IRPrinter {
    output: String,
    indent_level: u32,
    indent_str: &'static str,
}

impl Default for IRPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl IRPrinter {
    pub const fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    /// Render a single node.
    pub fn emit_to_string(node: &IRNode) -> String {
        let mut printer = Self::new();
        printer.emit_node(node);
        printer.output
    }

    /// Render a statement list, one top-level statement per line.
    pub fn emit_statements(statements: &[IRNode]) -> String {
        let mut printer = Self::new();
        for stmt in statements {
            printer.write_indent();
            printer.emit_node(stmt);
            printer.write_line();
        }
        printer.output
    }

    pub const fn set_indent_level(&mut self, level: u32) {
        self.indent_level = level;
    }

    /// Append `node` to the buffer and return everything printed so far.
    pub fn emit(&mut self, node: &IRNode) -> &str {
        self.emit_node(node);
        &self.output
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn emit_node(&mut self, node: &IRNode) {
        match node {
            IRNode::NumericLiteral(n) => self.write(n),
            IRNode::StringLiteral(s) => {
                self.write("\"");
                self.write_escaped(s);
                self.write("\"");
            }
            IRNode::BooleanLiteral(b) => self.write(if *b { "true" } else { "false" }),
            IRNode::NullLiteral => self.write("null"),
            IRNode::Undefined => self.write("void 0"),
            IRNode::Identifier(name) => self.write(name),
            IRNode::This => self.write("this"),
            IRNode::TypeRef(type_ref) => self.write(&type_ref.name),

            IRNode::BinaryExpr {
                left,
                operator,
                right,
            } => {
                self.emit_node(left);
                self.write(" ");
                self.write(operator);
                self.write(" ");
                self.emit_node(right);
            }
            IRNode::PrefixUnaryExpr { operator, operand } => {
                self.write(operator);
                if operator.chars().all(|c| c.is_ascii_alphabetic()) {
                    self.write(" ");
                }
                self.emit_node(operand);
            }
            IRNode::CallExpr { callee, arguments } => {
                self.emit_callee(callee);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            IRNode::NewExpr { callee, arguments } => {
                self.write("new ");
                self.emit_callee(callee);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            IRNode::PropertyAccess { object, property } => {
                self.emit_callee(object);
                self.write(".");
                self.write(property);
            }
            IRNode::ElementAccess { object, index } => {
                self.emit_callee(object);
                self.write("[");
                self.emit_node(index);
                self.write("]");
            }
            IRNode::ConditionalExpr {
                condition,
                when_true,
                when_false,
            } => {
                self.emit_node(condition);
                self.write(" ? ");
                self.emit_node(when_true);
                self.write(" : ");
                self.emit_node(when_false);
            }
            IRNode::Parenthesized(inner) => {
                self.write("(");
                self.emit_node(inner);
                self.write(")");
            }
            IRNode::ArrayLiteral(elements) => {
                self.write("[");
                self.emit_comma_separated(elements);
                self.write("]");
            }
            IRNode::ObjectLiteral(properties) => self.emit_object_literal_multiline(properties),
            IRNode::FunctionExpr {
                name,
                parameters,
                body,
            } => {
                self.write("function ");
                if let Some(name) = name {
                    self.write(name);
                }
                self.write("(");
                self.emit_parameters(parameters);
                self.write(") ");
                self.emit_function_body(body);
            }

            IRNode::VarDecl { name, initializer } => {
                self.write("var ");
                self.write(name);
                if let Some(init) = initializer {
                    self.write(" = ");
                    self.emit_node(init);
                }
                self.write(";");
            }
            IRNode::ExpressionStatement(expr) => {
                self.emit_node(expr);
                self.write(";");
            }
            IRNode::ReturnStatement(expr) => {
                self.write("return");
                if let Some(expr) = expr {
                    self.write(" ");
                    self.emit_node(expr);
                }
                self.write(";");
            }
            IRNode::IfStatement {
                condition,
                then_branch,
                else_branch,
            } => {
                self.write("if (");
                self.emit_node(condition);
                self.write(") ");
                self.emit_node(then_branch);
                if let Some(else_branch) = else_branch {
                    self.write(" else ");
                    self.emit_node(else_branch);
                }
            }
            IRNode::Block(statements) => self.emit_block(statements),
            IRNode::ThrowStatement(expr) => {
                self.write("throw ");
                self.emit_node(expr);
                self.write(";");
            }

            IRNode::Comment { text, is_block } => {
                if *is_block {
                    self.write("/* ");
                    self.write(text);
                    self.write(" */");
                } else {
                    self.write("// ");
                    self.write(text);
                }
            }
            IRNode::Sequence(nodes) => {
                for (i, node) in nodes.iter().enumerate() {
                    if i > 0 {
                        self.write_line();
                        self.write_indent();
                    }
                    self.emit_node(node);
                }
            }
        }
    }

    /// Function expressions in callee/object position need parentheses.
    fn emit_callee(&mut self, callee: &IRNode) {
        if matches!(callee, IRNode::FunctionExpr { .. }) {
            self.write("(");
            self.emit_node(callee);
            self.write(")");
        } else {
            self.emit_node(callee);
        }
    }

    fn emit_function_body(&mut self, body: &[IRNode]) {
        if body.is_empty() {
            self.write("{ }");
            return;
        }
        self.emit_block(body);
    }

    fn emit_block(&mut self, statements: &[IRNode]) {
        self.write("{");
        self.write_line();
        self.increase_indent();
        for stmt in statements {
            self.write_indent();
            self.emit_node(stmt);
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }
}

#[cfg(test)]
#[path = "../../tests/ir_printer.rs"]
mod tests;
