//! Helper methods for the IR printer.
//!
//! Buffer/indent primitives, comma-separated lists, parameters and
//! object-literal layout.

use super::*;
use std::fmt::Write as _;

impl IRPrinter {
    pub(super) fn emit_comma_separated(&mut self, nodes: &[IRNode]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_node(node);
        }
    }

    pub(super) fn emit_parameters(&mut self, params: &[IRParam]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if param.rest {
                self.write("...");
            }
            self.write(&param.name);
        }
    }

    pub(super) fn emit_object_literal_multiline(&mut self, properties: &[IRProperty]) {
        if properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for (i, prop) in properties.iter().enumerate() {
            self.write_indent();
            self.emit_property(prop);
            if i + 1 < properties.len() {
                self.write(",");
            }
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    pub(super) fn emit_property(&mut self, prop: &IRProperty) {
        match &prop.key {
            IRPropertyKey::Identifier(name) => self.write(name),
            IRPropertyKey::StringLiteral(s) => {
                self.write("\"");
                self.write_escaped(s);
                self.write("\"");
            }
        }
        self.write(": ");
        self.emit_node(&prop.value);
    }

    pub(super) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub(super) fn write_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\0' => self.output.push_str("\\0"),
                c if (c as u32) < 0x20 || c == '\x7F' => {
                    let _ = write!(self.output, "\\u{:04X}", c as u32);
                }
                _ => self.output.push(c),
            }
        }
    }

    pub(super) fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub(super) fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    pub(super) const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(super) const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}
