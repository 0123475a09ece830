//! Lowered IR (Intermediate Representation) for emitted fragments
//!
//! This module defines the tree-structured IR that flows both ways through the
//! back-end: member bodies arrive from the expression builder as `IRNode` trees
//! (with type references already resolved to `IRNode::TypeRef`), and the type
//! emitter produces `IRNode` statements for the text-emission collaborator.
//!
//! # Architecture
//!
//! The emitter, scheduler and special-form transforms only ever build and
//! inspect IR. Turning IR into text is done downstream; the `IRPrinter` in this
//! crate exists for tests and diagnostics.

use crate::declarations::TypeId;
use serde::{Deserialize, Serialize};

/// Intermediate Representation node for emitted JavaScript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IRNode {
    // =========================================================================
    // Literals
    // =========================================================================
    /// Numeric literal: `42`, `3.14`
    NumericLiteral(String),

    /// String literal: `"hello"`
    StringLiteral(String),

    /// Boolean literal: `true`, `false`
    BooleanLiteral(bool),

    /// Null literal: `null`
    NullLiteral,

    /// Undefined: `void 0`
    Undefined,

    // =========================================================================
    // Identifiers
    // =========================================================================
    /// Identifier: `foo`, `$type`
    Identifier(String),

    /// This keyword
    This,

    /// The runtime value representing a declared type.
    ///
    /// Prints as the type's qualified script name. In-batch references carry
    /// the target's handle so the scheduler can see them.
    TypeRef(TypeRef),

    // =========================================================================
    // Expressions
    // =========================================================================
    /// Binary expression: `left op right`
    BinaryExpr {
        left: Box<Self>,
        operator: String,
        right: Box<Self>,
    },

    /// Unary prefix expression: `!x`, `-x`, `typeof x`
    PrefixUnaryExpr {
        operator: String,
        operand: Box<Self>,
    },

    /// Call expression: `callee(args)`
    CallExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// New expression: `new Callee(args)`
    NewExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// Property access: `object.property`
    PropertyAccess { object: Box<Self>, property: String },

    /// Element access: `object[index]`
    ElementAccess { object: Box<Self>, index: Box<Self> },

    /// Conditional expression: `cond ? then : else`
    ConditionalExpr {
        condition: Box<Self>,
        when_true: Box<Self>,
        when_false: Box<Self>,
    },

    /// Parenthesized expression: `(expr)`
    Parenthesized(Box<Self>),

    /// Array literal: `[a, b, c]`
    ArrayLiteral(Vec<Self>),

    /// Object literal: `{ key: value, ... }`
    ObjectLiteral(Vec<IRProperty>),

    /// Function expression: `function name(params) { body }`
    FunctionExpr {
        name: Option<String>,
        parameters: Vec<IRParam>,
        body: Vec<Self>,
    },

    // =========================================================================
    // Statements
    // =========================================================================
    /// Variable declaration: `var x = value;`
    VarDecl {
        name: String,
        initializer: Option<Box<Self>>,
    },

    /// Expression statement: `expr;`
    ExpressionStatement(Box<Self>),

    /// Return statement: `return expr;`
    ReturnStatement(Option<Box<Self>>),

    /// If statement: `if (cond) { then } else { else }`
    IfStatement {
        condition: Box<Self>,
        then_branch: Box<Self>,
        else_branch: Option<Box<Self>>,
    },

    /// Block statement: `{ statements }`
    Block(Vec<Self>),

    /// Throw statement: `throw expr;`
    ThrowStatement(Box<Self>),

    // =========================================================================
    // Special
    // =========================================================================
    /// Comment: `/* text */` or `// text`
    Comment { text: String, is_block: bool },

    /// Sequence of statements/nodes
    Sequence(Vec<Self>),
}

/// A resolved reference to a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Handle of the referenced type when it is declared in the current batch.
    /// `None` for external/opaque types.
    #[serde(default)]
    pub target: Option<TypeId>,
    /// Qualified script name, e.g. `App.Models.Customer`.
    pub name: String,
}

impl TypeRef {
    pub fn internal(target: TypeId, name: impl Into<String>) -> Self {
        Self {
            target: Some(target),
            name: name.into(),
        }
    }

    pub fn external(name: impl Into<String>) -> Self {
        Self {
            target: None,
            name: name.into(),
        }
    }
}

/// Property in an object literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IRProperty {
    pub key: IRPropertyKey,
    pub value: IRNode,
}

/// Object property key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IRPropertyKey {
    Identifier(String),
    StringLiteral(String),
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IRParam {
    pub name: String,
    #[serde(default)]
    pub rest: bool,
}

// =========================================================================
// Builder helpers for IR construction
// =========================================================================

impl IRNode {
    /// Create an identifier node
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a string literal
    pub fn string(s: impl Into<String>) -> Self {
        Self::StringLiteral(s.into())
    }

    /// Create a numeric literal
    pub fn number(n: impl Into<String>) -> Self {
        Self::NumericLiteral(n.into())
    }

    /// Create a reference to a type declared in the current batch
    pub fn type_ref(target: TypeId, name: impl Into<String>) -> Self {
        Self::TypeRef(TypeRef::internal(target, name))
    }

    /// Create a reference to a type declared outside the current batch
    pub fn external_type(name: impl Into<String>) -> Self {
        Self::TypeRef(TypeRef::external(name))
    }

    /// Create a dotted member chain: `a.b.c`
    ///
    /// The first segment becomes an identifier; the rest become property accesses.
    pub fn dotted(path: &str) -> Self {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();
        segments.fold(Self::id(first), |object, segment| {
            Self::prop(object, segment)
        })
    }

    /// Create a call expression
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::CallExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Create a method call: `object.method(args)`
    pub fn method_call(object: Self, method: impl Into<String>, args: Vec<Self>) -> Self {
        Self::call(Self::prop(object, method), args)
    }

    /// Create a property access
    pub fn prop(object: Self, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// Create an element access
    pub fn elem(object: Self, index: Self) -> Self {
        Self::ElementAccess {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    /// Create a binary expression
    pub fn binary(left: Self, op: impl Into<String>, right: Self) -> Self {
        Self::BinaryExpr {
            left: Box::new(left),
            operator: op.into(),
            right: Box::new(right),
        }
    }

    /// Create an assignment expression
    pub fn assign(target: Self, value: Self) -> Self {
        Self::BinaryExpr {
            left: Box::new(target),
            operator: "=".to_string(),
            right: Box::new(value),
        }
    }

    /// Create an assignment statement: `target = value;`
    pub fn assign_stmt(target: Self, value: Self) -> Self {
        Self::expr_stmt(Self::assign(target, value))
    }

    /// Create a var declaration
    pub fn var_decl(name: impl Into<String>, init: Option<Self>) -> Self {
        Self::VarDecl {
            name: name.into(),
            initializer: init.map(Box::new),
        }
    }

    /// Create a return statement
    pub fn ret(expr: Option<Self>) -> Self {
        Self::ReturnStatement(expr.map(Box::new))
    }

    /// Create a function expression
    pub const fn func_expr(name: Option<String>, params: Vec<IRParam>, body: Vec<Self>) -> Self {
        Self::FunctionExpr {
            name,
            parameters: params,
            body,
        }
    }

    /// Create a parameterless function that returns `value`: `function () { return value; }`
    pub fn thunk(value: Self) -> Self {
        Self::func_expr(None, Vec::new(), vec![Self::ret(Some(value))])
    }

    /// Create a new expression: `new Constructor(args)`
    pub fn new_expr(callee: Self, args: Vec<Self>) -> Self {
        Self::NewExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Wrap in parentheses
    pub fn paren(self) -> Self {
        Self::Parenthesized(Box::new(self))
    }

    /// Create a block
    pub const fn block(stmts: Vec<Self>) -> Self {
        Self::Block(stmts)
    }

    /// Create an expression statement
    pub fn expr_stmt(expr: Self) -> Self {
        Self::ExpressionStatement(Box::new(expr))
    }

    /// Create an object literal
    pub const fn object(props: Vec<IRProperty>) -> Self {
        Self::ObjectLiteral(props)
    }

    /// Create an array literal
    pub const fn array(elements: Vec<Self>) -> Self {
        Self::ArrayLiteral(elements)
    }

    /// Create a `// text` comment
    pub fn line_comment(text: impl Into<String>) -> Self {
        Self::Comment {
            text: text.into(),
            is_block: false,
        }
    }

    /// Create a sequence of statements
    pub const fn sequence(nodes: Vec<Self>) -> Self {
        Self::Sequence(nodes)
    }
}

impl IRParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest: false,
        }
    }

    pub fn rest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest: true,
        }
    }
}

impl IRProperty {
    /// Create a simple property with identifier key: `{ key: value }`
    pub fn init(key: impl Into<String>, value: IRNode) -> Self {
        Self {
            key: IRPropertyKey::Identifier(key.into()),
            value,
        }
    }

    /// Create a property with string literal key: `{ "key": value }`
    pub fn init_string(key: impl Into<String>, value: IRNode) -> Self {
        Self {
            key: IRPropertyKey::StringLiteral(key.into()),
            value,
        }
    }
}
