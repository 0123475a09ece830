//! Resolved type declarations handed over by the naming phase.
//!
//! A batch is an arena of `TypeDeclaration`s indexed by `TypeId`. Every member
//! already carries its final script name and semantics; nothing here is
//! re-validated. Ids are assigned in declaration order, so comparing two ids
//! compares declaration positions.

use crate::transforms::ir::{IRNode, IRParam, TypeRef};
use serde::{Deserialize, Serialize};

/// Stable handle of a type within a `TypeBatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// Names
// =============================================================================

/// Script name of a type: a dotted namespace path plus the nesting chain
/// (outermost declaration first).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    #[serde(default)]
    pub namespace: Vec<String>,
    pub nesting: Vec<String>,
}

impl TypeName {
    /// Split `A.B.Name` into namespace `[A, B]` and simple name `Name`.
    pub fn parse(qualified: &str) -> Self {
        let mut parts: Vec<String> = qualified.split('.').map(str::to_string).collect();
        let simple = parts.pop().unwrap_or_default();
        Self {
            namespace: parts,
            nesting: vec![simple],
        }
    }

    /// Name of a type declared inside `outer`.
    pub fn nested(outer: &Self, inner: impl Into<String>) -> Self {
        let mut nesting = outer.nesting.clone();
        nesting.push(inner.into());
        Self {
            namespace: outer.namespace.clone(),
            nesting,
        }
    }

    /// `Outer$Inner`
    pub fn simple_name(&self) -> String {
        self.nesting.join("$")
    }

    /// Dotted namespace path, or `None` for the global namespace.
    pub fn namespace_path(&self) -> Option<String> {
        if self.namespace.is_empty() {
            None
        } else {
            Some(self.namespace.join("."))
        }
    }

    /// `A.B.Outer$Inner`
    pub fn qualified(&self) -> String {
        match self.namespace_path() {
            Some(ns) => format!("{ns}.{}", self.simple_name()),
            None => self.simple_name(),
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.qualified())
    }
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: TypeName,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub marker: TypeMarker,
    pub kind: TypeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    Class(ClassDefinition),
    Interface(ClassDefinition),
    Enum(EnumDefinition),
}

/// Special-form marker supplied by the metadata phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum TypeMarker {
    #[default]
    None,
    /// Test fixture: test-marked instance methods are folded into a runner method.
    TestFixture,
    /// Resources holder: emitted as a single object literal of constants.
    Resources(Vec<ResourceEntry>),
    /// Mixin: static methods are attached to the given target expression.
    Mixin(IRNode),
    /// Global methods holder: static methods are attached to the global object.
    GlobalMethods,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub key: String,
    pub value: IRNode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassDefinition {
    pub base: Option<IRNode>,
    pub interfaces: Vec<IRNode>,
    pub unnamed_constructor: Option<Constructor>,
    pub named_constructors: Vec<NamedConstructor>,
    pub instance_methods: Vec<Method>,
    pub static_methods: Vec<Method>,
    pub static_init: Vec<IRNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub parameters: Vec<IRParam>,
    #[serde(default)]
    pub body: Vec<IRNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedConstructor {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<IRParam>,
    #[serde(default)]
    pub body: Vec<IRNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<IRParam>,
    /// `None` for interface stubs and extern declarations.
    #[serde(default)]
    pub body: Option<Vec<IRNode>>,
    #[serde(default)]
    pub semantics: MethodSemantics,
    #[serde(default)]
    pub is_entry_point: bool,
    #[serde(default)]
    pub test: Option<TestMetadata>,
}

/// How the naming phase decided a method is represented in script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodSemantics {
    #[default]
    Normal,
    InlineCode,
    Factory,
    FieldBacked,
    NotUsableFromScript,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMetadata {
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub expected_assertions: Option<u32>,
    #[serde(default)]
    pub is_async: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDefinition {
    pub members: Vec<EnumMember>,
    #[serde(default)]
    pub is_flags: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: EnumMemberValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnumMemberValue {
    Numeric(i64),
    String(String),
}

// =============================================================================
// Builders
// =============================================================================

impl TypeDeclaration {
    pub fn class(name: TypeName, definition: ClassDefinition) -> Self {
        Self {
            name,
            type_parameters: Vec::new(),
            marker: TypeMarker::None,
            kind: TypeKind::Class(definition),
        }
    }

    pub fn interface(name: TypeName, definition: ClassDefinition) -> Self {
        Self {
            name,
            type_parameters: Vec::new(),
            marker: TypeMarker::None,
            kind: TypeKind::Interface(definition),
        }
    }

    pub fn enumeration(name: TypeName, definition: EnumDefinition) -> Self {
        Self {
            name,
            type_parameters: Vec::new(),
            marker: TypeMarker::None,
            kind: TypeKind::Enum(definition),
        }
    }

    pub fn with_type_parameters(mut self, params: &[&str]) -> Self {
        self.type_parameters = params.iter().map(|p| (*p).to_string()).collect();
        self
    }

    pub fn with_marker(mut self, marker: TypeMarker) -> Self {
        self.marker = marker;
        self
    }

    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    /// Class or interface body, `None` for enums.
    pub const fn class_definition(&self) -> Option<&ClassDefinition> {
        match &self.kind {
            TypeKind::Class(def) | TypeKind::Interface(def) => Some(def),
            TypeKind::Enum(_) => None,
        }
    }
}

impl ClassDefinition {
    pub fn with_base(mut self, base: IRNode) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_interface(mut self, interface: IRNode) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_constructor(mut self, parameters: Vec<IRParam>, body: Vec<IRNode>) -> Self {
        self.unnamed_constructor = Some(Constructor { parameters, body });
        self
    }

    pub fn with_named_constructor(
        mut self,
        name: impl Into<String>,
        parameters: Vec<IRParam>,
        body: Vec<IRNode>,
    ) -> Self {
        self.named_constructors.push(NamedConstructor {
            name: name.into(),
            parameters,
            body,
        });
        self
    }

    pub fn with_instance_method(mut self, method: Method) -> Self {
        self.instance_methods.push(method);
        self
    }

    pub fn with_static_method(mut self, method: Method) -> Self {
        self.static_methods.push(method);
        self
    }

    pub fn with_static_init(mut self, statement: IRNode) -> Self {
        self.static_init.push(statement);
        self
    }
}

impl Method {
    /// A method without a body (interface stub).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            body: None,
            semantics: MethodSemantics::Normal,
            is_entry_point: false,
            test: None,
        }
    }

    pub fn with_body(mut self, body: Vec<IRNode>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<IRParam>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_type_parameters(mut self, params: &[&str]) -> Self {
        self.type_parameters = params.iter().map(|p| (*p).to_string()).collect();
        self
    }

    pub const fn with_semantics(mut self, semantics: MethodSemantics) -> Self {
        self.semantics = semantics;
        self
    }

    pub const fn entry_point(mut self) -> Self {
        self.is_entry_point = true;
        self
    }

    pub fn with_test(mut self, test: TestMetadata) -> Self {
        self.test = Some(test);
        self
    }

    /// Method-level type parameters become leading function parameters.
    pub fn script_parameters(&self) -> Vec<IRParam> {
        self.type_parameters
            .iter()
            .map(IRParam::new)
            .chain(self.parameters.iter().cloned())
            .collect()
    }
}

impl TestMetadata {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            category: None,
            expected_assertions: None,
            is_async: false,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub const fn expecting(mut self, assertions: u32) -> Self {
        self.expected_assertions = Some(assertions);
        self
    }

    pub const fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }
}

impl EnumDefinition {
    pub fn numeric(members: &[(&str, i64)]) -> Self {
        Self {
            members: members
                .iter()
                .map(|(name, value)| EnumMember {
                    name: (*name).to_string(),
                    value: EnumMemberValue::Numeric(*value),
                })
                .collect(),
            is_flags: false,
        }
    }

    pub const fn flags(mut self) -> Self {
        self.is_flags = true;
        self
    }
}

// =============================================================================
// TypeBatch
// =============================================================================

/// Immutable-after-construction arena of the types in one emission batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeBatch {
    types: Vec<TypeDeclaration>,
}

impl TypeBatch {
    pub const fn new() -> Self {
        Self { types: Vec::new() }
    }

    pub const fn from_declarations(types: Vec<TypeDeclaration>) -> Self {
        Self { types }
    }

    /// Append a declaration and return its handle.
    pub fn add(&mut self, declaration: TypeDeclaration) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(declaration);
        id
    }

    /// Replace a declaration in place. Used to build batches with forward references.
    pub fn replace(&mut self, id: TypeId, declaration: TypeDeclaration) {
        if let Some(slot) = self.types.get_mut(id.index()) {
            *slot = declaration;
        }
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDeclaration> {
        self.types.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len() as u32).map(TypeId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDeclaration)> + '_ {
        self.types
            .iter()
            .enumerate()
            .map(|(i, decl)| (TypeId(i as u32), decl))
    }

    /// Build a `TypeRef` expression for an in-batch type.
    pub fn type_ref(&self, id: TypeId) -> IRNode {
        let name = self
            .get(id)
            .map(|decl| decl.name.qualified())
            .unwrap_or_default();
        IRNode::TypeRef(TypeRef::internal(id, name))
    }

    /// Qualified name of `id`, or an empty string for an unknown handle.
    pub fn qualified_name(&self, id: TypeId) -> String {
        self.get(id)
            .map(|decl| decl.name.qualified())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../tests/declarations.rs"]
mod tests;
