//! Type emitter (IR-based)
//!
//! Builds the runtime object-layout fragment of one type.
//!
//! ```text
//! class App.Point : App.Shape, App.IDrawable {
//!     Point(x) { this.x = x; }
//!     static Point FromPair(pair) { ... }   // named constructor
//!     void Draw() { ... }
//!     static Point Origin() { ... }
//! }
//! ```
//!
//! Becomes IR that prints as:
//!
//! ```javascript
//! // App.Point
//! App.Point = function (x) {
//!     this.x = x;
//! };
//! App.Point.prototype = {
//!     draw: function () {
//!         ...
//!     }
//! };
//! App.Point.fromPair = function (pair) {
//!     ...
//! };
//! App.Point.fromPair.prototype = App.Point.prototype;
//! App.Point.origin = function () {
//!     ...
//! };
//! App.Point.registerClass("App.Point", App.Shape, App.IDrawable);
//! ```
//!
//! ## Generic types
//!
//! The per-instance fragment is wrapped in a factory taking the type
//! parameters. Inside the factory the instantiated type is the local
//! placeholder binding (`$type` by default):
//!
//! ```javascript
//! App.List$1 = function (T) {
//!     var $type = function () { };
//!     $type.prototype = { ... };
//!     Type.registerGenericClassInstance($type, App.List$1, [T], function () {
//!         return App.Collection;
//!     });
//!     return $type;
//! };
//! App.List$1.registerGenericClass("App.List$1", 1);
//! ```

use crate::declarations::{
    ClassDefinition, EnumDefinition, EnumMemberValue, Method, TypeBatch, TypeDeclaration, TypeId,
    TypeKind,
};
use crate::options::EmitOptions;
use crate::transforms::ir::{IRNode, IRParam, IRProperty};

/// The closed set of emission paths.
#[derive(Debug, Clone, Copy)]
pub enum TypeShape<'d> {
    Class(&'d ClassDefinition),
    Interface(&'d ClassDefinition),
    Enum(&'d EnumDefinition),
    Generic {
        definition: &'d ClassDefinition,
        is_interface: bool,
        type_parameters: &'d [String],
    },
}

impl<'d> TypeShape<'d> {
    pub fn of(decl: &'d TypeDeclaration) -> Self {
        match &decl.kind {
            TypeKind::Enum(def) => Self::Enum(def),
            TypeKind::Class(def) | TypeKind::Interface(def) if decl.is_generic() => Self::Generic {
                definition: def,
                is_interface: matches!(decl.kind, TypeKind::Interface(_)),
                type_parameters: &decl.type_parameters,
            },
            TypeKind::Class(def) => Self::Class(def),
            TypeKind::Interface(def) => Self::Interface(def),
        }
    }
}

/// Emits type fragments for one batch.
pub struct TypeEmitter<'a> {
    batch: &'a TypeBatch,
    options: &'a EmitOptions,
}

impl<'a> TypeEmitter<'a> {
    pub const fn new(batch: &'a TypeBatch, options: &'a EmitOptions) -> Self {
        Self { batch, options }
    }

    /// Fragment for `decl`, which is `id`'s declaration or a rewrite of it.
    pub fn emit_type(&self, id: TypeId, decl: &TypeDeclaration) -> Vec<IRNode> {
        let qualified = decl.name.qualified();
        let target = self.batch.type_ref(id);
        let mut out = self.banner(decl);

        match TypeShape::of(decl) {
            TypeShape::Class(def) => {
                out.push(IRNode::assign_stmt(
                    target.clone(),
                    constructor_function(def, false),
                ));
                out.extend(self.members(def, &target, false, None));
                out.push(self.class_registration(&target, &qualified, def));
            }
            TypeShape::Interface(def) => {
                out.push(IRNode::assign_stmt(
                    target.clone(),
                    constructor_function(def, true),
                ));
                out.extend(self.members(def, &target, true, None));
                out.push(self.interface_registration(&target, &qualified, def));
            }
            TypeShape::Enum(def) => out.extend(self.enum_fragment(&target, &qualified, def)),
            TypeShape::Generic {
                definition,
                is_interface,
                type_parameters,
            } => out.extend(self.generic_fragment(
                &target,
                &qualified,
                definition,
                is_interface,
                type_parameters,
            )),
        }

        tracing::trace!(name = %qualified, statements = out.len(), "emitted type");
        out
    }

    /// `// App.Point`, when banners are enabled.
    pub fn banner(&self, decl: &TypeDeclaration) -> Vec<IRNode> {
        if self.options.emit_type_banners {
            vec![IRNode::line_comment(decl.name.qualified())]
        } else {
            Vec::new()
        }
    }

    /// Prototype, named constructors and static methods of a class or
    /// interface, assigned onto `target`.
    ///
    /// `instance_registration` is placed right after the prototype.
    fn members(
        &self,
        def: &ClassDefinition,
        target: &IRNode,
        is_interface: bool,
        instance_registration: Option<IRNode>,
    ) -> Vec<IRNode> {
        let mut out = Vec::new();

        if !def.instance_methods.is_empty() {
            let properties = def
                .instance_methods
                .iter()
                .map(|method| IRProperty::init(&method.name, prototype_member(method)))
                .collect();
            out.push(IRNode::assign_stmt(
                IRNode::prop(target.clone(), "prototype"),
                IRNode::object(properties),
            ));
        }

        out.extend(instance_registration);

        if !is_interface {
            out.extend(named_constructors(def, target));
        }

        for method in &def.static_methods {
            if let Some(function) = method_function(method) {
                out.push(IRNode::assign_stmt(
                    IRNode::prop(target.clone(), &method.name),
                    function,
                ));
            }
        }
        out
    }

    /// `T.registerClass(name[, base|null[, I1, ...]])`
    fn class_registration(&self, target: &IRNode, qualified: &str, def: &ClassDefinition) -> IRNode {
        let mut args = vec![IRNode::string(qualified)];
        if def.base.is_some() || !def.interfaces.is_empty() {
            args.push(def.base.clone().unwrap_or(IRNode::NullLiteral));
            args.extend(def.interfaces.iter().cloned());
        }
        IRNode::expr_stmt(IRNode::method_call(target.clone(), "registerClass", args))
    }

    /// `T.registerInterface(name[, [I1, ...]])`
    fn interface_registration(
        &self,
        target: &IRNode,
        qualified: &str,
        def: &ClassDefinition,
    ) -> IRNode {
        let mut args = vec![IRNode::string(qualified)];
        if !def.interfaces.is_empty() {
            args.push(IRNode::array(def.interfaces.clone()));
        }
        IRNode::expr_stmt(IRNode::method_call(target.clone(), "registerInterface", args))
    }

    fn enum_fragment(&self, target: &IRNode, qualified: &str, def: &EnumDefinition) -> Vec<IRNode> {
        let values = def
            .members
            .iter()
            .map(|member| {
                let value = match &member.value {
                    EnumMemberValue::Numeric(n) => IRNode::number(n.to_string()),
                    EnumMemberValue::String(s) => IRNode::string(s.as_str()),
                };
                IRProperty::init(&member.name, value)
            })
            .collect();

        vec![
            IRNode::assign_stmt(
                target.clone(),
                IRNode::func_expr(None, Vec::new(), Vec::new()),
            ),
            IRNode::assign_stmt(
                IRNode::prop(target.clone(), "prototype"),
                IRNode::object(values),
            ),
            IRNode::expr_stmt(IRNode::method_call(
                target.clone(),
                "registerEnum",
                vec![IRNode::string(qualified), IRNode::BooleanLiteral(def.is_flags)],
            )),
        ]
    }

    fn generic_fragment(
        &self,
        target: &IRNode,
        qualified: &str,
        def: &ClassDefinition,
        is_interface: bool,
        type_parameters: &[String],
    ) -> Vec<IRNode> {
        let placeholder = IRNode::id(&self.options.generic_placeholder);
        let type_arguments: Vec<IRNode> = type_parameters.iter().map(IRNode::id).collect();

        let registration =
            self.instance_registration(&placeholder, target, type_arguments, def, is_interface);
        let mut layout = vec![IRNode::var_decl(
            &self.options.generic_placeholder,
            Some(constructor_function(def, is_interface)),
        )];
        layout.extend(self.members(def, &placeholder, is_interface, Some(registration)));
        layout.extend(def.static_init.iter().cloned());
        layout.push(IRNode::ret(Some(placeholder)));

        let factory = IRNode::func_expr(
            None,
            type_parameters.iter().map(IRParam::new).collect(),
            layout,
        );
        let definition_registration = if is_interface {
            "registerGenericInterface"
        } else {
            "registerGenericClass"
        };
        vec![
            IRNode::assign_stmt(target.clone(), factory),
            IRNode::expr_stmt(IRNode::method_call(
                target.clone(),
                definition_registration,
                vec![
                    IRNode::string(qualified),
                    IRNode::number(type_parameters.len().to_string()),
                ],
            )),
        ]
    }

    /// `Type.registerGenericClassInstance($type, Def, [T], () => base, () => [I])`
    fn instance_registration(
        &self,
        placeholder: &IRNode,
        definition: &IRNode,
        type_arguments: Vec<IRNode>,
        def: &ClassDefinition,
        is_interface: bool,
    ) -> IRNode {
        let mut args = vec![
            placeholder.clone(),
            definition.clone(),
            IRNode::array(type_arguments),
        ];
        let interfaces = (!def.interfaces.is_empty())
            .then(|| IRNode::thunk(IRNode::array(def.interfaces.clone())));

        let helper = if is_interface {
            args.extend(interfaces);
            "registerGenericInterfaceInstance"
        } else {
            match (&def.base, interfaces) {
                (Some(base), interfaces) => {
                    args.push(IRNode::thunk(base.clone()));
                    args.extend(interfaces);
                }
                (None, Some(interfaces)) => {
                    args.push(IRNode::NullLiteral);
                    args.push(interfaces);
                }
                (None, None) => {}
            }
            "registerGenericClassInstance"
        };
        IRNode::expr_stmt(IRNode::method_call(
            IRNode::dotted(&self.options.type_system),
            helper,
            args,
        ))
    }
}

/// Primary constructor: the unnamed constructor's body, or an empty function.
fn constructor_function(def: &ClassDefinition, is_interface: bool) -> IRNode {
    match &def.unnamed_constructor {
        Some(ctor) if !is_interface => {
            IRNode::func_expr(None, ctor.parameters.clone(), ctor.body.clone())
        }
        _ => IRNode::func_expr(None, Vec::new(), Vec::new()),
    }
}

/// Prototype value: a function, or `null` for a stub without a body.
fn prototype_member(method: &Method) -> IRNode {
    method_function(method).unwrap_or(IRNode::NullLiteral)
}

/// Function expression for a method with a body.
pub(crate) fn method_function(method: &Method) -> Option<IRNode> {
    method
        .body
        .as_ref()
        .map(|body| IRNode::func_expr(None, method.script_parameters(), body.clone()))
}

/// Secondary constructors plus one statement sharing the primary prototype:
/// `T.a.prototype = T.b.prototype = T.prototype;`
fn named_constructors(def: &ClassDefinition, target: &IRNode) -> Vec<IRNode> {
    if def.named_constructors.is_empty() {
        return Vec::new();
    }
    let mut out: Vec<IRNode> = def
        .named_constructors
        .iter()
        .map(|ctor| {
            IRNode::assign_stmt(
                IRNode::prop(target.clone(), &ctor.name),
                IRNode::func_expr(None, ctor.parameters.clone(), ctor.body.clone()),
            )
        })
        .collect();

    let shared = def.named_constructors.iter().rev().fold(
        IRNode::prop(target.clone(), "prototype"),
        |value, ctor| {
            IRNode::assign(
                IRNode::prop(IRNode::prop(target.clone(), &ctor.name), "prototype"),
                value,
            )
        },
    );
    out.push(IRNode::expr_stmt(shared));
    out
}

#[cfg(test)]
#[path = "../../tests/type_ir.rs"]
mod tests;
