//! Special-form transforms for marked types.
//!
//! - Global methods holder: static methods become properties of the global object.
//! - Resources holder: one object literal of constants, no constructor or registration.
//! - Mixin: static methods become properties of a configured target expression.
//! - Test fixture: test methods are folded into one synthesized runner method.
//! - Entry point: one trailing invocation, checked for kind and arity.

use crate::declarations::{
    ClassDefinition, Method, MethodSemantics, ResourceEntry, TypeBatch, TypeDeclaration, TypeId,
    TypeMarker,
};
use crate::options::EmitOptions;
use crate::transforms::ir::{IRNode, IRProperty};
use crate::transforms::type_ir::method_function;
use scriptlet_common::{Diagnostic, DiagnosticReporter, diagnostic_codes};

/// Expression a type's static methods are attached to.
pub fn static_member_target(
    batch: &TypeBatch,
    id: TypeId,
    decl: &TypeDeclaration,
    options: &EmitOptions,
) -> IRNode {
    match &decl.marker {
        TypeMarker::GlobalMethods => IRNode::dotted(&options.global_object),
        TypeMarker::Mixin(target) => target.clone(),
        TypeMarker::None | TypeMarker::TestFixture | TypeMarker::Resources(_) => {
            batch.type_ref(id)
        }
    }
}

/// Assign every static method with a body onto `target`.
///
/// Shared by global-methods holders and mixins; neither gets a constructor,
/// prototype or registration.
pub fn attach_static_methods(def: &ClassDefinition, target: &IRNode) -> Vec<IRNode> {
    def.static_methods
        .iter()
        .filter_map(|method| {
            method_function(method).map(|function| {
                IRNode::assign_stmt(IRNode::prop(target.clone(), &method.name), function)
            })
        })
        .collect()
}

/// `App.Strings = { key: value, ... };`
pub fn resources_literal(target: IRNode, entries: &[ResourceEntry]) -> IRNode {
    let properties = entries
        .iter()
        .map(|entry| IRProperty::init(&entry.key, entry.value.clone()))
        .collect();
    IRNode::assign_stmt(target, IRNode::object(properties))
}

// =============================================================================
// Test fixtures
// =============================================================================

/// Replace test-marked instance methods with a single runner method.
///
/// Uncategorized tests are registered first in declaration order, then each
/// category in order of first occurrence, introduced by a begin-category call:
///
/// ```javascript
/// runTests: function () {
///     test("adds", 2, (function () { ... }).bind(this));
///     module("Parsing");
///     asyncTest("loads", (function () { ... }).bind(this));
/// }
/// ```
pub fn rewrite_test_fixture(def: &ClassDefinition, options: &EmitOptions) -> ClassDefinition {
    let (tests, mut kept): (Vec<&Method>, Vec<&Method>) = def
        .instance_methods
        .iter()
        .partition(|method| method.test.is_some());

    let mut categories: Vec<(Option<&str>, Vec<&Method>)> = vec![(None, Vec::new())];
    for method in tests {
        let category = method.test.as_ref().and_then(|t| t.category.as_deref());
        match categories.iter().position(|(name, _)| *name == category) {
            Some(index) => categories[index].1.push(method),
            None => categories.push((category, vec![method])),
        }
    }

    let names = &options.test_functions;
    let mut runner_body = Vec::new();
    for (category, group) in &categories {
        if let Some(category) = category {
            runner_body.push(IRNode::expr_stmt(IRNode::call(
                IRNode::id(&names.begin_category),
                vec![IRNode::string(*category)],
            )));
        }
        for method in group {
            let Some(test) = &method.test else { continue };
            let mut args = vec![IRNode::string(test.description.as_str())];
            if let Some(expected) = test.expected_assertions {
                args.push(IRNode::number(expected.to_string()));
            }
            let body = IRNode::func_expr(None, Vec::new(), method.body.clone().unwrap_or_default());
            args.push(IRNode::method_call(body, "bind", vec![IRNode::This]));

            let register = if test.is_async {
                &names.async_test
            } else {
                &names.test
            };
            runner_body.push(IRNode::expr_stmt(IRNode::call(IRNode::id(register), args)));
        }
    }

    let runner = Method::new(options.test_runner_method.clone()).with_body(runner_body);
    kept.push(&runner);

    ClassDefinition {
        instance_methods: kept.into_iter().cloned().collect(),
        ..def.clone()
    }
}

// =============================================================================
// Entry point
// =============================================================================

/// Trailing `Target.main();` for the first static method marked as entry point.
///
/// A method that is not an ordinary method, that takes parameters, or whose
/// owner never exposes it (generic types, resources holders) is reported and
/// no invocation is produced.
pub fn entry_point_invocation(
    batch: &TypeBatch,
    options: &EmitOptions,
    reporter: &mut impl DiagnosticReporter,
) -> Option<IRNode> {
    let (id, decl, method) = batch.iter().find_map(|(id, decl)| {
        decl.class_definition()?
            .static_methods
            .iter()
            .find(|m| m.is_entry_point)
            .map(|m| (id, decl, m))
    })?;

    let symbol = format!("{}.{}", decl.name.qualified(), method.name);
    if method.semantics != MethodSemantics::Normal
        || method.body.is_none()
        || !owner_exposes_statics(decl)
    {
        tracing::debug!(%symbol, semantics = ?method.semantics, "entry point is not invocable");
        reporter.report(Diagnostic::from_code(
            diagnostic_codes::ENTRY_POINT_MUST_BE_A_NORMAL_METHOD,
            symbol.clone(),
            &[symbol.as_str()],
        ));
        return None;
    }
    if !method.script_parameters().is_empty() {
        tracing::debug!(%symbol, "entry point declares parameters");
        reporter.report(Diagnostic::from_code(
            diagnostic_codes::ENTRY_POINT_CANNOT_HAVE_PARAMETERS,
            symbol.clone(),
            &[symbol.as_str()],
        ));
        return None;
    }

    let target = static_member_target(batch, id, decl, options);
    Some(IRNode::expr_stmt(IRNode::method_call(
        target,
        &method.name,
        Vec::new(),
    )))
}

/// Whether the owner's static methods end up reachable from its static-member target.
///
/// Generic types assign statics to each instantiation inside the factory;
/// resources holders emit no methods at all.
fn owner_exposes_statics(decl: &TypeDeclaration) -> bool {
    !decl.is_generic() && !matches!(decl.marker, TypeMarker::Resources(_))
}

#[cfg(test)]
#[path = "../../tests/special_forms.rs"]
mod tests;
