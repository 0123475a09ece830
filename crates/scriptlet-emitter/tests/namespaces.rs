use super::*;
use crate::declarations::{ClassDefinition, TypeDeclaration, TypeName};
use crate::transforms::ir_printer::IRPrinter;

fn batch_of(names: &[&str]) -> TypeBatch {
    let mut batch = TypeBatch::new();
    for name in names {
        batch.add(TypeDeclaration::class(
            TypeName::parse(name),
            ClassDefinition::default(),
        ));
    }
    batch
}

fn names(batch: &TypeBatch, order: &[TypeId]) -> Vec<String> {
    order.iter().map(|id| batch.qualified_name(*id)).collect()
}

#[test]
fn test_parents_before_children_and_siblings_lexical() {
    let batch = batch_of(&["Lib.Util", "App.Models.Customer", "App.Main", "Global", "App.Alpha"]);
    let order = NamespaceTree::build(&batch).display_order();
    assert_eq!(
        names(&batch, &order),
        vec![
            "Global",
            "App.Alpha",
            "App.Main",
            "App.Models.Customer",
            "Lib.Util"
        ]
    );
}

#[test]
fn test_nested_types_follow_their_outer_type() {
    let mut batch = TypeBatch::new();
    let outer = TypeName::parse("App.Outer");
    batch.add(TypeDeclaration::class(
        TypeName::parse("App.OuterX"),
        ClassDefinition::default(),
    ));
    batch.add(TypeDeclaration::class(
        TypeName::nested(&outer, "Inner"),
        ClassDefinition::default(),
    ));
    batch.add(TypeDeclaration::class(outer, ClassDefinition::default()));

    let order = NamespaceTree::build(&batch).display_order();
    assert_eq!(
        names(&batch, &order),
        vec!["App.Outer", "App.Outer$Inner", "App.OuterX"]
    );
}

#[test]
fn test_registrar_emits_each_namespace_once() {
    let options = EmitOptions::default();
    let mut registrar = NamespaceRegistrar::new(&options);

    let first = registrar.ensure("App.Models").expect("first use registers");
    assert_eq!(
        IRPrinter::emit_to_string(&first),
        "Type.registerNamespace(\"App.Models\");"
    );
    assert!(registrar.ensure("App.Models").is_none());
    // The parent was created along with the child.
    assert!(registrar.ensure("App").is_none());
    assert!(registrar.ensure("App.Views").is_some());
    assert!(registrar.ensure("").is_none());
}

#[test]
fn test_registrar_uses_configured_type_system() {
    let options = EmitOptions {
        type_system: "ss.Type".to_string(),
        ..EmitOptions::default()
    };
    let mut registrar = NamespaceRegistrar::new(&options);
    let stmt = registrar.ensure("App").expect("registers");
    assert_eq!(
        IRPrinter::emit_to_string(&stmt),
        "ss.Type.registerNamespace(\"App\");"
    );
}
