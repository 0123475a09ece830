use super::*;
use crate::declarations::{MethodSemantics, TypeName};
use crate::transforms::ir_printer::IRPrinter;

fn render_with(decl: TypeDeclaration, options: &EmitOptions) -> String {
    let mut batch = TypeBatch::new();
    let id = batch.add(decl);
    let emitter = TypeEmitter::new(&batch, options);
    let decl = batch.get(id).expect("declared");
    IRPrinter::emit_statements(&emitter.emit_type(id, decl))
}

fn render(decl: TypeDeclaration) -> String {
    render_with(decl, &EmitOptions::default())
}

fn this_assign(field: &str) -> IRNode {
    IRNode::assign_stmt(IRNode::prop(IRNode::This, field), IRNode::id(field))
}

#[test]
fn test_minimal_class() {
    let decl = TypeDeclaration::class(
        TypeName::parse("Point"),
        ClassDefinition::default().with_constructor(vec![IRParam::new("x")], vec![this_assign("x")]),
    );
    assert_eq!(
        render(decl),
        "// Point\n\
         Point = function (x) {\n    this.x = x;\n};\n\
         Point.registerClass(\"Point\");\n"
    );
}

#[test]
fn test_class_without_constructor_gets_empty_function() {
    let decl = TypeDeclaration::class(TypeName::parse("App.Empty"), ClassDefinition::default());
    assert_eq!(
        render(decl),
        "// App.Empty\n\
         App.Empty = function () { };\n\
         App.Empty.registerClass(\"App.Empty\");\n"
    );
}

#[test]
fn test_class_registration_with_base_and_interfaces() {
    let decl = TypeDeclaration::class(
        TypeName::parse("App.Circle"),
        ClassDefinition::default()
            .with_base(IRNode::external_type("App.Shape"))
            .with_interface(IRNode::external_type("App.IDrawable"))
            .with_interface(IRNode::external_type("ss.IDisposable")),
    );
    let text = render(decl);
    assert!(text.ends_with(
        "App.Circle.registerClass(\"App.Circle\", App.Shape, App.IDrawable, ss.IDisposable);\n"
    ));
}

#[test]
fn test_class_registration_with_interfaces_only_passes_null_base() {
    let decl = TypeDeclaration::class(
        TypeName::parse("Widget"),
        ClassDefinition::default().with_interface(IRNode::external_type("IWidget")),
    );
    assert!(render(decl).ends_with("Widget.registerClass(\"Widget\", null, IWidget);\n"));
}

#[test]
fn test_prototype_and_static_members() {
    let decl = TypeDeclaration::class(
        TypeName::parse("Counter"),
        ClassDefinition::default()
            .with_instance_method(
                Method::new("increment").with_body(vec![IRNode::expr_stmt(IRNode::PrefixUnaryExpr {
                    operator: "++".to_string(),
                    operand: Box::new(IRNode::prop(IRNode::This, "count")),
                })]),
            )
            .with_instance_method(
                Method::new("convert")
                    .with_type_parameters(&["TOut"])
                    .with_parameters(vec![IRParam::new("value")])
                    .with_body(vec![IRNode::ret(Some(IRNode::id("value")))]),
            )
            .with_static_method(Method::new("create").with_body(vec![IRNode::ret(Some(
                IRNode::new_expr(IRNode::id("Counter"), vec![]),
            ))]))
            .with_static_method(Method::new("native")),
    );
    assert_eq!(
        render(decl),
        "// Counter\n\
         Counter = function () { };\n\
         Counter.prototype = {\n\
         \x20   increment: function () {\n\
         \x20       ++this.count;\n\
         \x20   },\n\
         \x20   convert: function (TOut, value) {\n\
         \x20       return value;\n\
         \x20   }\n\
         };\n\
         Counter.create = function () {\n\
         \x20   return new Counter();\n\
         };\n\
         Counter.registerClass(\"Counter\");\n"
    );
}

#[test]
fn test_named_constructors_share_primary_prototype() {
    let decl = TypeDeclaration::class(
        TypeName::parse("P"),
        ClassDefinition::default()
            .with_named_constructor("a", vec![], vec![])
            .with_named_constructor("b", vec![IRParam::new("x")], vec![this_assign("x")]),
    );
    assert_eq!(
        render(decl),
        "// P\n\
         P = function () { };\n\
         P.a = function () { };\n\
         P.b = function (x) {\n    this.x = x;\n};\n\
         P.a.prototype = P.b.prototype = P.prototype;\n\
         P.registerClass(\"P\");\n"
    );
}

#[test]
fn test_interface_stubs_are_null() {
    let decl = TypeDeclaration::interface(
        TypeName::parse("App.IDrawable"),
        ClassDefinition::default()
            .with_instance_method(Method::new("draw"))
            .with_interface(IRNode::external_type("App.IBase")),
    );
    assert_eq!(
        render(decl),
        "// App.IDrawable\n\
         App.IDrawable = function () { };\n\
         App.IDrawable.prototype = {\n    draw: null\n};\n\
         App.IDrawable.registerInterface(\"App.IDrawable\", [App.IBase]);\n"
    );
}

#[test]
fn test_interface_without_bases_registers_name_only() {
    let decl = TypeDeclaration::interface(TypeName::parse("IMarker"), ClassDefinition::default());
    assert!(render(decl).ends_with("IMarker.registerInterface(\"IMarker\");\n"));
}

#[test]
fn test_interface_ignores_constructors() {
    let decl = TypeDeclaration::interface(
        TypeName::parse("I"),
        ClassDefinition::default()
            .with_constructor(vec![IRParam::new("x")], vec![this_assign("x")])
            .with_named_constructor("other", vec![], vec![]),
    );
    assert_eq!(
        render(decl),
        "// I\nI = function () { };\nI.registerInterface(\"I\");\n"
    );
}

#[test]
fn test_enum_fragment() {
    let decl = TypeDeclaration::enumeration(
        TypeName::parse("App.Color"),
        EnumDefinition::numeric(&[("red", 0), ("green", 1)]),
    );
    assert_eq!(
        render(decl),
        "// App.Color\n\
         App.Color = function () { };\n\
         App.Color.prototype = {\n    red: 0,\n    green: 1\n};\n\
         App.Color.registerEnum(\"App.Color\", false);\n"
    );
}

#[test]
fn test_flags_enum_with_string_member() {
    let mut def = EnumDefinition::numeric(&[("none", 0), ("read", 1), ("write", 2)]).flags();
    def.members.push(crate::declarations::EnumMember {
        name: "label".to_string(),
        value: EnumMemberValue::String("rw".to_string()),
    });
    let text = render(TypeDeclaration::enumeration(TypeName::parse("Access"), def));
    assert!(text.contains("    label: \"rw\"\n"));
    assert!(text.ends_with("Access.registerEnum(\"Access\", true);\n"));
}

#[test]
fn test_generic_class_factory() {
    let decl = TypeDeclaration::class(
        TypeName::parse("App.List$1"),
        ClassDefinition::default()
            .with_interface(IRNode::external_type("App.IList"))
            .with_instance_method(Method::new("clear").with_body(vec![IRNode::ret(None)])),
    )
    .with_type_parameters(&["T"]);
    assert_eq!(
        render(decl),
        "// App.List$1\n\
         App.List$1 = function (T) {\n\
         \x20   var $type = function () { };\n\
         \x20   $type.prototype = {\n\
         \x20       clear: function () {\n\
         \x20           return;\n\
         \x20       }\n\
         \x20   };\n\
         \x20   Type.registerGenericClassInstance($type, App.List$1, [T], null, function () {\n\
         \x20       return [App.IList];\n\
         \x20   });\n\
         \x20   return $type;\n\
         };\n\
         App.List$1.registerGenericClass(\"App.List$1\", 1);\n"
    );
}

#[test]
fn test_generic_class_with_base_and_static_init() {
    let decl = TypeDeclaration::class(
        TypeName::parse("Pair$2"),
        ClassDefinition::default()
            .with_base(IRNode::external_type("Base"))
            .with_static_init(IRNode::assign_stmt(
                IRNode::prop(IRNode::id("$type"), "empty"),
                IRNode::NullLiteral,
            )),
    )
    .with_type_parameters(&["K", "V"]);
    assert_eq!(
        render(decl),
        "// Pair$2\n\
         Pair$2 = function (K, V) {\n\
         \x20   var $type = function () { };\n\
         \x20   Type.registerGenericClassInstance($type, Pair$2, [K, V], function () {\n\
         \x20       return Base;\n\
         \x20   });\n\
         \x20   $type.empty = null;\n\
         \x20   return $type;\n\
         };\n\
         Pair$2.registerGenericClass(\"Pair$2\", 2);\n"
    );
}

#[test]
fn test_generic_interface_factory() {
    let decl = TypeDeclaration::interface(TypeName::parse("IBox$1"), ClassDefinition::default())
        .with_type_parameters(&["T"]);
    assert_eq!(
        render(decl),
        "// IBox$1\n\
         IBox$1 = function (T) {\n\
         \x20   var $type = function () { };\n\
         \x20   Type.registerGenericInterfaceInstance($type, IBox$1, [T]);\n\
         \x20   return $type;\n\
         };\n\
         IBox$1.registerGenericInterface(\"IBox$1\", 1);\n"
    );
}

#[test]
fn test_generic_placeholder_and_type_system_are_configurable() {
    let options = EmitOptions {
        generic_placeholder: "$t".to_string(),
        type_system: "ss".to_string(),
        emit_type_banners: false,
        ..EmitOptions::default()
    };
    let decl = TypeDeclaration::class(TypeName::parse("Box$1"), ClassDefinition::default())
        .with_type_parameters(&["T"]);
    let text = render_with(decl, &options);
    assert!(text.starts_with("Box$1 = function (T) {\n    var $t = function () { };\n"));
    assert!(text.contains("    ss.registerGenericClassInstance($t, Box$1, [T]);\n"));
}

#[test]
fn test_banner_disabled() {
    let options = EmitOptions {
        emit_type_banners: false,
        ..EmitOptions::default()
    };
    let decl = TypeDeclaration::class(TypeName::parse("A"), ClassDefinition::default());
    assert_eq!(
        render_with(decl, &options),
        "A = function () { };\nA.registerClass(\"A\");\n"
    );
}

#[test]
fn test_type_shape_classification() {
    let class = TypeDeclaration::class(TypeName::parse("A"), ClassDefinition::default());
    let generic = class.clone().with_type_parameters(&["T"]);
    let iface = TypeDeclaration::interface(TypeName::parse("I"), ClassDefinition::default());
    let enumeration = TypeDeclaration::enumeration(TypeName::parse("E"), EnumDefinition::default());

    assert!(matches!(TypeShape::of(&class), TypeShape::Class(_)));
    assert!(matches!(
        TypeShape::of(&generic),
        TypeShape::Generic {
            is_interface: false,
            ..
        }
    ));
    assert!(matches!(TypeShape::of(&iface), TypeShape::Interface(_)));
    assert!(matches!(TypeShape::of(&enumeration), TypeShape::Enum(_)));
}

#[test]
fn test_method_function_skips_bodiless_methods() {
    assert!(method_function(&Method::new("stub")).is_none());
    let inline = Method::new("inline")
        .with_semantics(MethodSemantics::InlineCode)
        .with_body(vec![]);
    assert_eq!(
        method_function(&inline),
        Some(IRNode::func_expr(None, vec![], vec![]))
    );
}
