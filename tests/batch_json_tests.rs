//! End-to-end tests for the JSON hand-off.

use scriptlet::common::diagnostic_codes;
use scriptlet::{CompiledBatch, compile_json};
use serde_json::{Value, json};

fn type_ref(target: u32, name: &str) -> Value {
    json!({ "TypeRef": { "target": target, "name": name } })
}

fn call_stmt(object: Value, method: &str) -> Value {
    json!({
        "ExpressionStatement": {
            "CallExpr": {
                "callee": { "PropertyAccess": { "object": object, "property": method } },
                "arguments": []
            }
        }
    })
}

fn class(namespace: &[&str], name: &str, definition: Value) -> Value {
    json!({
        "name": { "namespace": namespace, "nesting": [name] },
        "kind": { "Class": definition }
    })
}

fn compile(input: &Value) -> CompiledBatch {
    compile_json(&input.to_string()).expect("batch should compile")
}

#[test]
fn test_compile_small_program() {
    let input = json!({
        "types": [
            class(&["App"], "Program", json!({
                "static_methods": [{
                    "name": "main",
                    "body": [call_stmt(type_ref(1, "App.Greeter"), "greet")],
                    "is_entry_point": true
                }]
            })),
            class(&["App"], "Greeter", json!({
                "static_methods": [{ "name": "greet", "body": [] }]
            }))
        ]
    });

    let compiled = compile(&input);
    assert_eq!(compiled.declaration_order, vec!["App.Greeter", "App.Program"]);
    assert_eq!(compiled.static_init_order, vec!["App.Program", "App.Greeter"]);
    assert!(compiled.diagnostics.is_empty());
    assert!(!compiled.has_errors());
    assert_eq!(
        compiled.text,
        "Type.registerNamespace(\"App\");\n\
         // App.Greeter\n\
         App.Greeter = function () { };\n\
         App.Greeter.greet = function () { };\n\
         App.Greeter.registerClass(\"App.Greeter\");\n\
         // App.Program\n\
         App.Program = function () { };\n\
         App.Program.main = function () {\n\
         \x20   App.Greeter.greet();\n\
         };\n\
         App.Program.registerClass(\"App.Program\");\n\
         App.Program.main();\n"
    );
}

#[test]
fn test_partial_options_override_defaults() {
    let input = json!({
        "options": { "globalObject": "self", "emitTypeBanners": false },
        "types": [{
            "name": { "nesting": ["Util"] },
            "marker": "GlobalMethods",
            "kind": { "Class": { "static_methods": [{ "name": "log", "body": [] }] } }
        }]
    });
    assert_eq!(compile(&input).text, "self.log = function () { };\n");
}

#[test]
fn test_entry_point_diagnostic_is_serialized() {
    let input = json!({
        "types": [class(&["App"], "Program", json!({
            "static_methods": [{
                "name": "main",
                "parameters": [{ "name": "args" }],
                "body": [],
                "is_entry_point": true
            }]
        }))]
    });

    let compiled = compile(&input);
    assert!(compiled.has_errors());
    assert!(!compiled.text.contains("App.Program.main();"));

    let value = serde_json::to_value(&compiled).expect("serializable");
    let diagnostics = value["diagnostics"].as_array().expect("diagnostics array");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0]["code"],
        json!(diagnostic_codes::ENTRY_POINT_CANNOT_HAVE_PARAMETERS)
    );
    assert_eq!(diagnostics[0]["symbol"], json!("App.Program.main"));
    assert_eq!(diagnostics[0]["category"], json!("Error"));
}

#[test]
fn test_result_uses_camel_case_keys() {
    let compiled = compile(&json!({ "types": [] }));
    let value = serde_json::to_value(&compiled).expect("serializable");
    assert_eq!(
        value,
        json!({
            "text": "",
            "declarationOrder": [],
            "staticInitOrder": [],
            "diagnostics": []
        })
    );
}

#[test]
fn test_reference_chain_static_init_order() {
    // C1 references nothing; every later Ck references C(k-1) from a static method.
    let mut types = vec![class(&[], "C1", json!({}))];
    for k in 2..=6u32 {
        let previous = format!("C{}", k - 1);
        types.push(class(&[], &format!("C{k}"), json!({
            "static_methods": [{
                "name": "get",
                "body": [call_stmt(type_ref(k - 2, &previous), "get")]
            }]
        })));
    }
    let compiled = compile(&json!({ "types": types }));
    assert_eq!(
        compiled.static_init_order,
        vec!["C6", "C5", "C4", "C3", "C2", "C1"]
    );
}

#[test]
fn test_enum_and_interface_from_json() {
    let input = json!({
        "types": [
            {
                "name": { "namespace": ["App"], "nesting": ["Color"] },
                "kind": { "Enum": {
                    "members": [{ "name": "red", "value": { "Numeric": 1 } }],
                    "is_flags": true
                } }
            },
            {
                "name": { "namespace": ["App"], "nesting": ["IShape"] },
                "kind": { "Interface": { "instance_methods": [{ "name": "area" }] } }
            }
        ]
    });
    let text = compile(&input).text;
    assert!(text.contains("App.Color.registerEnum(\"App.Color\", true);\n"));
    assert!(text.contains("App.IShape.prototype = {\n    area: null\n};\n"));
    assert_eq!(text.matches("registerNamespace").count(), 1);
}

#[test]
fn test_compilation_is_deterministic() {
    let input = json!({
        "types": [
            class(&["A"], "X", json!({
                "unnamed_constructor": { "body": [call_stmt(type_ref(1, "A.Y"), "make")] }
            })),
            class(&["A"], "Y", json!({
                "instance_methods": [{
                    "name": "m",
                    "body": [call_stmt(type_ref(0, "A.X"), "make")]
                }]
            }))
        ]
    });
    let first = compile(&input);
    let second = compile(&input);
    assert_eq!(first.text, second.text);
    assert_eq!(first.static_init_order, second.static_init_order);
    assert_eq!(first.static_init_order, vec!["A.X", "A.Y"]);
}

#[test]
fn test_malformed_input_is_an_error() {
    let err = compile_json("{ \"types\": 3 }").expect_err("types must be an array");
    assert!(
        err.to_string().contains("failed to parse batch JSON"),
        "unexpected error: {err}"
    );
    assert!(compile_json("not json").is_err());
}
