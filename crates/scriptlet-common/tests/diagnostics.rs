use super::*;

#[test]
fn test_format_message_replaces_placeholders() {
    assert_eq!(format_message("'{0}' and '{1}'", &["a", "b"]), "'a' and 'b'");
    assert_eq!(format_message("no args", &[]), "no args");
}

#[test]
fn test_from_code_uses_message_table() {
    let diag = Diagnostic::from_code(
        diagnostic_codes::ENTRY_POINT_CANNOT_HAVE_PARAMETERS,
        "App.Program.main",
        &["App.Program.main"],
    );
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.code, 7801);
    assert_eq!(diag.symbol, "App.Program.main");
    assert_eq!(
        diag.message_text,
        "The entry point method 'App.Program.main' cannot have any parameters."
    );
}

#[test]
fn test_every_code_has_a_template() {
    for code in [
        diagnostic_codes::ENTRY_POINT_CANNOT_HAVE_PARAMETERS,
        diagnostic_codes::ENTRY_POINT_MUST_BE_A_NORMAL_METHOD,
    ] {
        assert!(
            get_message_template(code).is_some(),
            "missing template for {code}"
        );
    }
}

#[test]
fn test_unknown_code_falls_back_to_bare_code() {
    let diag = Diagnostic::from_code(1, "X", &[]);
    assert_eq!(diag.message_text, "SC1");
    assert_eq!(diag.category, DiagnosticCategory::Error);
}

#[test]
fn test_vec_reporter_collects_in_order() {
    let mut sink: Vec<Diagnostic> = Vec::new();
    sink.report(Diagnostic::error(1, "first".into(), "A".into()));
    sink.report(Diagnostic::error(2, "second".into(), "B".into()));
    assert_eq!(sink.len(), 2);
    assert_eq!(sink[0].code, 1);
    assert_eq!(sink[1].symbol, "B");
}

#[test]
fn test_display_and_serialize() {
    let diag = Diagnostic::from_code(
        diagnostic_codes::ENTRY_POINT_MUST_BE_A_NORMAL_METHOD,
        "App.Program.main",
        &["App.Program.main"],
    );
    let text = diag.to_string();
    assert!(text.starts_with("error SC7802:"), "{text}");
    assert!(text.ends_with("(App.Program.main)"), "{text}");

    let json = serde_json::to_value(&diag).expect("diagnostic should serialize");
    assert_eq!(json["code"], 7802);
    assert_eq!(json["category"], "Error");
}
