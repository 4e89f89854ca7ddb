use crate::common::{self, MODEL};
use aster::config::{PreviewConfig, Settings};
use aster::{AsterError, Program};

#[test]
fn test_doc_comes_from_declaration() {
    let fixture = common::load();
    let program = &fixture.program;
    let doc = |ident| program.facade(ident).map(|f| f.doc()).unwrap_or_default();

    assert_eq!(doc(fixture.idents.user), "User is a person.\n");
    assert_eq!(doc(fixture.idents.greeter), "Greeter greets.\n");
    assert_eq!(doc(fixture.idents.greet), "Greet says hello.\n");
    // A value spec without its own doc falls back to the declaration's.
    assert_eq!(doc(fixture.idents.limit), "Limit caps users.\n");
    assert_eq!(doc(fixture.idents.users), "");

    let user = program.facade(fixture.idents.user).unwrap();
    assert_eq!(user.type_node().unwrap().doc(), "User is a person.\n");
}

#[test]
fn test_doc_scan_stops_at_statements() {
    let fixture = common::load();
    let program = &fixture.program;

    // `greeting` sits inside a documented function, but the scan gives up
    // at the assignment.
    let greeting = program.facade(fixture.idents.greeting).unwrap();
    assert_eq!(greeting.doc(), "");

    let model = program.package(MODEL).unwrap();
    assert!(model
        .doc_comment(program.arena(), fixture.idents.greeting)
        .is_none());
    assert!(model
        .doc_comment(program.arena(), fixture.idents.greet)
        .is_some());
}

#[test]
fn test_doc_of_interface_method_is_empty() {
    let fixture = common::load();
    let method = fixture.program.facade(fixture.idents.iface_greet).unwrap();
    assert_eq!(method.doc(), "");
}

#[test]
fn test_preview_declarations() {
    let fixture = common::load();
    let program = &fixture.program;

    assert_eq!(
        program.preview(fixture.idents.limit),
        "// Limit caps users.\nconst Limit = 10"
    );
    assert_eq!(program.preview(fixture.idents.users), "var users []User");
    assert_eq!(
        program.preview(fixture.idents.greet),
        "// Greet says hello.\nfunc (u *User) Greet(name string) string {\n\tgreeting := name\n\treturn greeting\n}"
    );
    assert_eq!(program.preview(fixture.idents.greeting), "greeting := name");
    assert_eq!(program.preview(fixture.idents.model_pkg), "package model");
    assert_eq!(program.preview(fixture.idents.token), "type Token string");
}

#[test]
fn test_preview_fields() {
    let fixture = common::load();
    let program = &fixture.program;

    assert_eq!(
        program.preview(fixture.idents.name),
        "//aster:field\n// Names shown to others.\nvar Name string"
    );
    assert_eq!(
        program.preview(fixture.idents.alias),
        "//aster:field\n// Names shown to others.\nvar Alias string"
    );
    assert_eq!(
        program.preview(fixture.idents.age),
        "//aster:field\nvar Age int"
    );
}

#[test]
fn test_preview_outside_loaded_files() {
    let mut fixture = common::load();
    let stray = {
        let (_, arena) = fixture.program.package_mut(MODEL).unwrap();
        arena.ident("stray")
    };
    assert_eq!(
        fixture.program.preview(stray),
        "// aster: can not preview stray"
    );
}

#[test]
fn test_preview_uses_configured_markers() {
    let (input, idents, _) = common::build();
    let settings = Settings {
        preview: PreviewConfig {
            field_marker: "//gen:field".to_string(),
            unpreviewable_prefix: "// gen: no preview".to_string(),
        },
        ..Settings::default()
    };

    let program = Program::load_with_settings(input, settings).unwrap();
    assert!(program.preview(idents.age).starts_with("//gen:field\n"));
    assert_eq!(program.settings().preview.field_marker, "//gen:field");
}

#[test]
fn test_invalid_settings_are_rejected() {
    let (input, _, _) = common::build();
    let mut settings = Settings::default();
    settings.preview.field_marker = "aster:field".to_string();

    let err = Program::load_with_settings(input, settings).unwrap_err();
    assert!(matches!(err, AsterError::ConfigError { .. }));
}

#[test]
fn test_newer_settings_version_is_rejected() {
    let (input, _, _) = common::build();
    let settings = Settings {
        version: 2,
        ..Settings::default()
    };

    let err = Program::load_with_settings(input, settings).unwrap_err();
    assert_eq!(err.status_code(), "CONFIG_ERROR");
}
