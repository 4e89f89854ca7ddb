use crate::common;
use aster::syntax::format_node;
use aster::{AsterError, Tag};

#[test]
fn test_grouped_names_become_separate_fields() {
    let fixture = common::load();
    let user = fixture.program.facade(fixture.idents.user).unwrap();
    let fields = user.type_node().unwrap().as_struct().unwrap();

    let got: Vec<&str> = fields.fields().iter().map(|f| f.name()).collect();
    assert_eq!(got, vec!["Name", "Alias", "Base", "Age"]);
    assert_eq!(fields.num_field(), 4);

    let arena = fixture.program.arena();
    let name = fields.field_by_name("Name").unwrap();
    let alias = fields.field_by_name("Alias").unwrap();
    assert_ne!(name.node(), alias.node());
    assert_eq!(format_node(arena, name.node()), "Name string `json:\"name\"`");
    assert_eq!(format_node(arena, alias.node()), "Alias string `json:\"name\"`");
    assert_eq!(name.doc(arena), "Names shown to others.\n");
    assert_eq!(alias.doc(arena), "Names shown to others.\n");
}

#[test]
fn test_embedded_field_is_anonymous() {
    let fixture = common::load();
    let user = fixture.program.facade(fixture.idents.user).unwrap();
    let fields = user.type_node().unwrap().as_struct().unwrap();

    let embedded = fields.field(2).unwrap();
    assert!(embedded.anonymous());
    assert_eq!(embedded.name(), "Base");
    assert!(embedded.tags().is_empty());
    assert!(!fields.field(0).unwrap().anonymous());
}

#[test]
fn test_tags_read_in_source_order() {
    let fixture = common::load();
    let user = fixture.program.facade(fixture.idents.user).unwrap();
    let age = user
        .type_node()
        .unwrap()
        .as_struct()
        .unwrap()
        .field_by_name("Age")
        .unwrap();

    assert_eq!(age.tags().keys(), vec!["json", "db"]);
    assert_eq!(age.tags().get("db").map(|t| t.name.as_str()), Some("age"));
    assert_eq!(age.tags().to_string(), "json:\"age\" db:\"age\"");
    assert_eq!(age.comment(fixture.program.arena()), "in years\n");
}

#[test]
fn test_tag_edits_are_sorted_and_written_back() {
    let mut fixture = common::load();
    let user = fixture.idents.user;

    let (facade, arena) = fixture.program.facade_mut(user).unwrap();
    let age = facade
        .type_node_mut()
        .unwrap()
        .as_struct_mut()
        .unwrap()
        .field_by_name_mut("Age")
        .unwrap();
    let node = age.node();

    age.tags_mut()
        .set(arena, Tag::new("yaml", "age"))
        .expect("valid tag");
    assert_eq!(age.tags().keys(), vec!["db", "json", "yaml"]);
    assert_eq!(
        format_node(arena, node),
        "Age int `db:\"age\" json:\"age\" yaml:\"age\"`"
    );

    age.tags_mut().add_options(arena, "json", &["omitempty"]);
    assert!(age.tags().get("json").unwrap().has_option("omitempty"));
    assert_eq!(
        format_node(arena, node),
        "Age int `db:\"age\" json:\"age,omitempty\" yaml:\"age\"`"
    );

    age.tags_mut().delete_options(arena, "json", &["omitempty"]);
    age.tags_mut().delete(arena, &["db", "yaml"]);
    assert_eq!(age.tags().keys(), vec!["json"]);
    assert_eq!(format_node(arena, node), "Age int `json:\"age\"`");

    age.tags_mut().delete(arena, &["json"]);
    assert!(age.tags().is_empty());
    assert_eq!(format_node(arena, node), "Age int");
}

#[test]
fn test_flattened_fields_edit_independently() {
    let mut fixture = common::load();
    let user = fixture.idents.user;

    let (facade, arena) = fixture.program.facade_mut(user).unwrap();
    let fields = facade.type_node_mut().unwrap().as_struct_mut().unwrap();

    let alias = fields.field_by_name_mut("Alias").unwrap();
    alias
        .tags_mut()
        .set(arena, Tag::new("json", "alias"))
        .unwrap();
    let alias_node = alias.node();

    let name_node = fields.field_by_name("Name").unwrap().node();
    assert_eq!(format_node(arena, name_node), "Name string `json:\"name\"`");
    assert_eq!(format_node(arena, alias_node), "Alias string `json:\"alias\"`");
}

#[test]
fn test_setting_tags_on_untagged_field() {
    let mut fixture = common::load();
    let base = fixture.idents.base;

    let (facade, arena) = fixture.program.facade_mut(base).unwrap();
    let id = facade
        .type_node_mut()
        .unwrap()
        .as_struct_mut()
        .unwrap()
        .field_by_name_mut("ID")
        .unwrap();
    assert!(id.tags().is_empty());

    id.tags_mut()
        .set(arena, Tag::new("json", "id").with_options(["string"]))
        .unwrap();
    assert_eq!(format_node(arena, id.node()), "ID int64 `json:\"id,string\"`");
}

#[test]
fn test_invalid_tag_is_rejected_without_change() {
    let mut fixture = common::load();
    let user = fixture.idents.user;

    let (facade, arena) = fixture.program.facade_mut(user).unwrap();
    let age = facade
        .type_node_mut()
        .unwrap()
        .as_struct_mut()
        .unwrap()
        .field_by_name_mut("Age")
        .unwrap();

    let err = age.tags_mut().set(arena, Tag::new("", "x")).unwrap_err();
    assert!(matches!(err, AsterError::TagKeyNotSet));
    assert_eq!(age.tags().keys(), vec!["json", "db"]);
    assert_eq!(
        format_node(arena, age.node()),
        "Age int `json:\"age\" db:\"age\"`"
    );
}

#[test]
fn test_malformed_tag_reads_as_empty() {
    let mut fixture = common::load();
    let base = fixture.idents.base;

    let (facade, arena) = fixture.program.facade_mut(base).unwrap();
    let secret = facade
        .type_node_mut()
        .unwrap()
        .as_struct_mut()
        .unwrap()
        .field_by_name_mut("Secret")
        .unwrap();
    assert!(secret.tags().is_empty());
    assert!(secret.tags().keys().is_empty());

    let err = secret.tags_mut().reparse(arena).unwrap_err();
    assert_eq!(err.status_code(), "TAG_VALUE_SYNTAX");
}

#[test]
fn test_field_comments_can_be_replaced() {
    let mut fixture = common::load();
    let user = fixture.idents.user;

    let (facade, arena) = fixture.program.facade_mut(user).unwrap();
    let fields = facade.type_node_mut().unwrap().as_struct_mut().unwrap();
    let age = fields.field_by_name("Age").unwrap();

    age.set_doc(arena, "Age in whole years.");
    age.set_comment(arena, "// rounded down");
    assert_eq!(age.doc(arena), "Age in whole years.\n");
    assert_eq!(age.comment(arena), "rounded down\n");
}
