use crate::common;
use aster::syntax::format_node;
use aster::{AsterError, DeclKindSet, FuncNode, TypeKind, TypeKindSet, TypeVariant};

#[test]
fn test_method_declarations_attach_to_receiver_type() {
    let fixture = common::load();
    let program = &fixture.program;

    let user = program.facade(fixture.idents.user).unwrap();
    assert_eq!(user.num_method(), 1);
    let greet = user.method_by_name("Greet").unwrap();
    assert_eq!(greet.recv().map(|r| r.type_name.as_str()), Some("User"));
    assert_eq!(greet.num_param(), 1);
    assert_eq!(greet.num_result(), 1);
    assert!(user.method(1).is_none());

    let base = program.facade(fixture.idents.base).unwrap();
    assert_eq!(base.num_method(), 0);
}

#[test]
fn test_interface_methods_come_from_its_body() {
    let fixture = common::load();
    let greeter = fixture.program.facade(fixture.idents.greeter).unwrap();

    let node = greeter.type_node().unwrap();
    assert!(matches!(node.variant(), TypeVariant::Interface));
    assert_eq!(node.kind(), TypeKind::Interface);
    assert_eq!(greeter.num_method(), 1);
    assert_eq!(greeter.method(0).map(FuncNode::name), Some("Greet"));
}

#[test]
fn test_implements() {
    let fixture = common::load();
    let program = &fixture.program;
    let user = program.facade(fixture.idents.user).unwrap();
    let base = program.facade(fixture.idents.base).unwrap();
    let greeter = program.facade(fixture.idents.greeter).unwrap();
    let limit = program.facade(fixture.idents.limit).unwrap();

    assert!(user.implements(greeter));
    assert!(greeter.implements(greeter));
    assert!(!base.implements(greeter));

    // Every method set covers the empty one.
    assert!(user.implements(base));
    assert!(limit.implements(base));
    assert!(!limit.implements(greeter));
}

#[test]
fn test_implements_compares_signatures() {
    let mut fixture = common::load();
    let base = fixture.idents.base;

    let (facade, arena) = fixture.program.facade_mut(base).unwrap();
    // func (b *Base) Greet(n int) string
    let recv_name = arena.ident("b");
    let recv_base = arena.ident("Base");
    let recv_ty = arena.star(recv_base);
    let recv = arena.field(vec![recv_name], recv_ty, None);
    let name = arena.ident("Greet");
    let param = arena.ident("n");
    let int_ty = arena.ident("int");
    let param_field = arena.field(vec![param], int_ty, None);
    let out = arena.ident("string");
    let result = arena.field(vec![], out, None);
    let sig = arena.func_type(vec![param_field], vec![result]);
    let decl = arena.func_decl(Some(recv), name, sig, None);

    let method = FuncNode::from_decl(arena, decl).unwrap();
    facade.add_method(method).expect("receiver matches");
    assert_eq!(facade.num_method(), 1);

    let program = &fixture.program;
    let base = program.facade(fixture.idents.base).unwrap();
    let greeter = program.facade(fixture.idents.greeter).unwrap();
    assert!(!base.implements(greeter));
}

#[test]
fn test_add_method_rejects_foreign_receiver_and_plain_functions() {
    let mut fixture = common::load();
    let user = fixture.idents.user;

    let (facade, arena) = fixture.program.facade_mut(user).unwrap();

    // func (a Admin) Promote()
    let recv_name = arena.ident("a");
    let recv_ty = arena.ident("Admin");
    let recv = arena.field(vec![recv_name], recv_ty, None);
    let name = arena.ident("Promote");
    let sig = arena.func_type(vec![], vec![]);
    let decl = arena.func_decl(Some(recv), name, sig, None);
    let foreign = FuncNode::from_decl(arena, decl).unwrap();

    let err = facade.add_method(foreign).unwrap_err();
    assert!(matches!(err, AsterError::ReceiverMismatch { .. }));

    // func Promote()
    let name = arena.ident("Promote");
    let sig = arena.func_type(vec![], vec![]);
    let decl = arena.func_decl(None, name, sig, None);
    let plain = FuncNode::from_decl(arena, decl).unwrap();

    let err = facade.add_method(plain).unwrap_err();
    assert_eq!(err.status_code(), "NOT_METHOD");
    assert_eq!(facade.num_method(), 1);
}

#[test]
fn test_facade_without_type_node_rejects_methods() {
    let mut fixture = common::load();
    let limit = fixture.idents.limit;

    let (facade, arena) = fixture.program.facade_mut(limit).unwrap();
    let recv_name = arena.ident("l");
    let recv_ty = arena.ident("Limit");
    let recv = arena.field(vec![recv_name], recv_ty, None);
    let name = arena.ident("Raise");
    let sig = arena.func_type(vec![], vec![]);
    let decl = arena.func_decl(Some(recv), name, sig, None);
    let method = FuncNode::from_decl(arena, decl).unwrap();

    assert!(facade.add_method(method).is_err());
    assert_eq!(facade.num_method(), 0);
}

#[test]
fn test_rename_type_writes_through_to_source() {
    let mut fixture = common::load();
    let user = fixture.idents.user;

    let (facade, arena) = fixture.program.facade_mut(user).unwrap();
    facade
        .type_node_mut()
        .unwrap()
        .set_name(arena, "Member");
    assert_eq!(facade.name(), "Member");

    let program = &fixture.program;
    let facade = program.facade(user).unwrap();
    let spec = facade.type_node().unwrap().node();
    assert!(format_node(program.arena(), spec).starts_with("Member struct {"));

    assert!(program
        .lookup(DeclKindSet::TYPE, TypeKindSet::empty(), "User")
        .is_empty());
    assert_eq!(
        program
            .lookup(DeclKindSet::TYPE, TypeKindSet::empty(), "Member")
            .len(),
        1
    );
}

#[test]
fn test_basic_declaration_in_dependency() {
    let fixture = common::load();
    let token = fixture.program.facade(fixture.idents.token).unwrap();

    let node = token.type_node().unwrap();
    assert!(matches!(node.variant(), TypeVariant::Basic));
    assert_eq!(node.kind(), TypeKind::String);
    assert!(!node.is_assign());
    assert!(node.len().is_none());
    assert!(node.as_struct().is_none());
    assert_eq!(token.num_method(), 0);
}
