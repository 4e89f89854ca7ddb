//! Shared two-package fixture.
//!
//! `example/model` (initial):
//!
//! ```text
//! package model
//!
//! // User is a person.
//! type User struct {
//!     // Names shown to others.
//!     Name, Alias string `json:"name"`
//!     *Base
//!     Age int `json:"age" db:"age"` // in years
//! }
//!
//! // Base holds shared fields.
//! type Base struct {
//!     ID     int64
//!     Secret string `json:"secret`
//! }
//!
//! // Greeter greets.
//! type Greeter interface {
//!     Greet(name string) string
//! }
//!
//! // Greet says hello.
//! func (u *User) Greet(name string) string {
//!     greeting := name
//!     return greeting
//! }
//!
//! // Limit caps users.
//! const Limit = 10
//!
//! var users []User
//! ```
//!
//! `example/dep` (loaded, not initial):
//!
//! ```text
//! package dep
//!
//! type Token string
//!
//! func Issue() Token
//! ```

use aster::checker::{Object, ObjectKind, PackageInput, Type, TypeTable};
use aster::syntax::{DeclToken, SyntaxArena};
use aster::{NodeId, Program, ProgramInput, TypeId, TypeKind};

pub const MODEL: &str = "example/model";
pub const DEP: &str = "example/dep";

/// Declaring identifiers of the fixture.
pub struct Idents {
    pub model_pkg: NodeId,
    pub user: NodeId,
    pub name: NodeId,
    pub alias: NodeId,
    pub age: NodeId,
    pub base: NodeId,
    pub greeter: NodeId,
    pub iface_greet: NodeId,
    pub greet: NodeId,
    pub greeting: NodeId,
    pub limit: NodeId,
    pub users: NodeId,
    pub token: NodeId,
    pub issue: NodeId,
}

/// Semantic types of the fixture.
pub struct Types {
    pub user: TypeId,
    pub user_struct: TypeId,
    pub token: TypeId,
    pub users: TypeId,
}

pub struct Fixture {
    pub program: Program,
    pub idents: Idents,
    pub types: Types,
}

/// Checker output for the fixture, before loading.
pub fn build() -> (ProgramInput, Idents, Types) {
    let mut arena = SyntaxArena::new();
    let mut table = TypeTable::new();

    let string = table.insert(Type::Basic(TypeKind::String));
    let int = table.insert(Type::Basic(TypeKind::Int));
    let int64 = table.insert(Type::Basic(TypeKind::Int64));
    let untyped_int = table.insert(Type::Basic(TypeKind::UntypedInt));
    let user_struct = table.insert(Type::Struct);
    let user = table.declare_named("User");
    table.set_underlying(user, user_struct);
    let base_struct = table.insert(Type::Struct);
    let base = table.declare_named("Base");
    table.set_underlying(base, base_struct);
    let base_ptr = table.insert(Type::Pointer(base));
    let user_ptr = table.insert(Type::Pointer(user));
    let iface = table.insert(Type::Interface);
    let greeter = table.declare_named("Greeter");
    table.set_underlying(greeter, iface);
    let greet_sig = table.insert(Type::Signature { variadic: false });
    let users_ty = table.insert(Type::Slice(user));
    let token = table.declare_named("Token");
    table.set_underlying(token, string);
    let issue_sig = table.insert(Type::Signature { variadic: false });

    let model_pkg = arena.ident("model");

    // type User struct { ... }
    let user_id = arena.ident("User");
    let name = arena.ident("Name");
    let alias = arena.ident("Alias");
    let string_ty = arena.ident("string");
    let name_tag = arena.tag_lit("`json:\"name\"`");
    let names_field = arena.field(vec![name, alias], string_ty, Some(name_tag));
    arena.with_doc(names_field, &["Names shown to others."]);
    let base_ref = arena.ident("Base");
    let base_ptr_ty = arena.star(base_ref);
    let embedded = arena.field(vec![], base_ptr_ty, None);
    let age = arena.ident("Age");
    let int_ty = arena.ident("int");
    let age_tag = arena.tag_lit("`json:\"age\" db:\"age\"`");
    let age_field = arena.field(vec![age], int_ty, Some(age_tag));
    arena.with_comment(age_field, "in years");
    let user_body = arena.struct_type(vec![names_field, embedded, age_field]);
    let user_spec = arena.type_spec(user_id, false, user_body);
    let user_decl = arena.gen_decl(DeclToken::Type, vec![user_spec]);
    arena.with_doc(user_decl, &["User is a person."]);

    // type Base struct { ... }
    let base_id = arena.ident("Base");
    let id = arena.ident("ID");
    let int64_ty = arena.ident("int64");
    let id_field = arena.field(vec![id], int64_ty, None);
    let secret = arena.ident("Secret");
    let string_ty = arena.ident("string");
    let bad_tag = arena.tag_lit("`json:\"secret`");
    let secret_field = arena.field(vec![secret], string_ty, Some(bad_tag));
    let base_body = arena.struct_type(vec![id_field, secret_field]);
    let base_spec = arena.type_spec(base_id, false, base_body);
    let base_decl = arena.gen_decl(DeclToken::Type, vec![base_spec]);
    arena.with_doc(base_decl, &["Base holds shared fields."]);

    // type Greeter interface { Greet(name string) string }
    let greeter_id = arena.ident("Greeter");
    let iface_greet = arena.ident("Greet");
    let iface_param = arena.ident("name");
    let string_ty = arena.ident("string");
    let iface_param_field = arena.field(vec![iface_param], string_ty, None);
    let out = arena.ident("string");
    let iface_result = arena.field(vec![], out, None);
    let iface_sig = arena.func_type(vec![iface_param_field], vec![iface_result]);
    let method_spec = arena.field(vec![iface_greet], iface_sig, None);
    let greeter_body = arena.interface_type(vec![method_spec]);
    let greeter_spec = arena.type_spec(greeter_id, false, greeter_body);
    let greeter_decl = arena.gen_decl(DeclToken::Type, vec![greeter_spec]);
    arena.with_doc(greeter_decl, &["Greeter greets."]);

    // func (u *User) Greet(name string) string { ... }
    let recv_name = arena.ident("u");
    let recv_base = arena.ident("User");
    let recv_ty = arena.star(recv_base);
    let recv = arena.field(vec![recv_name], recv_ty, None);
    let greet = arena.ident("Greet");
    let greet_param = arena.ident("name");
    let string_ty = arena.ident("string");
    let greet_param_field = arena.field(vec![greet_param], string_ty, None);
    let out = arena.ident("string");
    let greet_result = arena.field(vec![], out, None);
    let greet_sig_node = arena.func_type(vec![greet_param_field], vec![greet_result]);
    let greeting = arena.ident("greeting");
    let name_use = arena.ident("name");
    let assign = arena.assign(vec![greeting], true, vec![name_use]);
    let greeting_use = arena.ident("greeting");
    let ret = arena.return_stmt(vec![greeting_use]);
    let body = arena.block(vec![assign, ret]);
    let greet_decl = arena.func_decl(Some(recv), greet, greet_sig_node, Some(body));
    arena.with_doc(greet_decl, &["Greet says hello."]);

    // const Limit = 10
    let limit = arena.ident("Limit");
    let ten = arena.int_lit(10);
    let limit_spec = arena.value_spec(vec![limit], None, vec![ten]);
    let limit_decl = arena.gen_decl(DeclToken::Const, vec![limit_spec]);
    arena.with_doc(limit_decl, &["Limit caps users."]);

    // var users []User
    let users = arena.ident("users");
    let elem = arena.ident("User");
    let slice = arena.array_type(None, elem);
    let users_spec = arena.value_spec(vec![users], Some(slice), vec![]);
    let users_decl = arena.gen_decl(DeclToken::Var, vec![users_spec]);

    let model_file = arena.file(
        model_pkg,
        vec![
            user_decl,
            base_decl,
            greeter_decl,
            greet_decl,
            limit_decl,
            users_decl,
        ],
    );

    let mut model = PackageInput::new(MODEL, "model");
    model.files.push(model_file);
    let facts = &mut model.facts;
    facts.define(user_id, Object::new(ObjectKind::TypeName, "User", user));
    facts.define(name, Object::new(ObjectKind::Var, "Name", string));
    facts.define(alias, Object::new(ObjectKind::Var, "Alias", string));
    facts.define(base_ref, Object::new(ObjectKind::Var, "Base", base_ptr));
    facts.define(age, Object::new(ObjectKind::Var, "Age", int));
    facts.define(base_id, Object::new(ObjectKind::TypeName, "Base", base));
    facts.define(id, Object::new(ObjectKind::Var, "ID", int64));
    facts.define(secret, Object::new(ObjectKind::Var, "Secret", string));
    facts.define(greeter_id, Object::new(ObjectKind::TypeName, "Greeter", greeter));
    facts.define(iface_greet, Object::new(ObjectKind::Func, "Greet", greet_sig));
    facts.define(iface_param, Object::new(ObjectKind::Var, "name", string));
    facts.define(recv_name, Object::new(ObjectKind::Var, "u", user_ptr));
    facts.define(greet, Object::new(ObjectKind::Func, "Greet", greet_sig));
    facts.define(greet_param, Object::new(ObjectKind::Var, "name", string));
    facts.define(greeting, Object::new(ObjectKind::Var, "greeting", string));
    facts.define(limit, Object::new(ObjectKind::Const, "Limit", untyped_int));
    facts.define(users, Object::new(ObjectKind::Var, "users", users_ty));

    // package dep
    let dep_pkg = arena.ident("dep");
    let token_id = arena.ident("Token");
    let string_ty = arena.ident("string");
    let token_spec = arena.type_spec(token_id, false, string_ty);
    let token_decl = arena.gen_decl(DeclToken::Type, vec![token_spec]);
    let issue = arena.ident("Issue");
    let out = arena.ident("Token");
    let issue_result = arena.field(vec![], out, None);
    let issue_sig_node = arena.func_type(vec![], vec![issue_result]);
    let issue_decl = arena.func_decl(None, issue, issue_sig_node, None);
    let dep_file = arena.file(dep_pkg, vec![token_decl, issue_decl]);

    let mut dep = PackageInput::new(DEP, "dep");
    dep.files.push(dep_file);
    dep.facts
        .define(token_id, Object::new(ObjectKind::TypeName, "Token", token));
    dep.facts
        .define(issue, Object::new(ObjectKind::Func, "Issue", issue_sig));

    let input = ProgramInput {
        arena,
        types: table,
        packages: vec![model, dep],
        initial: vec![MODEL.to_string()],
    };
    let idents = Idents {
        model_pkg,
        user: user_id,
        name,
        alias,
        age,
        base: base_id,
        greeter: greeter_id,
        iface_greet,
        greet,
        greeting,
        limit,
        users,
        token: token_id,
        issue,
    };
    let types = Types {
        user,
        user_struct,
        token,
        users: users_ty,
    };
    (input, idents, types)
}

/// The fixture loaded with default settings.
pub fn load() -> Fixture {
    let (input, idents, types) = build();
    let program = Program::load(input).expect("fixture loads");
    Fixture {
        program,
        idents,
        types,
    }
}
