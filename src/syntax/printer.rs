//! Compact source printer used for type names and previews.
//!
//! Output follows gofmt conventions closely enough for display and for
//! comparing type spellings, without column alignment.

use super::{ChanDir, CommentGroup, NodeKind, SyntaxArena};
use crate::types::NodeId;

/// Renders a node as source text.
pub fn format_node(arena: &SyntaxArena, id: NodeId) -> String {
    let mut printer = Printer {
        arena,
        out: String::new(),
        indent: 0,
    };
    printer.node(id);
    printer.out
}

struct Printer<'a> {
    arena: &'a SyntaxArena,
    out: String,
    indent: usize,
}

impl Printer<'_> {
    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn doc(&mut self, doc: Option<&CommentGroup>) {
        if let Some(group) = doc {
            for comment in &group.list {
                for line in comment.text.lines() {
                    self.out.push_str(line);
                    self.newline();
                }
            }
        }
    }

    fn list(&mut self, ids: &[NodeId]) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.node(*id);
        }
    }

    fn node(&mut self, id: NodeId) {
        let arena = self.arena;
        let Some(node) = arena.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::File(file) => {
                self.out.push_str("package ");
                self.node(file.name);
                for decl in &file.decls {
                    self.out.push_str("\n\n");
                    self.node(*decl);
                }
                self.out.push('\n');
            }
            NodeKind::Ident { name } => self.out.push_str(name),
            NodeKind::BasicLit { value, .. } => self.out.push_str(value),
            NodeKind::Field(field) => {
                if !field.names.is_empty() {
                    self.list(&field.names);
                    self.out.push(' ');
                }
                self.node(field.ty);
                if let Some(tag) = field.tag {
                    self.out.push(' ');
                    self.node(tag);
                }
            }
            NodeKind::FieldList { list } => self.list(list),
            NodeKind::StarExpr { x } => {
                self.out.push('*');
                self.node(*x);
            }
            NodeKind::SelectorExpr { x, sel } => {
                self.node(*x);
                self.out.push('.');
                self.node(*sel);
            }
            NodeKind::CallExpr { fun, args } => {
                self.node(*fun);
                self.out.push('(');
                self.list(args);
                self.out.push(')');
            }
            NodeKind::Ellipsis { elt } => {
                self.out.push_str("...");
                self.node(*elt);
            }
            NodeKind::ArrayType { len, elt } => {
                self.out.push('[');
                if let Some(len) = len {
                    self.node(*len);
                }
                self.out.push(']');
                self.node(*elt);
            }
            NodeKind::MapType { key, value } => {
                self.out.push_str("map[");
                self.node(*key);
                self.out.push(']');
                self.node(*value);
            }
            NodeKind::ChanType { dir, value } => {
                self.out.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.node(*value);
            }
            NodeKind::FuncType { .. } => {
                self.out.push_str("func");
                self.signature(id);
            }
            NodeKind::InterfaceType { methods } => {
                self.body("interface", arena.list_items(*methods), true)
            }
            NodeKind::StructType { fields } => {
                self.body("struct", arena.list_items(*fields), false)
            }
            NodeKind::BlockStmt { list } => self.block(list),
            NodeKind::AssignStmt { lhs, define, rhs } => {
                self.list(lhs);
                self.out.push_str(if *define { " := " } else { " = " });
                self.list(rhs);
            }
            NodeKind::DeclStmt { decl } => self.node(*decl),
            NodeKind::ExprStmt { x } => self.node(*x),
            NodeKind::ReturnStmt { results } => {
                self.out.push_str("return");
                if !results.is_empty() {
                    self.out.push(' ');
                    self.list(results);
                }
            }
            NodeKind::FuncDecl(decl) => {
                self.doc(decl.doc.as_ref());
                self.out.push_str("func ");
                if let Some(recv) = decl.recv {
                    self.out.push('(');
                    self.node(recv);
                    self.out.push_str(") ");
                }
                self.node(decl.name);
                self.signature(decl.ty);
                if let Some(body) = decl.body {
                    self.out.push(' ');
                    self.node(body);
                }
            }
            NodeKind::GenDecl(decl) => {
                self.doc(decl.doc.as_ref());
                self.out.push_str(decl.tok.as_str());
                self.out.push(' ');
                if let [spec] = decl.specs.as_slice() {
                    self.node(*spec);
                } else {
                    self.out.push('(');
                    self.indent += 1;
                    for spec in &decl.specs {
                        self.newline();
                        self.node(*spec);
                    }
                    self.indent -= 1;
                    self.newline();
                    self.out.push(')');
                }
            }
            NodeKind::TypeSpec(spec) => {
                self.node(spec.name);
                self.out.push_str(if spec.assign { " = " } else { " " });
                self.node(spec.ty);
            }
            NodeKind::ValueSpec(spec) => {
                self.list(&spec.names);
                if let Some(ty) = spec.ty {
                    self.out.push(' ');
                    self.node(ty);
                }
                if !spec.values.is_empty() {
                    self.out.push_str(" = ");
                    self.list(&spec.values);
                }
            }
        }
    }

    /// `(params) results` of a `FuncType` node.
    fn signature(&mut self, func_type: NodeId) {
        let arena = self.arena;
        let NodeKind::FuncType { params, results } = arena.kind(func_type) else {
            return;
        };
        self.out.push('(');
        self.node(*params);
        self.out.push(')');

        let Some(results) = results else {
            return;
        };
        let list = arena.list_items(*results);
        let unnamed_single = match list {
            [only] => arena.as_field(*only).is_some_and(|f| f.names.is_empty()),
            _ => false,
        };
        self.out.push(' ');
        if unnamed_single {
            self.node(*results);
        } else {
            self.out.push('(');
            self.node(*results);
            self.out.push(')');
        }
    }

    fn body(&mut self, keyword: &str, members: &[NodeId], methods: bool) {
        if members.is_empty() {
            self.out.push_str(keyword);
            self.out.push_str("{}");
            return;
        }
        self.out.push_str(keyword);
        self.out.push_str(" {");
        self.indent += 1;
        for member in members {
            self.newline();
            self.member(*member, methods);
        }
        self.indent -= 1;
        self.newline();
        self.out.push('}');
    }

    fn member(&mut self, id: NodeId, method: bool) {
        let arena = self.arena;
        let Some(field) = arena.as_field(id) else {
            self.node(id);
            return;
        };
        self.doc(field.doc.as_ref());
        let is_signature = matches!(arena.kind(field.ty), NodeKind::FuncType { .. });
        if method && is_signature && !field.names.is_empty() {
            self.list(&field.names);
            self.signature(field.ty);
        } else {
            self.node(id);
        }
        if let Some(comment) = &field.comment {
            for c in &comment.list {
                self.out.push(' ');
                self.out.push_str(&c.text);
            }
        }
    }

    fn block(&mut self, list: &[NodeId]) {
        if list.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push('{');
        self.indent += 1;
        for stmt in list {
            self.newline();
            self.node(*stmt);
        }
        self.indent -= 1;
        self.newline();
        self.out.push('}');
    }
}
