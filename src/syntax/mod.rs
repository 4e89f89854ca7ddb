//! Arena-backed syntax trees.
//!
//! The parser is an external collaborator; this module only fixes the shape
//! of what it hands over. All nodes of one analysis session live in a single
//! [`SyntaxArena`] and are addressed by [`NodeId`]. Facades, type nodes and
//! struct tags keep ids, never copies, so an edit made through one of them
//! is what a later render of the tree sees.

mod builder;
mod path;
mod printer;

pub use path::path_enclosing_interval;
pub use printer::format_node;

use crate::types::{NodeId, Pos, Span};
use serde::{Deserialize, Serialize};

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanDir {
    Send,
    Recv,
    Both,
}

/// Keyword of a general declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclToken {
    Const,
    Type,
    Var,
}

impl DeclToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclToken::Const => "const",
            DeclToken::Type => "type",
            DeclToken::Var => "var",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// One `//` or `/* */` comment, markers included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

/// A run of comments with no blank line between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    /// Builds a group holding exactly one comment. A `// ` marker is put in
    /// front of every line that carries none.
    pub fn single(text: &str) -> Self {
        let text = if text.starts_with("//") || text.starts_with("/*") {
            text.to_string()
        } else {
            text.lines()
                .map(|line| format!("// {line}"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        Self {
            list: vec![Comment { text }],
        }
    }

    /// Builds a group with one `//` comment per line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            list: lines
                .into_iter()
                .map(|line| Comment {
                    text: format!("// {}", line.as_ref()),
                })
                .collect(),
        }
    }

    /// Comment text without markers. Leading and trailing blank lines are
    /// dropped, and a non-empty result ends with a newline.
    pub fn text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for comment in &self.list {
            let raw = comment.text.as_str();
            let body = if let Some(rest) = raw.strip_prefix("//") {
                rest.strip_prefix(' ').unwrap_or(rest).to_string()
            } else if let Some(rest) = raw.strip_prefix("/*") {
                rest.strip_suffix("*/").unwrap_or(rest).to_string()
            } else {
                raw.to_string()
            };
            for line in body.split('\n') {
                let line = line.strip_prefix("// ").unwrap_or(line);
                lines.push(line.trim_end().to_string());
            }
        }

        while lines.first().is_some_and(|l| l.is_empty()) {
            lines.remove(0);
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return String::new();
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Package name identifier.
    pub name: NodeId,
    pub decls: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub doc: Option<CommentGroup>,
    pub names: Vec<NodeId>,
    pub ty: NodeId,
    /// Raw tag literal (`BasicLit`), back-quotes included.
    pub tag: Option<NodeId>,
    pub comment: Option<CommentGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub doc: Option<CommentGroup>,
    /// Receiver field list, `None` for plain functions.
    pub recv: Option<NodeId>,
    pub name: NodeId,
    /// Always a `FuncType` node.
    pub ty: NodeId,
    pub body: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenDecl {
    pub doc: Option<CommentGroup>,
    pub tok: DeclToken,
    pub specs: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub doc: Option<CommentGroup>,
    pub name: NodeId,
    /// `type T = U` form.
    pub assign: bool,
    pub ty: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub doc: Option<CommentGroup>,
    pub names: Vec<NodeId>,
    pub ty: Option<NodeId>,
    pub values: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File(File),
    Ident {
        name: String,
    },
    BasicLit {
        kind: LitKind,
        value: String,
    },
    Field(Field),
    FieldList {
        list: Vec<NodeId>,
    },
    StarExpr {
        x: NodeId,
    },
    SelectorExpr {
        x: NodeId,
        sel: NodeId,
    },
    CallExpr {
        fun: NodeId,
        args: Vec<NodeId>,
    },
    Ellipsis {
        elt: NodeId,
    },
    ArrayType {
        len: Option<NodeId>,
        elt: NodeId,
    },
    MapType {
        key: NodeId,
        value: NodeId,
    },
    ChanType {
        dir: ChanDir,
        value: NodeId,
    },
    FuncType {
        params: NodeId,
        results: Option<NodeId>,
    },
    InterfaceType {
        methods: NodeId,
    },
    StructType {
        fields: NodeId,
    },
    BlockStmt {
        list: Vec<NodeId>,
    },
    AssignStmt {
        lhs: Vec<NodeId>,
        define: bool,
        rhs: Vec<NodeId>,
    },
    DeclStmt {
        decl: NodeId,
    },
    ExprStmt {
        x: NodeId,
    },
    ReturnStmt {
        results: Vec<NodeId>,
    },
    FuncDecl(FuncDecl),
    GenDecl(GenDecl),
    TypeSpec(TypeSpec),
    ValueSpec(ValueSpec),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// Owner of every syntax node of one analysis session.
#[derive(Debug, Clone)]
pub struct SyntaxArena {
    nodes: Vec<Node>,
    /// Next free position handed out by the tree builder.
    cursor: u32,
}

impl Default for SyntaxArena {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxArena {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            cursor: 1,
        }
    }

    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node { kind, span });
        if span.end.0 >= self.cursor {
            self.cursor = span.end.0 + 1;
        }
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Panics on an id from another arena.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).map(|n| n.span).unwrap_or_default()
    }

    pub fn pos(&self, id: NodeId) -> Pos {
        self.span(id).pos
    }

    pub fn end(&self, id: NodeId) -> Pos {
        self.span(id).end
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.span = span;
        }
    }

    pub fn ident_name(&self, id: NodeId) -> Option<&str> {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Ident { name }) => Some(name),
            _ => None,
        }
    }

    /// Renames an identifier node in place. Returns false if `id` is not an
    /// identifier.
    pub fn set_ident_name(&mut self, id: NodeId, name: &str) -> bool {
        match self.nodes.get_mut(id.index()).map(|n| &mut n.kind) {
            Some(NodeKind::Ident { name: current }) => {
                *current = name.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn as_field(&self, id: NodeId) -> Option<&Field> {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Field(field)) => Some(field),
            _ => None,
        }
    }

    pub fn as_field_mut(&mut self, id: NodeId) -> Option<&mut Field> {
        match self.nodes.get_mut(id.index()).map(|n| &mut n.kind) {
            Some(NodeKind::Field(field)) => Some(field),
            _ => None,
        }
    }

    pub fn list_items(&self, id: NodeId) -> &[NodeId] {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::FieldList { list }) => list,
            _ => &[],
        }
    }

    /// Doc comment carried directly by a declaration-like node.
    pub fn doc(&self, id: NodeId) -> Option<&CommentGroup> {
        match self.get(id).map(|n| &n.kind)? {
            NodeKind::Field(f) => f.doc.as_ref(),
            NodeKind::FuncDecl(d) => d.doc.as_ref(),
            NodeKind::GenDecl(d) => d.doc.as_ref(),
            NodeKind::TypeSpec(s) => s.doc.as_ref(),
            NodeKind::ValueSpec(s) => s.doc.as_ref(),
            _ => None,
        }
    }

    /// Replaces the doc comment of a declaration-like node. Returns false if
    /// the node cannot carry one.
    pub fn set_doc(&mut self, id: NodeId, doc: Option<CommentGroup>) -> bool {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return false;
        };
        let slot = match &mut node.kind {
            NodeKind::Field(f) => &mut f.doc,
            NodeKind::FuncDecl(d) => &mut d.doc,
            NodeKind::GenDecl(d) => &mut d.doc,
            NodeKind::TypeSpec(s) => &mut s.doc,
            NodeKind::ValueSpec(s) => &mut s.doc,
            _ => return false,
        };
        *slot = doc;
        true
    }

    /// Direct children in source order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.get(id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        match &node.kind {
            NodeKind::File(f) => {
                out.push(f.name);
                out.extend(&f.decls);
            }
            NodeKind::Ident { .. } | NodeKind::BasicLit { .. } => {}
            NodeKind::Field(f) => {
                out.extend(&f.names);
                out.push(f.ty);
                out.extend(f.tag);
            }
            NodeKind::FieldList { list } => out.extend(list),
            NodeKind::StarExpr { x } => out.push(*x),
            NodeKind::SelectorExpr { x, sel } => out.extend([*x, *sel]),
            NodeKind::CallExpr { fun, args } => {
                out.push(*fun);
                out.extend(args);
            }
            NodeKind::Ellipsis { elt } => out.push(*elt),
            NodeKind::ArrayType { len, elt } => {
                out.extend(*len);
                out.push(*elt);
            }
            NodeKind::MapType { key, value } => out.extend([*key, *value]),
            NodeKind::ChanType { value, .. } => out.push(*value),
            NodeKind::FuncType { params, results } => {
                out.push(*params);
                out.extend(*results);
            }
            NodeKind::InterfaceType { methods } => out.push(*methods),
            NodeKind::StructType { fields } => out.push(*fields),
            NodeKind::BlockStmt { list } => out.extend(list),
            NodeKind::AssignStmt { lhs, rhs, .. } => {
                out.extend(lhs);
                out.extend(rhs);
            }
            NodeKind::DeclStmt { decl } => out.push(*decl),
            NodeKind::ExprStmt { x } => out.push(*x),
            NodeKind::ReturnStmt { results } => out.extend(results),
            NodeKind::FuncDecl(d) => {
                out.extend(d.recv);
                out.push(d.name);
                out.push(d.ty);
                out.extend(d.body);
            }
            NodeKind::GenDecl(d) => out.extend(&d.specs),
            NodeKind::TypeSpec(s) => out.extend([s.name, s.ty]),
            NodeKind::ValueSpec(s) => {
                out.extend(&s.names);
                out.extend(s.ty);
                out.extend(&s.values);
            }
        }
        out
    }

    /// Strips any number of `*` and resolves `pkg.T` to `T`, returning the
    /// base identifier of a type expression.
    pub fn base_ident(&self, mut expr: NodeId) -> Option<NodeId> {
        loop {
            match self.get(expr).map(|n| &n.kind)? {
                NodeKind::StarExpr { x } => expr = *x,
                NodeKind::SelectorExpr { sel, .. } => return Some(*sel),
                NodeKind::Ident { .. } => return Some(expr),
                _ => return None,
            }
        }
    }
}
