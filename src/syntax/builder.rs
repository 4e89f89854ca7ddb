//! Tree construction helpers.
//!
//! Checker adapters (and tests) build trees bottom-up in source order.
//! Leaves take the next free positions of the arena; every composite node
//! spans exactly its children, so the enclosing-interval query works on
//! built trees the same way it does on parsed ones.

use super::{
    ChanDir, CommentGroup, DeclToken, Field, File, FuncDecl, GenDecl, LitKind, NodeKind,
    SyntaxArena, TypeSpec, ValueSpec,
};
use crate::types::{NodeId, Pos, Span};

impl SyntaxArena {
    fn leaf_span(&mut self, width: usize) -> Span {
        let pos = self.cursor;
        let end = pos + width.max(1) as u32;
        self.cursor = end + 1;
        Span::new(Pos(pos), Pos(end))
    }

    fn cover(&mut self, ids: &[NodeId]) -> Span {
        let spans: Vec<Span> = ids
            .iter()
            .map(|id| self.span(*id))
            .filter(Span::is_valid)
            .collect();
        match (
            spans.iter().map(|s| s.pos).min(),
            spans.iter().map(|s| s.end).max(),
        ) {
            (Some(pos), Some(end)) => Span::new(pos, end),
            _ => self.leaf_span(1),
        }
    }

    fn composite(&mut self, kind: NodeKind, children: &[NodeId]) -> NodeId {
        let span = self.cover(children);
        self.alloc(kind, span)
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        let span = self.leaf_span(name.len());
        self.alloc(
            NodeKind::Ident {
                name: name.to_string(),
            },
            span,
        )
    }

    pub fn basic_lit(&mut self, kind: LitKind, value: &str) -> NodeId {
        let span = self.leaf_span(value.len());
        self.alloc(
            NodeKind::BasicLit {
                kind,
                value: value.to_string(),
            },
            span,
        )
    }

    pub fn int_lit(&mut self, value: u64) -> NodeId {
        self.basic_lit(LitKind::Int, &value.to_string())
    }

    /// Raw tag literal, e.g. `` `json:"name"` ``.
    pub fn tag_lit(&mut self, raw: &str) -> NodeId {
        self.basic_lit(LitKind::String, raw)
    }

    pub fn star(&mut self, x: NodeId) -> NodeId {
        self.composite(NodeKind::StarExpr { x }, &[x])
    }

    pub fn selector(&mut self, x: NodeId, sel: &str) -> NodeId {
        let sel = self.ident(sel);
        self.composite(NodeKind::SelectorExpr { x, sel }, &[x, sel])
    }

    pub fn call(&mut self, fun: NodeId, args: Vec<NodeId>) -> NodeId {
        let mut children = vec![fun];
        children.extend(&args);
        self.composite(NodeKind::CallExpr { fun, args }, &children)
    }

    pub fn ellipsis(&mut self, elt: NodeId) -> NodeId {
        self.composite(NodeKind::Ellipsis { elt }, &[elt])
    }

    pub fn array_type(&mut self, len: Option<NodeId>, elt: NodeId) -> NodeId {
        let mut children: Vec<NodeId> = len.into_iter().collect();
        children.push(elt);
        self.composite(NodeKind::ArrayType { len, elt }, &children)
    }

    pub fn map_type(&mut self, key: NodeId, value: NodeId) -> NodeId {
        self.composite(NodeKind::MapType { key, value }, &[key, value])
    }

    pub fn chan_type(&mut self, dir: ChanDir, value: NodeId) -> NodeId {
        self.composite(NodeKind::ChanType { dir, value }, &[value])
    }

    pub fn field_list(&mut self, list: Vec<NodeId>) -> NodeId {
        let children = list.clone();
        self.composite(NodeKind::FieldList { list }, &children)
    }

    pub fn field(&mut self, names: Vec<NodeId>, ty: NodeId, tag: Option<NodeId>) -> NodeId {
        let mut children = names.clone();
        children.push(ty);
        children.extend(tag);
        self.composite(
            NodeKind::Field(Field {
                doc: None,
                names,
                ty,
                tag,
                comment: None,
            }),
            &children,
        )
    }

    /// Function signature; `params` and `results` are field nodes.
    pub fn func_type(&mut self, params: Vec<NodeId>, results: Vec<NodeId>) -> NodeId {
        let params = self.field_list(params);
        let results = if results.is_empty() {
            None
        } else {
            Some(self.field_list(results))
        };
        let mut children = vec![params];
        children.extend(results);
        self.composite(NodeKind::FuncType { params, results }, &children)
    }

    /// Interface body; `methods` are field nodes.
    pub fn interface_type(&mut self, methods: Vec<NodeId>) -> NodeId {
        let methods = self.field_list(methods);
        self.composite(NodeKind::InterfaceType { methods }, &[methods])
    }

    /// Struct body; `fields` are field nodes.
    pub fn struct_type(&mut self, fields: Vec<NodeId>) -> NodeId {
        let fields = self.field_list(fields);
        self.composite(NodeKind::StructType { fields }, &[fields])
    }

    pub fn block(&mut self, list: Vec<NodeId>) -> NodeId {
        let children = list.clone();
        self.composite(NodeKind::BlockStmt { list }, &children)
    }

    pub fn assign(&mut self, lhs: Vec<NodeId>, define: bool, rhs: Vec<NodeId>) -> NodeId {
        let mut children = lhs.clone();
        children.extend(&rhs);
        self.composite(NodeKind::AssignStmt { lhs, define, rhs }, &children)
    }

    pub fn decl_stmt(&mut self, decl: NodeId) -> NodeId {
        self.composite(NodeKind::DeclStmt { decl }, &[decl])
    }

    pub fn expr_stmt(&mut self, x: NodeId) -> NodeId {
        self.composite(NodeKind::ExprStmt { x }, &[x])
    }

    pub fn return_stmt(&mut self, results: Vec<NodeId>) -> NodeId {
        let children = results.clone();
        self.composite(NodeKind::ReturnStmt { results }, &children)
    }

    pub fn type_spec(&mut self, name: NodeId, assign: bool, ty: NodeId) -> NodeId {
        self.composite(
            NodeKind::TypeSpec(TypeSpec {
                doc: None,
                name,
                assign,
                ty,
            }),
            &[name, ty],
        )
    }

    pub fn value_spec(
        &mut self,
        names: Vec<NodeId>,
        ty: Option<NodeId>,
        values: Vec<NodeId>,
    ) -> NodeId {
        let mut children = names.clone();
        children.extend(ty);
        children.extend(&values);
        self.composite(
            NodeKind::ValueSpec(ValueSpec {
                doc: None,
                names,
                ty,
                values,
            }),
            &children,
        )
    }

    pub fn gen_decl(&mut self, tok: DeclToken, specs: Vec<NodeId>) -> NodeId {
        let children = specs.clone();
        self.composite(
            NodeKind::GenDecl(GenDecl {
                doc: None,
                tok,
                specs,
            }),
            &children,
        )
    }

    /// `recv` is the receiver field, `ty` a `FuncType` node.
    pub fn func_decl(
        &mut self,
        recv: Option<NodeId>,
        name: NodeId,
        ty: NodeId,
        body: Option<NodeId>,
    ) -> NodeId {
        let recv = recv.map(|field| self.field_list(vec![field]));
        let mut children: Vec<NodeId> = recv.into_iter().collect();
        children.extend([name, ty]);
        children.extend(body);
        self.composite(
            NodeKind::FuncDecl(FuncDecl {
                doc: None,
                recv,
                name,
                ty,
                body,
            }),
            &children,
        )
    }

    pub fn file(&mut self, name: NodeId, decls: Vec<NodeId>) -> NodeId {
        let mut children = vec![name];
        children.extend(&decls);
        self.composite(NodeKind::File(File { name, decls }), &children)
    }

    /// Attaches `// line` doc comments to a declaration-like node and hands
    /// the id back for chaining.
    pub fn with_doc(&mut self, id: NodeId, lines: &[&str]) -> NodeId {
        self.set_doc(id, Some(CommentGroup::from_lines(lines)));
        id
    }

    /// Attaches a line comment to a field.
    pub fn with_comment(&mut self, field: NodeId, text: &str) -> NodeId {
        if let Some(f) = self.as_field_mut(field) {
            f.comment = Some(CommentGroup::single(text));
        }
        field
    }
}
