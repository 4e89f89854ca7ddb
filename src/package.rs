//! Package index: one compilation unit and its classified facades.

use crate::checker::{CheckError, Facts, ObjectKind, PackageInput, TypeTable};
use crate::config::PreviewConfig;
use crate::error::{AsterError, AsterResult};
use crate::facade::Facade;
use crate::node::{FuncNode, TypeNode};
use crate::syntax::{CommentGroup, NodeKind, SyntaxArena, format_node, path_enclosing_interval};
use crate::types::{
    DeclKind, DeclKindSet, NodeId, ObjectId, PackageId, Pos, TypeId, TypeKind, TypeKindSet,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Syntax, checker facts and facades of one package.
#[derive(Debug)]
pub struct PackageInfo {
    id: PackageId,
    path: String,
    name: String,
    importable: bool,
    transitively_error_free: bool,
    files: Vec<NodeId>,
    errors: Vec<CheckError>,
    facts: Facts,
    types: Arc<TypeTable>,
    facades: Vec<Facade>,
}

impl PackageInfo {
    /// Takes ownership of the checker output. Facades are built by
    /// [`PackageInfo::check`].
    pub fn new(id: PackageId, input: PackageInput, types: Arc<TypeTable>) -> Self {
        Self {
            id,
            path: input.path,
            name: input.name,
            importable: input.importable,
            transitively_error_free: input.transitively_error_free,
            files: input.files,
            errors: input.errors,
            facts: input.facts,
            types,
            facades: Vec::new(),
        }
    }

    pub fn id(&self) -> PackageId {
        self.id
    }

    /// Import path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Package name from the package clause.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn importable(&self) -> bool {
        self.importable
    }

    pub fn transitively_error_free(&self) -> bool {
        self.transitively_error_free
    }

    pub fn files(&self) -> &[NodeId] {
        &self.files
    }

    pub fn errors(&self) -> &[CheckError] {
        &self.errors
    }

    pub fn facts(&self) -> &Facts {
        &self.facts
    }

    pub fn facades(&self) -> &[Facade] {
        &self.facades
    }

    /// Classifies every binding of the fact table, in table order, and
    /// attaches methods to the declared types. Rebuilds from scratch when
    /// called again.
    pub fn check(&mut self, arena: &mut SyntaxArena) {
        info!(package = %self.path, bindings = self.facts.len(), "checking package");
        for error in &self.errors {
            warn!(package = %self.path, %error, "package has semantic errors");
        }

        self.facades.clear();
        let defs: Vec<(NodeId, ObjectId)> = self.facts.defs().collect();
        for (ident, object) in defs {
            if self.should_skip(arena, ident, object) {
                continue;
            }
            self.push_facade(arena, ident, object);
        }
        self.attach_methods(arena);

        debug!(package = %self.path, facades = self.facades.len(), "package checked");
    }

    fn should_skip(&self, arena: &SyntaxArena, ident: NodeId, object: ObjectId) -> bool {
        let Some(obj) = self.facts.object(object) else {
            return true;
        };
        match obj.kind {
            ObjectKind::Bad | ObjectKind::Label | ObjectKind::Builtin | ObjectKind::Nil => {
                debug!(name = %obj.name, kind = ?obj.kind, "skipping binding");
                true
            }
            ObjectKind::Var if self.types.kind_of(obj.ty) != TypeKind::Struct => {
                // Struct fields and parameters are not facades of their own
                let (path, _) = self.enclosing(arena, ident);
                let in_field = path
                    .iter()
                    .any(|node| matches!(arena.kind(*node), NodeKind::Field(_)));
                if in_field {
                    debug!(name = %obj.name, "skipping field variable");
                }
                in_field
            }
            _ => false,
        }
    }

    fn build_facade(
        &self,
        arena: &mut SyntaxArena,
        ident: NodeId,
        object: ObjectId,
    ) -> Option<Facade> {
        let obj = self.facts.object(object)?.clone();
        let doc = self.doc_comment(arena, ident).cloned();
        let type_node = if obj.kind == ObjectKind::TypeName {
            self.type_spec_of(arena, ident)
                .and_then(|spec| TypeNode::new(arena, spec, doc.clone()))
        } else {
            None
        };
        Some(Facade::new(
            ident,
            object,
            obj,
            doc,
            self.id,
            Arc::clone(&self.types),
            type_node,
        ))
    }

    fn push_facade(&mut self, arena: &mut SyntaxArena, ident: NodeId, object: ObjectId) {
        if let Some(facade) = self.build_facade(arena, ident, object) {
            debug!(facade = %facade, "classified");
            self.facades.push(facade);
        }
    }

    fn enclosing(&self, arena: &SyntaxArena, ident: NodeId) -> (Vec<NodeId>, bool) {
        self.path_enclosing_interval(arena, arena.pos(ident), arena.end(ident))
    }

    fn type_spec_of(&self, arena: &SyntaxArena, ident: NodeId) -> Option<NodeId> {
        let (path, _) = self.enclosing(arena, ident);
        path.into_iter().find(|node| {
            matches!(arena.kind(*node), NodeKind::TypeSpec(spec) if spec.name == ident)
        })
    }

    fn func_decl_of(&self, arena: &SyntaxArena, ident: NodeId) -> Option<NodeId> {
        let (path, _) = self.enclosing(arena, ident);
        path.into_iter().find(|node| {
            matches!(arena.kind(*node), NodeKind::FuncDecl(decl) if decl.name == ident)
        })
    }

    /// Hands every method declaration to the type facade named by its
    /// receiver.
    fn attach_methods(&mut self, arena: &SyntaxArena) {
        let methods: Vec<FuncNode> = self
            .facades
            .iter()
            .filter(|f| f.decl_kind() == DeclKind::Function)
            .filter_map(|f| self.func_decl_of(arena, f.ident()))
            .filter_map(|decl| FuncNode::from_decl(arena, decl))
            .filter(|func| func.recv().is_some())
            .collect();

        for method in methods {
            self.attach_method(method);
        }
    }

    fn attach_method(&mut self, method: FuncNode) {
        let Some(recv) = method.recv().map(|r| r.type_name.clone()) else {
            return;
        };
        let owner = self
            .facades
            .iter_mut()
            .find(|f| f.type_node().is_some_and(|node| node.name() == recv));
        match owner {
            Some(owner) => {
                if let Err(e) = owner.add_method(method) {
                    debug!(error = %e, "method rejected");
                }
            }
            None => {
                debug!(method = method.name(), receiver = %recv, "no type declared for receiver")
            }
        }
    }

    /// Deepest node path enclosing `[start, end)` in the first file whose
    /// range holds `start`, innermost first.
    pub fn path_enclosing_interval(
        &self,
        arena: &SyntaxArena,
        start: Pos,
        end: Pos,
    ) -> (Vec<NodeId>, bool) {
        for file in &self.files {
            let span = arena.span(*file);
            // Files the parser gave up on have no position
            if !span.is_valid() || !span.contains_pos(start) {
                continue;
            }
            let (path, exact) = path_enclosing_interval(arena, *file, start, end);
            if !path.is_empty() {
                return (path, exact);
            }
        }
        (Vec::new(), false)
    }

    /// Doc comment of the declaration that introduces `ident`.
    ///
    /// Walks outwards from the identifier. Function declarations, fields and
    /// general declarations answer with their doc (possibly none); type and
    /// value specs answer only when they carry one. Any other enclosing node
    /// ends the walk without a doc.
    pub fn doc_comment<'a>(
        &self,
        arena: &'a SyntaxArena,
        ident: NodeId,
    ) -> Option<&'a CommentGroup> {
        let (path, _) = self.enclosing(arena, ident);
        for node in path {
            match arena.kind(node) {
                NodeKind::FuncDecl(decl) => return decl.doc.as_ref(),
                NodeKind::Field(field) => return field.doc.as_ref(),
                NodeKind::GenDecl(decl) => return decl.doc.as_ref(),
                NodeKind::TypeSpec(spec) if spec.doc.is_some() => return spec.doc.as_ref(),
                NodeKind::ValueSpec(spec) if spec.doc.is_some() => return spec.doc.as_ref(),
                NodeKind::TypeSpec(_) | NodeKind::ValueSpec(_) | NodeKind::Ident { .. } => {}
                _ => return None,
            }
        }
        None
    }

    /// Source preview of the declaration around `ident`.
    pub fn preview(&self, arena: &SyntaxArena, config: &PreviewConfig, ident: NodeId) -> String {
        let name = arena.ident_name(ident).unwrap_or_default();
        let (path, _) = self.enclosing(arena, ident);
        for node in path {
            match arena.kind(node) {
                NodeKind::FuncDecl(_) | NodeKind::GenDecl(_) | NodeKind::AssignStmt { .. } => {
                    return format_node(arena, node);
                }
                NodeKind::Field(field) => {
                    let mut out = format!("{}\n", config.field_marker);
                    if let Some(doc) = &field.doc {
                        for line in doc.text().lines() {
                            out.push_str(&format!("// {line}\n"));
                        }
                    }
                    let field_name = field
                        .names
                        .first()
                        .copied()
                        .or_else(|| arena.base_ident(field.ty))
                        .and_then(|id| arena.ident_name(id))
                        .unwrap_or(name);
                    out.push_str(&format!("var {field_name} {}", format_node(arena, field.ty)));
                    return out;
                }
                NodeKind::File(_) => return format!("package {name}"),
                _ => {}
            }
        }
        format!("{} {name}", config.unpreviewable_prefix)
    }

    /// Visits facades in classification order until `visit` returns false.
    pub fn inspect<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a Facade) -> bool,
    {
        for facade in &self.facades {
            if !visit(facade) {
                return;
            }
        }
    }

    /// Facades matching all filters. Empty masks and an empty name match
    /// anything.
    pub fn lookup(
        &self,
        decl_kinds: DeclKindSet,
        type_kinds: TypeKindSet,
        name: &str,
    ) -> Vec<&Facade> {
        let mut found = Vec::new();
        self.inspect(|facade| {
            if facade_matches(facade, decl_kinds, type_kinds, name) {
                found.push(facade);
            }
            true
        });
        found
    }

    /// Facade whose object has type `ty`, or that declares `ty`.
    pub fn find_facade(&self, ty: TypeId) -> Option<&Facade> {
        self.facades.iter().find(|facade| {
            let object = facade.object();
            object.ty == ty
                || (facade.decl_kind() == DeclKind::Type && self.types.underlying(object.ty) == ty)
        })
    }

    pub fn facade(&self, ident: NodeId) -> Option<&Facade> {
        self.facades.iter().find(|f| f.ident() == ident)
    }

    pub fn facade_mut(&mut self, ident: NodeId) -> Option<&mut Facade> {
        self.facades.iter_mut().find(|f| f.ident() == ident)
    }

    pub fn facade_by_object(&self, object: ObjectId) -> Option<&Facade> {
        self.facades.iter().find(|f| f.object_id() == object)
    }

    /// Classifies `ident` again and appends the fresh facade. Methods
    /// declared for a new type facade are attached too.
    pub fn add_facade(
        &mut self,
        arena: &mut SyntaxArena,
        ident: NodeId,
        object: ObjectId,
    ) -> AsterResult<&Facade> {
        let facade = self
            .build_facade(arena, ident, object)
            .ok_or_else(|| AsterError::UnknownObject {
                id: object,
                package: self.path.clone(),
            })?;
        let is_type = facade.type_node().is_some();
        self.facades.push(facade);

        let arena: &SyntaxArena = arena;
        if is_type {
            let index = self.facades.len() - 1;
            let owner = self.facades[index].name().to_string();
            let methods: Vec<FuncNode> = self
                .facades
                .iter()
                .filter(|f| f.decl_kind() == DeclKind::Function)
                .filter_map(|f| self.func_decl_of(arena, f.ident()))
                .filter_map(|decl| FuncNode::from_decl(arena, decl))
                .filter(|func| func.recv().is_some_and(|r| r.type_name == owner))
                .collect();
            for method in methods {
                if let Err(e) = self.facades[index].add_method(method) {
                    debug!(error = %e, "method rejected");
                }
            }
        }

        self.facades
            .last()
            .ok_or_else(|| AsterError::UnknownObject {
                id: object,
                package: self.path.clone(),
            })
    }

    /// Removes the facade declared by `ident`, returning it.
    pub fn remove_facade(&mut self, ident: NodeId) -> Option<Facade> {
        let index = self.facades.iter().position(|f| f.ident() == ident)?;
        Some(self.facades.remove(index))
    }

    pub fn remove_facade_by_object(&mut self, object: ObjectId) -> Option<Facade> {
        let index = self.facades.iter().position(|f| f.object_id() == object)?;
        Some(self.facades.remove(index))
    }
}

pub(crate) fn facade_matches(
    facade: &Facade,
    decl_kinds: DeclKindSet,
    type_kinds: TypeKindSet,
    name: &str,
) -> bool {
    (name.is_empty() || facade.name() == name)
        && facade.type_kind().matches(type_kinds)
        && facade.decl_kind().matches(decl_kinds)
}

impl fmt::Display for PackageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
