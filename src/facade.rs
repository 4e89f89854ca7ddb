//! One classified declared entity.

use crate::checker::{Object, TypeTable};
use crate::error::{AsterError, AsterResult};
use crate::node::{FuncNode, TypeNode};
use crate::syntax::CommentGroup;
use crate::types::{DeclKind, NodeId, ObjectId, PackageId, TypeKind};
use std::fmt;
use std::sync::Arc;

/// A declared identifier together with the object the checker bound to it.
///
/// Kinds are derived from the object on every call. Type declarations also
/// carry a [`TypeNode`] with their method set.
#[derive(Debug, Clone)]
pub struct Facade {
    ident: NodeId,
    object_id: ObjectId,
    object: Object,
    doc: Option<CommentGroup>,
    package: PackageId,
    types: Arc<TypeTable>,
    type_node: Option<TypeNode>,
}

impl Facade {
    pub(crate) fn new(
        ident: NodeId,
        object_id: ObjectId,
        object: Object,
        doc: Option<CommentGroup>,
        package: PackageId,
        types: Arc<TypeTable>,
        type_node: Option<TypeNode>,
    ) -> Self {
        Self {
            ident,
            object_id,
            object,
            doc,
            package,
            types,
            type_node,
        }
    }

    /// Declaring identifier.
    pub fn ident(&self) -> NodeId {
        self.ident
    }

    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    /// Owning package.
    pub fn package(&self) -> PackageId {
        self.package
    }

    /// Current name. A renamed type reports its new name.
    pub fn name(&self) -> &str {
        match &self.type_node {
            Some(node) => node.name(),
            None => &self.object.name,
        }
    }

    pub fn decl_kind(&self) -> DeclKind {
        self.object.kind.into()
    }

    pub fn type_kind(&self) -> TypeKind {
        self.types.kind_of(self.object.ty)
    }

    pub fn is_exported(&self) -> bool {
        self.name().chars().next().is_some_and(char::is_uppercase)
    }

    /// Doc comment text, empty when there is none.
    pub fn doc(&self) -> String {
        self.doc.as_ref().map(CommentGroup::text).unwrap_or_default()
    }

    pub fn type_node(&self) -> Option<&TypeNode> {
        self.type_node.as_ref()
    }

    pub fn type_node_mut(&mut self) -> Option<&mut TypeNode> {
        self.type_node.as_mut()
    }

    pub fn num_method(&self) -> usize {
        self.type_node.as_ref().map_or(0, TypeNode::num_method)
    }

    pub fn method(&self, i: usize) -> Option<&FuncNode> {
        self.type_node.as_ref()?.method(i)
    }

    pub fn method_by_name(&self, name: &str) -> Option<&FuncNode> {
        self.type_node.as_ref()?.method_by_name(name)
    }

    /// Appends a method to the type declared here. Facades that do not
    /// declare a type reject every method.
    pub fn add_method(&mut self, method: FuncNode) -> AsterResult<()> {
        match &mut self.type_node {
            Some(node) => node.add_method(method),
            None if method.recv().is_none() => Err(AsterError::NotMethod {
                name: method.name().to_string(),
            }),
            None => Err(AsterError::ReceiverMismatch {
                method: method.name().to_string(),
                want: self.object.name.clone(),
                got: method
                    .recv()
                    .map(|r| r.type_name.clone())
                    .unwrap_or_default(),
            }),
        }
    }

    /// Whether this facade's method set covers `other`'s. A facade without a
    /// type node has no methods, so it only covers an empty method set.
    pub fn implements(&self, other: &Facade) -> bool {
        match (&self.type_node, &other.type_node) {
            (Some(have), Some(want)) => have.implements(want),
            (None, want) => want.as_ref().is_none_or(|w| w.num_method() == 0),
            (Some(_), None) => false,
        }
    }
}

impl fmt::Display for Facade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.decl_kind(), self.name())
    }
}
