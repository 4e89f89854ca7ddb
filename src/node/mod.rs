//! Type nodes: the syntactic view of a type declaration plus its method set.

mod func;
mod structure;

pub use func::{FuncField, FuncNode};
pub use structure::{StructField, StructTag, StructType};

use crate::error::{AsterError, AsterResult};
use crate::syntax::{ChanDir, CommentGroup, LitKind, NodeKind, SyntaxArena, format_node};
use crate::types::{NodeId, TypeKind};
use tracing::debug;

/// Shape-specific payload of a [`TypeNode`].
#[derive(Debug, Clone)]
pub enum TypeVariant {
    /// Named indirection to another non-basic type, or a function type.
    Alias,
    /// Predeclared basic type, possibly behind a pointer.
    Basic,
    /// Array or slice. `len` is set only for arrays with a literal length.
    List { len: Option<u64> },
    Map,
    Chan { dir: ChanDir },
    Interface,
    Struct(StructType),
}

/// A declared type: `type Name <expr>`.
#[derive(Debug, Clone)]
pub struct TypeNode {
    spec: NodeId,
    name_ident: NodeId,
    name: String,
    kind: TypeKind,
    doc: Option<CommentGroup>,
    assign: bool,
    expr: NodeId,
    methods: Vec<FuncNode>,
    variant: TypeVariant,
}

impl TypeNode {
    /// Builds the node for a `TypeSpec`. Struct bodies are flattened in the
    /// arena, interface bodies seed the method list.
    ///
    /// Returns `None` when `spec` is not a type spec or its type expression
    /// has no recognised shape.
    pub fn new(arena: &mut SyntaxArena, spec: NodeId, doc: Option<CommentGroup>) -> Option<Self> {
        let NodeKind::TypeSpec(ts) = arena.kind(spec) else {
            return None;
        };
        let (name_ident, assign, expr) = (ts.name, ts.assign, ts.ty);
        let name = arena.ident_name(name_ident)?.to_string();

        let mut methods = Vec::new();
        let (kind, variant) = match arena.kind(expr).clone() {
            NodeKind::Ident { .. } | NodeKind::SelectorExpr { .. } | NodeKind::StarExpr { .. } => {
                let rendered = format_node(arena, expr);
                match TypeKind::from_basic_name(rendered.trim_start_matches('*')) {
                    Some(kind) => (kind, TypeVariant::Basic),
                    None => (TypeKind::Suspense, TypeVariant::Alias),
                }
            }
            NodeKind::FuncType { .. } => (TypeKind::Func, TypeVariant::Alias),
            NodeKind::ArrayType { len: None, .. } => (TypeKind::Slice, TypeVariant::List { len: None }),
            NodeKind::ArrayType { len: Some(len), .. } => {
                let len = match arena.kind(len) {
                    NodeKind::BasicLit {
                        kind: LitKind::Int,
                        value,
                    } => value.parse().ok(),
                    _ => None,
                };
                (TypeKind::Array, TypeVariant::List { len })
            }
            NodeKind::MapType { .. } => (TypeKind::Map, TypeVariant::Map),
            NodeKind::ChanType { dir, .. } => (TypeKind::Chan, TypeVariant::Chan { dir }),
            NodeKind::InterfaceType { methods: list } => {
                methods = arena
                    .list_items(list)
                    .iter()
                    .filter_map(|field| FuncNode::from_interface_method(arena, &name, *field))
                    .collect();
                (TypeKind::Interface, TypeVariant::Interface)
            }
            NodeKind::StructType { fields } => (
                TypeKind::Struct,
                TypeVariant::Struct(StructType::new(arena, fields)),
            ),
            _ => return None,
        };

        Some(Self {
            spec,
            name_ident,
            name,
            kind,
            doc,
            assign,
            expr,
            methods,
            variant,
        })
    }

    /// The `TypeSpec` node.
    pub fn node(&self) -> NodeId {
        self.spec
    }

    /// The declared type expression.
    pub fn expr(&self) -> NodeId {
        self.expr
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the type, including its declaring identifier.
    pub fn set_name(&mut self, arena: &mut SyntaxArena, name: &str) {
        arena.set_ident_name(self.name_ident, name);
        self.name = name.to_string();
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn doc(&self) -> String {
        self.doc.as_ref().map(CommentGroup::text).unwrap_or_default()
    }

    /// Whether this is an alias declaration (`type T = U`).
    pub fn is_assign(&self) -> bool {
        self.assign
    }

    pub fn variant(&self) -> &TypeVariant {
        &self.variant
    }

    /// Array length, when it is written as an integer literal.
    ///
    /// `None` for slices and non-list types. An array whose length is a
    /// constant expression (`[Size]int`) still has kind
    /// [`TypeKind::Array`] but reports `None` here.
    pub fn len(&self) -> Option<u64> {
        match self.variant {
            TypeVariant::List { len } => len,
            _ => None,
        }
    }

    /// Channel direction; `None` for non-channel types.
    pub fn dir(&self) -> Option<ChanDir> {
        match self.variant {
            TypeVariant::Chan { dir } => Some(dir),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructType> {
        match &self.variant {
            TypeVariant::Struct(st) => Some(st),
            _ => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut StructType> {
        match &mut self.variant {
            TypeVariant::Struct(st) => Some(st),
            _ => None,
        }
    }

    pub fn num_method(&self) -> usize {
        self.methods.len()
    }

    pub fn method(&self, i: usize) -> Option<&FuncNode> {
        self.methods.get(i)
    }

    /// First method called `name`.
    pub fn method_by_name(&self, name: &str) -> Option<&FuncNode> {
        self.methods.iter().find(|m| m.name() == name)
    }

    pub fn methods(&self) -> &[FuncNode] {
        &self.methods
    }

    /// Appends a method. The receiver's type name (pointer stripped) must be
    /// this type's name.
    pub fn add_method(&mut self, method: FuncNode) -> AsterResult<()> {
        let Some(recv) = method.recv() else {
            return Err(AsterError::NotMethod {
                name: method.name().to_string(),
            });
        };
        if recv.type_name != self.name {
            return Err(AsterError::ReceiverMismatch {
                method: method.name().to_string(),
                want: self.name.clone(),
                got: recv.type_name.clone(),
            });
        }
        debug!(owner = %self.name, method = method.name(), "attached method");
        self.methods.push(method);
        Ok(())
    }

    /// Whether every method of `other` has a same-named method here with
    /// the same signature. Only type spellings are compared.
    pub fn implements(&self, other: &TypeNode) -> bool {
        other.methods.iter().all(|want| {
            self.method_by_name(want.name())
                .is_some_and(|have| have.same_signature(want))
        })
    }
}
