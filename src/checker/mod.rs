//! Type-checker output consumed by the facade layer.
//!
//! The checker itself is external. These records are what an adapter fills
//! in: one [`TypeTable`] per session (so type identity holds across packages)
//! and one [`PackageInput`] per compilation unit.

use crate::syntax::ChanDir;
use crate::types::{DeclKind, NodeId, ObjectId, Pos, TypeId, TypeKind};
use thiserror::Error;

/// What the checker bound an identifier to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Bad,
    Label,
    Builtin,
    Nil,
    Var,
    Const,
    Func,
    TypeName,
    PkgName,
}

impl From<ObjectKind> for DeclKind {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Bad => DeclKind::Bad,
            ObjectKind::Label => DeclKind::Label,
            ObjectKind::Builtin => DeclKind::Builtin,
            ObjectKind::Nil => DeclKind::Nil,
            ObjectKind::Var => DeclKind::Variable,
            ObjectKind::Const => DeclKind::Constant,
            ObjectKind::Func => DeclKind::Function,
            ObjectKind::TypeName => DeclKind::Type,
            ObjectKind::PkgName => DeclKind::Package,
        }
    }
}

/// A declared semantic entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub kind: ObjectKind,
    pub name: String,
    pub ty: TypeId,
}

impl Object {
    pub fn new(kind: ObjectKind, name: &str, ty: TypeId) -> Self {
        Self {
            kind,
            name: name.to_string(),
            ty,
        }
    }

    /// Exported names start with an upper-case letter.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Semantic type, as resolved by the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Invalid,
    /// A member of the basic family of [`TypeKind`].
    Basic(TypeKind),
    Named {
        name: String,
        underlying: TypeId,
    },
    Pointer(TypeId),
    Array {
        len: u64,
        elem: TypeId,
    },
    Slice(TypeId),
    Map {
        key: TypeId,
        value: TypeId,
    },
    Chan {
        dir: ChanDir,
        elem: TypeId,
    },
    Interface,
    Struct,
    Signature {
        variadic: bool,
    },
}

/// Interned types of one analysis session. Id 0 is always `Invalid`.
#[derive(Debug, Clone)]
pub struct TypeTable {
    types: Vec<Type>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    pub fn new() -> Self {
        Self {
            types: vec![Type::Invalid],
        }
    }

    pub fn invalid(&self) -> TypeId {
        TypeId(0)
    }

    pub fn insert(&mut self, ty: Type) -> TypeId {
        let id = TypeId::from_index(self.types.len());
        self.types.push(ty);
        id
    }

    /// Declares a named type whose underlying type is filled in later with
    /// [`TypeTable::set_underlying`], for self-referencing declarations.
    pub fn declare_named(&mut self, name: &str) -> TypeId {
        let invalid = self.invalid();
        self.insert(Type::Named {
            name: name.to_string(),
            underlying: invalid,
        })
    }

    /// Returns false if `named` is not a named type.
    pub fn set_underlying(&mut self, named: TypeId, under: TypeId) -> bool {
        match self.types.get_mut(named.index()) {
            Some(Type::Named { underlying, .. }) => {
                *underlying = under;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The type itself for unnamed types, the underlying type for named ones.
    pub fn underlying(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            Some(Type::Named { underlying, .. }) => *underlying,
            _ => id,
        }
    }

    /// Shape of a type, looking through one level of naming.
    pub fn kind_of(&self, id: TypeId) -> TypeKind {
        match self.get(self.underlying(id)) {
            None | Some(Type::Invalid) | Some(Type::Named { .. }) => TypeKind::Suspense,
            Some(Type::Basic(kind)) if kind.is_basic() => *kind,
            Some(Type::Basic(_)) => TypeKind::Suspense,
            Some(Type::Pointer(_)) => TypeKind::Ptr,
            Some(Type::Array { .. }) => TypeKind::Array,
            Some(Type::Slice(_)) => TypeKind::Slice,
            Some(Type::Map { .. }) => TypeKind::Map,
            Some(Type::Chan { .. }) => TypeKind::Chan,
            Some(Type::Interface) => TypeKind::Interface,
            Some(Type::Struct) => TypeKind::Struct,
            Some(Type::Signature { .. }) => TypeKind::Func,
        }
    }
}

/// Identifier bindings of one package.
///
/// `defs` keeps the order the checker reported bindings in; classification
/// follows it.
#[derive(Debug, Clone, Default)]
pub struct Facts {
    objects: Vec<Object>,
    defs: Vec<(NodeId, ObjectId)>,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `ident` declares `object`.
    pub fn define(&mut self, ident: NodeId, object: Object) -> ObjectId {
        let id = ObjectId::from_index(self.objects.len());
        self.objects.push(object);
        self.defs.push((ident, id));
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.index())
    }

    /// Object declared by `ident`, if any.
    pub fn object_of(&self, ident: NodeId) -> Option<ObjectId> {
        self.defs
            .iter()
            .find(|(i, _)| *i == ident)
            .map(|(_, obj)| *obj)
    }

    /// Identifier that declares `object`, if any.
    pub fn ident_of(&self, object: ObjectId) -> Option<NodeId> {
        self.defs
            .iter()
            .find(|(_, o)| *o == object)
            .map(|(ident, _)| *ident)
    }

    pub fn defs(&self) -> impl Iterator<Item = (NodeId, ObjectId)> + '_ {
        self.defs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// A semantic error reported by the checker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{pos}: {message}")]
pub struct CheckError {
    pub pos: Pos,
    pub message: String,
}

impl CheckError {
    pub fn new(pos: Pos, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

/// Everything the checker produced for one compilation unit.
#[derive(Debug, Clone)]
pub struct PackageInput {
    pub path: String,
    pub name: String,
    /// `import "path"` would resolve to this package.
    pub importable: bool,
    /// The package and all of its dependencies are free of errors.
    pub transitively_error_free: bool,
    /// `File` nodes in the session arena.
    pub files: Vec<NodeId>,
    pub errors: Vec<CheckError>,
    pub facts: Facts,
}

impl PackageInput {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            importable: true,
            transitively_error_free: true,
            files: Vec::new(),
            errors: Vec::new(),
            facts: Facts::new(),
        }
    }
}
