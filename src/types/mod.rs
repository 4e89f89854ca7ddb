mod kind;

pub use kind::{DeclKind, DeclKindSet, TypeKind, TypeKindSet};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a syntax node inside a [`SyntaxArena`](crate::syntax::SyntaxArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Handle of a semantic object inside one package's fact table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Handle of a type inside the session-wide [`TypeTable`](crate::checker::TypeTable).
///
/// Two types are identical iff their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u32);

/// Index of a package inside a [`Program`](crate::Program).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageId(pub u32);

/// A source position. `Pos::NONE` marks synthesized nodes that have no
/// location in any file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Pos(pub u32);

/// Half-open source interval `[pos, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub pos: Pos,
    pub end: Pos,
}

macro_rules! impl_index_id {
    ($($id:ident),*) => {
        $(
            impl $id {
                pub fn value(&self) -> u32 {
                    self.0
                }

                pub(crate) fn index(self) -> usize {
                    self.0 as usize
                }

                pub(crate) fn from_index(index: usize) -> Self {
                    Self(index as u32)
                }
            }
        )*
    };
}

impl_index_id!(NodeId, ObjectId, TypeId, PackageId);

impl Pos {
    pub const NONE: Pos = Pos(0);

    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "@{}", self.0)
        } else {
            f.write_str("-")
        }
    }
}

impl Span {
    pub fn new(pos: Pos, end: Pos) -> Self {
        Self { pos, end }
    }

    pub fn is_valid(&self) -> bool {
        self.pos.is_valid()
    }

    /// Whether `[start, end)` lies inside this span.
    pub fn contains(&self, start: Pos, end: Pos) -> bool {
        self.pos <= start && end <= self.end
    }

    /// Whether a single position lies inside this span, end inclusive.
    pub fn contains_pos(&self, pos: Pos) -> bool {
        self.pos <= pos && pos <= self.end
    }
}
