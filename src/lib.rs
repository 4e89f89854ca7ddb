//! Semantic facade over parsed and type-checked Go-style syntax.
//!
//! A [`Program`] is built from checker output ([`ProgramInput`]): syntax
//! trees in a [`SyntaxArena`], a session-wide [`TypeTable`] and one
//! [`PackageInput`] per package. Every declared identifier is classified
//! into a [`Facade`] with a [`DeclKind`] and a [`TypeKind`]; type
//! declarations carry a [`TypeNode`] with their method set, and struct
//! fields expose editable tags.

pub mod checker;
pub mod config;
pub mod error;
pub mod facade;
pub mod logging;
pub mod node;
pub mod package;
pub mod program;
pub mod syntax;
pub mod tag;
pub mod types;

// Explicit exports for better API clarity
pub use checker::{CheckError, Facts, Object, ObjectKind, PackageInput, Type, TypeTable};
pub use config::Settings;
pub use error::{AsterError, AsterResult};
pub use facade::Facade;
pub use node::{
    FuncField, FuncNode, StructField, StructTag, StructType, TypeNode, TypeVariant,
};
pub use package::PackageInfo;
pub use program::{Program, ProgramInput};
pub use syntax::{ChanDir, CommentGroup, DeclToken, NodeKind, SyntaxArena};
pub use tag::{Tag, Tags};
pub use types::{
    DeclKind, DeclKindSet, NodeId, ObjectId, PackageId, Pos, Span, TypeId, TypeKind, TypeKindSet,
};
