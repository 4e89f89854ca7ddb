//! Declaration and type-shape classification.
//!
//! Every facade is classified twice: by what the checker says the object is
//! ([`DeclKind`]) and by the shape of its resolved type ([`TypeKind`]). Both
//! enums map onto one bit of a mask so lookups can ask for "any of" a group.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of entity a declared object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DeclKind {
    Bad,
    Label,
    Builtin,
    Nil,
    Variable,
    Constant,
    Function,
    Type,
    Package,
}

bitflags! {
    /// Any-of mask over [`DeclKind`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DeclKindSet: u16 {
        const BAD       = 1 << DeclKind::Bad as u8;
        const LABEL     = 1 << DeclKind::Label as u8;
        const BUILTIN   = 1 << DeclKind::Builtin as u8;
        const NIL       = 1 << DeclKind::Nil as u8;
        const VARIABLE  = 1 << DeclKind::Variable as u8;
        const CONSTANT  = 1 << DeclKind::Constant as u8;
        const FUNCTION  = 1 << DeclKind::Function as u8;
        const TYPE      = 1 << DeclKind::Type as u8;
        const PACKAGE   = 1 << DeclKind::Package as u8;
    }
}

impl DeclKind {
    pub fn bit(self) -> DeclKindSet {
        DeclKindSet::from_bits_retain(1 << self as u8)
    }

    /// Whether this kind's bit is present in `set`.
    pub fn in_set(self, set: DeclKindSet) -> bool {
        set.contains(self.bit())
    }

    /// Lookup filter semantics: an empty mask matches every kind.
    pub fn matches(self, set: DeclKindSet) -> bool {
        set.is_empty() || self.in_set(set)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Bad => "bad",
            DeclKind::Label => "label",
            DeclKind::Builtin => "builtin",
            DeclKind::Nil => "nil",
            DeclKind::Variable => "var",
            DeclKind::Constant => "const",
            DeclKind::Function => "func",
            DeclKind::Type => "type",
            DeclKind::Package => "package",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a resolved type.
///
/// `Suspense` stands for a type that could not be resolved (an unresolved
/// alias, or an invalid type reported by the checker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TypeKind {
    Suspense,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedString,
    UntypedNil,
    Array,
    Slice,
    Map,
    Chan,
    Interface,
    Struct,
    Func,
    Ptr,
}

bitflags! {
    /// Any-of mask over [`TypeKind`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeKindSet: u64 {
        const SUSPENSE        = 1 << TypeKind::Suspense as u8;
        const BOOL            = 1 << TypeKind::Bool as u8;
        const INT             = 1 << TypeKind::Int as u8;
        const INT8            = 1 << TypeKind::Int8 as u8;
        const INT16           = 1 << TypeKind::Int16 as u8;
        const INT32           = 1 << TypeKind::Int32 as u8;
        const INT64           = 1 << TypeKind::Int64 as u8;
        const UINT            = 1 << TypeKind::Uint as u8;
        const UINT8           = 1 << TypeKind::Uint8 as u8;
        const UINT16          = 1 << TypeKind::Uint16 as u8;
        const UINT32          = 1 << TypeKind::Uint32 as u8;
        const UINT64          = 1 << TypeKind::Uint64 as u8;
        const UINTPTR         = 1 << TypeKind::Uintptr as u8;
        const FLOAT32         = 1 << TypeKind::Float32 as u8;
        const FLOAT64         = 1 << TypeKind::Float64 as u8;
        const COMPLEX64       = 1 << TypeKind::Complex64 as u8;
        const COMPLEX128      = 1 << TypeKind::Complex128 as u8;
        const STRING          = 1 << TypeKind::String as u8;
        const UNSAFE_POINTER  = 1 << TypeKind::UnsafePointer as u8;
        const UNTYPED_BOOL    = 1 << TypeKind::UntypedBool as u8;
        const UNTYPED_INT     = 1 << TypeKind::UntypedInt as u8;
        const UNTYPED_RUNE    = 1 << TypeKind::UntypedRune as u8;
        const UNTYPED_FLOAT   = 1 << TypeKind::UntypedFloat as u8;
        const UNTYPED_COMPLEX = 1 << TypeKind::UntypedComplex as u8;
        const UNTYPED_STRING  = 1 << TypeKind::UntypedString as u8;
        const UNTYPED_NIL     = 1 << TypeKind::UntypedNil as u8;
        const ARRAY           = 1 << TypeKind::Array as u8;
        const SLICE           = 1 << TypeKind::Slice as u8;
        const MAP             = 1 << TypeKind::Map as u8;
        const CHAN            = 1 << TypeKind::Chan as u8;
        const INTERFACE       = 1 << TypeKind::Interface as u8;
        const STRUCT          = 1 << TypeKind::Struct as u8;
        const FUNC            = 1 << TypeKind::Func as u8;
        const PTR             = 1 << TypeKind::Ptr as u8;

        const INTEGER = Self::INT.bits() | Self::INT8.bits() | Self::INT16.bits()
            | Self::INT32.bits() | Self::INT64.bits() | Self::UINT.bits()
            | Self::UINT8.bits() | Self::UINT16.bits() | Self::UINT32.bits()
            | Self::UINT64.bits() | Self::UINTPTR.bits();
        const FLOAT = Self::FLOAT32.bits() | Self::FLOAT64.bits();
        const COMPLEX = Self::COMPLEX64.bits() | Self::COMPLEX128.bits();
        const UNTYPED = Self::UNTYPED_BOOL.bits() | Self::UNTYPED_INT.bits()
            | Self::UNTYPED_RUNE.bits() | Self::UNTYPED_FLOAT.bits()
            | Self::UNTYPED_COMPLEX.bits() | Self::UNTYPED_STRING.bits()
            | Self::UNTYPED_NIL.bits();
        const BASIC = Self::BOOL.bits() | Self::INTEGER.bits() | Self::FLOAT.bits()
            | Self::COMPLEX.bits() | Self::STRING.bits() | Self::UNSAFE_POINTER.bits()
            | Self::UNTYPED.bits();
        const LIST = Self::ARRAY.bits() | Self::SLICE.bits();
    }
}

impl TypeKind {
    pub fn bit(self) -> TypeKindSet {
        TypeKindSet::from_bits_retain(1 << self as u8)
    }

    /// Whether this kind's bit is present in `set`.
    pub fn in_set(self, set: TypeKindSet) -> bool {
        set.contains(self.bit())
    }

    /// Lookup filter semantics: an empty mask matches every kind.
    pub fn matches(self, set: TypeKindSet) -> bool {
        set.is_empty() || self.in_set(set)
    }

    pub fn is_basic(self) -> bool {
        self.in_set(TypeKindSet::BASIC)
    }

    /// Maps the spelling of a predeclared basic type to its kind.
    ///
    /// `byte` and `rune` resolve to `Uint8` and `Int32`.
    pub fn from_basic_name(name: &str) -> Option<TypeKind> {
        let kind = match name {
            "bool" => TypeKind::Bool,
            "int" => TypeKind::Int,
            "int8" => TypeKind::Int8,
            "int16" => TypeKind::Int16,
            "int32" | "rune" => TypeKind::Int32,
            "int64" => TypeKind::Int64,
            "uint" => TypeKind::Uint,
            "uint8" | "byte" => TypeKind::Uint8,
            "uint16" => TypeKind::Uint16,
            "uint32" => TypeKind::Uint32,
            "uint64" => TypeKind::Uint64,
            "uintptr" => TypeKind::Uintptr,
            "float32" => TypeKind::Float32,
            "float64" => TypeKind::Float64,
            "complex64" => TypeKind::Complex64,
            "complex128" => TypeKind::Complex128,
            "string" => TypeKind::String,
            "unsafe.Pointer" => TypeKind::UnsafePointer,
            "untyped bool" => TypeKind::UntypedBool,
            "untyped int" => TypeKind::UntypedInt,
            "untyped rune" => TypeKind::UntypedRune,
            "untyped float" => TypeKind::UntypedFloat,
            "untyped complex" => TypeKind::UntypedComplex,
            "untyped string" => TypeKind::UntypedString,
            "untyped nil" => TypeKind::UntypedNil,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Suspense => "suspense",
            TypeKind::Bool => "bool",
            TypeKind::Int => "int",
            TypeKind::Int8 => "int8",
            TypeKind::Int16 => "int16",
            TypeKind::Int32 => "int32",
            TypeKind::Int64 => "int64",
            TypeKind::Uint => "uint",
            TypeKind::Uint8 => "uint8",
            TypeKind::Uint16 => "uint16",
            TypeKind::Uint32 => "uint32",
            TypeKind::Uint64 => "uint64",
            TypeKind::Uintptr => "uintptr",
            TypeKind::Float32 => "float32",
            TypeKind::Float64 => "float64",
            TypeKind::Complex64 => "complex64",
            TypeKind::Complex128 => "complex128",
            TypeKind::String => "string",
            TypeKind::UnsafePointer => "unsafe.Pointer",
            TypeKind::UntypedBool => "untyped bool",
            TypeKind::UntypedInt => "untyped int",
            TypeKind::UntypedRune => "untyped rune",
            TypeKind::UntypedFloat => "untyped float",
            TypeKind::UntypedComplex => "untyped complex",
            TypeKind::UntypedString => "untyped string",
            TypeKind::UntypedNil => "untyped nil",
            TypeKind::Array => "array",
            TypeKind::Slice => "slice",
            TypeKind::Map => "map",
            TypeKind::Chan => "chan",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Func => "func",
            TypeKind::Ptr => "ptr",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
