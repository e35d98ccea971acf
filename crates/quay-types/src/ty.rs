//! Core type descriptors for the Quay boundary layer

use std::fmt;

/// Unique identifier for a type in the type context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Well-known name of the foreign string wrapper type
pub const STRING_WRAPPER: &str = "String";

/// Host-native arithmetic types
///
/// All arithmetic kinds are mutually convertible, mirroring the host
/// language's built-in numeric conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// The `bool` type
    Bool,
    /// The `char` type (byte-sized character unit)
    Char,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scalar::Bool => "bool",
            Scalar::Char => "char",
            Scalar::I8 => "i8",
            Scalar::I16 => "i16",
            Scalar::I32 => "i32",
            Scalar::I64 => "i64",
            Scalar::U8 => "u8",
            Scalar::U16 => "u16",
            Scalar::U32 => "u32",
            Scalar::U64 => "u64",
            Scalar::F32 => "f32",
            Scalar::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// Nominal type with a single base chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    /// Type name
    pub name: String,
    /// Direct base type (if any)
    pub base: Option<TypeId>,
}

/// Union type: a value statically known to be one of a fixed variant list
///
/// The variant list is non-empty by construction. No runtime discriminant
/// is assumed; compatibility over unions is purely structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnionType {
    /// Union variants
    pub variants: Vec<TypeId>,
}

/// Foreign function type: (params..., rest...) => ret
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    /// Fixed parameter types, in order
    pub params: Vec<TypeId>,
    /// Element type of the variadic tail (if any)
    ///
    /// A variadic tail collapses every remaining argument position into
    /// one element-type comparison.
    pub rest: Option<TypeId>,
    /// Return type
    pub ret: TypeId,
}

/// Array-like container with a single element type parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerType {
    /// Container head (generic name), e.g. "Array"
    pub head: String,
    /// Element type
    pub element: TypeId,
}

/// The closed descriptor set used by the compatibility oracle
///
/// `Ref`, `Ptr` and `Const` are qualifier wrappers stripped by
/// normalization before any comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The universal `any` type, compatible with everything in both roles
    Any,

    /// Host-native arithmetic type
    Scalar(Scalar),

    /// Nominal type with a base chain
    Named(NamedType),

    /// Union type: T1 | T2 | ... | Tn
    Union(UnionType),

    /// Function type: (params) => ret
    Function(FunctionType),

    /// Container type: Head<T>
    Container(ContainerType),

    /// Reference qualifier: &T
    Ref(TypeId),

    /// Pointer qualifier: *T
    Ptr(TypeId),

    /// Const qualifier: const T
    Const(TypeId),
}

impl Type {
    /// Check if this type is `any`
    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }

    /// Check if this type is a host arithmetic type
    pub fn is_scalar(&self) -> bool {
        matches!(self, Type::Scalar(_))
    }

    /// Check if this type is a union type
    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    /// Check if this type is a function type
    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function(_))
    }

    /// Check if this type is a qualifier wrapper (stripped by normalization)
    pub fn is_qualifier(&self) -> bool {
        matches!(self, Type::Ref(_) | Type::Ptr(_) | Type::Const(_))
    }

    /// Check if this type is the foreign `String` wrapper
    pub fn is_string_wrapper(&self) -> bool {
        matches!(self, Type::Named(n) if n.name == STRING_WRAPPER)
    }

    /// Get the scalar kind if this is an arithmetic type
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Type::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Get the named type if this is a nominal type
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            Type::Named(n) => Some(n),
            _ => None,
        }
    }

    /// Get the union type if this is a union
    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            Type::Union(u) => Some(u),
            _ => None,
        }
    }

    /// Get the function type if this is a function
    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Get the container type if this is a container
    pub fn as_container(&self) -> Option<&ContainerType> {
        match self {
            Type::Container(c) => Some(c),
            _ => None,
        }
    }
}
