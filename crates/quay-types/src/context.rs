//! Type context: interning and construction of type descriptors

use crate::error::TypeError;
use crate::ty::{ContainerType, FunctionType, NamedType, Scalar, Type, TypeId, UnionType};
use rustc_hash::FxHashMap;

/// Append-only store of interned type descriptors
///
/// Descriptors are immutable once interned; interning the same structural
/// shape twice yields the same [`TypeId`].
#[derive(Debug, Default)]
pub struct TypeContext {
    /// Interned types, indexed by TypeId
    types: Vec<Type>,

    /// Reverse lookup for deduplication
    interned: FxHashMap<Type, TypeId>,
}

impl TypeContext {
    /// Create a new, empty type context
    pub fn new() -> Self {
        TypeContext {
            types: Vec::new(),
            interned: FxHashMap::default(),
        }
    }

    /// Intern a type, returning its id
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.interned.get(&ty) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty.clone());
        self.interned.insert(ty, id);
        id
    }

    /// Look up a type by id
    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.0 as usize)
    }

    /// The `any` type
    pub fn any_type(&mut self) -> TypeId {
        self.intern(Type::Any)
    }

    /// The `bool` type
    pub fn bool_type(&mut self) -> TypeId {
        self.intern(Type::Scalar(Scalar::Bool))
    }

    /// The `char` type
    pub fn char_type(&mut self) -> TypeId {
        self.intern(Type::Scalar(Scalar::Char))
    }

    /// The `i32` type
    pub fn i32_type(&mut self) -> TypeId {
        self.intern(Type::Scalar(Scalar::I32))
    }

    /// The `f64` type
    pub fn f64_type(&mut self) -> TypeId {
        self.intern(Type::Scalar(Scalar::F64))
    }

    /// An arbitrary scalar type
    pub fn scalar_type(&mut self, scalar: Scalar) -> TypeId {
        self.intern(Type::Scalar(scalar))
    }

    /// The foreign `String` wrapper type
    pub fn string_type(&mut self) -> TypeId {
        self.class_type(crate::ty::STRING_WRAPPER, None)
    }

    /// A nominal class type with an optional direct base
    pub fn class_type(&mut self, name: &str, base: Option<TypeId>) -> TypeId {
        self.intern(Type::Named(NamedType {
            name: name.to_string(),
            base,
        }))
    }

    /// A union of the given variants
    ///
    /// An empty variant list is rejected outright: the ∀-source rule
    /// would otherwise make it vacuously compatible with everything, so
    /// an empty union never reaches the oracle at all.
    pub fn union_type(&mut self, variants: Vec<TypeId>) -> Result<TypeId, TypeError> {
        if variants.is_empty() {
            return Err(TypeError::EmptyUnion);
        }
        Ok(self.intern(Type::Union(UnionType { variants })))
    }

    /// A function type with fixed parameters
    pub fn function_type(&mut self, params: Vec<TypeId>, ret: TypeId) -> TypeId {
        self.intern(Type::Function(FunctionType {
            params,
            rest: None,
            ret,
        }))
    }

    /// A function type with fixed parameters and a variadic tail
    pub fn variadic_function_type(
        &mut self,
        params: Vec<TypeId>,
        rest: TypeId,
        ret: TypeId,
    ) -> TypeId {
        self.intern(Type::Function(FunctionType {
            params,
            rest: Some(rest),
            ret,
        }))
    }

    /// A container type `head<element>`
    pub fn container_type(&mut self, head: &str, element: TypeId) -> TypeId {
        self.intern(Type::Container(ContainerType {
            head: head.to_string(),
            element,
        }))
    }

    /// The array-like container `Array<element>`
    pub fn array_type(&mut self, element: TypeId) -> TypeId {
        self.container_type("Array", element)
    }

    /// A reference to `inner`
    pub fn ref_type(&mut self, inner: TypeId) -> TypeId {
        self.intern(Type::Ref(inner))
    }

    /// A pointer to `inner`
    pub fn ptr_type(&mut self, inner: TypeId) -> TypeId {
        self.intern(Type::Ptr(inner))
    }

    /// A const-qualified `inner`
    pub fn const_type(&mut self, inner: TypeId) -> TypeId {
        self.intern(Type::Const(inner))
    }

    /// The string-literal shape: pointer to const char
    pub fn char_ptr_type(&mut self) -> TypeId {
        let ch = self.char_type();
        let const_ch = self.const_type(ch);
        self.ptr_type(const_ch)
    }

    /// Check whether `id` has the string-literal shape (pointer to
    /// possibly-const `char`), before or after qualification
    pub fn is_char_pointer(&self, id: TypeId) -> bool {
        let mut cur = id;
        // Strip outer Ref/Const down to the pointer itself
        loop {
            match self.get(cur) {
                Some(Type::Ref(inner)) | Some(Type::Const(inner)) => cur = *inner,
                Some(Type::Ptr(inner)) => {
                    let mut pointee = *inner;
                    while let Some(Type::Const(inner)) = self.get(pointee) {
                        pointee = *inner;
                    }
                    return matches!(self.get(pointee), Some(Type::Scalar(Scalar::Char)));
                }
                _ => return false,
            }
        }
    }

    /// Render a type as a human-readable string for diagnostics
    pub fn display(&self, id: TypeId) -> String {
        match self.get(id) {
            None => format!("<unknown {}>", id),
            Some(Type::Any) => "any".to_string(),
            Some(Type::Scalar(s)) => s.to_string(),
            Some(Type::Named(n)) => n.name.clone(),
            Some(Type::Union(u)) => {
                let parts: Vec<String> = u.variants.iter().map(|&v| self.display(v)).collect();
                parts.join(" | ")
            }
            Some(Type::Function(f)) => {
                let mut parts: Vec<String> = f.params.iter().map(|&p| self.display(p)).collect();
                if let Some(rest) = f.rest {
                    parts.push(format!("...{}", self.display(rest)));
                }
                format!("({}) => {}", parts.join(", "), self.display(f.ret))
            }
            Some(Type::Container(c)) => format!("{}<{}>", c.head, self.display(c.element)),
            Some(Type::Ref(inner)) => format!("&{}", self.display(*inner)),
            Some(Type::Ptr(inner)) => format!("*{}", self.display(*inner)),
            Some(Type::Const(inner)) => format!("const {}", self.display(*inner)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_deduplicates() {
        let mut ctx = TypeContext::new();
        let a = ctx.any_type();
        let b = ctx.any_type();
        assert_eq!(a, b);

        let n1 = ctx.class_type("Node", None);
        let n2 = ctx.class_type("Node", None);
        assert_eq!(n1, n2);

        let other = ctx.class_type("Element", Some(n1));
        assert_ne!(n1, other);
    }

    #[test]
    fn test_lookup() {
        let mut ctx = TypeContext::new();
        let num = ctx.f64_type();
        assert_eq!(ctx.get(num), Some(&Type::Scalar(Scalar::F64)));
        assert!(ctx.get(TypeId(999)).is_none());
    }

    #[test]
    fn test_char_pointer_shape() {
        let mut ctx = TypeContext::new();
        let literal = ctx.char_ptr_type();
        assert!(ctx.is_char_pointer(literal));

        // Plain pointer to char, no const
        let ch = ctx.char_type();
        let bare = ctx.ptr_type(ch);
        assert!(ctx.is_char_pointer(bare));

        // Reference to the literal shape still qualifies
        let r = ctx.ref_type(literal);
        assert!(ctx.is_char_pointer(r));

        // Not pointers at all
        let num = ctx.f64_type();
        assert!(!ctx.is_char_pointer(num));
        let num_ptr = ctx.ptr_type(num);
        assert!(!ctx.is_char_pointer(num_ptr));
    }

    #[test]
    fn test_empty_union_is_rejected() {
        let mut ctx = TypeContext::new();
        assert_eq!(ctx.union_type(vec![]), Err(TypeError::EmptyUnion));

        // Nothing was interned for it, so no id exists that the oracle
        // could be asked about.
        let num = ctx.f64_type();
        let valid = ctx.union_type(vec![num]);
        assert!(valid.is_ok());
    }

    #[test]
    fn test_display() {
        let mut ctx = TypeContext::new();
        let num = ctx.f64_type();
        let string = ctx.string_type();
        let union = ctx.union_type(vec![num, string]).unwrap();
        assert_eq!(ctx.display(union), "f64 | String");

        let arr = ctx.array_type(num);
        assert_eq!(ctx.display(arr), "Array<f64>");

        let func = ctx.variadic_function_type(vec![num], string, num);
        assert_eq!(ctx.display(func), "(f64, ...String) => f64");

        let r = ctx.ref_type(string);
        assert_eq!(ctx.display(r), "&String");
    }
}
