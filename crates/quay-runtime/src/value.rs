//! Foreign value model
//!
//! Dynamically typed values as seen across the boundary: the universal
//! `any` handle, declared-variant unions, strings, functions and
//! array-like containers. Casting out of a dynamic value is always a
//! checked conversion against the value's actual tag, never a
//! reinterpretation of memory.

use crate::promise::Promise;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Errors raised by checked dynamic casts
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValueError {
    /// The value's dynamic tag does not match the requested type
    #[error("Wrong type: expected {expected}, found {actual}")]
    WrongType {
        /// Requested type name
        expected: &'static str,
        /// Actual dynamic type name
        actual: &'static str,
    },

    /// The requested type is not among a union's declared variants
    #[error("Type {ty} is not a declared variant of {declared}")]
    NotAVariant {
        /// Requested type name
        ty: &'static str,
        /// Declared variant list, rendered
        declared: String,
    },

    /// A union value was declared with no variants
    #[error("Union must declare at least one variant")]
    EmptyUnion,
}

/// Foreign string wrapper
///
/// Constructed fresh from host string data on every crossing; no
/// caching or interning. Equality compares content, [`ptr_eq`]
/// compares instance identity.
///
/// [`ptr_eq`]: JsString::ptr_eq
#[derive(Debug, Clone)]
pub struct JsString {
    content: Rc<str>,
}

impl JsString {
    /// Construct a new wrapper instance from host string data
    pub fn new(content: &str) -> Self {
        JsString {
            content: Rc::from(content),
        }
    }

    /// The wrapped string content
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Check whether two wrappers are the same instance
    pub fn ptr_eq(&self, other: &JsString) -> bool {
        Rc::ptr_eq(&self.content, &other.content)
    }
}

impl PartialEq for JsString {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// Array-like foreign container
///
/// Shared by handle: cloning yields another handle to the same backing
/// storage, matching foreign object semantics.
#[derive(Debug, Clone, Default)]
pub struct JsArray {
    elements: Rc<RefCell<Vec<JsValue>>>,
}

impl JsArray {
    /// Create an empty array
    pub fn new() -> Self {
        JsArray::default()
    }

    /// Create an array from existing elements
    pub fn from_vec(elements: Vec<JsValue>) -> Self {
        JsArray {
            elements: Rc::new(RefCell::new(elements)),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    /// Check if the array is empty
    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }

    /// Element at `index`, if present
    pub fn get(&self, index: usize) -> Option<JsValue> {
        self.elements.borrow().get(index).cloned()
    }

    /// Append an element
    pub fn push(&self, value: JsValue) {
        self.elements.borrow_mut().push(value);
    }

    /// Check whether two handles refer to the same backing array
    pub fn ptr_eq(&self, other: &JsArray) -> bool {
        Rc::ptr_eq(&self.elements, &other.elements)
    }
}

/// Foreign function wrapping a host callable
#[derive(Clone)]
pub struct JsFunction {
    callable: Rc<dyn Fn(&[JsValue]) -> JsValue>,
}

impl JsFunction {
    /// Wrap a host callable
    pub fn new(callable: impl Fn(&[JsValue]) -> JsValue + 'static) -> Self {
        JsFunction {
            callable: Rc::new(callable),
        }
    }

    /// Invoke the wrapped callable
    pub fn call(&self, args: &[JsValue]) -> JsValue {
        (self.callable)(args)
    }

    /// Check whether two handles wrap the same callable
    pub fn ptr_eq(&self, other: &JsFunction) -> bool {
        Rc::ptr_eq(&self.callable, &other.callable)
    }
}

impl fmt::Debug for JsFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsFunction")
    }
}

/// Opaque handle standing in for a const reference passed across the
/// boundary: the address identity of the referenced host object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(usize);

impl ObjectHandle {
    /// Handle for the object behind a shared reference
    pub fn of<T>(value: &T) -> Self {
        ObjectHandle(value as *const T as usize)
    }

    /// The referenced address
    pub fn addr(self) -> usize {
        self.0
    }
}

/// Dynamically typed foreign value
#[derive(Debug, Clone)]
pub enum JsValue {
    /// Absent value
    Undefined,
    /// Boolean value
    Boolean(bool),
    /// Numeric value (IEEE 754 double)
    Number(f64),
    /// String wrapper
    String(JsString),
    /// Array-like container handle
    Array(JsArray),
    /// Function handle
    Function(JsFunction),
    /// Future handle
    Promise(Promise),
    /// Const-reference handle to a host object
    Handle(ObjectHandle),
}

impl JsValue {
    /// Dynamic type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            JsValue::Undefined => "undefined",
            JsValue::Boolean(_) => "boolean",
            JsValue::Number(_) => "number",
            JsValue::String(_) => "string",
            JsValue::Array(_) => "array",
            JsValue::Function(_) => "function",
            JsValue::Promise(_) => "promise",
            JsValue::Handle(_) => "handle",
        }
    }

    /// Check if this value is `undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }
}

impl PartialEq for JsValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsValue::Undefined, JsValue::Undefined) => true,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            (JsValue::Number(a), JsValue::Number(b)) => a == b,
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::Array(a), JsValue::Array(b)) => a.ptr_eq(b),
            (JsValue::Function(a), JsValue::Function(b)) => a.ptr_eq(b),
            (JsValue::Promise(a), JsValue::Promise(b)) => a.ptr_eq(b),
            (JsValue::Handle(a), JsValue::Handle(b)) => a == b,
            _ => false,
        }
    }
}

/// Universal value handle, compatible with every type in both roles
///
/// The runtime counterpart of the `any` descriptor. Construction is an
/// explicit factory call; extraction is a checked conversion against
/// the value's dynamic tag.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyValue {
    value: JsValue,
}

impl AnyValue {
    /// Wrap a dynamic value
    pub fn from_value(value: JsValue) -> Self {
        AnyValue { value }
    }

    /// Borrow the wrapped value
    pub fn value(&self) -> &JsValue {
        &self.value
    }

    /// Unwrap the dynamic value
    pub fn into_value(self) -> JsValue {
        self.value
    }

    /// Checked cast to a number
    pub fn cast_number(&self) -> Result<f64, ValueError> {
        match &self.value {
            JsValue::Number(n) => Ok(*n),
            other => Err(wrong_type("number", other)),
        }
    }

    /// Checked cast to a boolean
    pub fn cast_boolean(&self) -> Result<bool, ValueError> {
        match &self.value {
            JsValue::Boolean(b) => Ok(*b),
            other => Err(wrong_type("boolean", other)),
        }
    }

    /// Checked cast to the string wrapper
    pub fn cast_string(&self) -> Result<JsString, ValueError> {
        match &self.value {
            JsValue::String(s) => Ok(s.clone()),
            other => Err(wrong_type("string", other)),
        }
    }

    /// Checked cast to an array handle
    pub fn cast_array(&self) -> Result<JsArray, ValueError> {
        match &self.value {
            JsValue::Array(a) => Ok(a.clone()),
            other => Err(wrong_type("array", other)),
        }
    }

    /// Checked cast to a function handle
    pub fn cast_function(&self) -> Result<JsFunction, ValueError> {
        match &self.value {
            JsValue::Function(f) => Ok(f.clone()),
            other => Err(wrong_type("function", other)),
        }
    }

    /// Checked cast to a promise handle
    pub fn cast_promise(&self) -> Result<Promise, ValueError> {
        match &self.value {
            JsValue::Promise(p) => Ok(p.clone()),
            other => Err(wrong_type("promise", other)),
        }
    }
}

fn wrong_type(expected: &'static str, actual: &JsValue) -> ValueError {
    ValueError::WrongType {
        expected,
        actual: actual.type_name(),
    }
}

/// Value statically declared to be one of a fixed variant list
///
/// Construction is an explicit factory call that checks the dynamic tag
/// against the declared variants; casts are restricted to the declared
/// list even when the dynamic tag would allow more.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionValue {
    value: JsValue,
    variants: Vec<&'static str>,
}

impl UnionValue {
    /// Wrap a dynamic value under a declared variant list
    ///
    /// The variant entries are dynamic type names as reported by
    /// [`JsValue::type_name`].
    pub fn new(value: JsValue, variants: &[&'static str]) -> Result<Self, ValueError> {
        if variants.is_empty() {
            return Err(ValueError::EmptyUnion);
        }
        if !variants.contains(&value.type_name()) {
            return Err(ValueError::NotAVariant {
                ty: value.type_name(),
                declared: variants.join(" | "),
            });
        }
        Ok(UnionValue {
            value,
            variants: variants.to_vec(),
        })
    }

    /// Borrow the wrapped value
    pub fn value(&self) -> &JsValue {
        &self.value
    }

    /// The declared variant list
    pub fn variants(&self) -> &[&'static str] {
        &self.variants
    }

    /// Checked cast to a number, restricted to the declared variants
    pub fn cast_number(&self) -> Result<f64, ValueError> {
        self.require_variant("number")?;
        AnyValue::from_value(self.value.clone()).cast_number()
    }

    /// Checked cast to the string wrapper, restricted to the declared variants
    pub fn cast_string(&self) -> Result<JsString, ValueError> {
        self.require_variant("string")?;
        AnyValue::from_value(self.value.clone()).cast_string()
    }

    /// Checked cast to an array handle, restricted to the declared variants
    pub fn cast_array(&self) -> Result<JsArray, ValueError> {
        self.require_variant("array")?;
        AnyValue::from_value(self.value.clone()).cast_array()
    }

    fn require_variant(&self, ty: &'static str) -> Result<(), ValueError> {
        if self.variants.contains(&ty) {
            Ok(())
        } else {
            Err(ValueError::NotAVariant {
                ty,
                declared: self.variants.join(" | "),
            })
        }
    }
}
