//! Argument adapter
//!
//! Per-call value transformation applied when crossing the boundary,
//! after the oracle has admitted the call site. Stateless; runs once
//! per argument; performs exactly one conversion or none.

use crate::promise::Promise;
use crate::value::{JsArray, JsFunction, JsString, JsValue, ObjectHandle};

/// Host-side values accepted as boundary call arguments
pub trait IntoBoundary {
    /// Produce the value actually transmitted
    fn into_boundary(self) -> JsValue;
}

impl IntoBoundary for &str {
    /// Literal-to-wrapper promotion: a fresh `String` wrapper is
    /// constructed per crossing and ownership passes to the foreign side
    fn into_boundary(self) -> JsValue {
        JsValue::String(JsString::new(self))
    }
}

impl IntoBoundary for bool {
    fn into_boundary(self) -> JsValue {
        JsValue::Boolean(self)
    }
}

impl IntoBoundary for i32 {
    fn into_boundary(self) -> JsValue {
        JsValue::Number(f64::from(self))
    }
}

impl IntoBoundary for f64 {
    fn into_boundary(self) -> JsValue {
        JsValue::Number(self)
    }
}

impl IntoBoundary for JsString {
    fn into_boundary(self) -> JsValue {
        JsValue::String(self)
    }
}

impl IntoBoundary for JsArray {
    fn into_boundary(self) -> JsValue {
        JsValue::Array(self)
    }
}

impl IntoBoundary for JsFunction {
    fn into_boundary(self) -> JsValue {
        JsValue::Function(self)
    }
}

impl IntoBoundary for Promise {
    fn into_boundary(self) -> JsValue {
        JsValue::Promise(self)
    }
}

impl IntoBoundary for JsValue {
    fn into_boundary(self) -> JsValue {
        self
    }
}

/// Adapt one by-value argument for transmission
///
/// Everything except a string literal crosses unchanged, preserving the
/// host's move/copy semantics.
pub fn adapt<T: IntoBoundary>(value: T) -> JsValue {
    value.into_boundary()
}

/// Adapt a const-reference argument: reference-to-handle conversion
///
/// The address of the referenced object is transmitted instead of a
/// copy. There is deliberately no `&mut` counterpart; by-value and
/// mutable-reference parameters never take this path.
pub fn adapt_ref<T>(value: &T) -> JsValue {
    JsValue::Handle(ObjectHandle::of(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_promotes_to_fresh_wrapper() {
        let sent = adapt("hello");
        match &sent {
            JsValue::String(s) => assert_eq!(s.as_str(), "hello"),
            other => panic!("expected string wrapper, got {}", other.type_name()),
        }

        // A second crossing constructs a second instance.
        let again = adapt("hello");
        match (&sent, &again) {
            (JsValue::String(a), JsValue::String(b)) => {
                assert_eq!(a, b);
                assert!(!a.ptr_eq(b));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_plain_values_pass_unchanged() {
        assert_eq!(adapt(5), JsValue::Number(5.0));
        assert_eq!(adapt(2.5), JsValue::Number(2.5));
        assert_eq!(adapt(true), JsValue::Boolean(true));

        let s = JsString::new("owned");
        let sent = adapt(s.clone());
        match sent {
            // Already a wrapper: no new instance is constructed
            JsValue::String(out) => assert!(out.ptr_eq(&s)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_const_ref_becomes_address_handle() {
        let subject = [1_u8, 2, 3];
        let sent = adapt_ref(&subject);
        match sent {
            JsValue::Handle(h) => {
                assert_eq!(h.addr(), &subject as *const _ as usize);
            }
            other => panic!("expected handle, got {}", other.type_name()),
        }
    }
}
