//! Type normalization
//!
//! Strips reference, pointer and const qualifiers down to the canonical
//! comparison form. The oracle applies normalization symmetrically to
//! both sides of every comparison; comparing a normalized side against a
//! raw side would let a pointer-vs-value mismatch pass silently.

use crate::context::TypeContext;
use crate::ty::{Type, TypeId};

/// Strip `Ref`, `Ptr` and `Const` wrappers, exposing the canonical type
///
/// Idempotent: `normalize(ctx, normalize(ctx, t)) == normalize(ctx, t)`.
pub fn normalize(ctx: &TypeContext, id: TypeId) -> TypeId {
    let mut cur = id;
    loop {
        match ctx.get(cur) {
            Some(Type::Ref(inner)) | Some(Type::Ptr(inner)) | Some(Type::Const(inner)) => {
                cur = *inner;
            }
            _ => return cur,
        }
    }
}
