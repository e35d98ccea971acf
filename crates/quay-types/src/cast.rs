//! The boundary compatibility oracle
//!
//! Decides, for every boundary call site, whether a value of a source
//! type may stand in for a destination type. Evaluation is pure and
//! total over type descriptors; no runtime value is ever inspected. A
//! negative answer is a build-time rejection of the call site, never a
//! runtime fault.

use crate::context::TypeContext;
use crate::error::TypeError;
use crate::normalize::normalize;
use crate::ty::{FunctionType, NamedType, Type, TypeId};

/// Context for evaluating boundary cast compatibility
#[derive(Debug, Clone)]
pub struct CastContext<'a> {
    /// Type context for resolving descriptors
    ctx: &'a TypeContext,
}

impl<'a> CastContext<'a> {
    /// Create a new cast context
    pub fn new(ctx: &'a TypeContext) -> Self {
        CastContext { ctx }
    }

    /// Check whether a value of type `from` may be substituted where
    /// `to` is accepted
    pub fn can_cast(&self, from: TypeId, to: TypeId) -> bool {
        self.can_cast_impl(from, to, false)
    }

    /// Check whether `from` may be substituted for any one of `to`
    pub fn can_cast_any(&self, from: TypeId, to: &[TypeId]) -> bool {
        to.iter().any(|&t| self.can_cast_impl(from, t, false))
    }

    /// Call-argument variant of [`can_cast_any`](Self::can_cast_any)
    ///
    /// Additionally admits a string-literal-shaped `from` against the
    /// foreign `String` wrapper, so literals may be promoted at the call
    /// site even though no general conversion exists.
    pub fn can_cast_args(&self, from: TypeId, to: &[TypeId]) -> bool {
        to.iter().any(|&t| self.can_cast_impl(from, t, true))
    }

    /// Surface a failed cast as a call-site diagnostic
    pub fn check(&self, from: TypeId, to: TypeId) -> Result<(), TypeError> {
        if self.ctx.get(from).is_none() {
            return Err(TypeError::UnknownType {
                id: from.to_string(),
            });
        }
        if self.ctx.get(to).is_none() {
            return Err(TypeError::UnknownType { id: to.to_string() });
        }
        if self.can_cast(from, to) {
            Ok(())
        } else {
            Err(TypeError::Mismatch {
                expected: self.ctx.display(to),
                actual: self.ctx.display(from),
            })
        }
    }

    fn can_cast_impl(&self, from: TypeId, to: TypeId, promote_literals: bool) -> bool {
        // Literal promotion looks at the raw source shape: the pointer
        // spelling is exactly what normalization erases.
        if promote_literals && self.ctx.is_char_pointer(from) {
            let to_norm = normalize(self.ctx, to);
            if let Some(to_ty) = self.ctx.get(to_norm) {
                if to_ty.is_string_wrapper() {
                    return true;
                }
            }
        }

        // Both sides are normalized symmetrically before any rule runs.
        let from = normalize(self.ctx, from);
        let to = normalize(self.ctx, to);

        // Identity of the normalized descriptors (the host's implicit
        // conversion fallback collapses to this in the descriptor model).
        if from == to {
            return true;
        }

        let from_ty = match self.ctx.get(from) {
            Some(ty) => ty,
            None => return false,
        };
        let to_ty = match self.ctx.get(to) {
            Some(ty) => ty,
            None => return false,
        };

        // `any` is universal in both roles
        if from_ty.is_any() || to_ty.is_any() {
            return true;
        }

        match (from_ty, to_ty) {
            // Host arithmetic types are mutually convertible
            (Type::Scalar(_), Type::Scalar(_)) => true,

            // Union source: every variant must be accepted by the whole
            // destination (for union destinations this is the
            // per-source-variant rule; the existential arm below handles
            // each variant's own check)
            (Type::Union(u), _) => u
                .variants
                .iter()
                .all(|&v| self.can_cast_impl(v, to, promote_literals)),

            // Union destination: at least one variant accepts the source
            (_, Type::Union(u)) => u
                .variants
                .iter()
                .any(|&v| self.can_cast_impl(from, v, promote_literals)),

            // Nominal upcast: destination is an ancestor of the source
            (Type::Named(n), Type::Named(_)) => self.is_base_of(to, n),

            // Same container head, covariant element
            (Type::Container(c1), Type::Container(c2)) => {
                c1.head == c2.head && self.can_cast_impl(c1.element, c2.element, promote_literals)
            }

            // Function: covariant return, contravariant parameters
            (Type::Function(f1), Type::Function(f2)) => {
                self.function_compatible(f1, f2, promote_literals)
            }

            _ => false,
        }
    }

    /// Walk the source's base chain looking for `ancestor`
    fn is_base_of(&self, ancestor: TypeId, descendant: &NamedType) -> bool {
        let mut base = descendant.base;
        while let Some(b) = base {
            let b = normalize(self.ctx, b);
            if b == ancestor {
                return true;
            }
            base = self
                .ctx
                .get(b)
                .and_then(|ty| ty.as_named())
                .and_then(|n| n.base);
        }
        false
    }

    fn function_compatible(&self, f1: &FunctionType, f2: &FunctionType, promote: bool) -> bool {
        // Return type: covariant
        if !self.can_cast_impl(f1.ret, f2.ret, promote) {
            return false;
        }

        // Parameters: contravariant, pairwise. A variadic tail on either
        // side collapses the other side's remaining positions into
        // element comparisons.
        let fixed = f1.params.len().max(f2.params.len());
        for i in 0..fixed {
            match (param_at(f1, i), param_at(f2, i)) {
                // Note: reversed direction
                (Some(p1), Some(p2)) => {
                    if !self.can_cast_impl(p2, p1, promote) {
                        return false;
                    }
                }
                // One side ran out of positions with no tail to absorb them
                _ => return false,
            }
        }

        match (f1.rest, f2.rest) {
            (Some(r1), Some(r2)) => self.can_cast_impl(r2, r1, promote),
            // A destination tail promises to accept arbitrarily many
            // arguments that a fixed-arity source cannot take
            (None, Some(_)) => false,
            _ => true,
        }
    }
}

/// Parameter at position `i`, falling back to the variadic tail element
fn param_at(f: &FunctionType, i: usize) -> Option<TypeId> {
    if i < f.params.len() {
        Some(f.params[i])
    } else {
        f.rest
    }
}
