//! Boundary call sites
//!
//! Ties the pieces together in the order they apply at a call:
//! normalize the declared signature once, run the oracle over each
//! argument position, then transmit adapter output to the foreign
//! callable. Rejection happens before any value moves.

use crate::value::{JsFunction, JsValue};
use quay_types::{normalize, CastContext, Type, TypeContext, TypeError, TypeId};

/// A call site declared against a foreign function signature
#[derive(Debug, Clone, Copy)]
pub struct BoundarySite {
    /// Normalized signature id; always a `Type::Function`
    signature: TypeId,
}

impl BoundarySite {
    /// Declare a call site for `signature`
    ///
    /// Rejects declarations against anything that does not normalize to
    /// a function type.
    pub fn new(ctx: &TypeContext, signature: TypeId) -> Result<Self, TypeError> {
        let signature = normalize(ctx, signature);
        match ctx.get(signature) {
            Some(Type::Function(_)) => Ok(BoundarySite { signature }),
            Some(_) => Err(TypeError::NotCallable {
                actual: ctx.display(signature),
            }),
            None => Err(TypeError::UnknownType {
                id: signature.to_string(),
            }),
        }
    }

    /// The normalized signature this site was declared against
    pub fn signature(&self) -> TypeId {
        self.signature
    }

    /// Check supplied argument types against the declared signature
    ///
    /// Each position runs through the oracle's call-argument entry
    /// point, so string literals may satisfy `String` parameters. A
    /// variadic tail absorbs trailing arguments.
    pub fn check_args(&self, ctx: &TypeContext, args: &[TypeId]) -> Result<(), TypeError> {
        let func = match ctx.get(self.signature) {
            Some(Type::Function(func)) => func,
            _ => {
                return Err(TypeError::UnknownType {
                    id: self.signature.to_string(),
                })
            }
        };

        if args.len() < func.params.len() {
            return Err(TypeError::Arity {
                expected: func.params.len(),
                actual: args.len(),
            });
        }

        let cast = CastContext::new(ctx);
        for (i, &arg) in args.iter().enumerate() {
            let accepted = if i < func.params.len() {
                func.params[i]
            } else {
                match func.rest {
                    Some(rest) => rest,
                    None => {
                        return Err(TypeError::Arity {
                            expected: func.params.len(),
                            actual: args.len(),
                        })
                    }
                }
            };
            if !cast.can_cast_args(arg, &[accepted]) {
                return Err(TypeError::Mismatch {
                    expected: ctx.display(accepted),
                    actual: ctx.display(arg),
                });
            }
        }
        Ok(())
    }

    /// Transmit adapted arguments to the foreign callable
    pub fn invoke(&self, func: &JsFunction, args: Vec<JsValue>) -> JsValue {
        func.call(&args)
    }
}
