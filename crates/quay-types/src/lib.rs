//! Quay Type System
//!
//! Static type descriptors and the compatibility oracle that decides,
//! for each boundary call site, whether a source type may stand in for
//! a destination type. The oracle is pure: it consumes declared shapes
//! only and never inspects runtime values.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod ty;
pub mod context;
pub mod error;
pub mod normalize;
pub mod cast;

pub use ty::{Type, Scalar, TypeId};
pub use context::TypeContext;
pub use error::TypeError;
pub use normalize::normalize;
pub use cast::CastContext;
