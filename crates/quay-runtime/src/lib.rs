//! Quay Runtime
//!
//! The runtime half of the boundary layer:
//! - Foreign value model (any, union, string, function, array handles)
//! - Argument adapter applied when values cross the boundary
//! - Promise handle and the future bridge (produce/consume protocols)
//! - Single-threaded cooperative event loop standing in for the
//!   foreign runtime's scheduler
//!
//! Nothing here creates threads or blocks; every suspension is a
//! callback registered with the event loop.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod value;
pub mod adapt;
pub mod event_loop;
pub mod promise;
pub mod bridge;
pub mod boundary;

pub use value::{
    AnyValue, JsArray, JsFunction, JsString, JsValue, ObjectHandle, UnionValue, ValueError,
};
pub use adapt::{adapt, adapt_ref, IntoBoundary};
pub use event_loop::EventLoop;
pub use promise::{Promise, PromiseState, Rejecter, Resolver};
pub use bridge::{launch, Awaiter, AwaiterState, Routine, Step};
pub use boundary::BoundarySite;
