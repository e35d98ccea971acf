//! Future bridge
//!
//! Two protocols over the one promise handle type. Producing: a
//! suspending routine is driven as an explicit state machine and its
//! result is delivered through a promise constructed up front; only the
//! resolve handle is retained by the routine's state. Consuming: each
//! await expression becomes an [`Awaiter`], a one-shot callback entry
//! registered with the awaited promise that resumes the routine with
//! the delivered value.

use crate::event_loop::EventLoop;
use crate::promise::{Promise, Resolver};
use crate::value::JsValue;
use std::rc::Rc;

/// Outcome of one synchronous run of a routine's body
pub enum Step {
    /// The body reached an await expression on this promise
    Await(Promise),
    /// The body returned with this value
    Done(JsValue),
}

/// A suspending routine, written as an explicit state machine
///
/// `resume` runs the body from the last suspension point to the next
/// one. `input` is `None` on initial entry and carries the awaited
/// value on every re-entry. Code between suspension points runs to
/// completion without preemption.
pub trait Routine {
    /// Run until the next await expression or the final return
    fn resume(&mut self, input: Option<JsValue>) -> Step;
}

/// Lifecycle of an awaiter; never re-enters `Suspended`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AwaiterState {
    /// Just constructed, not yet registered
    Created,
    /// Registered with the awaited promise
    Suspended,
    /// The delivered value has been captured
    Resumed,
    /// The value was handed to the routine; the awaiter is spent
    Discarded,
}

/// One-shot callback entry bound to a single suspension point
///
/// Constructing the awaiter reports "not ready" unconditionally: the
/// routine yields back to the scheduler even when the awaited promise
/// is already settled, so re-entry looks the same to every caller.
#[derive(Debug)]
pub struct Awaiter {
    state: AwaiterState,
    value: Option<JsValue>,
}

impl Awaiter {
    /// Create an awaiter for one suspension point
    pub fn new() -> Self {
        Awaiter {
            state: AwaiterState::Created,
            value: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> AwaiterState {
        self.state
    }

    /// Whether the routine may continue without suspending: always false
    pub fn ready(&self) -> bool {
        false
    }

    /// Mark the awaiter registered with the awaited promise
    pub fn suspend(&mut self) {
        debug_assert_eq!(self.state, AwaiterState::Created);
        self.state = AwaiterState::Suspended;
    }

    /// Capture the delivered value
    pub fn complete(&mut self, value: JsValue) {
        debug_assert_eq!(self.state, AwaiterState::Suspended);
        self.value = Some(value);
        self.state = AwaiterState::Resumed;
    }

    /// Hand the captured value to the routine and spend the awaiter
    pub fn take(&mut self) -> Option<JsValue> {
        debug_assert_eq!(self.state, AwaiterState::Resumed);
        self.state = AwaiterState::Discarded;
        self.value.take()
    }
}

impl Default for Awaiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a routine as a producer of a foreign future
///
/// The promise is returned synchronously, before any result exists.
/// The body runs synchronously until its first await expression or its
/// return; control does not come back to the caller mid-body otherwise.
pub fn launch<R: Routine + 'static>(routine: R, event_loop: &Rc<EventLoop>) -> Promise {
    let (promise, resolve, _reject) = Promise::pending(event_loop);
    // Only the resolve handle is retained by the routine's state.
    drive(routine, resolve, None, event_loop);
    promise
}

fn drive<R: Routine + 'static>(
    mut routine: R,
    resolve: Resolver,
    input: Option<JsValue>,
    event_loop: &Rc<EventLoop>,
) {
    match routine.resume(input) {
        Step::Done(value) => resolve.resolve(value),
        Step::Await(awaited) => {
            let mut awaiter = Awaiter::new();
            awaiter.suspend();
            let event_loop = event_loop.clone();
            awaited.then(move |value| {
                awaiter.complete(value);
                let input = awaiter.take();
                // Awaiter is Discarded here and dropped with this frame.
                drive(routine, resolve, input, &event_loop);
                JsValue::Undefined
            });
        }
    }
}
