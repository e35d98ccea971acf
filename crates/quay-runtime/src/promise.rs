//! Foreign future handle
//!
//! A promise pairs a pending result slot with exactly one settlement.
//! Settlement is exactly-once-effective: the state transition out of
//! `Pending` is the only write path, so a second resolve or reject is a
//! no-op by construction rather than a re-validated error. Registered
//! continuations are always delivered through the event loop, never run
//! synchronously inside `then` or inside a settle call.

use crate::event_loop::EventLoop;
use crate::value::JsValue;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Observable settlement state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseState {
    /// Not yet settled
    Pending,
    /// Settled with a value
    Fulfilled,
    /// Settled with an error
    Rejected,
}

type OnFulfilled = Box<dyn FnOnce(JsValue)>;

enum Inner {
    Pending { callbacks: Vec<OnFulfilled> },
    Fulfilled(JsValue),
    Rejected(JsValue),
}

/// Shared future handle
///
/// Cloning yields another handle to the same settlement slot.
#[derive(Clone)]
pub struct Promise {
    inner: Rc<RefCell<Inner>>,
    event_loop: Rc<EventLoop>,
}

impl Promise {
    /// Construct a promise from a two-callback settlement initializer
    ///
    /// The executor runs synchronously before `new` returns.
    pub fn new(event_loop: &Rc<EventLoop>, executor: impl FnOnce(Resolver, Rejecter)) -> Self {
        let (promise, resolve, reject) = Promise::pending(event_loop);
        executor(resolve, reject);
        promise
    }

    /// Construct a pending promise along with its settlement handles
    pub fn pending(event_loop: &Rc<EventLoop>) -> (Self, Resolver, Rejecter) {
        let inner = Rc::new(RefCell::new(Inner::Pending {
            callbacks: Vec::new(),
        }));
        let promise = Promise {
            inner: inner.clone(),
            event_loop: event_loop.clone(),
        };
        let resolve = Resolver {
            inner: inner.clone(),
            event_loop: event_loop.clone(),
        };
        let reject = Rejecter { inner };
        (promise, resolve, reject)
    }

    /// Construct an already-fulfilled promise
    pub fn resolved(event_loop: &Rc<EventLoop>, value: JsValue) -> Self {
        Promise::new(event_loop, |resolve, _reject| resolve.resolve(value))
    }

    /// Current settlement state
    pub fn state(&self) -> PromiseState {
        match &*self.inner.borrow() {
            Inner::Pending { .. } => PromiseState::Pending,
            Inner::Fulfilled(_) => PromiseState::Fulfilled,
            Inner::Rejected(_) => PromiseState::Rejected,
        }
    }

    /// The fulfilled value, if settled successfully
    pub fn value(&self) -> Option<JsValue> {
        match &*self.inner.borrow() {
            Inner::Fulfilled(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Register a one-shot success continuation, returning a promise
    /// fulfilled with the continuation's result
    ///
    /// The continuation is delivered through the event loop even when
    /// this promise is already fulfilled. Rejection never invokes it;
    /// the chained promise then stays pending.
    pub fn then(&self, on_fulfilled: impl FnOnce(JsValue) -> JsValue + 'static) -> Promise {
        let (chained, resolve, _reject) = Promise::pending(&self.event_loop);
        let callback: OnFulfilled = Box::new(move |value| {
            resolve.resolve(on_fulfilled(value));
        });

        match &mut *self.inner.borrow_mut() {
            Inner::Pending { callbacks } => callbacks.push(callback),
            Inner::Fulfilled(value) => {
                let value = value.clone();
                self.event_loop.enqueue(move || callback(value));
            }
            Inner::Rejected(_) => {}
        }
        chained
    }

    /// Check whether two handles share the same settlement slot
    pub fn ptr_eq(&self, other: &Promise) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Promise").field(&self.state()).finish()
    }
}

/// Write-once resolve handle
#[derive(Clone)]
pub struct Resolver {
    inner: Rc<RefCell<Inner>>,
    event_loop: Rc<EventLoop>,
}

impl Resolver {
    /// Settle the promise with a value
    ///
    /// If the promise is already settled this is a no-op; the first
    /// settlement wins. Registered continuations are handed to the
    /// event loop, not run inside this call.
    pub fn resolve(&self, value: JsValue) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            match &mut *inner {
                Inner::Pending { callbacks } => {
                    let callbacks = std::mem::take(callbacks);
                    *inner = Inner::Fulfilled(value.clone());
                    callbacks
                }
                _ => return,
            }
        };
        for callback in callbacks {
            let value = value.clone();
            self.event_loop.enqueue(move || callback(value));
        }
    }

    /// Settle a void-producing promise
    pub fn resolve_void(&self) {
        self.resolve(JsValue::Undefined);
    }
}

/// Write-once reject handle
///
/// The error channel is settled but not connected to any resumption
/// path: success continuations registered with `then` are dropped.
#[derive(Clone)]
pub struct Rejecter {
    inner: Rc<RefCell<Inner>>,
}

impl Rejecter {
    /// Settle the promise with an error; no-op if already settled
    pub fn reject(&self, error: JsValue) {
        let mut inner = self.inner.borrow_mut();
        if let Inner::Pending { .. } = &*inner {
            *inner = Inner::Rejected(error);
        }
    }
}
