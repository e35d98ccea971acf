use quay_runtime::{
    adapt, launch, BoundarySite, EventLoop, JsFunction, JsValue, Promise, PromiseState, Routine,
    Step,
};
use quay_types::TypeContext;
use std::cell::RefCell;
use std::rc::Rc;

/// Awaits two promises in sequence and sums the awaited numbers
struct SumTwoAwaits {
    first: Option<Promise>,
    second: Option<Promise>,
    acc: f64,
}

impl Routine for SumTwoAwaits {
    fn resume(&mut self, input: Option<JsValue>) -> Step {
        if let Some(JsValue::Number(n)) = input {
            self.acc += n;
        }
        if let Some(first) = self.first.take() {
            return Step::Await(first);
        }
        if let Some(second) = self.second.take() {
            return Step::Await(second);
        }
        Step::Done(JsValue::Number(self.acc))
    }
}

#[test]
fn test_routine_with_two_awaits() {
    let event_loop = EventLoop::new();
    let (first, resolve_first, _r1) = Promise::pending(&event_loop);
    let (second, resolve_second, _r2) = Promise::pending(&event_loop);

    let produced = launch(
        SumTwoAwaits {
            first: Some(first),
            second: Some(second),
            acc: 0.0,
        },
        &event_loop,
    );

    // Returned synchronously, pending until both inputs settle.
    assert_eq!(produced.state(), PromiseState::Pending);

    resolve_first.resolve(JsValue::Number(40.0));
    event_loop.run_until_idle();
    assert_eq!(produced.state(), PromiseState::Pending);

    resolve_second.resolve(JsValue::Number(2.0));
    event_loop.run_until_idle();
    assert_eq!(produced.value(), Some(JsValue::Number(42.0)));
}

#[test]
fn test_settlement_order_follows_the_queue() {
    let event_loop = EventLoop::new();
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

    let a = Promise::resolved(&event_loop, JsValue::Undefined);
    let b = Promise::resolved(&event_loop, JsValue::Undefined);

    {
        let log = log.clone();
        b.then(move |_| {
            log.borrow_mut().push("b");
            JsValue::Undefined
        });
    }
    {
        let log = log.clone();
        a.then(move |_| {
            log.borrow_mut().push("a");
            JsValue::Undefined
        });
    }

    event_loop.run_until_idle();
    // The bridge imposes no ordering of its own; registration order is
    // delivery order.
    assert_eq!(*log.borrow(), vec!["b", "a"]);
}

#[test]
fn test_call_site_end_to_end() {
    // Declared shape: (String, f64) => f64
    let mut ctx = TypeContext::new();
    let num = ctx.f64_type();
    let string = ctx.string_type();
    let literal = ctx.char_ptr_type();
    let sig = ctx.function_type(vec![string, num], num);

    let site = BoundarySite::new(&ctx, sig).unwrap();

    // Source types at the call site: a string literal and an integer.
    let i32_ty = ctx.i32_type();
    let site_check = site.check_args(&ctx, &[literal, i32_ty]);
    assert_eq!(site_check, Ok(()));

    // Oracle accepted; adapter transforms, foreign callable receives.
    let func = JsFunction::new(|args| match (&args[0], &args[1]) {
        (JsValue::String(s), JsValue::Number(n)) => {
            JsValue::Number(s.as_str().len() as f64 * n)
        }
        _ => JsValue::Undefined,
    });
    let out = site.invoke(&func, vec![adapt("hello"), adapt(3)]);
    assert_eq!(out, JsValue::Number(15.0));
}

#[test]
fn test_unsettled_future_keeps_produced_promise_pending() {
    let event_loop = EventLoop::new();
    let (never, _keep_resolve, _keep_reject) = Promise::pending(&event_loop);

    let produced = launch(
        SumTwoAwaits {
            first: Some(never),
            second: None,
            acc: 0.0,
        },
        &event_loop,
    );

    event_loop.run_until_idle();
    assert_eq!(produced.state(), PromiseState::Pending);
    assert_eq!(event_loop.pending(), 0, "nothing left to run; state is parked");
}
