//! Single-threaded cooperative callback queue
//!
//! Stand-in for the foreign runtime's event loop. All suspension and
//! resumption in the bridge is mediated by callbacks registered here;
//! nothing ever spawns a thread or blocks waiting for settlement.
//! Delivery order is queue order; the bridge adds no ordering guarantee
//! of its own on top of it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

type Job = Box<dyn FnOnce()>;

/// FIFO job queue driven by explicit turns
#[derive(Default)]
pub struct EventLoop {
    queue: RefCell<VecDeque<Job>>,
}

impl EventLoop {
    /// Create a new, shared event loop
    pub fn new() -> Rc<Self> {
        Rc::new(EventLoop::default())
    }

    /// Register a callback for a later turn
    pub fn enqueue(&self, job: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push_back(Box::new(job));
    }

    /// Number of callbacks waiting to run
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run queued callbacks until the queue drains, returning how many ran
    ///
    /// Callbacks may enqueue further callbacks; those run in the same
    /// drain.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            // Release the borrow before running the job: jobs enqueue too.
            let job = self.queue.borrow_mut().pop_front();
            match job {
                Some(job) => {
                    job();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}
