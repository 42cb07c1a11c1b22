use std::cell::RefCell;
use std::rc::Rc;

pub type DeferredTask = Box<dyn FnOnce()>;

/// Fire-once deferred callbacks on the owning event loop.
pub trait Scheduler {
    fn schedule_once(&mut self, delay_ms: u32, task: DeferredTask);
}

struct PendingTask {
    due_ms: u64,
    seq: u64,
    task: DeferredTask,
}

#[derive(Default)]
struct VirtualClock {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Manually advanced clock. Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<VirtualClock>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.clock
            .borrow()
            .pending
            .iter()
            .map(|pending| pending.due_ms)
            .min()
    }

    /// Moves the clock forward, running every task due on the way in
    /// deadline order. Returns how many tasks ran.
    pub fn advance(&self, delta_ms: u64) -> usize {
        let target = self.now_ms().saturating_add(delta_ms);
        let mut ran = 0;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, pending)| pending.due_ms <= target)
                    .min_by_key(|(_, pending)| (pending.due_ms, pending.seq))
                    .map(|(idx, _)| idx);
                match due {
                    Some(idx) => {
                        let pending = clock.pending.swap_remove(idx);
                        clock.now_ms = pending.due_ms;
                        Some(pending.task)
                    }
                    None => {
                        clock.now_ms = target;
                        None
                    }
                }
            };
            // Run outside the borrow so tasks may schedule follow-ups.
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_once(&mut self, delay_ms: u32, task: DeferredTask) {
        let mut clock = self.clock.borrow_mut();
        let seq = clock.next_seq;
        clock.next_seq = seq.wrapping_add(1);
        let due_ms = clock.now_ms.saturating_add(u64::from(delay_ms));
        clock.pending.push(PendingTask { due_ms, seq, task });
    }
}
