use std::rc::Rc;

use dotgrid_core::{DeferredTask, Scheduler, WinHook};
use gloo::timers::callback::Timeout;

/// Browser timers. Armed timeouts are forgotten so they outlive the caller.
pub(crate) struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule_once(&mut self, delay_ms: u32, task: DeferredTask) {
        let _ = Timeout::new(delay_ms, task).forget();
    }
}

pub(crate) fn alert_hook() -> WinHook {
    Rc::new(|message: &str| {
        gloo::console::log!("dotgrid: win notification");
        gloo::dialogs::alert(message);
    })
}
