//! `setTimeout`-backed scheduler.

use std::{rc::Rc, time::Duration};

use pagesift_search::{Scheduler, TimerKind};
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::Window;

struct Pending {
    handle: i32,
    // Keeps the JS callback alive until it fires or is replaced.
    _callback: Closure<dyn FnMut()>,
}

/// One browser timeout per [`TimerKind`].
///
/// When a timeout fires it calls `dispatch` with its kind. The callback of a
/// fired timeout is released on the next `schedule` or `cancel` of that kind,
/// so `dispatch` must not reschedule the kind it was called with.
pub struct TimeoutScheduler {
    window: Window,
    dispatch: Rc<dyn Fn(TimerKind)>,
    search: Option<Pending>,
    unhighlight: Option<Pending>,
}

impl TimeoutScheduler {
    pub fn new(window: Window, dispatch: impl Fn(TimerKind) + 'static) -> Self {
        Self {
            window,
            dispatch: Rc::new(dispatch),
            search: None,
            unhighlight: None,
        }
    }

    fn slot(&mut self, kind: TimerKind) -> &mut Option<Pending> {
        match kind {
            TimerKind::Search => &mut self.search,
            TimerKind::Unhighlight => &mut self.unhighlight,
        }
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.cancel(kind);

        let dispatch = Rc::clone(&self.dispatch);
        let callback = Closure::<dyn FnMut()>::new(move || dispatch(kind));
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(handle) => {
                *self.slot(kind) = Some(Pending {
                    handle,
                    _callback: callback,
                });
            }
            Err(err) => log::warn!("Cannot schedule {kind:?}: {err:?}"),
        }
    }

    fn cancel(&mut self, kind: TimerKind) {
        if let Some(pending) = self.slot(kind).take() {
            self.window.clear_timeout_with_handle(pending.handle);
        }
    }
}

impl Drop for TimeoutScheduler {
    fn drop(&mut self) {
        // A timeout left running would call into a freed closure.
        self.cancel(TimerKind::Search);
        self.cancel(TimerKind::Unhighlight);
    }
}
