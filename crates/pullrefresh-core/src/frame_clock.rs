use crate::runtime::{FrameCallbackId, RuntimeHandle};
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Runs `callback` once, on the next frame, with the frame time in nanoseconds.
    ///
    /// Dropping the returned registration unregisters the callback.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let runtime = self.runtime.clone();
        match runtime.register_frame_callback(callback) {
            Some(id) => FrameCallbackRegistration::new(runtime, id),
            None => FrameCallbackRegistration::inactive(runtime),
        }
    }

    pub fn next_frame(&self) -> NextFrame {
        NextFrame::new(self.clone())
    }
}

pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(runtime: RuntimeHandle, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Forget a callback the runtime has already delivered, without cancelling.
    pub fn disarm(mut self) {
        self.id = None;
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

struct NextFrameState {
    registration: Option<FrameCallbackRegistration>,
    time: Option<u64>,
    waker: Option<Waker>,
}

/// Future resolving with the time of the next frame.
pub struct NextFrame {
    clock: FrameClock,
    state: Rc<RefCell<NextFrameState>>,
}

impl NextFrame {
    fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            state: Rc::new(RefCell::new(NextFrameState {
                registration: None,
                time: None,
                waker: None,
            })),
        }
    }
}

impl Future for NextFrame {
    type Output = u64;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(time) = self.state.borrow().time {
            return Poll::Ready(time);
        }

        let needs_registration = {
            let mut state = self.state.borrow_mut();
            state.waker = Some(cx.waker().clone());
            state.registration.is_none()
        };

        if needs_registration {
            let weak = Rc::downgrade(&self.state);
            let registration = self.clock.with_frame_nanos(move |time| {
                if let Some(state) = weak.upgrade() {
                    let mut state = state.borrow_mut();
                    state.time = Some(time);
                    // The runtime already consumed this callback.
                    if let Some(registration) = state.registration.take() {
                        registration.disarm();
                    }
                    if let Some(waker) = state.waker.take() {
                        waker.wake();
                    }
                }
            });
            self.state.borrow_mut().registration = Some(registration);
        }

        Poll::Pending
    }
}

impl Drop for NextFrame {
    fn drop(&mut self) {
        if let Some(registration) = self.state.borrow_mut().registration.take() {
            drop(registration);
        }
    }
}
