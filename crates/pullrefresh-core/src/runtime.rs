use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use std::thread::ThreadId;

use smallvec::SmallVec;

use crate::frame_clock::FrameClock;
use crate::platform::{DefaultScheduler, RuntimeScheduler};

pub type FrameCallbackId = u64;

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    local_tasks: RefCell<VecDeque<Box<dyn FnOnce() + 'static>>>,
    ui_thread_id: ThreadId,
    tasks: RefCell<Vec<TaskEntry>>,
    next_task_id: Cell<u64>,
    task_waker: RefCell<Option<Waker>>,
    task_woken: Arc<AtomicBool>,
}

struct TaskEntry {
    id: u64,
    future: Pin<Box<dyn Future<Output = ()> + 'static>>,
}

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            local_tasks: RefCell::new(VecDeque::new()),
            ui_thread_id: std::thread::current().id(),
            tasks: RefCell::new(Vec::new()),
            next_task_id: Cell::new(1),
            task_waker: RefCell::new(None),
            task_woken: Arc::new(AtomicBool::new(false)),
        }
    }

    fn init_task_waker(this: &Rc<Self>) {
        let waker =
            RuntimeTaskWaker::new(Arc::clone(&this.scheduler), Arc::clone(&this.task_woken))
                .into_waker();
        *this.task_waker.borrow_mut() = Some(waker);
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    /// Queues a closure on the UI thread's local queue.
    ///
    /// The closure may capture `Rc`/`RefCell` values because it never leaves the
    /// runtime thread.
    fn enqueue_ui_task(&self, task: Box<dyn FnOnce() + 'static>) {
        self.local_tasks.borrow_mut().push_back(task);
        self.schedule();
    }

    fn spawn_ui_task(&self, future: Pin<Box<dyn Future<Output = ()> + 'static>>) -> u64 {
        let id = self.next_task_id.get();
        self.next_task_id.set(id + 1);
        self.tasks.borrow_mut().push(TaskEntry { id, future });
        self.schedule();
        id
    }

    fn cancel_task(&self, id: u64) {
        self.tasks.borrow_mut().retain(|entry| entry.id != id);
    }

    fn poll_async_tasks(&self) -> bool {
        let waker = match self.task_waker.borrow().as_ref() {
            Some(waker) => waker.clone(),
            None => return false,
        };
        let mut cx = Context::from_waker(&waker);
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        self.task_woken.store(false, Ordering::SeqCst);
        let mut pending = Vec::with_capacity(tasks.len());
        let mut made_progress = false;
        for mut entry in tasks.into_iter() {
            match entry.future.as_mut().poll(&mut cx) {
                Poll::Ready(()) => {
                    log::trace!("ui task #{} finished", entry.id);
                    made_progress = true;
                }
                Poll::Pending => {
                    pending.push(entry);
                }
            }
        }
        let mut tasks = self.tasks.borrow_mut();
        // Tasks spawned while polling landed in the emptied vector.
        let spawned = std::mem::take(&mut *tasks);
        if !spawned.is_empty() {
            made_progress = true;
        }
        tasks.extend(pending);
        tasks.extend(spawned);
        // A task woken mid-pass may have been polled before its waker fired.
        if self.task_woken.swap(false, Ordering::SeqCst) && !tasks.is_empty() {
            made_progress = true;
        }
        made_progress
    }

    fn drain_ui(&self) {
        loop {
            let mut executed = false;

            loop {
                let task = self.local_tasks.borrow_mut().pop_front();
                match task {
                    Some(task) => {
                        executed = true;
                        task();
                    }
                    None => break,
                }
            }

            if self.poll_async_tasks() {
                executed = true;
            }

            if !executed {
                break;
            }
        }
        self.refresh_needs_frame();
    }

    fn has_pending_ui(&self) -> bool {
        let local_pending = self
            .local_tasks
            .try_borrow()
            .map(|tasks| !tasks.is_empty())
            .unwrap_or(true);
        let async_pending = self
            .tasks
            .try_borrow()
            .map(|tasks| !tasks.is_empty())
            .unwrap_or(true);
        local_pending || async_pending
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        drop(callbacks);
        self.refresh_needs_frame();
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut pending: SmallVec<[Box<dyn FnOnce(u64) + 'static>; 4]> = SmallVec::new();
        {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            while let Some(mut entry) = callbacks.pop_front() {
                if let Some(callback) = entry.callback.take() {
                    pending.push(callback);
                }
            }
        }
        for callback in pending {
            callback(frame_time_nanos);
        }
        self.refresh_needs_frame();
    }

    fn refresh_needs_frame(&self) {
        let callbacks_empty = self
            .frame_callbacks
            .try_borrow()
            .map(|callbacks| callbacks.is_empty())
            .unwrap_or(false);
        if callbacks_empty && !self.has_pending_ui() {
            self.needs_frame.set(false);
        }
    }
}

/// Owner of the single-threaded runtime state.
///
/// Dropping the last `Runtime` invalidates every [`RuntimeHandle`]; pending
/// frame callbacks and tasks are discarded.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        let inner = Rc::new(RuntimeInner::new(scheduler));
        RuntimeInner::init_task_waker(&inner);
        Self { inner }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
            ui_thread_id: self.inner.ui_thread_id,
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }
}

/// Runtime whose frame requests go nowhere; tests pump it by hand.
pub struct TestRuntime {
    runtime: Runtime,
}

impl TestRuntime {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler)),
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }
}

impl Default for TestRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak, cloneable access to a [`Runtime`].
///
/// Every operation is a no-op once the runtime has been dropped.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
    ui_thread_id: ThreadId,
}

pub struct TaskHandle {
    id: u64,
    runtime: RuntimeHandle,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Schedules work that must run on the runtime thread.
    ///
    /// The closure executes when the runtime drains its local queue, so it may
    /// capture `Rc`/`RefCell` values. If the runtime is gone the task runs
    /// immediately.
    pub fn enqueue_ui_task(&self, task: Box<dyn FnOnce() + 'static>) {
        self.assert_ui_thread();
        if let Some(inner) = self.inner.upgrade() {
            inner.enqueue_ui_task(task);
        } else {
            task();
        }
    }

    /// Spawns a `!Send` future polled by [`RuntimeHandle::drain_ui`].
    pub fn spawn_ui<F>(&self, fut: F) -> Option<TaskHandle>
    where
        F: Future<Output = ()> + 'static,
    {
        self.assert_ui_thread();
        self.inner.upgrade().map(|inner| {
            let id = inner.spawn_ui_task(Box::pin(fut));
            TaskHandle {
                id,
                runtime: self.clone(),
            }
        })
    }

    pub fn cancel_task(&self, id: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_task(id);
        }
    }

    pub fn drain_ui(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_ui();
        }
    }

    pub fn has_pending_ui(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_pending_ui())
            .unwrap_or(false)
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.assert_ui_thread();
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn assert_ui_thread(&self) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.ui_thread_id,
            "runtime accessed off its UI thread"
        );
    }
}

impl TaskHandle {
    pub fn cancel(self) {
        self.runtime.cancel_task(self.id);
    }
}

struct RuntimeTaskWaker {
    scheduler: Arc<dyn RuntimeScheduler>,
    woken: Arc<AtomicBool>,
}

impl RuntimeTaskWaker {
    fn new(scheduler: Arc<dyn RuntimeScheduler>, woken: Arc<AtomicBool>) -> Self {
        Self { scheduler, woken }
    }

    fn into_waker(self) -> Waker {
        futures_task::waker(Arc::new(self))
    }
}

impl futures_task::ArcWake for RuntimeTaskWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.woken.store(true, Ordering::SeqCst);
        arc_self.scheduler.schedule_frame();
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
