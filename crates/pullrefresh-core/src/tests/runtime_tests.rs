use super::*;
use crate::{Completer, LifecycleScope};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn frame_callbacks_run_once_with_frame_time() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    let seen = Rc::new(Cell::new(None));

    let registration = {
        let seen = Rc::clone(&seen);
        handle
            .frame_clock()
            .with_frame_nanos(move |time| seen.set(Some(time)))
    };
    assert!(registration.is_active());
    assert!(handle.has_frame_callbacks());

    handle.drain_frame_callbacks(16_000_000);
    assert_eq!(seen.get(), Some(16_000_000));

    seen.set(None);
    handle.drain_frame_callbacks(32_000_000);
    assert_eq!(seen.get(), None, "frame callbacks are one-shot");
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    let fired = Rc::new(Cell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        handle.frame_clock().with_frame_nanos(move |_| fired.set(true))
    };
    drop(registration);

    handle.drain_frame_callbacks(1);
    assert!(!fired.get());
    assert!(!handle.has_frame_callbacks());
    assert!(!runtime.runtime().needs_frame());
}

#[test]
fn callbacks_registered_during_a_frame_wait_for_the_next_one() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    let frames = Rc::new(RefCell::new(Vec::new()));
    let keep_alive = Rc::new(RefCell::new(Vec::new()));

    {
        let frames = Rc::clone(&frames);
        let clock = handle.frame_clock();
        let keep_alive_inner = Rc::clone(&keep_alive);
        let registration = handle.frame_clock().with_frame_nanos(move |time| {
            frames.borrow_mut().push(time);
            let frames = Rc::clone(&frames);
            let next = clock.with_frame_nanos(move |time| frames.borrow_mut().push(time));
            keep_alive_inner.borrow_mut().push(next);
        });
        keep_alive.borrow_mut().push(registration);
    }

    handle.drain_frame_callbacks(10);
    assert_eq!(frames.borrow().as_slice(), &[10]);
    handle.drain_frame_callbacks(20);
    assert_eq!(frames.borrow().as_slice(), &[10, 20]);
}

#[test]
fn scheduler_is_asked_for_frames() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let handle = runtime.handle();

    let _registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(scheduler.requests.load(Ordering::SeqCst) >= 1);
    assert!(runtime.needs_frame());

    handle.drain_frame_callbacks(1);
    assert!(!runtime.needs_frame());
}

#[test]
fn spawned_task_completes_after_completer_resolves() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    let completer = Completer::<u32>::new();
    let result = Rc::new(Cell::new(0));

    {
        let future = completer.future();
        let result = Rc::clone(&result);
        handle
            .spawn_ui(async move {
                result.set(future.await);
            })
            .expect("runtime alive");
    }

    handle.drain_ui();
    assert_eq!(result.get(), 0);
    assert!(handle.has_pending_ui());

    assert!(completer.complete(7));
    handle.drain_ui();
    assert_eq!(result.get(), 7);
    assert!(!handle.has_pending_ui());
}

#[test]
fn cancelled_task_is_never_polled_again() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    let completer = Completer::<()>::new();
    let finished = Rc::new(Cell::new(false));

    let task = {
        let future = completer.future();
        let finished = Rc::clone(&finished);
        handle
            .spawn_ui(async move {
                future.await;
                finished.set(true);
            })
            .expect("runtime alive")
    };
    handle.drain_ui();
    task.cancel();

    completer.complete(());
    handle.drain_ui();
    assert!(!finished.get());
}

#[test]
fn next_frame_future_resolves_with_frame_time() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    let observed = Rc::new(Cell::new(None));

    {
        let clock = handle.frame_clock();
        let observed = Rc::clone(&observed);
        handle
            .spawn_ui(async move {
                let time = clock.next_frame().await;
                observed.set(Some(time));
            })
            .expect("runtime alive");
    }

    handle.drain_ui();
    assert_eq!(observed.get(), None);
    handle.drain_frame_callbacks(42);
    handle.drain_ui();
    assert_eq!(observed.get(), Some(42));
}

#[test]
fn handle_is_inert_after_runtime_drop() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert!(handle.spawn_ui(async {}).is_none());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    handle.drain_ui();
    handle.drain_frame_callbacks(1);
}

#[test]
fn lifecycle_scope_skips_posted_work_after_dispose() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    let scope = LifecycleScope::new(handle.clone());
    let ran = Rc::new(Cell::new(0));

    {
        let ran = Rc::clone(&ran);
        scope.post_ui(move || ran.set(ran.get() + 1));
    }
    {
        let ran = Rc::clone(&ran);
        scope.post_ui(move || ran.set(ran.get() + 10));
    }
    handle.drain_ui();
    assert_eq!(ran.get(), 11);

    {
        let ran = Rc::clone(&ran);
        scope.post_ui(move || ran.set(ran.get() + 100));
    }
    scope.dispose();
    handle.drain_ui();
    assert_eq!(ran.get(), 11);
    assert!(!scope.is_active());
}
