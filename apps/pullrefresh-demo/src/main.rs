mod script;

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pullrefresh::{RefreshIndicatorConfig, RefreshIndicatorController, RefreshResult};
use pullrefresh_core::{Runtime, RuntimeHandle, RuntimeScheduler};
use web_time::Instant;

use script::{ScriptEvent, ScriptStep};

/// Simulated network latency of one refresh.
const REFRESH_LATENCY_MILLIS: u64 = 700;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const RUN_LIMIT: Duration = Duration::from_secs(6);

#[derive(Default)]
struct LoopScheduler {
    frame_requested: AtomicBool,
}

impl LoopScheduler {
    fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }
}

impl RuntimeScheduler for LoopScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
    }
}

/// Pretends to fetch a feed; every second refresh fails.
fn fetch_feed(runtime: RuntimeHandle, generation: u32) -> impl Future<Output = RefreshResult> {
    async move {
        let clock = runtime.frame_clock();
        let started = clock.next_frame().await;
        let mut now = started;
        while now.saturating_sub(started) < REFRESH_LATENCY_MILLIS * 1_000_000 {
            now = clock.next_frame().await;
        }
        let result: RefreshResult = if generation % 2 == 0 {
            Err("feed server unavailable".into())
        } else {
            log::info!("feed refresh #{generation} fetched");
            Ok(())
        };
        result
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let scheduler = Arc::new(LoopScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let handle = runtime.handle();

    let refreshes = std::rc::Rc::new(std::cell::Cell::new(0u32));
    let config = RefreshIndicatorConfig::new({
        let handle = handle.clone();
        let refreshes = refreshes.clone();
        move || {
            refreshes.set(refreshes.get() + 1);
            fetch_feed(handle.clone(), refreshes.get())
        }
    })
    .with_semantics_label("Refreshing feed");

    let controller = match RefreshIndicatorController::new(config, handle.clone()) {
        Ok(controller) => controller,
        Err(err) => {
            log::error!("invalid indicator config: {err}");
            return;
        }
    };
    controller.add_mode_listener(|mode| log::info!("indicator mode: {mode}"));

    let mut script = script::build().into_iter().peekable();
    let start = Instant::now();
    let mut last_logged = None;

    loop {
        let elapsed = start.elapsed();
        let elapsed_millis = elapsed.as_millis() as u64;

        while let Some(ScriptEvent { at_millis, .. }) = script.peek() {
            if *at_millis > elapsed_millis {
                break;
            }
            let Some(event) = script.next() else { break };
            match event.step {
                ScriptStep::Scroll(notification) => {
                    controller.handle_scroll_notification(&notification);
                }
                ScriptStep::Show => {
                    let pending = controller.show();
                    let spawned = handle.spawn_ui(async move {
                        match pending.await {
                            Ok(()) => log::info!("programmatic refresh finished"),
                            Err(err) => log::warn!("programmatic refresh failed: {err}"),
                        }
                    });
                    if spawned.is_none() {
                        log::warn!("runtime gone before programmatic refresh");
                    }
                }
            }
        }

        if scheduler.take_frame_request() || handle.has_frame_callbacks() {
            handle.drain_frame_callbacks(elapsed.as_nanos() as u64);
        }
        handle.drain_ui();

        let snapshot = controller.snapshot();
        let summary = (snapshot.mode, (snapshot.position * 100.0).round() as i32);
        if last_logged != Some(summary) {
            log::debug!(
                "mode={} position={:.2} scale={:.2} progress={:?} travel={:.1}dp",
                snapshot.mode,
                snapshot.position,
                snapshot.scale,
                snapshot.progress,
                snapshot.travel().value(),
            );
            last_logged = Some(summary);
        }

        let finished = script.peek().is_none()
            && !snapshot.is_visible()
            && !handle.has_frame_callbacks()
            && !handle.has_pending_ui();
        if finished || elapsed > RUN_LIMIT {
            break;
        }
        std::thread::sleep(FRAME_INTERVAL);
    }

    log::info!("demo finished after {} refreshes", refreshes.get());
}
