//! Per-panel animation pacing and resize debouncing.
//!
//! Each panel owns one background scheduling thread. The thread never
//! draws: it only hands individual render dispatches to the host's
//! single-threaded drawing context through [`RenderSurface`] and waits —
//! bounded — for each dispatch to complete before computing the next
//! progress step. Draw calls of one pass are therefore fully serialized
//! and happen-before the next pass's draw calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

/// Scheduler timing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Quiet period a resize burst must respect before the coalesced
    /// render fires.
    pub debounce_ms: u64,
    /// Upper bound on the wait for one dispatched render step.
    pub render_timeout_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 75,
            render_timeout_ms: 5_000,
        }
    }
}

impl SchedulerConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }
}

/// Completion latch for one dispatched render.
///
/// The surface implementation must call [`RenderAck::complete`] once the
/// render finished on the drawing context; that marks the panel as having
/// rendered and releases the scheduler's bounded wait, if one is pending.
pub struct RenderAck {
    rendered: Arc<AtomicBool>,
    done: Option<SyncSender<()>>,
}

impl RenderAck {
    pub fn complete(self) {
        self.rendered.store(true, Ordering::SeqCst);
        if let Some(done) = self.done {
            // The scheduler may have timed out and dropped its receiver.
            let _ = done.send(());
        }
    }
}

/// The host's single-threaded drawing context.
///
/// `dispatch_render` must marshal the redraw onto that context and return
/// promptly; it is called from the panel's scheduling thread.
pub trait RenderSurface: Send + Sync + 'static {
    fn dispatch_render(&self, progress: f64, ack: RenderAck);

    fn is_animation_enabled(&self) -> bool;
}

enum SchedulerTask {
    Animate { duration: Duration },
    DebounceRender,
    Shutdown,
}

/// Chart panel scheduler: drives animated render cycles and coalesces
/// resize bursts.
///
/// Only one animation runs at a time; a start issued while a loop is in
/// flight queues behind it and begins after the running loop terminates at
/// progress 1. Callers that need different overlap semantics must
/// serialize externally.
pub struct ChartPanel<S: RenderSurface> {
    surface: Arc<S>,
    config: SchedulerConfig,
    animating: Arc<AtomicBool>,
    rendered: Arc<AtomicBool>,
    tasks: Sender<SchedulerTask>,
    worker: Option<JoinHandle<()>>,
}

impl<S: RenderSurface> ChartPanel<S> {
    pub fn new(surface: S) -> ChartResult<Self> {
        Self::with_config(surface, SchedulerConfig::default())
    }

    pub fn with_config(surface: S, config: SchedulerConfig) -> ChartResult<Self> {
        let surface = Arc::new(surface);
        let animating = Arc::new(AtomicBool::new(false));
        let rendered = Arc::new(AtomicBool::new(false));
        let (tasks, task_rx) = mpsc::channel();

        let worker_state = Worker {
            surface: Arc::clone(&surface),
            config,
            animating: Arc::clone(&animating),
            rendered: Arc::clone(&rendered),
        };
        let worker = thread::Builder::new()
            .name("cubechart-panel".to_owned())
            .spawn(move || worker_state.run(task_rx))
            .map_err(|err| {
                ChartError::Scheduler(format!("failed to spawn panel scheduler thread: {err}"))
            })?;

        Ok(Self {
            surface,
            config,
            animating,
            rendered,
            tasks,
            worker: Some(worker),
        })
    }

    #[must_use]
    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating.load(Ordering::SeqCst)
    }

    /// Whether at least one dispatched render has completed.
    #[must_use]
    pub fn has_rendered(&self) -> bool {
        self.rendered.load(Ordering::SeqCst)
    }

    /// Starts one animated render cycle.
    ///
    /// A zero duration renders once, immediately, at progress 1 from the
    /// calling thread. Otherwise the background thread steps progress from
    /// the elapsed fraction until it reaches exactly 1.
    pub fn animate(&self, duration: Duration) {
        if duration.is_zero() {
            self.surface.dispatch_render(1.0, self.ack());
            return;
        }
        if self.tasks.send(SchedulerTask::Animate { duration }).is_err() {
            warn!("panel scheduler is gone; dropping animate request");
        }
    }

    /// Reacts to a host resize.
    ///
    /// Ignored while an animation is in flight or before the first
    /// completed render. With chart animation enabled the panel repaints
    /// immediately at progress 1; otherwise the render is debounced, and
    /// every further resize within the quiet period replaces the pending
    /// one (last-write-wins).
    pub fn resize(&self, width: f64, height: f64) {
        if self.is_animating() || !self.has_rendered() {
            return;
        }
        debug!(width, height, "panel resize");
        if self.surface.is_animation_enabled() {
            self.surface.dispatch_render(1.0, self.ack());
        } else if self.tasks.send(SchedulerTask::DebounceRender).is_err() {
            warn!("panel scheduler is gone; dropping resize render");
        }
    }

    fn ack(&self) -> RenderAck {
        RenderAck {
            rendered: Arc::clone(&self.rendered),
            done: None,
        }
    }
}

impl<S: RenderSurface> Drop for ChartPanel<S> {
    fn drop(&mut self) {
        let _ = self.tasks.send(SchedulerTask::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

struct Worker<S: RenderSurface> {
    surface: Arc<S>,
    config: SchedulerConfig,
    animating: Arc<AtomicBool>,
    rendered: Arc<AtomicBool>,
}

impl<S: RenderSurface> Worker<S> {
    fn run(&self, tasks: Receiver<SchedulerTask>) {
        let mut pending_deadline: Option<Instant> = None;

        loop {
            let received = match pending_deadline {
                None => match tasks.recv() {
                    Ok(task) => task,
                    Err(_) => break,
                },
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        pending_deadline = None;
                        self.dispatch_settled();
                        continue;
                    }
                    match tasks.recv_timeout(deadline - now) {
                        Ok(task) => task,
                        Err(RecvTimeoutError::Timeout) => {
                            pending_deadline = None;
                            self.dispatch_settled();
                            continue;
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            };

            match received {
                SchedulerTask::Animate { duration } => {
                    pending_deadline = None;
                    self.run_animation(duration);
                }
                SchedulerTask::DebounceRender => {
                    // A newer resize replaces any pending deadline.
                    pending_deadline = Some(Instant::now() + self.config.debounce());
                }
                SchedulerTask::Shutdown => break,
            }
        }
    }

    /// Fire-and-forget settled render after a quiet period.
    fn dispatch_settled(&self) {
        debug!("debounced render dispatch");
        self.surface.dispatch_render(
            1.0,
            RenderAck {
                rendered: Arc::clone(&self.rendered),
                done: None,
            },
        );
    }

    fn run_animation(&self, duration: Duration) {
        self.animating.store(true, Ordering::SeqCst);
        let start = Instant::now();

        loop {
            let progress =
                (start.elapsed().as_secs_f64() / duration.as_secs_f64()).min(1.0);

            let (done_tx, done_rx) = mpsc::sync_channel(1);
            self.surface.dispatch_render(
                progress,
                RenderAck {
                    rendered: Arc::clone(&self.rendered),
                    done: Some(done_tx),
                },
            );
            match done_rx.recv_timeout(self.config.render_timeout()) {
                Ok(()) => {}
                Err(RecvTimeoutError::Timeout) => {
                    // Best effort: skipping a frame beats stalling the UI.
                    warn!(progress, "render step ack timed out; continuing");
                }
                Err(RecvTimeoutError::Disconnected) => {
                    debug!(progress, "render ack dropped without completion");
                }
            }

            if progress >= 1.0 {
                break;
            }
        }

        self.animating.store(false, Ordering::SeqCst);
    }
}
