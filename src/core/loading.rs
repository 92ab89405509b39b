//! Progress-bar state for long-running storefront work.
//!
//! [`LoadingController`] owns the progress value and the timers that move
//! it. Clones share the same state, so one controller can be handed to
//! every caller that needs to drive or read the bar. Timer-driven methods
//! spawn tokio tasks and must be called from inside a runtime.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};

const TICK: Duration = Duration::from_millis(50);
const SIMULATED_CEILING: f64 = 90.0;
const RESET_AFTER_HIDE: Duration = Duration::from_millis(500);

pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);
pub const DEFAULT_FINISH_DELAY: Duration = Duration::from_millis(300);
pub const DEFAULT_MIN_DISPLAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Default)]
struct LoadingState {
    is_loading: bool,
    progress: f64,
}

#[derive(Debug, Default)]
struct Timers {
    ticker: Option<JoinHandle<()>>,
    reset: Option<JoinHandle<()>>,
}

impl Timers {
    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    fn cancel_reset(&mut self) {
        if let Some(reset) = self.reset.take() {
            reset.abort();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingOptions {
    pub duration: Duration,
    pub delay: Duration,
    pub min_display_time: Duration,
}

impl Default for LoadingOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            delay: DEFAULT_FINISH_DELAY,
            min_display_time: DEFAULT_MIN_DISPLAY,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadingController {
    state: Arc<Mutex<LoadingState>>,
    timers: Arc<Mutex<Timers>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Progress added by one tick while the bar is still below the ceiling.
fn step(progress: f64, increment: f64) -> f64 {
    if progress >= SIMULATED_CEILING {
        return progress;
    }
    let slowdown = 1.0 - (progress / 100.0) * 0.5;
    (progress + increment * slowdown).min(SIMULATED_CEILING)
}

impl LoadingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading
    }

    /// Current progress rounded to a whole percent.
    pub fn progress(&self) -> u8 {
        lock(&self.state).progress.round() as u8
    }

    /// Shows the bar and lets it creep towards 90% over roughly `duration`.
    pub fn start(&self, duration: Duration) {
        {
            let mut state = lock(&self.state);
            state.is_loading = true;
            state.progress = 0.0;
        }

        let mut timers = lock(&self.timers);
        timers.cancel_ticker();
        timers.cancel_reset();

        let ticks = (duration.as_secs_f64() / TICK.as_secs_f64()).max(1.0);
        let increment = 100.0 / ticks;
        let shared = Arc::clone(&self.state);

        timers.ticker = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + TICK, TICK);
            loop {
                ticker.tick().await;
                let mut state = lock(&shared);
                state.progress = step(state.progress, increment);
            }
        }));
        tracing::trace!("Loading started ({:?})", duration);
    }

    /// Fills the bar, hides it after `delay` and clears the progress shortly after.
    pub fn finish(&self, delay: Duration) {
        lock(&self.state).progress = 100.0;

        let mut timers = lock(&self.timers);
        timers.cancel_ticker();
        timers.cancel_reset();

        let shared = Arc::clone(&self.state);
        timers.reset = Some(tokio::spawn(async move {
            sleep(delay).await;
            lock(&shared).is_loading = false;
            sleep(RESET_AFTER_HIDE).await;
            lock(&shared).progress = 0.0;
        }));
        tracing::trace!("Loading finished");
    }

    /// Hides the bar immediately without the completion animation.
    pub fn stop(&self) {
        {
            let mut timers = lock(&self.timers);
            timers.cancel_ticker();
            timers.cancel_reset();
        }
        let mut state = lock(&self.state);
        state.is_loading = false;
        state.progress = 0.0;
    }

    pub fn set_progress(&self, value: f64) {
        lock(&self.state).progress = value.clamp(0.0, 100.0);
    }

    /// Runs `task` with the bar visible for at least `options.min_display_time`.
    ///
    /// Errors from `task` stop the bar and are returned unchanged.
    pub async fn with_loading<T, E, F>(&self, options: LoadingOptions, task: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let started = Instant::now();
        self.start(options.duration);

        match task.await {
            Ok(value) => {
                let elapsed = started.elapsed();
                if elapsed < options.min_display_time {
                    sleep(options.min_display_time - elapsed).await;
                }
                self.finish(options.delay);
                Ok(value)
            }
            Err(e) => {
                self.stop();
                Err(e)
            }
        }
    }
}

const NAVIGATION_DURATION: Duration = Duration::from_millis(1500);

/// Shows the loading bar while moving between pages.
#[derive(Debug, Clone, Default)]
pub struct NavigationLoading {
    controller: LoadingController,
    started_at: Arc<Mutex<Option<Instant>>>,
}

impl NavigationLoading {
    pub fn new(controller: LoadingController) -> Self {
        Self {
            controller,
            started_at: Arc::default(),
        }
    }

    pub fn controller(&self) -> &LoadingController {
        &self.controller
    }

    /// Staying on the same path does not show the bar.
    pub fn before_navigation(&self, from: &str, to: &str) {
        if from != to {
            *lock(&self.started_at) = Some(Instant::now());
            self.controller.start(NAVIGATION_DURATION);
        }
    }

    pub fn after_navigation(&self) {
        let Some(started) = lock(&self.started_at).take() else {
            return;
        };

        let elapsed = started.elapsed();
        if elapsed >= DEFAULT_MIN_DISPLAY {
            self.controller.finish(DEFAULT_FINISH_DELAY);
            return;
        }

        let controller = self.controller.clone();
        tokio::spawn(async move {
            sleep(DEFAULT_MIN_DISPLAY - elapsed).await;
            controller.finish(DEFAULT_FINISH_DELAY);
        });
    }
}
