//! Transient success banner with a self-clearing timer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How long the banner stays visible after a successful submit.
pub const SUCCESS_BANNER_DURATION: Duration = Duration::from_secs(3);

/// Which submit the banner acknowledges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Added,
    Updated,
}

impl BannerKind {
    /// Text shown in the banner.
    pub const fn message(self) -> &'static str {
        match self {
            BannerKind::Added => "Customer Added!",
            BannerKind::Updated => "Customer Updated!",
        }
    }
}

#[derive(Debug, Default)]
struct BannerState {
    current: Option<BannerKind>,
    generation: u64,
}

fn lock(state: &Mutex<BannerState>) -> MutexGuard<'_, BannerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Banner shown for a fixed window after each success.
///
/// Showing the banner again restarts the window; the previous hide task is
/// aborted and, should it already be running, its generation no longer
/// matches so it leaves the newer banner alone. Dropping the banner aborts
/// the pending task.
#[derive(Debug)]
pub struct SuccessBanner {
    state: Arc<Mutex<BannerState>>,
    duration: Duration,
    hide_task: Option<JoinHandle<()>>,
}

impl Default for SuccessBanner {
    fn default() -> Self {
        Self::new(SUCCESS_BANNER_DURATION)
    }
}

impl SuccessBanner {
    /// Creates a hidden banner that stays up for `duration` once shown.
    pub fn new(duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(BannerState::default())),
            duration,
            hide_task: None,
        }
    }

    /// Shows `kind` and schedules it to hide after the configured duration.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn show(&mut self, kind: BannerKind) {
        let deadline = Instant::now() + self.duration;
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.current = Some(kind);
            state.generation
        };

        if let Some(task) = self.hide_task.take() {
            task.abort();
        }

        let state = Arc::clone(&self.state);
        self.hide_task = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut state = lock(&state);
            if state.generation == generation {
                state.current = None;
            }
        }));
    }

    /// Banner on screen right now, if any.
    pub fn current(&self) -> Option<BannerKind> {
        lock(&self.state).current
    }
}

impl Drop for SuccessBanner {
    fn drop(&mut self) {
        if let Some(task) = self.hide_task.take() {
            task.abort();
        }
    }
}
