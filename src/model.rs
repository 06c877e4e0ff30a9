//! View models backing the effort cell of a host application.

use crate::config::PickerConfig;
use crate::error::{PickerError, PickerResult};
use crate::picker::EffortPicker;
use crate::score::Score;
use crate::store::{ActivityId, EffortStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What the cell presents when opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    /// Access to the store was denied; show instructions instead of a picker.
    Unauthorized,
    Picker { score: Option<Score> },
}

pub trait EffortCellModel {
    fn score(&self) -> Option<Score>;
    fn is_permission_denied(&self) -> bool;
    fn save_score(&self, score: Option<Score>);
    fn on_appear(&self);
    fn on_foreground(&self);

    fn content(&self) -> CellContent {
        if self.is_permission_denied() {
            CellContent::Unauthorized
        } else {
            CellContent::Picker {
                score: self.score(),
            }
        }
    }
}

/// Builds a picker seeded with the model's score, or `None` while access is
/// denied.
pub fn open_picker(model: &dyn EffortCellModel, config: PickerConfig) -> Option<EffortPicker> {
    match model.content() {
        CellContent::Unauthorized => None,
        CellContent::Picker { score } => Some(EffortPicker::new(config).with_score(score)),
    }
}

#[derive(Debug, Default)]
struct ModelState {
    score: Option<Score>,
    permission_denied: bool,
    did_fetch: bool,
    /// Bumped by every fetch and save; a fetch only applies its result if
    /// nothing newer started meanwhile.
    generation: u64,
    last_error: Option<String>,
}

struct Inner<S> {
    store: S,
    activity: ActivityId,
    state: Mutex<ModelState>,
}

impl<S> Inner<S> {
    fn state(&self) -> MutexGuard<'_, ModelState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record_failure(&self, state: &mut ModelState, err: &PickerError) {
        if matches!(err, PickerError::Unauthorized) {
            state.permission_denied = true;
        }
        state.last_error = Some(err.to_string());
    }
}

/// Production model. Store calls run on the given tokio runtime and never
/// block the caller.
pub struct StoreBackedModel<S> {
    inner: Arc<Inner<S>>,
    runtime: Handle,
}

impl<S: EffortStore + 'static> StoreBackedModel<S> {
    pub fn new(store: S, activity: ActivityId, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                activity,
                state: Mutex::new(ModelState::default()),
            }),
            runtime,
        }
    }

    /// Uses the runtime of the calling context.
    pub fn on_current_runtime(store: S, activity: ActivityId) -> PickerResult<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| PickerError::Config(format!("No tokio runtime available: {}", e)))?;
        Ok(Self::new(store, activity, runtime))
    }

    pub fn activity(&self) -> &ActivityId {
        &self.inner.activity
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.state().last_error.clone()
    }

    /// Starts a fetch unless one already succeeded and `force` is off.
    pub fn fetch(&self, force: bool) -> Option<JoinHandle<()>> {
        let generation = {
            let mut state = self.inner.state();
            state.permission_denied = !self.inner.store.is_authorized();
            if state.permission_denied {
                state.did_fetch = false;
                return None;
            }
            if state.did_fetch && !force {
                return None;
            }
            state.did_fetch = true;
            state.generation += 1;
            state.generation
        };

        let inner = Arc::clone(&self.inner);
        Some(self.runtime.spawn(async move {
            let result = inner.store.fetch_score(&inner.activity).await;
            let mut state = inner.state();
            if state.generation != generation {
                debug!(activity = %inner.activity, "discarding superseded fetch result");
                return;
            }
            match result {
                Ok(score) => {
                    debug!(activity = %inner.activity, ?score, "score fetched");
                    state.score = score;
                    state.last_error = None;
                }
                Err(e) => {
                    warn!(activity = %inner.activity, "Failed to fetch effort score: {}", e);
                    state.did_fetch = false;
                    inner.record_failure(&mut state, &e);
                }
            }
        }))
    }

    /// Stores `score`. The model reflects the new score immediately and keeps
    /// it even if persisting fails; the failure is reported through the
    /// returned handle and `last_error`.
    ///
    /// While access is denied nothing is changed and the handle resolves to
    /// `Unauthorized`.
    pub fn save(&self, score: Option<Score>) -> JoinHandle<PickerResult<()>> {
        {
            let mut state = self.inner.state();
            if state.permission_denied {
                warn!(activity = %self.inner.activity, "Ignoring effort score save, access denied");
                return self.runtime.spawn(async { Err(PickerError::Unauthorized) });
            }
            state.generation += 1;
            state.score = score;
        }

        let inner = Arc::clone(&self.inner);
        self.runtime.spawn(async move {
            match inner.store.save_score(score, &inner.activity).await {
                Ok(()) => {
                    info!(activity = %inner.activity, ?score, "effort score saved");
                    Ok(())
                }
                Err(e) => {
                    warn!(activity = %inner.activity, "Failed to save effort score: {}", e);
                    let mut state = inner.state();
                    inner.record_failure(&mut state, &e);
                    Err(e)
                }
            }
        })
    }
}

impl<S: EffortStore + 'static> EffortCellModel for StoreBackedModel<S> {
    fn score(&self) -> Option<Score> {
        self.inner.state().score
    }

    fn is_permission_denied(&self) -> bool {
        self.inner.state().permission_denied
    }

    fn save_score(&self, score: Option<Score>) {
        drop(self.save(score));
    }

    fn on_appear(&self) {
        drop(self.fetch(false));
    }

    /// Coming back to the foreground may follow a permission change in the
    /// system settings, so authorization and score are both re-read.
    fn on_foreground(&self) {
        drop(self.fetch(true));
    }
}

/// Synchronous in-memory model for previews.
#[derive(Debug, Default)]
pub struct PreviewModel {
    score: RwLock<Option<Score>>,
    permission_denied: AtomicBool,
}

impl PreviewModel {
    pub fn new(score: Option<Score>) -> Self {
        Self {
            score: RwLock::new(score),
            permission_denied: AtomicBool::new(false),
        }
    }

    pub fn denied() -> Self {
        let model = Self::default();
        model.permission_denied.store(true, Ordering::SeqCst);
        model
    }
}

impl EffortCellModel for PreviewModel {
    fn score(&self) -> Option<Score> {
        *self.score.read().unwrap_or_else(|e| e.into_inner())
    }

    fn is_permission_denied(&self) -> bool {
        self.permission_denied.load(Ordering::SeqCst)
    }

    fn save_score(&self, score: Option<Score>) {
        *self.score.write().unwrap_or_else(|e| e.into_inner()) = score;
    }

    fn on_appear(&self) {}

    fn on_foreground(&self) {}
}
