//! Seam to the external health-data store that persists scores.

use crate::error::{PickerError, PickerResult};
use crate::score::Score;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Identifier of the activity record a score is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(pub String);

impl ActivityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait EffortStore: Send + Sync {
    async fn fetch_score(&self, activity: &ActivityId) -> PickerResult<Option<Score>>;

    /// `None` removes a previously stored score.
    async fn save_score(&self, score: Option<Score>, activity: &ActivityId) -> PickerResult<()>;

    fn is_authorized(&self) -> bool;
}

/// Lets a host keep its own handle to a store it gives to a model.
#[async_trait]
impl<T: EffortStore + ?Sized> EffortStore for Arc<T> {
    async fn fetch_score(&self, activity: &ActivityId) -> PickerResult<Option<Score>> {
        (**self).fetch_score(activity).await
    }

    async fn save_score(&self, score: Option<Score>, activity: &ActivityId) -> PickerResult<()> {
        (**self).save_score(score, activity).await
    }

    fn is_authorized(&self) -> bool {
        (**self).is_authorized()
    }
}

/// Store kept entirely in memory. Used for previews and tests.
#[derive(Debug)]
pub struct MemoryStore {
    scores: Mutex<HashMap<ActivityId, Score>>,
    authorized: AtomicBool,
    fail_requests: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            scores: Mutex::new(HashMap::new()),
            authorized: AtomicBool::new(true),
            fail_requests: AtomicBool::new(false),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(self, activity: ActivityId, score: Score) -> Self {
        self.scores
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(activity, score);
        self
    }

    pub fn set_authorized(&self, authorized: bool) {
        self.authorized.store(authorized, Ordering::SeqCst);
    }

    /// Makes every following fetch and save fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.fail_requests.store(failing, Ordering::SeqCst);
    }

    pub fn stored(&self, activity: &ActivityId) -> Option<Score> {
        self.scores
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(activity)
            .copied()
    }

    fn check(&self) -> PickerResult<()> {
        if !self.is_authorized() {
            return Err(PickerError::Unauthorized);
        }
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(PickerError::Store("simulated store failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EffortStore for MemoryStore {
    async fn fetch_score(&self, activity: &ActivityId) -> PickerResult<Option<Score>> {
        self.check()?;
        Ok(self.stored(activity))
    }

    async fn save_score(&self, score: Option<Score>, activity: &ActivityId) -> PickerResult<()> {
        self.check()?;
        let mut scores = self.scores.lock().unwrap_or_else(|e| e.into_inner());
        match score {
            Some(score) => {
                scores.insert(activity.clone(), score);
            }
            None => {
                scores.remove(activity);
            }
        }
        Ok(())
    }

    fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }
}
