use async_trait::async_trait;
use effort_picker::config::PickerConfig;
use effort_picker::error::{PickerError, PickerResult};
use effort_picker::model::{open_picker, CellContent, EffortCellModel, PreviewModel, StoreBackedModel};
use effort_picker::score::Score;
use effort_picker::store::{ActivityId, EffortStore, MemoryStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

fn activity() -> ActivityId {
    ActivityId::new("run-2024-05-01")
}

fn model_with(store: Arc<MemoryStore>) -> StoreBackedModel<Arc<MemoryStore>> {
    StoreBackedModel::on_current_runtime(store, activity()).unwrap()
}

/// First fetch blocks until released and answers `first`; later fetches
/// answer `later` right away.
struct GatedStore {
    gate: Notify,
    calls: AtomicUsize,
    first: Score,
    later: Score,
}

#[async_trait]
impl EffortStore for GatedStore {
    async fn fetch_score(&self, _activity: &ActivityId) -> PickerResult<Option<Score>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.gate.notified().await;
            return Ok(Some(self.first));
        }
        Ok(Some(self.later))
    }

    async fn save_score(&self, _score: Option<Score>, _activity: &ActivityId) -> PickerResult<()> {
        Ok(())
    }

    fn is_authorized(&self) -> bool {
        true
    }
}

fn gated() -> Arc<GatedStore> {
    Arc::new(GatedStore {
        gate: Notify::new(),
        calls: AtomicUsize::new(0),
        first: Score::Easy1,
        later: Score::Hard1,
    })
}

#[tokio::test]
async fn test_fetch_runs_once_unless_forced() {
    let store = Arc::new(MemoryStore::new().with_score(activity(), Score::Moderate2));
    let model = model_with(store);

    model.fetch(false).expect("first fetch").await.unwrap();
    assert_eq!(model.score(), Some(Score::Moderate2));
    assert!(model.fetch(false).is_none());
    assert!(model.fetch(true).is_some());
}

#[tokio::test]
async fn test_superseded_fetch_is_discarded() {
    let store = gated();
    let model = StoreBackedModel::on_current_runtime(Arc::clone(&store), activity()).unwrap();

    let slow = model.fetch(false).unwrap();
    // Let the slow fetch reach the gate before the forced one starts.
    tokio::task::yield_now().await;
    model.fetch(true).unwrap().await.unwrap();
    assert_eq!(model.score(), Some(Score::Hard1));

    store.gate.notify_one();
    slow.await.unwrap();
    assert_eq!(model.score(), Some(Score::Hard1));
}

#[tokio::test]
async fn test_save_wins_over_pending_fetch() {
    let store = gated();
    let model = StoreBackedModel::on_current_runtime(Arc::clone(&store), activity()).unwrap();

    let slow = model.fetch(false).unwrap();
    tokio::task::yield_now().await;
    model.save(Some(Score::AllOut1)).await.unwrap().unwrap();

    store.gate.notify_one();
    slow.await.unwrap();
    assert_eq!(model.score(), Some(Score::AllOut1));
}

#[tokio::test]
async fn test_save_persists_and_clears() {
    let store = Arc::new(MemoryStore::new());
    let model = model_with(Arc::clone(&store));

    model.save(Some(Score::Easy3)).await.unwrap().unwrap();
    assert_eq!(store.stored(&activity()), Some(Score::Easy3));

    model.save(None).await.unwrap().unwrap();
    assert_eq!(store.stored(&activity()), None);
    assert_eq!(model.score(), None);
}

#[tokio::test]
async fn test_failed_save_keeps_optimistic_score() {
    let store = Arc::new(MemoryStore::new());
    store.set_failing(true);
    let model = model_with(Arc::clone(&store));

    let result = model.save(Some(Score::Hard2)).await.unwrap();
    assert!(matches!(result, Err(PickerError::Store(_))));
    assert_eq!(model.score(), Some(Score::Hard2));
    assert!(model.last_error().unwrap().contains("simulated"));
    assert_eq!(store.stored(&activity()), None);
}

#[tokio::test]
async fn test_failed_fetch_allows_retry() {
    let store = Arc::new(MemoryStore::new().with_score(activity(), Score::Easy2));
    store.set_failing(true);
    let model = model_with(Arc::clone(&store));

    model.fetch(false).unwrap().await.unwrap();
    assert_eq!(model.score(), None);
    assert!(model.last_error().is_some());

    store.set_failing(false);
    model.fetch(false).expect("retry after failure").await.unwrap();
    assert_eq!(model.score(), Some(Score::Easy2));
    assert!(model.last_error().is_none());
}

#[tokio::test]
async fn test_unauthorized_shows_instructions() {
    let store = Arc::new(MemoryStore::new().with_score(activity(), Score::Hard1));
    store.set_authorized(false);
    let model = model_with(Arc::clone(&store));

    model.on_appear();
    assert!(model.is_permission_denied());
    assert_eq!(model.content(), CellContent::Unauthorized);
    assert!(open_picker(&model, PickerConfig::default()).is_none());

    // Access granted in the system settings, then the app returns.
    store.set_authorized(true);
    model.fetch(true).unwrap().await.unwrap();
    assert!(!model.is_permission_denied());
    let picker = open_picker(&model, PickerConfig::default()).expect("picker once authorized");
    assert_eq!(picker.score(), Some(Score::Hard1));
}

#[tokio::test]
async fn test_save_while_denied_changes_nothing() {
    let store = Arc::new(MemoryStore::new());
    store.set_authorized(false);
    let model = model_with(Arc::clone(&store));
    model.on_appear();
    assert!(model.is_permission_denied());

    // The store would accept it now, but the model has not refreshed yet.
    store.set_authorized(true);
    let result = model.save(Some(Score::Hard1)).await.unwrap();
    assert!(matches!(result, Err(PickerError::Unauthorized)));
    assert_eq!(model.score(), None);
    assert_eq!(store.stored(&activity()), None);
}

#[test]
fn test_preview_model() {
    let model = PreviewModel::new(Some(Score::Moderate1));
    assert_eq!(
        model.content(),
        CellContent::Picker {
            score: Some(Score::Moderate1)
        }
    );
    model.save_score(Some(Score::AllOut2));
    assert_eq!(model.score(), Some(Score::AllOut2));
    model.on_appear();
    model.on_foreground();
    assert_eq!(model.score(), Some(Score::AllOut2));

    let denied = PreviewModel::denied();
    assert!(open_picker(&denied, PickerConfig::default()).is_none());
}
