//! Integration tests for [`strategy_set::StrategySetBuilder`] and [`strategy_set::StrategySet`].
//!
//! Covers: token storage on setup, failure isolation and logging, token injection on teardown,
//! execution order, empty set rejection, build snapshots, and per-build token pools.

use std::sync::{Arc, Mutex};

use bridge_core::{
    EventToken, FailureLog, Phase, PlaceOptions, PlaceTarget, Strategy, StrategySetError, TokenKey,
};
use strategy_set::StrategySetBuilder;

type CallLog = Arc<Mutex<Vec<String>>>;

/// **Test: Failing setup is logged and skipped; only successful tokens are stored.**
///
/// **Setup:** A (setup returns "tA"), B (setup fails).
/// **Action:** `set.setup({placeUrl: "/places/1"})`.
/// **Expected:** pool holds only "/places/1_A" -> "tA"; B's failure logged once as setup.
#[tokio::test]
async fn test_setup_stores_tokens_and_logs_failures() {
    let calls = CallLog::default();
    let failures = Arc::new(RecordingFailureLog::default());

    let mut builder = new_builder().with_failure_log(failures.clone());
    builder
        .add_strategy(TestStrategy::ok("A", "tA", &calls))
        .add_strategy(TestStrategy::failing("B", &calls));
    let set = builder.build().unwrap();

    set.setup(&PlaceTarget::new("/places/1")).await;

    let pool = set.token_pool();
    assert_eq!(pool.len().await, 1);
    assert_eq!(
        pool.get_by_key(&TokenKey::new("/places/1", "A")).await,
        Some(EventToken::new("tA"))
    );
    assert!(!pool.contains_key(&TokenKey::new("/places/1", "B")).await);
    assert_eq!(
        *failures.entries.lock().unwrap(),
        vec![("B".to_string(), Phase::Setup, "/places/1".to_string())]
    );
}

/// **Test: Teardown injects stored tokens (or None) and removes tokens on success.**
///
/// **Setup:** Same as above, after setup.
/// **Action:** `set.teardown({placeUrl: "/places/1"})`.
/// **Expected:** A sees Some("tA"), B sees None; A's key is gone from the pool.
#[tokio::test]
async fn test_teardown_injects_tokens_and_removes_on_success() {
    let calls = CallLog::default();
    let a = TestStrategy::ok("A", "tA", &calls);
    let b = TestStrategy::failing("B", &calls);

    let mut builder = new_builder().with_failure_log(Arc::new(RecordingFailureLog::default()));
    builder.add_strategy(a.clone()).add_strategy(b.clone());
    let set = builder.build().unwrap();

    set.setup(&PlaceTarget::new("/places/1")).await;
    let mut options = PlaceTarget::new("/places/1");
    set.teardown(&mut options).await;

    assert_eq!(*a.seen_tokens.lock().unwrap(), vec![Some(EventToken::new("tA"))]);
    assert_eq!(*b.seen_tokens.lock().unwrap(), vec![None]);
    assert!(set.token_pool().is_empty().await);
}

/// **Test: A failing teardown keeps its token and does not stop later strategies.**
#[tokio::test]
async fn test_failing_teardown_keeps_token_and_continues() {
    let calls = CallLog::default();
    let failures = Arc::new(RecordingFailureLog::default());
    let a = TestStrategy::new("A", Some(EventToken::new("tA")), true, &calls);
    let c = TestStrategy::ok("C", "tC", &calls);

    let mut builder = new_builder().with_failure_log(failures.clone());
    builder.add_strategy(a).add_strategy(c.clone());
    let set = builder.build().unwrap();

    set.setup(&PlaceTarget::new("/places/1")).await;
    set.teardown(&mut PlaceTarget::new("/places/1")).await;

    let pool = set.token_pool();
    assert!(pool.contains_key(&TokenKey::new("/places/1", "A")).await);
    assert!(!pool.contains_key(&TokenKey::new("/places/1", "C")).await);
    assert_eq!(*c.seen_tokens.lock().unwrap(), vec![Some(EventToken::new("tC"))]);
    assert_eq!(
        *failures.entries.lock().unwrap(),
        vec![("A".to_string(), Phase::Teardown, "/places/1".to_string())]
    );
}

/// **Test: Setup and teardown both run strategies in insertion order.**
///
/// **Setup:** A, B, C recording into a shared vec.
/// **Expected:** setup_A, setup_B, setup_C, teardown_A, teardown_B, teardown_C.
#[tokio::test]
async fn test_setup_and_teardown_run_in_insertion_order() {
    let calls = CallLog::default();

    let mut builder = new_builder();
    builder
        .add_strategy(TestStrategy::ok("A", 1, &calls))
        .add_strategy(TestStrategy::ok("B", 2, &calls))
        .add_strategy(TestStrategy::ok("C", 3, &calls));
    let set = builder.build().unwrap();
    assert_eq!(set.strategy_names(), vec!["A", "B", "C"]);

    set.setup(&PlaceTarget::new("/places/7")).await;
    set.teardown(&mut PlaceTarget::new("/places/7")).await;

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "setup_A",
            "setup_B",
            "setup_C",
            "teardown_A",
            "teardown_B",
            "teardown_C"
        ]
    );
}

/// **Test: Building an empty builder fails with EmptySet and leaves the builder usable.**
#[tokio::test]
async fn test_build_empty_set_fails() {
    let calls = CallLog::default();
    let mut builder = new_builder();

    let err = builder.build().err().unwrap();
    assert_eq!(err, StrategySetError::EmptySet);
    assert_eq!(err.kind(), "EMPTY_SET");
    assert!(builder.is_empty());

    builder.add_strategy(TestStrategy::ok("A", "tA", &calls));
    assert!(builder.build().is_ok());
}

/// **Test: Reset clears strategies; building afterwards fails with EmptySet.**
#[tokio::test]
async fn test_reset_returns_to_empty() {
    let calls = CallLog::default();
    let mut builder = new_builder();
    builder
        .add_strategy(TestStrategy::ok("A", "tA", &calls))
        .reset();

    assert!(builder.is_empty());
    assert!(matches!(builder.build(), Err(StrategySetError::EmptySet)));
}

/// **Test: A built set is a snapshot; later builder changes do not affect it.**
#[tokio::test]
async fn test_build_snapshots_strategies() {
    let calls = CallLog::default();
    let mut builder = new_builder();
    builder.add_strategy(TestStrategy::ok("A", "tA", &calls));
    let set = builder.build().unwrap();

    builder.add_strategy(TestStrategy::ok("B", "tB", &calls));
    builder.reset();

    set.setup(&PlaceTarget::new("/places/1")).await;
    assert_eq!(set.len(), 1);
    assert_eq!(*calls.lock().unwrap(), vec!["setup_A"]);
}

/// **Test: Each build gets its own token pool.**
#[tokio::test]
async fn test_each_build_has_independent_pool() {
    let calls = CallLog::default();
    let mut builder = new_builder();
    builder.add_strategy(TestStrategy::ok("A", "tA", &calls));
    let first = builder.build().unwrap();
    let second = builder.build().unwrap();

    first.setup(&PlaceTarget::new("/places/1")).await;

    assert_eq!(first.token_pool().len().await, 1);
    assert!(second.token_pool().is_empty().await);
}

/// **Test: Tokens are keyed per place; a second setup for the same place overwrites.**
#[tokio::test]
async fn test_tokens_keyed_per_place_last_write_wins() {
    let counter = CountingStrategy::new("A");
    let mut builder = new_builder();
    builder.add_strategy(counter.clone());
    let set = builder.build().unwrap();

    set.setup(&PlaceTarget::new("/places/1")).await;
    set.setup(&PlaceTarget::new("/places/2")).await;
    set.setup(&PlaceTarget::new("/places/1")).await;

    let pool = set.token_pool();
    assert_eq!(pool.len().await, 2);
    assert_eq!(
        pool.get_by_key(&TokenKey::new("/places/1", "A")).await,
        Some(EventToken::new(3))
    );
    assert_eq!(
        pool.get_by_key(&TokenKey::new("/places/2", "A")).await,
        Some(EventToken::new(2))
    );
}

/// **Test: Teardown for a place that was never set up passes None and still succeeds.**
#[tokio::test]
async fn test_teardown_without_setup_passes_none() {
    let calls = CallLog::default();
    let a = TestStrategy::ok("A", "tA", &calls);
    let mut builder = new_builder();
    builder.add_strategy(a.clone());
    let set = builder.build().unwrap();

    let mut options = PlaceTarget::new("/places/9");
    options.set_event_token(Some(EventToken::new("stale")));
    set.teardown(&mut options).await;

    assert_eq!(*a.seen_tokens.lock().unwrap(), vec![None]);
    assert!(options.event_token().is_none());
}

// --- Helpers used by tests ---

fn new_builder() -> StrategySetBuilder<PlaceTarget> {
    StrategySetBuilder::new()
}

struct TestStrategy {
    name: String,
    token: Option<EventToken>,
    fail_teardown: bool,
    calls: CallLog,
    seen_tokens: Arc<Mutex<Vec<Option<EventToken>>>>,
}

impl TestStrategy {
    fn new(name: &str, token: Option<EventToken>, fail_teardown: bool, calls: &CallLog) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            token,
            fail_teardown,
            calls: calls.clone(),
            seen_tokens: Arc::default(),
        })
    }

    fn ok(name: &str, token: impl Into<serde_json::Value>, calls: &CallLog) -> Arc<Self> {
        Self::new(name, Some(EventToken::new(token)), false, calls)
    }

    fn failing(name: &str, calls: &CallLog) -> Arc<Self> {
        Self::new(name, None, true, calls)
    }
}

#[async_trait::async_trait]
impl Strategy<PlaceTarget> for TestStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn setup(&self, _options: &PlaceTarget) -> anyhow::Result<EventToken> {
        self.calls.lock().unwrap().push(format!("setup_{}", self.name));
        self.token
            .clone()
            .ok_or_else(|| anyhow::anyhow!("{} registration rejected", self.name))
    }

    async fn teardown(&self, options: &PlaceTarget) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(format!("teardown_{}", self.name));
        self.seen_tokens
            .lock()
            .unwrap()
            .push(options.event_token().cloned());
        if self.fail_teardown {
            anyhow::bail!("{} deregistration rejected", self.name);
        }
        Ok(())
    }
}

/// Returns 1, 2, 3, ... on successive setups.
struct CountingStrategy {
    name: String,
    count: Arc<Mutex<u64>>,
}

impl CountingStrategy {
    fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            count: Arc::default(),
        })
    }
}

#[async_trait::async_trait]
impl Strategy<PlaceTarget> for CountingStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn setup(&self, _options: &PlaceTarget) -> anyhow::Result<EventToken> {
        let mut count = self.count.lock().unwrap();
        *count += 1;
        Ok(EventToken::new(*count))
    }

    async fn teardown(&self, _options: &PlaceTarget) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingFailureLog {
    entries: Mutex<Vec<(String, Phase, String)>>,
}

impl FailureLog for RecordingFailureLog {
    fn strategy_failed(&self, strategy: &str, phase: Phase, place_url: &str, _error: &anyhow::Error) {
        self.entries
            .lock()
            .unwrap()
            .push((strategy.to_string(), phase, place_url.to_string()));
    }
}
