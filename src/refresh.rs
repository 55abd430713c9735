//! Asynchronous load/refresh of the project collection.
//!
//! A refresh marks the store as loading, waits out the configured latency on a
//! tokio runtime, fetches a fresh snapshot on the blocking pool and hands the
//! outcome back over a channel. The UI thread drains that channel once per
//! frame with [`Refresher::poll`]; tests can await [`Refresher::wait`].
//!
//! Each trigger supersedes the previous one: the older task is aborted and any
//! outcome it still manages to send is discarded by generation number.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::error::{IoError, RefreshError};
use crate::model::{self, Project};
use crate::store::ProjectStore;

/// Where fresh project snapshots come from.
pub trait ProjectSource: Send + Sync {
    /// Blocking fetch; runs on the runtime's blocking pool.
    fn fetch(&self) -> Result<Vec<Project>, RefreshError>;

    fn describe(&self) -> String;
}

/// The built-in demonstration data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl ProjectSource for SampleSource {
    fn fetch(&self) -> Result<Vec<Project>, RefreshError> {
        Ok(crate::sample::sample_projects(model::today()))
    }

    fn describe(&self) -> String {
        "sample data".to_string()
    }
}

/// A JSON project collection on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProjectSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<Project>, RefreshError> {
        crate::io::file::load_projects(&self.path).map_err(|err| match err {
            IoError::Io(source) => RefreshError::Io {
                path: self.path.clone(),
                source,
            },
            IoError::Json(source) => RefreshError::Parse {
                path: self.path.clone(),
                source,
            },
            other => RefreshError::Task(other.to_string()),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// What an applied refresh did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshStatus {
    Loaded { count: usize, dropped: usize },
    Failed(String),
}

struct Outcome {
    generation: u64,
    result: Result<Vec<Project>, RefreshError>,
}

type Notifier = Arc<dyn Fn() + Send + Sync>;

pub struct Refresher {
    handle: Handle,
    source: Arc<dyn ProjectSource>,
    latency: Duration,
    generation: u64,
    pending: bool,
    in_flight: Option<JoinHandle<()>>,
    tx: UnboundedSender<Outcome>,
    rx: UnboundedReceiver<Outcome>,
    notify: Option<Notifier>,
}

impl Refresher {
    pub fn new(handle: Handle, source: Arc<dyn ProjectSource>, latency: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            handle,
            source,
            latency,
            generation: 0,
            pending: false,
            in_flight: None,
            tx,
            rx,
            notify: None,
        }
    }

    /// Called from the runtime whenever an outcome is ready (e.g. to request a repaint).
    pub fn with_notifier(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Some(Arc::new(notify));
        self
    }

    /// Swap the source. Takes effect on the next trigger.
    pub fn set_source(&mut self, source: Arc<dyn ProjectSource>) {
        self.source = source;
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start a refresh, superseding any refresh still in flight.
    pub fn trigger(&mut self, store: &mut ProjectStore) -> u64 {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        self.generation += 1;
        self.pending = true;
        store.set_loading(true);

        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let latency = self.latency;
        let tx = self.tx.clone();
        let notify = self.notify.clone();

        tracing::info!(generation, source = %source.describe(), "refresh triggered");

        self.in_flight = Some(self.handle.spawn(async move {
            tokio::time::sleep(latency).await;
            let result = match tokio::task::spawn_blocking(move || source.fetch()).await {
                Ok(result) => result,
                Err(err) => Err(RefreshError::Task(err.to_string())),
            };
            // A closed channel means the refresher was dropped.
            if tx.send(Outcome { generation, result }).is_ok() {
                if let Some(notify) = notify {
                    notify();
                }
            }
        }));
        generation
    }

    /// Abandon the refresh in flight, if any, so a direct write to the store is not
    /// overwritten when it lands. Returns `true` if a refresh was pending.
    pub fn cancel(&mut self, store: &mut ProjectStore) -> bool {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        if !self.pending {
            return false;
        }
        // Any outcome already queued now carries a stale generation.
        self.generation += 1;
        self.pending = false;
        store.set_loading(false);
        tracing::info!(generation = self.generation, "refresh cancelled");
        true
    }

    /// Apply whatever outcomes have arrived without blocking.
    pub fn poll(&mut self, store: &mut ProjectStore) -> Option<RefreshStatus> {
        let mut applied = None;
        while let Ok(outcome) = self.rx.try_recv() {
            if let Some(status) = self.apply(outcome, store) {
                applied = Some(status);
            }
        }
        applied
    }

    /// Wait for the current refresh to finish and apply it. `None` if nothing is pending.
    pub async fn wait(&mut self, store: &mut ProjectStore) -> Option<RefreshStatus> {
        while self.pending {
            let outcome = self.rx.recv().await?;
            if let Some(status) = self.apply(outcome, store) {
                return Some(status);
            }
        }
        None
    }

    fn apply(&mut self, outcome: Outcome, store: &mut ProjectStore) -> Option<RefreshStatus> {
        if outcome.generation != self.generation {
            tracing::debug!(
                stale = outcome.generation,
                current = self.generation,
                "discarding superseded refresh"
            );
            return None;
        }
        self.pending = false;
        self.in_flight = None;

        match outcome.result {
            Ok(projects) => {
                let dropped = store.set_all(projects);
                let count = store.len();
                tracing::info!(generation = outcome.generation, count, dropped, "refresh applied");
                Some(RefreshStatus::Loaded { count, dropped })
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(generation = outcome.generation, error = %message, "refresh failed");
                store.set_error(Some(message.clone()));
                Some(RefreshStatus::Failed(message))
            }
        }
    }
}

impl Drop for Refresher {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl ProjectSource for Broken {
        fn fetch(&self) -> Result<Vec<Project>, RefreshError> {
            Err(RefreshError::Task("connection reset".into()))
        }

        fn describe(&self) -> String {
            "broken".into()
        }
    }

    fn sample_refresher() -> Refresher {
        Refresher::new(Handle::current(), Arc::new(SampleSource), Duration::ZERO)
    }

    #[tokio::test]
    async fn sample_refresh_populates_store() {
        let mut store = ProjectStore::new();
        let mut refresher = sample_refresher();

        refresher.trigger(&mut store);
        assert!(store.is_loading());

        let status = refresher.wait(&mut store).await;
        assert!(matches!(status, Some(RefreshStatus::Loaded { dropped: 0, .. })));
        assert!(!store.is_loading());
        assert!(!store.is_empty());
        assert!(!refresher.is_pending());
    }

    #[tokio::test]
    async fn failure_sets_error() {
        let mut store = ProjectStore::new();
        let mut refresher =
            Refresher::new(Handle::current(), Arc::new(Broken), Duration::ZERO);

        refresher.trigger(&mut store);
        let status = refresher.wait(&mut store).await;

        assert_eq!(
            status,
            Some(RefreshStatus::Failed("Refresh task failed: connection reset".into()))
        );
        assert!(!store.is_loading());
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn stale_outcomes_are_discarded() {
        let mut store = ProjectStore::new();
        let mut refresher = sample_refresher();
        refresher.generation = 2;
        refresher.pending = true;

        let stale = Outcome {
            generation: 1,
            result: Ok(Vec::new()),
        };
        assert_eq!(refresher.apply(stale, &mut store), None);
        assert!(refresher.is_pending());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        let err = tokio::task::spawn_blocking(move || source.fetch())
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, RefreshError::Io { .. }));
    }

    #[tokio::test]
    async fn wait_without_trigger_returns_none() {
        let mut store = ProjectStore::new();
        let mut refresher = sample_refresher();
        assert_eq!(refresher.wait(&mut store).await, None);
        assert_eq!(refresher.poll(&mut store), None);
    }

    #[tokio::test]
    async fn cancel_drops_pending_refresh() {
        let mut store = ProjectStore::new();
        let mut refresher = sample_refresher();

        refresher.trigger(&mut store);
        assert!(refresher.cancel(&mut store));
        assert!(!store.is_loading());
        assert!(!refresher.is_pending());
        assert_eq!(refresher.wait(&mut store).await, None);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(refresher.poll(&mut store), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn cancel_when_idle_is_a_no_op() {
        let mut store = ProjectStore::new();
        let mut refresher = sample_refresher();
        let revision = store.revision();
        assert!(!refresher.cancel(&mut store));
        assert_eq!(store.revision(), revision);
    }
}
