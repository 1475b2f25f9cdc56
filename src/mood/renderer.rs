//! Mood chart rendering
//!
//! The fetch-and-build step runs as a spawned task so callers can cancel it;
//! mounting happens afterwards on a [`ChartSurface`], which stands in for the
//! charting library binding a chart to a page element.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::chart::ChartConfig;
use super::client::MoodSource;
use super::error::{MoodError, MoodResult};
use crate::document::Document;

/// A chart bound to a page element
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    element_id: String,
    config: ChartConfig,
}

impl ChartHandle {
    pub fn new(element_id: impl Into<String>, config: ChartConfig) -> Self {
        Self {
            element_id: element_id.into(),
            config,
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
}

/// Where charts get mounted
pub trait ChartSurface {
    /// Bind a chart built from `config` to the element with `element_id`
    fn mount(&mut self, element_id: &str, config: ChartConfig) -> MoodResult<ChartHandle>;
}

/// In-process chart surface for a single page
///
/// Knows the element ids present in the page it was created for and holds at
/// most one chart per element.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    element_ids: HashSet<String>,
    mounted: HashMap<String, ChartHandle>,
}

impl ChartRegistry {
    /// A registry accepting any element id of `document`
    pub fn for_document(document: &Document) -> Self {
        Self {
            element_ids: document.element_ids(),
            mounted: HashMap::new(),
        }
    }

    pub fn get(&self, element_id: &str) -> Option<&ChartHandle> {
        self.mounted.get(element_id)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}

impl ChartSurface for ChartRegistry {
    fn mount(&mut self, element_id: &str, config: ChartConfig) -> MoodResult<ChartHandle> {
        if !self.element_ids.contains(element_id) {
            return Err(MoodError::MissingChartElement(element_id.to_string()));
        }
        if self.mounted.contains_key(element_id) {
            return Err(MoodError::AlreadyMounted(element_id.to_string()));
        }

        let handle = ChartHandle::new(element_id, config);
        self.mounted.insert(element_id.to_string(), handle.clone());

        tracing::info!(
            element = element_id,
            segments = handle.config().labels().len(),
            "Mood chart mounted"
        );
        Ok(handle)
    }
}

/// The fetch-then-build step, running in the background
pub struct MoodChartTask {
    handle: JoinHandle<MoodResult<ChartConfig>>,
}

impl MoodChartTask {
    /// Start fetching from `source`. Must be called within a tokio runtime.
    pub fn spawn(source: Arc<dyn MoodSource>) -> Self {
        let handle = tokio::spawn(async move {
            let distribution = source.fetch_mood_data().await?;
            Ok(ChartConfig::doughnut(&distribution))
        });
        Self { handle }
    }

    /// Abort the task; a later [`MoodChartTask::join`] yields `Cancelled`
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the chart configuration
    pub async fn join(self) -> MoodResult<ChartConfig> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(MoodError::Cancelled),
            Err(e) => Err(MoodError::TaskFailed(e.to_string())),
        }
    }
}

/// Fetches mood data and mounts the doughnut chart on one element
pub struct MoodChartRenderer {
    source: Arc<dyn MoodSource>,
    element_id: String,
}

impl MoodChartRenderer {
    pub fn new(source: Arc<dyn MoodSource>, element_id: impl Into<String>) -> Self {
        Self {
            source,
            element_id: element_id.into(),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Begin the fetch without mounting
    pub fn start(&self) -> MoodChartTask {
        MoodChartTask::spawn(Arc::clone(&self.source))
    }

    /// Mount the result of a started task
    pub async fn finish(
        &self,
        task: MoodChartTask,
        surface: &mut dyn ChartSurface,
    ) -> MoodResult<ChartHandle> {
        let config = task.join().await.map_err(|e| {
            tracing::warn!(element = %self.element_id, error = %e, "Mood chart not rendered");
            e
        })?;
        surface.mount(&self.element_id, config)
    }

    /// Fetch, build and mount in one go
    pub async fn render(&self, surface: &mut dyn ChartSurface) -> MoodResult<ChartHandle> {
        let task = self.start();
        self.finish(task, surface).await
    }
}
