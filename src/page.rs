//! Page lifecycle
//!
//! [`PageLoad::ready`] is the document-ready hook: the host calls it once the
//! page's elements exist, and it runs both initializers. They share nothing;
//! either can fail without affecting the other.
//!
//! # Example
//!
//! ```rust,no_run
//! use moodjar::config::PageConfig;
//! use moodjar::document::Document;
//! use moodjar::mood::{ChartRegistry, MoodDataClient};
//! use moodjar::page::PageLoad;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PageConfig::default();
//!     let document = Document::load(Path::new("templates/index.html"))?;
//!     let source = Arc::new(MoodDataClient::new(&config)?);
//!
//!     let mut registry = ChartRegistry::for_document(&document);
//!     let mut page = PageLoad::new(document, config);
//!     let report = page.ready(source, &mut registry).await?;
//!
//!     println!("validator field: {}", report.validator);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::config::PageConfig;
use crate::document::Document;
use crate::mood::{ChartHandle, ChartSurface, MoodChartRenderer, MoodError, MoodSource};
use crate::validator::{populate_fragment_field, FieldOutcome};

/// Lifecycle errors
#[derive(Error, Debug)]
pub enum PageError {
    /// `ready` already ran for this page load
    #[error("Page initializers already ran")]
    AlreadyReady,
}

/// Outcome of both initializers
#[derive(Debug)]
pub struct ReadyReport {
    pub validator: FieldOutcome,
    pub chart: Result<ChartHandle, MoodError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Loading,
    Ready,
}

/// One load of the page
pub struct PageLoad {
    document: Document,
    config: PageConfig,
    state: LoadState,
}

impl PageLoad {
    pub fn new(document: Document, config: PageConfig) -> Self {
        Self {
            document,
            config,
            state: LoadState::Loading,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Run the initializers
    ///
    /// The chart fetch starts first and proceeds in the background while the
    /// validator field is filled in; the chart is mounted once the fetch
    /// settles. Calling this a second time fails without touching the page.
    pub async fn ready(
        &mut self,
        source: Arc<dyn MoodSource>,
        surface: &mut dyn ChartSurface,
    ) -> Result<ReadyReport, PageError> {
        if self.state == LoadState::Ready {
            return Err(PageError::AlreadyReady);
        }
        self.state = LoadState::Ready;

        let renderer = MoodChartRenderer::new(source, self.config.chart_element_id.clone());
        let task = renderer.start();

        let validator = populate_fragment_field(&mut self.document, &self.config.validator_target());
        tracing::info!(outcome = %validator, "Validator fragment");

        let chart = renderer.finish(task, surface).await;

        Ok(ReadyReport { validator, chart })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Doctype, Element};
    use crate::mood::{ChartRegistry, MoodDistribution, MoodResult};
    use async_trait::async_trait;

    struct NotFoundSource;

    #[async_trait]
    impl MoodSource for NotFoundSource {
        async fn fetch_mood_data(&self) -> MoodResult<MoodDistribution> {
            Err(MoodError::Status {
                status: 404,
                message: "Not Found".to_string(),
            })
        }
    }

    fn full_page() -> Document {
        Document::parse_html(
            r#"<!DOCTYPE html>
<html>
  <body>
    <canvas id="moodChart"></canvas>
    <form action="https://validator.w3.org/check" method="post">
      <input name="fragment" type="hidden">
    </form>
  </body>
</html>"#,
        )
        .unwrap()
    }

    fn moods() -> Arc<dyn MoodSource> {
        Arc::new(MoodDistribution::from_counts([("happy", 5), ("sad", 2), ("angry", 1)]))
    }

    fn fragment_value(doc: &Document) -> Option<String> {
        doc.find_form_by_action("https://validator.w3.org/check")
            .and_then(|f| f.child_input_named("fragment"))
            .and_then(|i| i.value.clone())
    }

    #[tokio::test]
    async fn test_ready_runs_both() {
        let document = full_page();
        let mut registry = ChartRegistry::for_document(&document);
        let mut page = PageLoad::new(document, PageConfig::default());

        let report = page.ready(moods(), &mut registry).await.unwrap();

        assert!(matches!(report.validator, FieldOutcome::Populated { .. }));
        let value = fragment_value(page.document()).unwrap();
        assert!(value.starts_with("<!DOCTYPE html>\n<html>"));

        let chart = report.chart.unwrap();
        assert_eq!(chart.config().labels(), ["happy", "sad", "angry"]);
        assert!(registry.get("moodChart").is_some());
    }

    #[tokio::test]
    async fn test_missing_form_does_not_block_chart() {
        let document = Document::new(
            Some(Doctype::html5()),
            Element::new("html").child(
                Element::new("body").child(Element::new("canvas").attr("id", "moodChart")),
            ),
        );
        let mut registry = ChartRegistry::for_document(&document);
        let mut page = PageLoad::new(document, PageConfig::default());

        let report = page.ready(moods(), &mut registry).await.unwrap();

        assert_eq!(report.validator, FieldOutcome::MissingTarget);
        assert!(report.chart.is_ok());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_validator_field() {
        let document = full_page();
        let mut registry = ChartRegistry::for_document(&document);
        let mut page = PageLoad::new(document, PageConfig::default());

        let report = page.ready(Arc::new(NotFoundSource), &mut registry).await.unwrap();

        assert!(matches!(
            report.chart,
            Err(MoodError::Status { status: 404, .. })
        ));
        assert!(registry.is_empty());
        assert!(fragment_value(page.document()).is_some());
    }

    #[tokio::test]
    async fn test_ready_only_once() {
        let document = full_page();
        let mut registry = ChartRegistry::for_document(&document);
        let mut page = PageLoad::new(document, PageConfig::default());

        page.ready(moods(), &mut registry).await.unwrap();
        let value = fragment_value(page.document());
        assert!(page.is_ready());

        let err = page.ready(moods(), &mut registry).await.unwrap_err();
        assert!(matches!(err, PageError::AlreadyReady));
        assert_eq!(fragment_value(page.document()), value);
        assert_eq!(registry.len(), 1);
    }
}
