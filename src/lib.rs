//! # Moodjar
//!
//! Page initializers for the Memory Jar web page.
//!
//! ## Features
//!
//! - **Validator fragment**: serializes the doctype and live markup into the
//!   W3C validator form's hidden `fragment` field
//! - **Mood chart**: fetches per-mood counts from `/mood-data` and mounts a
//!   doughnut chart on the `moodChart` element
//!
//! ## Modules
//!
//! - [`document`]: Doctype, element tree, outer-HTML serialization, HTML loading
//! - [`validator`]: Validator fragment construction
//! - [`mood`]: Mood data fetch, chart configuration and mounting
//! - [`page`]: The document-ready hook running both initializers
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use moodjar::document::{Doctype, Document, Element};
//! use moodjar::validator::validator_markup;
//!
//! let doc = Document::new(Some(Doctype::html5()), Element::new("html"));
//! assert_eq!(validator_markup(&doc).unwrap(), "<!DOCTYPE html>\n<html></html>");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod mood;
pub mod page;
pub mod validator;

// Re-export top-level types for convenience
pub use config::{default_config_toml, Config, ConfigError, LoggingConfig, PageConfig};

pub use document::{Doctype, Document, DocumentError, Element, Node};

pub use error::{Error, Result};

pub use logging::init_logging;

pub use mood::{
    palette_for, ChartConfig, ChartHandle, ChartRegistry, ChartSurface, MoodChartRenderer,
    MoodChartTask, MoodDataClient, MoodDistribution, MoodError, MoodSource, PALETTE,
};

pub use page::{PageError, PageLoad, ReadyReport};

pub use validator::{
    doctype_declaration, populate_fragment_field, validator_markup, FieldOutcome, ValidatorTarget,
};
