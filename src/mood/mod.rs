//! Mood Chart
//!
//! Fetches the per-category mood counts and turns them into a doughnut chart:
//!
//! - **distribution**: the decoded label → count mapping, in response order
//! - **chart**: the chart configuration handed to the charting surface
//! - **client**: the `MoodSource` seam and its HTTP implementation
//! - **renderer**: cancellable fetch task, chart surfaces and the renderer
//! - **error**: Error types
//!
//! # Flow
//!
//! ```text
//!   GET /mood-data → MoodDistribution → ChartConfig → ChartSurface::mount
//! ```
//!
//! Any failure before the mount leaves the surface untouched.

pub mod chart;
pub mod client;
pub mod distribution;
pub mod error;
pub mod renderer;

pub use chart::{palette_for, ChartConfig, ChartKind, LegendPosition, PALETTE};
pub use client::{MoodDataClient, MoodSource};
pub use distribution::MoodDistribution;
pub use error::{MoodError, MoodResult};
pub use renderer::{ChartHandle, ChartRegistry, ChartSurface, MoodChartRenderer, MoodChartTask};
