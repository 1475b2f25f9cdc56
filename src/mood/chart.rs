//! Chart configuration
//!
//! Serializes to the `{type, data: {labels, datasets}, options}` object the
//! charting library's constructor takes.

use serde::Serialize;
use serde_json::Number;

use super::distribution::MoodDistribution;

/// Segment colors, assigned to labels by position
pub const PALETTE: [&str; 6] = [
    "#f9c74f", // Saffron
    "#90be6d", // Pistachio
    "#f94144", // Red
    "#577590", // Slate blue
    "#f3722c", // Orange
    "#43aa8b", // Teal
];

/// Colors for `count` labels: the first `min(count, 6)` palette entries.
///
/// The palette is clipped, not cycled; labels past the sixth get no color
/// and the chart falls back to its default for them.
pub fn palette_for(count: usize) -> Vec<&'static str> {
    PALETTE.iter().take(count).copied().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

/// Full chart constructor argument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub data: Vec<Number>,
    pub background_color: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: LegendPosition,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: true,
            plugins: Plugins {
                legend: Legend {
                    position: LegendPosition::Bottom,
                },
            },
        }
    }
}

impl ChartConfig {
    /// Doughnut chart of a mood distribution, one dataset, legend at the bottom
    pub fn doughnut(distribution: &MoodDistribution) -> Self {
        let labels = distribution.labels();
        let background_color = palette_for(labels.len());

        Self {
            kind: ChartKind::Doughnut,
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    data: distribution.counts(),
                    background_color,
                }],
            },
            options: ChartOptions::default(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// The first dataset; doughnut charts built here always have one
    pub fn dataset(&self) -> Option<&Dataset> {
        self.data.datasets.first()
    }
}
