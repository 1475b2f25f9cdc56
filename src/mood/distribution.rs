//! Mood distribution
//!
//! The `/mood-data` response: a JSON object mapping mood label to the number
//! of memories recorded with that mood. Entry order is the order the keys
//! appear in the response body.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use super::error::{MoodError, MoodResult};

/// Ordered mood label → count pairs
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct MoodDistribution {
    entries: Vec<(String, Number)>,
}

impl MoodDistribution {
    /// Decode a response body
    pub fn from_json(body: &[u8]) -> MoodResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Build from integer counts, keeping iteration order
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            entries: counts
                .into_iter()
                .map(|(label, count)| (label.into(), Number::from(count)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in order
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(label, _)| label.clone()).collect()
    }

    /// Counts in the same order as [`MoodDistribution::labels`]
    pub fn counts(&self) -> Vec<Number> {
        self.entries.iter().map(|(_, count)| count.clone()).collect()
    }

    /// Sum of all counts
    pub fn total(&self) -> f64 {
        self.entries
            .iter()
            .filter_map(|(_, count)| count.as_f64())
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Number)> {
        self.entries.iter().map(|(label, count)| (label.as_str(), count))
    }
}

impl TryFrom<Map<String, Value>> for MoodDistribution {
    type Error = MoodError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let entries = map
            .into_iter()
            .map(|(label, value)| match value {
                Value::Number(count) => Ok((label, count)),
                other => Err(MoodError::Decode(format!(
                    "count for '{}' is not a number: {}",
                    label, other
                ))),
            })
            .collect::<MoodResult<Vec<_>>>()?;

        Ok(Self { entries })
    }
}

impl Serialize for MoodDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}
