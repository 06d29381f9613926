use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SampleState {
    label: String,
    visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct DimensionState {
    samples: Vec<SampleState>,
    selected: Option<usize>,
}

/// Snapshot of all per-dimension sample state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CubeState {
    dimensions: IndexMap<String, DimensionState>,
}

/// The data-state container of one chart: ordered dimensions of ordered,
/// labeled samples, each with an independent visibility flag, plus at most
/// one selected sample per dimension.
///
/// The handle is cheap to clone; interaction callbacks capture clones and
/// mutate the shared state from the host's drawing context. Sample indices
/// are stable for the lifetime of a render pass.
#[derive(Debug, Clone, Default)]
pub struct Cube {
    state: Arc<RwLock<CubeState>>,
}

impl Cube {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a dimension and returns its index. An existing dimension of
    /// the same name is replaced in place instead.
    pub fn add_dimension(
        &self,
        name: impl Into<String>,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> usize {
        let samples = labels
            .into_iter()
            .map(|label| SampleState {
                label: label.into(),
                visible: true,
            })
            .collect();
        let mut state = self.state.write();
        let (index, _) = state.dimensions.insert_full(
            name.into(),
            DimensionState {
                samples,
                selected: None,
            },
        );
        index
    }

    /// Rebuilds a dimension's sample list from fresh labels, preserving
    /// visibility for labels that survive. The selection is kept only if
    /// its sample still exists under the same label.
    pub fn ensure_dimension(&self, name: impl Into<String>, labels: Vec<String>) -> usize {
        let name = name.into();
        let mut state = self.state.write();
        let previous = state.dimensions.get(&name).cloned();

        let selected_label = previous.as_ref().and_then(|dimension| {
            dimension
                .selected
                .and_then(|sample| dimension.samples.get(sample))
                .map(|sample| sample.label.clone())
        });

        let samples: Vec<SampleState> = labels
            .into_iter()
            .map(|label| {
                let visible = previous
                    .as_ref()
                    .and_then(|dimension| {
                        dimension
                            .samples
                            .iter()
                            .find(|sample| sample.label == label)
                    })
                    .is_none_or(|sample| sample.visible);
                SampleState { label, visible }
            })
            .collect();
        let selected = selected_label
            .and_then(|label| samples.iter().position(|sample| sample.label == label));

        let (index, _) = state
            .dimensions
            .insert_full(name, DimensionState { samples, selected });
        index
    }

    #[must_use]
    pub fn dimension_count(&self) -> usize {
        self.state.read().dimensions.len()
    }

    #[must_use]
    pub fn dimension_index(&self, name: &str) -> Option<usize> {
        self.state.read().dimensions.get_index_of(name)
    }

    #[must_use]
    pub fn sample_count(&self, dimension: usize) -> usize {
        self.state
            .read()
            .dimensions
            .get_index(dimension)
            .map_or(0, |(_, state)| state.samples.len())
    }

    /// Label of one sample.
    pub fn sample(&self, dimension: usize, index: usize) -> ChartResult<String> {
        let state = self.state.read();
        let (_, dimension_state) = state
            .dimensions
            .get_index(dimension)
            .ok_or_else(|| unknown_dimension(dimension))?;
        dimension_state
            .samples
            .get(index)
            .map(|sample| sample.label.clone())
            .ok_or_else(|| unknown_sample(dimension, index))
    }

    /// Unknown indices read as visible, matching the default for fresh
    /// samples.
    #[must_use]
    pub fn is_visible(&self, dimension: usize, index: usize) -> bool {
        self.state
            .read()
            .dimensions
            .get_index(dimension)
            .and_then(|(_, state)| state.samples.get(index))
            .is_none_or(|sample| sample.visible)
    }

    pub fn set_visible(&self, dimension: usize, index: usize, visible: bool) -> ChartResult<()> {
        let mut state = self.state.write();
        let (_, dimension_state) = state
            .dimensions
            .get_index_mut(dimension)
            .ok_or_else(|| unknown_dimension(dimension))?;
        let sample = dimension_state
            .samples
            .get_mut(index)
            .ok_or_else(|| unknown_sample(dimension, index))?;
        sample.visible = visible;
        Ok(())
    }

    /// Flips one sample's visibility and returns the new flag.
    pub fn toggle_visible(&self, dimension: usize, index: usize) -> ChartResult<bool> {
        let mut state = self.state.write();
        let (_, dimension_state) = state
            .dimensions
            .get_index_mut(dimension)
            .ok_or_else(|| unknown_dimension(dimension))?;
        let sample = dimension_state
            .samples
            .get_mut(index)
            .ok_or_else(|| unknown_sample(dimension, index))?;
        sample.visible = !sample.visible;
        Ok(sample.visible)
    }

    #[must_use]
    pub fn selected_sample(&self, dimension: usize) -> Option<usize> {
        self.state
            .read()
            .dimensions
            .get_index(dimension)
            .and_then(|(_, state)| state.selected)
    }

    /// Selects one sample (or clears the selection). Selecting a sample
    /// replaces any previous selection of the same dimension, so at most
    /// one sample per dimension is ever selected.
    pub fn set_selected_sample(&self, dimension: usize, selected: Option<usize>) -> ChartResult<()> {
        let mut state = self.state.write();
        let (_, dimension_state) = state
            .dimensions
            .get_index_mut(dimension)
            .ok_or_else(|| unknown_dimension(dimension))?;
        if let Some(index) = selected {
            if index >= dimension_state.samples.len() {
                return Err(unknown_sample(dimension, index));
            }
        }
        dimension_state.selected = selected;
        Ok(())
    }

    /// Clones the full state, e.g. for inspection in tests.
    #[must_use]
    pub fn snapshot(&self) -> CubeState {
        self.state.read().clone()
    }
}

fn unknown_dimension(dimension: usize) -> ChartError {
    ChartError::InvalidData(format!("unknown dimension index {dimension}"))
}

fn unknown_sample(dimension: usize, index: usize) -> ChartError {
    ChartError::InvalidData(format!(
        "unknown sample index {index} in dimension {dimension}"
    ))
}
