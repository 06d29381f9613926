use std::sync::Arc;

use smallvec::SmallVec;

use crate::core::scale::LinearScale;
use crate::error::{ChartError, ChartResult};

/// One series' contribution to an axis domain.
///
/// Values are shared so a content layer can hand the same buffer to an axis
/// on every rebuild without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    name: String,
    values: Arc<[f64]>,
}

impl Measure {
    #[must_use]
    pub fn new(name: impl Into<String>, values: impl Into<Arc<[f64]>>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// A value axis fed by the measures of the content layers bound to it.
///
/// The measure set is rebuilt wholesale (cleared, then repopulated) on every
/// structure pass; it is never patched incrementally, so a removed layer can
/// never leave a stale measure behind.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    title: Option<String>,
    title_rotation: f64,
    measures: SmallVec<[Measure; 2]>,
}

impl Default for ValueAxis {
    fn default() -> Self {
        Self {
            title: None,
            title_rotation: 0.0,
            measures: SmallVec::new(),
        }
    }
}

impl ValueAxis {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Title rotation in degrees.
    pub fn set_title_rotation(&mut self, degrees: f64) {
        self.title_rotation = degrees;
    }

    #[must_use]
    pub fn title_rotation(&self) -> f64 {
        self.title_rotation
    }

    pub fn clear_measures(&mut self) {
        self.measures.clear();
    }

    pub fn add_measure(&mut self, measure: Measure) {
        self.measures.push(measure);
    }

    #[must_use]
    pub fn measure_count(&self) -> usize {
        self.measures.len()
    }

    #[must_use]
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    /// Min/max over all finite values of all measures.
    ///
    /// Aggregation is order-independent, so the registration order of the
    /// content layers cannot change the derived scale.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for measure in &self.measures {
            for value in measure.values().iter().copied().filter(|v| v.is_finite()) {
                bounds = Some(match bounds {
                    None => (value, value),
                    Some((min, max)) => (min.min(value), max.max(value)),
                });
            }
        }
        bounds
    }

    /// Derives the domain-to-pixel scale from the current measure set.
    ///
    /// A single-valued domain is widened symmetrically so the scale stays
    /// invertible.
    pub fn scale(&self) -> ChartResult<LinearScale> {
        let (min, max) = self.range().ok_or_else(|| {
            ChartError::InvalidData("axis has no finite measure values".to_owned())
        })?;

        if min == max {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.5 };
            return LinearScale::new(min - pad, max + pad);
        }
        LinearScale::new(min, max)
    }
}
