use crate::error::{ChartError, ChartResult};

/// Linear domain-to-pixel mapping over a one-dimensional extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-empty".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, extent: f64) -> ChartResult<f64> {
        validate_extent(extent)?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * extent)
    }

    pub fn pixel_to_domain(self, pixel: f64, extent: f64) -> ChartResult<f64> {
        validate_extent(extent)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        Ok(self.domain_start + (pixel / extent) * span)
    }
}

fn validate_extent(extent: f64) -> ChartResult<()> {
    if !extent.is_finite() || extent <= 0.0 {
        return Err(ChartError::InvalidData(
            "pixel extent must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn round_trip_preserves_value() {
        let scale = LinearScale::new(-10.0, 30.0).expect("valid scale");
        let px = scale.domain_to_pixel(5.0, 400.0).expect("to pixel");
        let value = scale.pixel_to_domain(px, 400.0).expect("from pixel");
        assert!((value - 5.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_empty_domain() {
        assert!(LinearScale::new(2.0, 2.0).is_err());
        assert!(LinearScale::new(f64::NAN, 1.0).is_err());
    }
}
