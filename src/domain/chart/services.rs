use super::value_objects::{LinearScale, Position};
use crate::domain::census::{AxisField, CensusRecord, Dataset};
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::logging::LogComponent;
use crate::log_warn;

/// Domain lower bound is the column minimum times this factor.
pub const DOMAIN_LOWER_FACTOR: f64 = 0.8;
/// Domain upper bound is the column maximum times this factor.
pub const DOMAIN_UPPER_FACTOR: f64 = 1.2;
/// Half-width added around a domain that collapsed to a single value.
pub const DEGENERATE_DOMAIN_PADDING: f64 = 1.0;

/// Scale Builder: padded data bounds of one field mapped onto a pixel range.
pub struct ScaleBuilder;

impl ScaleBuilder {
    pub fn build<F: AxisField>(dataset: &Dataset, field: F, range: (f64, f64)) -> ChartResult<LinearScale> {
        let (min, max) = dataset.extent(field.numeric()).ok_or(ChartError::EmptyDataset)?;
        if dataset.records().iter().any(|r| !field.value(r).is_finite()) {
            return Err(ChartError::DataLoadFailure(format!("{} has a non-finite value", field)));
        }
        let domain = Self::padded_domain(min, max);
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::DataLoadFailure(format!("{} domain overflows: {:?}", field, domain)));
        }
        if domain.0 == domain.1 {
            log_warn!(
                LogComponent::Domain("ScaleBuilder"),
                "degenerate {} domain at {}, widening by {}",
                field,
                domain.0,
                DEGENERATE_DOMAIN_PADDING
            );
            return Ok(LinearScale::new(
                (domain.0 - DEGENERATE_DOMAIN_PADDING, domain.1 + DEGENERATE_DOMAIN_PADDING),
                range,
            ));
        }
        Ok(LinearScale::new(domain, range))
    }

    /// `[min × 0.8, max × 1.2]`
    pub fn padded_domain(min: f64, max: f64) -> (f64, f64) {
        (min * DOMAIN_LOWER_FACTOR, max * DOMAIN_UPPER_FACTOR)
    }
}

/// Pixel position of a record under the current scales and fields.
pub fn marker_position<X: AxisField, Y: AxisField>(
    record: &CensusRecord,
    x_scale: &LinearScale,
    x: X,
    y_scale: &LinearScale,
    y: Y,
) -> Position {
    Position::new(x_scale.apply(x.value(record)), y_scale.apply(y.value(record)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::census::{XField, YField};

    fn record(poverty: f64, healthcare: f64) -> CensusRecord {
        CensusRecord {
            state: "Test".into(),
            abbr: "TT".into(),
            poverty,
            income: 0.0,
            age: 0.0,
            healthcare,
            obesity: 0.0,
            smokes: 0.0,
        }
    }

    #[test]
    fn domain_is_padded_by_fixed_factors() {
        let data = Dataset::new(vec![record(10.0, 1.0), record(20.0, 2.0)]);
        let scale = ScaleBuilder::build(&data, XField::Poverty, (0.0, 100.0)).expect("non-empty");
        let (lo, hi) = scale.domain();
        assert!((lo - 8.0).abs() < 1e-9);
        assert!((hi - 24.0).abs() < 1e-9);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let result = ScaleBuilder::build(&Dataset::default(), YField::Obesity, (100.0, 0.0));
        assert_eq!(result, Err(ChartError::EmptyDataset));
    }

    #[test]
    fn all_zero_column_gets_a_usable_domain() {
        let data = Dataset::new(vec![record(0.0, 3.0), record(0.0, 4.0)]);
        let scale = ScaleBuilder::build(&data, XField::Poverty, (0.0, 100.0)).expect("non-empty");
        assert_eq!(scale.domain(), (-1.0, 1.0));
        assert!(scale.apply(0.0).is_finite());
        assert_eq!(scale.apply(0.0), 50.0);
    }

    #[test]
    fn non_finite_values_never_reach_a_scale() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let data = Dataset::new(vec![record(bad, 1.0), record(10.0, 2.0)]);
            let result = ScaleBuilder::build(&data, XField::Poverty, (0.0, 100.0));
            assert!(matches!(result, Err(ChartError::DataLoadFailure(_))), "{bad} accepted");
        }
        let data = Dataset::new(vec![record(f64::MAX, 1.0)]);
        assert!(ScaleBuilder::build(&data, XField::Poverty, (0.0, 100.0)).is_err());
    }

    #[test]
    fn equal_nonzero_bounds_are_padded_apart() {
        let data = Dataset::new(vec![record(5.0, 3.0)]);
        let scale = ScaleBuilder::build(&data, XField::Poverty, (0.0, 100.0)).expect("non-empty");
        assert!(scale.domain().0 < 5.0 && scale.domain().1 > 5.0);
    }
}
