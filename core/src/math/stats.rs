pub struct StatsHelper;

impl StatsHelper {
    /// Sum of all samples; an empty slice sums to zero.
    pub fn total(samples: &[f64]) -> f64 {
        samples.iter().sum()
    }

    /// Smallest and largest finite sample, if any.
    pub fn extent(samples: &[f64]) -> Option<(f64, f64)> {
        samples
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Value axis range for a chart. Zero is included when `begin_at_zero`
    /// is set and a flat range is widened so it never collapses.
    pub fn axis_range(samples: &[f64], begin_at_zero: bool) -> (f64, f64) {
        let (mut lo, mut hi) = Self::extent(samples).unwrap_or((0.0, 1.0));
        if begin_at_zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if (hi - lo).abs() < f64::EPSILON {
            hi = lo + 1.0;
        }
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_of_empty_sequence_is_zero() {
        assert_eq!(StatsHelper::total(&[]), 0.0);
        assert_eq!(StatsHelper::total(&[1.0, 2.0, 3.0]), 6.0);
    }

    #[test]
    fn extent_skips_non_finite_values() {
        assert_eq!(StatsHelper::extent(&[]), None);
        assert_eq!(
            StatsHelper::extent(&[3.0, f64::NAN, -1.0, 7.5]),
            Some((-1.0, 7.5))
        );
    }

    #[test]
    fn axis_range_starts_at_zero_when_requested() {
        assert_eq!(StatsHelper::axis_range(&[4.0, 9.0], true), (0.0, 9.0));
        assert_eq!(StatsHelper::axis_range(&[4.0, 9.0], false), (4.0, 9.0));
        assert_eq!(StatsHelper::axis_range(&[0.0], true), (0.0, 1.0));
    }
}
