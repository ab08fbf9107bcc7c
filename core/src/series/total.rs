/// Running total loss, one entry per update plus the leading seed.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalLossSeries {
    values: Vec<f64>,
}

impl TotalLossSeries {
    pub const SEED: f64 = 0.0;

    pub fn new() -> Self {
        Self {
            values: vec![Self::SEED],
        }
    }

    pub fn push(&mut self, total: f64) {
        self.values.push(total);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true; the seed entry is always present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Step indices `0..len` rendered as axis labels.
    pub fn step_labels(&self) -> Vec<String> {
        (0..self.values.len()).map(|i| i.to_string()).collect()
    }
}

impl Default for TotalLossSeries {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_starts_with_seed() {
        let series = TotalLossSeries::new();
        assert_eq!(series.values(), &[0.0]);
        assert_eq!(series.step_labels(), vec!["0"]);
        assert!(!series.is_empty());
    }

    #[test]
    fn pushes_extend_labels() {
        let mut series = TotalLossSeries::new();
        series.push(6.0);
        series.push(6.0);
        assert_eq!(series.values(), &[0.0, 6.0, 6.0]);
        assert_eq!(series.step_labels(), vec!["0", "1", "2"]);
    }
}
