/// Latest per-station loss, replaced wholesale on every update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationLossSnapshot {
    values: Vec<f64>,
}

impl StationLossSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `losses`; the caller keeps ownership of its buffer.
    pub fn replace(&mut self, losses: &[f64]) {
        self.values.clear();
        self.values.extend_from_slice(losses);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn station_labels(&self) -> Vec<String> {
        station_labels(self.values.len())
    }
}

/// `"Station 1"` through `"Station {count}"`.
pub fn station_labels(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Station {i}")).collect()
}
