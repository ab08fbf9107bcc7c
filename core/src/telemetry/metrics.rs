/// Counters kept by a presenter across its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderMetrics {
    updates: usize,
    creations: usize,
    redraws: usize,
    errors: usize,
}

impl RenderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    pub fn record_creation(&mut self) {
        self.creations += 1;
    }

    pub fn record_redraw(&mut self) {
        self.redraws += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn creations(&self) -> usize {
        self.creations
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }

    pub fn errors(&self) -> usize {
        self.errors
    }
}
