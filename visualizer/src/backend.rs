use losscore::prelude::{ChartBackend, ChartError, ChartResult, ChartSpec, WidgetHandle};
use losscore::WidgetRegistry;
use std::collections::BTreeSet;

/// Keeps the latest chart description for each canvas slot in the window.
#[derive(Debug, Default)]
pub struct CanvasBackend {
    slots: BTreeSet<String>,
    registry: WidgetRegistry,
}

impl CanvasBackend {
    pub fn with_slots<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slots: slots.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn chart(&self, slot: &str) -> Option<&ChartSpec> {
        self.registry.get(slot)
    }
}

impl ChartBackend for CanvasBackend {
    type Handle = WidgetHandle;

    fn create(&mut self, spec: &ChartSpec) -> ChartResult<WidgetHandle> {
        if !self.slots.contains(&spec.element) {
            return Err(ChartError::MissingElement(spec.element.clone()));
        }
        self.registry.insert(spec)
    }

    fn set_labels(&mut self, handle: &WidgetHandle, labels: &[String]) -> ChartResult<()> {
        self.registry.set_labels(handle, labels)
    }

    fn set_data(&mut self, handle: &WidgetHandle, data: &[f64]) -> ChartResult<()> {
        self.registry.set_data(handle, data)
    }

    // iced redraws on the next view.
    fn redraw(&mut self, handle: &WidgetHandle) -> ChartResult<()> {
        self.registry.resolve(handle).map(|_| ())
    }
}
