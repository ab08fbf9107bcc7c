use crate::prelude::{ChartError, ChartResult, ChartSpec, WidgetHandle};
use std::collections::BTreeMap;

/// Current state of every widget a backend hosts, keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: BTreeMap<String, ChartSpec>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `spec` to its element. One widget per element.
    pub fn insert(&mut self, spec: &ChartSpec) -> ChartResult<WidgetHandle> {
        if self.widgets.contains_key(&spec.element) {
            return Err(ChartError::ElementInUse(spec.element.clone()));
        }
        self.widgets.insert(spec.element.clone(), spec.clone());
        Ok(WidgetHandle::new(spec.element.clone()))
    }

    pub fn get(&self, element: &str) -> Option<&ChartSpec> {
        self.widgets.get(element)
    }

    pub fn resolve(&self, handle: &WidgetHandle) -> ChartResult<&ChartSpec> {
        self.widgets
            .get(handle.element())
            .ok_or_else(|| ChartError::UnknownWidget(handle.element().to_string()))
    }

    fn resolve_mut(&mut self, handle: &WidgetHandle) -> ChartResult<&mut ChartSpec> {
        self.widgets
            .get_mut(handle.element())
            .ok_or_else(|| ChartError::UnknownWidget(handle.element().to_string()))
    }

    pub fn set_labels(&mut self, handle: &WidgetHandle, labels: &[String]) -> ChartResult<()> {
        self.resolve_mut(handle)?.labels = labels.to_vec();
        Ok(())
    }

    pub fn set_data(&mut self, handle: &WidgetHandle, data: &[f64]) -> ChartResult<()> {
        self.resolve_mut(handle)?.data = data.to_vec();
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartSpec> {
        self.widgets.values()
    }
}
