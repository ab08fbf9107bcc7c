use crate::page::registry::WidgetRegistry;
use crate::prelude::{ChartBackend, ChartError, ChartResult, ChartSpec, WidgetHandle};
use serde::Serialize;
use std::collections::BTreeSet;

/// Something that happened to a widget hosted by a [`MemoryPage`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChartEvent {
    Created { element: String, spec: ChartSpec },
    LabelsUpdated { element: String, labels: Vec<String> },
    DataUpdated { element: String, data: Vec<f64> },
    Redrawn { element: String },
}

/// Headless stand-in for a page: a fixed set of element ids that can each
/// host one chart, plus a log of everything done to them.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: BTreeSet<String>,
    registry: WidgetRegistry,
    events: Vec<ChartEvent>,
}

impl MemoryPage {
    pub fn with_elements<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Page exposing the two standard element ids.
    pub fn standard() -> Self {
        Self::with_elements([
            crate::presenter::TOTAL_LOSS_ELEMENT,
            crate::presenter::STATION_LOSS_ELEMENT,
        ])
    }

    pub fn has_element(&self, element: &str) -> bool {
        self.elements.contains(element)
    }

    pub fn add_element(&mut self, element: impl Into<String>) {
        self.elements.insert(element.into());
    }

    pub fn widget(&self, element: &str) -> Option<&ChartSpec> {
        self.registry.get(element)
    }

    pub fn widgets(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn events(&self) -> &[ChartEvent] {
        &self.events
    }

    pub fn creation_count(&self, element: &str) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, ChartEvent::Created { element: e, .. } if e == element))
            .count()
    }

    pub fn redraw_count(&self, element: &str) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, ChartEvent::Redrawn { element: e } if e == element))
            .count()
    }

    /// Current widgets as JSON, keyed by element id.
    pub fn snapshot_json(&self) -> serde_json::Value {
        let widgets = self
            .registry
            .iter()
            .map(|spec| (spec.element.clone(), serde_json::json!(spec)))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(widgets)
    }
}

impl ChartBackend for MemoryPage {
    type Handle = WidgetHandle;

    fn create(&mut self, spec: &ChartSpec) -> ChartResult<WidgetHandle> {
        if !self.has_element(&spec.element) {
            return Err(ChartError::MissingElement(spec.element.clone()));
        }
        let handle = self.registry.insert(spec)?;
        self.events.push(ChartEvent::Created {
            element: spec.element.clone(),
            spec: spec.clone(),
        });
        Ok(handle)
    }

    fn set_labels(&mut self, handle: &WidgetHandle, labels: &[String]) -> ChartResult<()> {
        self.registry.set_labels(handle, labels)?;
        self.events.push(ChartEvent::LabelsUpdated {
            element: handle.element().to_string(),
            labels: labels.to_vec(),
        });
        Ok(())
    }

    fn set_data(&mut self, handle: &WidgetHandle, data: &[f64]) -> ChartResult<()> {
        self.registry.set_data(handle, data)?;
        self.events.push(ChartEvent::DataUpdated {
            element: handle.element().to_string(),
            data: data.to_vec(),
        });
        Ok(())
    }

    fn redraw(&mut self, handle: &WidgetHandle) -> ChartResult<()> {
        self.registry.resolve(handle)?;
        self.events.push(ChartEvent::Redrawn {
            element: handle.element().to_string(),
        });
        Ok(())
    }
}
