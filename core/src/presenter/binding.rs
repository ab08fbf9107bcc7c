use crate::prelude::ChartDefaults;
use serde::{Deserialize, Serialize};

pub const TOTAL_LOSS_ELEMENT: &str = "totalLossChart";
pub const STATION_LOSS_ELEMENT: &str = "stationLossChart";

/// Host elements the two widgets are rendered into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ElementBinding {
    pub total_element: String,
    pub station_element: String,
}

impl Default for ElementBinding {
    fn default() -> Self {
        Self::new(TOTAL_LOSS_ELEMENT, STATION_LOSS_ELEMENT)
    }
}

impl ElementBinding {
    pub fn new(total_element: impl Into<String>, station_element: impl Into<String>) -> Self {
        Self {
            total_element: total_element.into(),
            station_element: station_element.into(),
        }
    }
}

/// What happens to the station chart's labels once the widget exists.
///
/// `Frozen` keeps the labels computed at creation even if the station count
/// changes later, so extra bars go unlabeled and missing ones leave stale
/// labels behind. `Refresh` recomputes them on every update.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
    #[default]
    Frozen,
    Refresh,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresenterOptions {
    pub label_policy: LabelPolicy,
    pub defaults: ChartDefaults,
}
