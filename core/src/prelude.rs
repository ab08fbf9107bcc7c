use serde::{Deserialize, Serialize};

/// Chart flavours a backend must be able to host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// Presentation defaults shared by every chart a presenter creates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartDefaults {
    pub aspect_ratio: f32,
    pub legend_display: bool,
    pub title_display: bool,
    pub title_font_size: u32,
    pub primary_color: String,
    pub text_color: String,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.3,
            legend_display: false,
            title_display: true,
            title_font_size: 20,
            primary_color: "#0d6efd".into(),
            text_color: "#f8f9fa".into(),
        }
    }
}

impl ChartDefaults {
    pub fn primary_rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.primary_color).unwrap_or((13, 110, 253))
    }

    pub fn text_rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.text_color).unwrap_or((248, 249, 250))
    }
}

/// Parses `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Full description of a chart widget, handed to a backend on creation and
/// kept current by backends that retain state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub element: String,
    pub kind: ChartKind,
    pub title: String,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub begin_at_zero: bool,
    pub defaults: ChartDefaults,
}

/// Handle to a widget bound to a host element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetHandle {
    element: String,
}

impl WidgetHandle {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
        }
    }

    pub fn element(&self) -> &str {
        &self.element
    }
}

/// Common error type for chart backends.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("element already hosts a chart: {0}")]
    ElementInUse(String),
    #[error("unknown widget: {0}")]
    UnknownWidget(String),
    #[error("render failure: {0}")]
    Render(String),
}

pub type ChartResult<T> = Result<T, ChartError>;

/// Rendering seam between the presenter and whatever draws the charts.
pub trait ChartBackend {
    type Handle;

    fn create(&mut self, spec: &ChartSpec) -> ChartResult<Self::Handle>;
    fn set_labels(&mut self, handle: &Self::Handle, labels: &[String]) -> ChartResult<()>;
    fn set_data(&mut self, handle: &Self::Handle, data: &[f64]) -> ChartResult<()>;
    fn redraw(&mut self, handle: &Self::Handle) -> ChartResult<()>;
}
