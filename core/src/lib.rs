//! Loss accumulation and chart presentation core.
//!
//! A [`LossChartPresenter`] keeps a running total-loss series and the latest
//! per-station loss snapshot, and keeps two chart widgets in sync with them
//! through a pluggable [`ChartBackend`].

pub mod math;
pub mod page;
pub mod prelude;
pub mod presenter;
pub mod series;
pub mod telemetry;

pub use page::{ChartEvent, MemoryPage, WidgetRegistry};
pub use prelude::{ChartBackend, ChartError, ChartKind, ChartResult, ChartSpec, WidgetHandle};
pub use presenter::{ElementBinding, LabelPolicy, LossChartPresenter, PresenterOptions};
