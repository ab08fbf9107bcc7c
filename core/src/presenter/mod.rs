pub mod binding;
pub mod lifecycle;
pub mod loss;

pub use binding::{
    ElementBinding, LabelPolicy, PresenterOptions, STATION_LOSS_ELEMENT, TOTAL_LOSS_ELEMENT,
};
pub use lifecycle::{SyncOutcome, WidgetState};
pub use loss::LossChartPresenter;
