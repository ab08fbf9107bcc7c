pub mod rounds;
pub mod station;
pub mod total;

pub use rounds::{parse_rounds, LossRound, RoundsError};
pub use station::StationLossSnapshot;
pub use total::TotalLossSeries;
