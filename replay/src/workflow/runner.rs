use anyhow::Context;
use log::info;
use losscore::series::LossRound;
use losscore::{ChartBackend, LossChartPresenter};

pub struct ReplaySummary {
    pub rounds: usize,
    pub total_loss: Vec<f64>,
    pub station_loss: Vec<f64>,
}

pub struct Runner<B: ChartBackend> {
    presenter: LossChartPresenter<B>,
}

impl<B: ChartBackend> Runner<B> {
    pub fn new(presenter: LossChartPresenter<B>) -> Self {
        Self { presenter }
    }

    /// Feeds every round through the presenter in order, stopping at the
    /// first rendering failure.
    pub fn execute(&mut self, rounds: &[LossRound]) -> anyhow::Result<ReplaySummary> {
        for (index, round) in rounds.iter().enumerate() {
            self.presenter
                .update_loss(round)
                .with_context(|| format!("rendering round {}", index + 1))?;
            info!(
                "round {} -> {} stations, total loss {}",
                index + 1,
                round.len(),
                self.presenter.total_loss().last().copied().unwrap_or_default()
            );
        }

        Ok(ReplaySummary {
            rounds: self.presenter.update_count(),
            total_loss: self.presenter.total_loss().to_vec(),
            station_loss: self.presenter.station_loss().to_vec(),
        })
    }

    pub fn presenter(&self) -> &LossChartPresenter<B> {
        &self.presenter
    }
}
