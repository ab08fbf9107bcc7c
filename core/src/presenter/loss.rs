use crate::math::stats::StatsHelper;
use crate::prelude::{ChartBackend, ChartDefaults, ChartKind, ChartResult, ChartSpec};
use crate::presenter::binding::{ElementBinding, LabelPolicy, PresenterOptions};
use crate::presenter::lifecycle::{SyncOutcome, WidgetState};
use crate::series::{StationLossSnapshot, TotalLossSeries};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::RenderMetrics;

pub const TOTAL_LOSS_TITLE: &str = "Total Loss Over Time";
pub const TOTAL_LOSS_DATASET: &str = "Total Loss";
pub const STATION_LOSS_TITLE: &str = "Loss per Station";
pub const STATION_LOSS_DATASET: &str = "Loss per Station";

/// Keeps a total-loss line chart and a per-station bar chart in sync with
/// the loss rounds fed through [`LossChartPresenter::update_loss`].
pub struct LossChartPresenter<B: ChartBackend> {
    backend: B,
    bindings: ElementBinding,
    options: PresenterOptions,
    total_loss: TotalLossSeries,
    station_loss: StationLossSnapshot,
    total_widget: WidgetState<B::Handle>,
    station_widget: WidgetState<B::Handle>,
    metrics: RenderMetrics,
    logger: LogManager,
}

impl<B: ChartBackend> LossChartPresenter<B> {
    pub fn new(backend: B, bindings: ElementBinding) -> Self {
        Self::with_options(backend, bindings, PresenterOptions::default())
    }

    pub fn with_options(backend: B, bindings: ElementBinding, options: PresenterOptions) -> Self {
        Self {
            backend,
            bindings,
            options,
            total_loss: TotalLossSeries::new(),
            station_loss: StationLossSnapshot::new(),
            total_widget: WidgetState::Uninitialized,
            station_widget: WidgetState::Uninitialized,
            metrics: RenderMetrics::new(),
            logger: LogManager::new("presenter"),
        }
    }

    /// Folds one round of per-station losses into both series, then creates
    /// or refreshes the two widgets.
    ///
    /// The series are updated before the backend is touched, so they reflect
    /// this round even when rendering fails. A widget whose creation failed
    /// stays unbound and creation is retried on the next round.
    pub fn update_loss(&mut self, new_loss_per_station: &[f64]) -> ChartResult<()> {
        let new_total_loss = StatsHelper::total(new_loss_per_station);
        self.total_loss.push(new_total_loss);
        self.station_loss.replace(new_loss_per_station);
        self.metrics.record_update();

        self.logger.series("totalLoss", self.total_loss.values());
        self.logger.series("lossPerStation", self.station_loss.values());

        if let Err(err) = self.sync_widgets() {
            self.metrics.record_error();
            self.logger.warn(&format!(
                "chart sync failed after round {}: {}",
                self.update_count(),
                err
            ));
            return Err(err);
        }
        Ok(())
    }

    fn sync_widgets(&mut self) -> ChartResult<()> {
        let total = &self.total_loss;
        let total_element = &self.bindings.total_element;
        let defaults = &self.options.defaults;
        let outcome = self.total_widget.sync(
            &mut self.backend,
            || total_loss_spec(total_element, defaults, total),
            |backend, handle| {
                backend.set_labels(handle, &total.step_labels())?;
                backend.set_data(handle, total.values())
            },
        )?;
        self.record_outcome(outcome, TOTAL_LOSS_TITLE);

        let stations = &self.station_loss;
        let station_element = &self.bindings.station_element;
        let defaults = &self.options.defaults;
        let refresh_labels = self.options.label_policy == LabelPolicy::Refresh;
        let outcome = self.station_widget.sync(
            &mut self.backend,
            || station_loss_spec(station_element, defaults, stations),
            |backend, handle| {
                if refresh_labels {
                    backend.set_labels(handle, &stations.station_labels())?;
                }
                backend.set_data(handle, stations.values())
            },
        )?;
        self.record_outcome(outcome, STATION_LOSS_TITLE);

        Ok(())
    }

    fn record_outcome(&mut self, outcome: SyncOutcome, title: &str) {
        match outcome {
            SyncOutcome::Created => {
                self.metrics.record_creation();
                self.logger.record(&format!("created chart '{}'", title));
            }
            SyncOutcome::Updated => self.metrics.record_redraw(),
        }
    }

    pub fn total_loss(&self) -> &[f64] {
        self.total_loss.values()
    }

    pub fn station_loss(&self) -> &[f64] {
        self.station_loss.values()
    }

    /// Rounds fed so far; the total series holds one more entry than this.
    pub fn update_count(&self) -> usize {
        self.total_loss.len() - 1
    }

    pub fn is_total_bound(&self) -> bool {
        self.total_widget.is_bound()
    }

    pub fn is_station_bound(&self) -> bool {
        self.station_widget.is_bound()
    }

    pub fn bindings(&self) -> &ElementBinding {
        &self.bindings
    }

    pub fn options(&self) -> &PresenterOptions {
        &self.options
    }

    pub fn metrics(&self) -> RenderMetrics {
        self.metrics
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

fn total_loss_spec(element: &str, defaults: &ChartDefaults, series: &TotalLossSeries) -> ChartSpec {
    ChartSpec {
        element: element.to_string(),
        kind: ChartKind::Line,
        title: TOTAL_LOSS_TITLE.into(),
        dataset_label: TOTAL_LOSS_DATASET.into(),
        labels: series.step_labels(),
        data: series.values().to_vec(),
        begin_at_zero: true,
        defaults: defaults.clone(),
    }
}

fn station_loss_spec(
    element: &str,
    defaults: &ChartDefaults,
    snapshot: &StationLossSnapshot,
) -> ChartSpec {
    ChartSpec {
        element: element.to_string(),
        kind: ChartKind::Bar,
        title: STATION_LOSS_TITLE.into(),
        dataset_label: STATION_LOSS_DATASET.into(),
        labels: snapshot.station_labels(),
        data: snapshot.values().to_vec(),
        begin_at_zero: false,
        defaults: defaults.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ChartEvent, MemoryPage};
    use crate::prelude::ChartError;

    fn presenter() -> LossChartPresenter<MemoryPage> {
        LossChartPresenter::new(MemoryPage::standard(), ElementBinding::default())
    }

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn first_update_creates_both_widgets() {
        let mut presenter = presenter();
        presenter.update_loss(&[1.0, 2.0, 3.0]).unwrap();

        assert_eq!(presenter.total_loss(), &[0.0, 6.0]);
        assert_eq!(presenter.station_loss(), &[1.0, 2.0, 3.0]);

        let page = presenter.backend();
        let total = page.widget("totalLossChart").unwrap();
        assert_eq!(total.kind, ChartKind::Line);
        assert_eq!(total.title, "Total Loss Over Time");
        assert_eq!(total.dataset_label, "Total Loss");
        assert!(total.begin_at_zero);
        assert_eq!(total.labels, labels(&["0", "1"]));
        assert_eq!(total.data, vec![0.0, 6.0]);

        let station = page.widget("stationLossChart").unwrap();
        assert_eq!(station.kind, ChartKind::Bar);
        assert_eq!(station.title, "Loss per Station");
        assert_eq!(
            station.labels,
            labels(&["Station 1", "Station 2", "Station 3"])
        );
        assert_eq!(station.data, vec![1.0, 2.0, 3.0]);
        assert_eq!(page.redraw_count("totalLossChart"), 0);
    }

    #[test]
    fn second_update_refreshes_in_place() {
        let mut presenter = presenter();
        presenter.update_loss(&[1.0, 2.0, 3.0]).unwrap();
        presenter.update_loss(&[4.0, 5.0, 6.0]).unwrap();

        assert_eq!(presenter.total_loss(), &[0.0, 6.0, 15.0]);
        assert_eq!(presenter.station_loss(), &[4.0, 5.0, 6.0]);

        let page = presenter.backend();
        assert_eq!(page.creation_count("totalLossChart"), 1);
        assert_eq!(page.creation_count("stationLossChart"), 1);
        assert_eq!(page.redraw_count("totalLossChart"), 1);
        assert_eq!(page.redraw_count("stationLossChart"), 1);
        assert_eq!(
            page.widget("totalLossChart").unwrap().labels,
            labels(&["0", "1", "2"])
        );
        assert_eq!(
            page.widget("stationLossChart").unwrap().data,
            vec![4.0, 5.0, 6.0]
        );

        let metrics = presenter.metrics();
        assert_eq!(metrics.updates(), 2);
        assert_eq!(metrics.creations(), 2);
        assert_eq!(metrics.redraws(), 2);
    }

    #[test]
    fn total_length_tracks_call_count() {
        let mut presenter = presenter();
        let rounds: [&[f64]; 4] = [&[1.0], &[], &[2.5, 2.5], &[-1.0, 3.0]];
        for (i, round) in rounds.iter().enumerate() {
            presenter.update_loss(round).unwrap();
            assert_eq!(presenter.total_loss().len(), i + 2);
            assert_eq!(presenter.total_loss()[i + 1], round.iter().sum::<f64>());
            assert_eq!(presenter.station_loss(), *round);
        }
        assert_eq!(presenter.update_count(), 4);
    }

    #[test]
    fn empty_round_appends_zero() {
        let mut presenter = presenter();
        presenter.update_loss(&[7.0]).unwrap();
        presenter.update_loss(&[]).unwrap();
        assert_eq!(presenter.total_loss(), &[0.0, 7.0, 0.0]);
        assert!(presenter.station_loss().is_empty());
    }

    #[test]
    fn identical_rounds_append_twice() {
        let mut presenter = presenter();
        presenter.update_loss(&[2.0, 2.0]).unwrap();
        presenter.update_loss(&[2.0, 2.0]).unwrap();
        assert_eq!(presenter.total_loss(), &[0.0, 4.0, 4.0]);
    }

    #[test]
    fn frozen_policy_keeps_creation_labels() {
        let mut presenter = presenter();
        presenter.update_loss(&[1.0, 2.0]).unwrap();
        presenter.update_loss(&[1.0, 2.0, 3.0]).unwrap();

        let station = presenter.backend().widget("stationLossChart").unwrap();
        assert_eq!(station.labels, labels(&["Station 1", "Station 2"]));
        assert_eq!(station.data, vec![1.0, 2.0, 3.0]);
        assert!(!presenter
            .backend()
            .events()
            .iter()
            .any(|event| matches!(
                event,
                ChartEvent::LabelsUpdated { element, .. } if element == "stationLossChart"
            )));
    }

    #[test]
    fn refresh_policy_recomputes_labels() {
        let options = PresenterOptions {
            label_policy: LabelPolicy::Refresh,
            ..Default::default()
        };
        let mut presenter = LossChartPresenter::with_options(
            MemoryPage::standard(),
            ElementBinding::default(),
            options,
        );
        presenter.update_loss(&[1.0, 2.0]).unwrap();
        presenter.update_loss(&[1.0, 2.0, 3.0]).unwrap();

        let station = presenter.backend().widget("stationLossChart").unwrap();
        assert_eq!(
            station.labels,
            labels(&["Station 1", "Station 2", "Station 3"])
        );
    }

    #[test]
    fn missing_element_fails_but_series_advance() {
        let page = MemoryPage::with_elements(["stationLossChart"]);
        let mut presenter = LossChartPresenter::new(page, ElementBinding::default());

        let err = presenter.update_loss(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, ChartError::MissingElement("totalLossChart".into()));
        assert_eq!(presenter.total_loss(), &[0.0, 3.0]);
        assert_eq!(presenter.station_loss(), &[1.0, 2.0]);
        assert!(!presenter.is_total_bound());
        assert!(!presenter.is_station_bound());
        assert_eq!(presenter.metrics().errors(), 1);

        presenter.backend_mut().add_element("totalLossChart");
        presenter.update_loss(&[4.0]).unwrap();
        assert!(presenter.is_total_bound());
        assert!(presenter.is_station_bound());
        let total = presenter.backend().widget("totalLossChart").unwrap();
        assert_eq!(total.data, vec![0.0, 3.0, 4.0]);
        assert_eq!(total.labels, labels(&["0", "1", "2"]));
    }

    #[test]
    fn custom_bindings_target_other_elements() {
        let page = MemoryPage::with_elements(["left", "right"]);
        let mut presenter = LossChartPresenter::new(page, ElementBinding::new("left", "right"));
        presenter.update_loss(&[0.5]).unwrap();

        let page = presenter.into_backend();
        assert_eq!(page.widget("left").unwrap().kind, ChartKind::Line);
        assert_eq!(page.widget("right").unwrap().kind, ChartKind::Bar);
        assert!(page.widget("totalLossChart").is_none());
    }

    #[test]
    fn independent_presenters_do_not_share_state() {
        let mut first = presenter();
        let mut second = presenter();
        first.update_loss(&[1.0]).unwrap();
        second.update_loss(&[10.0]).unwrap();
        second.update_loss(&[10.0]).unwrap();
        assert_eq!(first.total_loss(), &[0.0, 1.0]);
        assert_eq!(second.total_loss(), &[0.0, 10.0, 10.0]);
    }

    #[test]
    fn non_finite_values_propagate() {
        let mut presenter = presenter();
        presenter.update_loss(&[1.0, f64::NAN]).unwrap();
        assert!(presenter.total_loss()[1].is_nan());
    }
}
