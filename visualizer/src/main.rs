use backend::CanvasBackend;
use chart::LossChart;
use clap::Parser;
use iced::{
    time,
    widget::{button, canvas::Canvas, column, row, scrollable, text, text_input, Column, Container},
    Alignment, Element, Length, Subscription, Task, Theme,
};
use losscore::presenter::{STATION_LOSS_ELEMENT, TOTAL_LOSS_ELEMENT};
use losscore::series::{parse_rounds, LossRound};
use losscore::{ElementBinding, LabelPolicy, LossChartPresenter, PresenterOptions};
use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

mod backend;
mod chart;

const HISTORY_LIMIT: usize = 20;

#[derive(Parser, Debug)]
#[command(author, version, about = "Live loss charts")]
struct Args {
    /// JSON or YAML file holding one array of per-station losses per round
    #[arg(long)]
    rounds: Option<PathBuf>,
    /// Milliseconds between replayed rounds
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
    /// Recompute station labels on every round instead of keeping the first ones
    #[arg(long, default_value_t = false)]
    refresh_labels: bool,
}

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Loss Charts".into()
}

fn application_subscription(state: &Visualizer) -> Subscription<Message> {
    if state.pending.is_empty() {
        Subscription::none()
    } else {
        time::every(state.interval).map(|_| Message::Tick)
    }
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

struct Visualizer {
    presenter: LossChartPresenter<CanvasBackend>,
    pending: VecDeque<LossRound>,
    interval: Duration,
    round_input: String,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    RoundInputChanged(String),
    SubmitRound,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        let args = Args::parse();
        let options = PresenterOptions {
            label_policy: if args.refresh_labels {
                LabelPolicy::Refresh
            } else {
                LabelPolicy::Frozen
            },
            ..Default::default()
        };
        let backend = CanvasBackend::with_slots([TOTAL_LOSS_ELEMENT, STATION_LOSS_ELEMENT]);
        let mut state = Visualizer {
            presenter: LossChartPresenter::with_options(
                backend,
                ElementBinding::default(),
                options,
            ),
            pending: VecDeque::new(),
            interval: Duration::from_millis(args.interval_ms.max(1)),
            round_input: String::new(),
            status: "Waiting for loss data...".into(),
            history: Vec::new(),
        };

        if let Some(path) = args.rounds {
            match load_rounds(&path) {
                Ok(rounds) => {
                    state.status = format!("Loaded {} rounds from {}", rounds.len(), path.display());
                    state.pending = rounds.into();
                }
                Err(err) => state.status = format!("Rounds error: {err}"),
            }
        }

        (state, Task::none())
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                if let Some(round) = state.pending.pop_front() {
                    state.apply_round(round);
                }
            }
            Message::RoundInputChanged(value) => state.round_input = value,
            Message::SubmitRound => match parse_round_line(&state.round_input) {
                Ok(round) => {
                    state.round_input.clear();
                    state.apply_round(round);
                }
                Err(err) => state.status = format!("Input error: {err}"),
            },
        }
        Task::none()
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let backend = state.presenter.backend();

        let input_row = row![
            text_input("Losses per station, e.g. 1, 2.5, 3", &state.round_input)
                .on_input(Message::RoundInputChanged)
                .on_submit(Message::SubmitRound)
                .padding(6),
            button("Push round")
                .on_press(Message::SubmitRound)
                .padding(8),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let total_canvas = Canvas::new(LossChart::new(backend.chart(TOTAL_LOSS_ELEMENT)))
            .width(Length::Fill)
            .height(Length::Fixed(320.0));
        let station_canvas = Canvas::new(LossChart::new(backend.chart(STATION_LOSS_ELEMENT)))
            .width(Length::Fill)
            .height(Length::Fixed(320.0));

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let layout = column![
            text("Loss").size(26),
            input_row,
            text(&state.status).size(14),
            row![total_canvas, station_canvas].spacing(20),
            text(format!(
                "Rounds: {} | queued: {}",
                state.presenter.update_count(),
                state.pending.len()
            ))
            .size(14),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(120.0))).padding(6),
        ]
        .spacing(12)
        .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn apply_round(&mut self, round: Vec<f64>) {
        let stations = round.len();
        match self.presenter.update_loss(&round) {
            Ok(()) => {
                let total = self
                    .presenter
                    .total_loss()
                    .last()
                    .copied()
                    .unwrap_or_default();
                self.status = format!(
                    "Round {}: {} stations, total loss {:.2}",
                    self.presenter.update_count(),
                    stations,
                    total
                );
                self.push_history(format!(
                    "Round {}: total {:.2}",
                    self.presenter.update_count(),
                    total
                ));
            }
            Err(err) => self.status = format!("Chart error: {err}"),
        }
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
    }
}

fn load_rounds(path: &Path) -> Result<Vec<LossRound>, String> {
    let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_rounds(&contents).map_err(|e| e.to_string())
}

/// Parses a typed round such as `"1, 2.5, 3"`; blank input is an empty round.
fn parse_round_line(line: &str) -> Result<Vec<f64>, String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| format!("invalid loss value '{token}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn visualizer() -> Visualizer {
        Visualizer {
            presenter: LossChartPresenter::new(
                CanvasBackend::with_slots([TOTAL_LOSS_ELEMENT, STATION_LOSS_ELEMENT]),
                ElementBinding::default(),
            ),
            pending: VecDeque::from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]),
            interval: Duration::from_millis(10),
            round_input: String::new(),
            status: String::new(),
            history: Vec::new(),
        }
    }

    #[test]
    fn loads_yaml_rounds_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"- [1, 2]\n- [3]\n").unwrap();
        let path = temp.into_temp_path();
        assert_eq!(load_rounds(&path).unwrap(), vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(load_rounds(Path::new("/nonexistent/rounds.json")).is_err());
    }

    #[test]
    fn parses_typed_round_lines() {
        assert_eq!(parse_round_line("1, 2.5,3").unwrap(), vec![1.0, 2.5, 3.0]);
        assert_eq!(parse_round_line("4 5").unwrap(), vec![4.0, 5.0]);
        assert!(parse_round_line("   ").unwrap().is_empty());
        assert!(parse_round_line("1, x").is_err());
    }

    #[test]
    fn ticks_drain_pending_rounds() {
        let mut state = visualizer();
        let _ = Visualizer::update(&mut state, Message::Tick);
        let _ = Visualizer::update(&mut state, Message::Tick);
        let _ = Visualizer::update(&mut state, Message::Tick);
        assert!(state.pending.is_empty());
        assert_eq!(state.presenter.total_loss(), &[0.0, 6.0, 15.0]);
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn submitted_round_goes_through_presenter() {
        let mut state = visualizer();
        let _ = Visualizer::update(&mut state, Message::RoundInputChanged("2, 2".into()));
        let _ = Visualizer::update(&mut state, Message::SubmitRound);
        assert!(state.round_input.is_empty());
        assert_eq!(state.presenter.station_loss(), &[2.0, 2.0]);
        assert_eq!(state.status, "Round 1: 2 stations, total loss 4.00");
    }

    #[test]
    fn bad_input_keeps_text_and_reports() {
        let mut state = visualizer();
        let _ = Visualizer::update(&mut state, Message::RoundInputChanged("1, nope".into()));
        let _ = Visualizer::update(&mut state, Message::SubmitRound);
        assert_eq!(state.round_input, "1, nope");
        assert!(state.status.starts_with("Input error"));
        assert_eq!(state.presenter.update_count(), 0);
    }

    #[test]
    fn history_is_bounded() {
        let mut state = visualizer();
        for i in 0..(HISTORY_LIMIT + 5) {
            state.push_history(format!("entry {i}"));
        }
        assert_eq!(state.history.len(), HISTORY_LIMIT);
        assert_eq!(state.history[0], "entry 5");
    }
}
