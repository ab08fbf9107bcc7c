use anyhow::Context;
use clap::Parser;
use log::info;
use losscore::{ChartBackend, LabelPolicy, LossChartPresenter, MemoryPage};
use render::svg::SvgBackend;
use std::fs;
use std::path::PathBuf;
use workflow::config::SessionConfig;
use workflow::rounds::load_rounds;
use workflow::runner::{ReplaySummary, Runner};

mod render;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Replays loss rounds through the chart presenter")]
struct Args {
    /// JSON or YAML file holding one array of per-station losses per round
    #[arg(long)]
    rounds: PathBuf,
    /// Load session settings from YAML
    #[arg(long)]
    session: Option<PathBuf>,
    /// Directory receiving the rendered SVG charts
    #[arg(long)]
    out: Option<PathBuf>,
    /// Recompute station labels on every round instead of keeping the first ones
    #[arg(long, default_value_t = false)]
    refresh_labels: bool,
    /// Run against an in-memory page and print the resulting chart state as JSON
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut session = if let Some(path) = &args.session {
        SessionConfig::load(path)?
    } else {
        SessionConfig::default()
    };
    if let Some(out) = args.out {
        session.out_dir = out;
    }
    if args.refresh_labels {
        session.label_policy = LabelPolicy::Refresh;
    }

    let rounds = load_rounds(&args.rounds)?;
    info!(
        "replaying {} rounds from {}",
        rounds.len(),
        args.rounds.display()
    );

    if args.dry_run {
        let page = MemoryPage::with_elements([
            session.total_element.clone(),
            session.station_element.clone(),
        ]);
        let mut runner = Runner::new(presenter_for(&session, page));
        let summary = runner.execute(&rounds)?;
        print_summary(&summary);
        let snapshot = runner.presenter().backend().snapshot_json();
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("serializing chart state")?
        );
    } else {
        let backend = SvgBackend::new(session.out_dir.clone(), session.canvas_size());
        let mut runner = Runner::new(presenter_for(&session, backend));
        let summary = runner.execute(&rounds)?;
        print_summary(&summary);

        let state_path = session.out_dir.join("charts.json");
        let widgets = runner
            .presenter()
            .backend()
            .widgets()
            .iter()
            .collect::<Vec<_>>();
        fs::create_dir_all(&session.out_dir)
            .with_context(|| format!("creating {}", session.out_dir.display()))?;
        fs::write(
            &state_path,
            serde_json::to_string_pretty(&widgets).context("serializing chart state")?,
        )
        .with_context(|| format!("writing {}", state_path.display()))?;
        println!("Charts written to {}", session.out_dir.display());
    }

    Ok(())
}

fn presenter_for<B: ChartBackend>(session: &SessionConfig, backend: B) -> LossChartPresenter<B> {
    LossChartPresenter::with_options(
        backend,
        session.to_binding(),
        session.to_presenter_options(),
    )
}

fn print_summary(summary: &ReplaySummary) {
    println!(
        "Replay -> rounds {}, total loss {:?}, latest stations {:?}",
        summary.rounds, summary.total_loss, summary.station_loss
    );
}
