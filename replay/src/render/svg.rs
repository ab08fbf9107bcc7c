use log::info;
use losscore::math::StatsHelper;
use losscore::prelude::{ChartBackend, ChartError, ChartKind, ChartResult, ChartSpec, WidgetHandle};
use losscore::WidgetRegistry;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const BACKGROUND: RGBColor = RGBColor(33, 37, 41);
const GRID: RGBColor = RGBColor(60, 60, 60);

/// Renders each widget to `<out_dir>/<element>.svg`, on creation and on
/// every redraw.
pub struct SvgBackend {
    out_dir: PathBuf,
    size: (u32, u32),
    registry: WidgetRegistry,
}

impl SvgBackend {
    pub fn new(out_dir: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self {
            out_dir: out_dir.into(),
            size,
            registry: WidgetRegistry::new(),
        }
    }

    pub fn output_path(&self, element: &str) -> PathBuf {
        self.out_dir.join(format!("{element}.svg"))
    }

    pub fn widgets(&self) -> &WidgetRegistry {
        &self.registry
    }

    fn render(&self, spec: &ChartSpec) -> ChartResult<()> {
        let path = self.output_path(&spec.element);
        draw_chart(&path, spec, self.size)
            .map_err(|err| ChartError::Render(format!("{}: {err:#}", path.display())))?;
        info!("rendered '{}' to {}", spec.title, path.display());
        Ok(())
    }
}

impl ChartBackend for SvgBackend {
    type Handle = WidgetHandle;

    /// The widget is registered only once its first render succeeds, so a
    /// failed creation can be retried.
    fn create(&mut self, spec: &ChartSpec) -> ChartResult<WidgetHandle> {
        if self.registry.get(&spec.element).is_some() {
            return Err(ChartError::ElementInUse(spec.element.clone()));
        }
        fs::create_dir_all(&self.out_dir)
            .map_err(|err| ChartError::Render(format!("{}: {err}", self.out_dir.display())))?;
        self.render(spec)?;
        self.registry.insert(spec)
    }

    fn set_labels(&mut self, handle: &WidgetHandle, labels: &[String]) -> ChartResult<()> {
        self.registry.set_labels(handle, labels)
    }

    fn set_data(&mut self, handle: &WidgetHandle, data: &[f64]) -> ChartResult<()> {
        self.registry.set_data(handle, data)
    }

    fn redraw(&mut self, handle: &WidgetHandle) -> ChartResult<()> {
        let spec = self.registry.resolve(handle)?;
        self.render(spec)
    }
}

/// X axis span for `count` categories centred on integer positions.
fn category_range(count: usize) -> (f64, f64) {
    (-0.5, count.max(1) as f64 - 0.5)
}

fn category_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn draw_chart(path: &Path, spec: &ChartSpec, size: (u32, u32)) -> anyhow::Result<()> {
    let (r, g, b) = spec.defaults.primary_rgb();
    let primary = RGBColor(r, g, b);
    let (r, g, b) = spec.defaults.text_rgb();
    let text = RGBColor(r, g, b);

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&BACKGROUND)?;

    let count = spec.data.len().max(spec.labels.len());
    let (x_min, x_max) = category_range(count);
    let begin_at_zero = spec.begin_at_zero || spec.kind == ChartKind::Bar;
    let (y_min, y_max) = StatsHelper::axis_range(&spec.data, begin_at_zero);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20).x_label_area_size(40).y_label_area_size(60);
    if spec.defaults.title_display {
        builder.caption(
            &spec.title,
            ("sans-serif", f64::from(spec.defaults.title_font_size))
                .into_font()
                .color(&text),
        );
    }
    let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    let labels = spec.labels.clone();
    chart
        .configure_mesh()
        .x_labels(count.clamp(1, 12))
        .y_labels(8)
        .x_label_formatter(&|x| category_label(&labels, *x))
        .label_style(("sans-serif", 14).into_font().color(&text))
        .axis_style(ShapeStyle::from(&text).stroke_width(1))
        .light_line_style(ShapeStyle::from(&GRID).stroke_width(1))
        .bold_line_style(ShapeStyle::from(&GRID).stroke_width(1))
        .draw()?;

    let points = spec
        .data
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .map(|(i, &value)| (i as f64, value));

    let series = match spec.kind {
        ChartKind::Line => chart.draw_series(LineSeries::new(
            points,
            ShapeStyle::from(&primary).stroke_width(3),
        ))?,
        ChartKind::Bar => {
            let baseline = y_min.max(0.0).min(y_max);
            chart.draw_series(points.map(|(x, value)| {
                Rectangle::new([(x - 0.4, baseline), (x + 0.4, value)], primary.filled())
            }))?
        }
    };

    if spec.defaults.legend_display {
        series
            .label(spec.dataset_label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], primary.filled()));
        chart
            .configure_series_labels()
            .background_style(&BACKGROUND.mix(0.8))
            .border_style(&text)
            .label_font(("sans-serif", 14).into_font().color(&text))
            .draw()?;
    }

    root.present()?;
    Ok(())
}
