use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Pixels, Point, Rectangle, Renderer, Size, Theme,
};
use losscore::math::StatsHelper;
use losscore::prelude::{ChartKind, ChartSpec};

const BACKGROUND: Color = Color::from_rgb(0.05, 0.05, 0.05);
const GRID: Color = Color::from_rgb(0.25, 0.25, 0.3);
const MAX_X_LABELS: usize = 12;

/// Canvas program drawing one presenter widget, line or bar.
#[derive(Clone)]
pub struct LossChart {
    spec: Option<ChartSpec>,
}

impl LossChart {
    pub fn new(spec: Option<&ChartSpec>) -> Self {
        Self {
            spec: spec.cloned(),
        }
    }
}

/// Maps data space onto the plot rectangle.
struct Plot {
    area: Rectangle,
    count: usize,
    low: f64,
    high: f64,
}

impl Plot {
    fn new(area: Rectangle, spec: &ChartSpec) -> Self {
        let begin_at_zero = spec.begin_at_zero || spec.kind == ChartKind::Bar;
        let (low, high) = StatsHelper::axis_range(&spec.data, begin_at_zero);
        Self {
            area,
            count: spec.data.len().max(spec.labels.len()).max(1),
            low,
            high,
        }
    }

    fn slot_width(&self) -> f32 {
        self.area.width / self.count as f32
    }

    fn x(&self, index: usize) -> f32 {
        self.area.x + self.slot_width() * (index as f32 + 0.5)
    }

    fn y(&self, value: f64) -> f32 {
        let normalized = ((value - self.low) / (self.high - self.low)).clamp(0.0, 1.0) as f32;
        self.area.y + self.area.height - normalized * self.area.height
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgb8(r, g, b)
}

fn label(frame: &mut Frame, content: String, position: Point, color: Color, size: f32) {
    frame.fill_text(canvas::Text {
        content,
        position,
        color,
        size: Pixels(size),
        ..canvas::Text::default()
    });
}

impl<Message> canvas::Program<Message> for LossChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        let Some(spec) = &self.spec else {
            label(
                &mut frame,
                "Waiting for loss data...".into(),
                Point::new(12.0, 12.0),
                GRID,
                14.0,
            );
            return vec![frame.into_geometry()];
        };

        let primary = rgb(spec.defaults.primary_rgb());
        let text = rgb(spec.defaults.text_rgb());

        let top = if spec.defaults.title_display {
            let size = spec.defaults.title_font_size as f32;
            label(
                &mut frame,
                spec.title.clone(),
                Point::new(12.0, 6.0),
                text,
                size,
            );
            size + 18.0
        } else {
            12.0
        };
        let (left, right, bottom) = (56.0, 12.0, 28.0);
        let area = Rectangle::new(
            Point::new(left, top),
            Size::new(
                (bounds.width - left - right).max(1.0),
                (bounds.height - top - bottom).max(1.0),
            ),
        );
        let plot = Plot::new(area, spec);

        let axes = Path::new(|builder| {
            builder.move_to(Point::new(area.x, area.y));
            builder.line_to(Point::new(area.x, area.y + area.height));
            builder.line_to(Point::new(area.x + area.width, area.y + area.height));
        });
        frame.stroke(&axes, Stroke::default().with_color(GRID).with_width(1.0));

        label(
            &mut frame,
            format!("{:.1}", plot.high),
            Point::new(4.0, area.y - 6.0),
            text,
            12.0,
        );
        label(
            &mut frame,
            format!("{:.1}", plot.low),
            Point::new(4.0, area.y + area.height - 6.0),
            text,
            12.0,
        );

        let points = spec
            .data
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_finite())
            .map(|(i, &value)| (i, value));

        match spec.kind {
            ChartKind::Line => {
                let path = Path::new(|builder| {
                    for (n, (i, value)) in points.enumerate() {
                        let point = Point::new(plot.x(i), plot.y(value));
                        if n == 0 {
                            builder.move_to(point);
                        } else {
                            builder.line_to(point);
                        }
                        builder.circle(point, 2.5);
                        builder.move_to(point);
                    }
                });
                frame.stroke(
                    &path,
                    Stroke::default().with_width(2.5).with_color(primary),
                );
            }
            ChartKind::Bar => {
                let baseline = plot.y(plot.low.max(0.0).min(plot.high));
                let bar_width = plot.slot_width() * 0.8;
                for (i, value) in points {
                    let y = plot.y(value);
                    frame.fill_rectangle(
                        Point::new(plot.x(i) - bar_width / 2.0, y.min(baseline)),
                        Size::new(bar_width, (baseline - y).abs()),
                        primary,
                    );
                }
            }
        }

        let stride = plot.count.div_ceil(MAX_X_LABELS).max(1);
        for (i, text_label) in spec.labels.iter().enumerate().step_by(stride) {
            label(
                &mut frame,
                text_label.clone(),
                Point::new(plot.x(i) - 8.0, area.y + area.height + 6.0),
                text,
                12.0,
            );
        }

        vec![frame.into_geometry()]
    }
}
