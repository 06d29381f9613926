use approx::assert_relative_eq;
use cubechart::content::{ContentContext, ContentLayer, LineContent, ScatterContent};
use cubechart::core::{DataPoint, Measure, ValueAxis};
use cubechart::data::{Data, Theme};
use cubechart::error::{ChartError, ChartResult};
use cubechart::render::{Canvas, ChartFont, Color, DrawOp, RecordingCanvas, Symbol};
use cubechart::XYChart;

fn axis_0_to_10() -> ValueAxis {
    let mut axis = ValueAxis::new();
    axis.add_measure(Measure::new("m", vec![0.0, 10.0]));
    axis
}

fn data_with_series(labels: &[&str]) -> Data {
    let data = Data::new(Theme::default());
    data.cube().add_dimension("series", labels.to_vec());
    data
}

fn context<'a>(
    progress: f64,
    data: &'a Data,
    x_axis: &'a ValueAxis,
    y_axis: &'a ValueAxis,
    font: &'a ChartFont,
) -> ContentContext<'a> {
    ContentContext {
        progress,
        data,
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
        x_axis,
        y_axis,
        font,
        background: Color::rgb(1.0, 1.0, 1.0),
        series_dimension: 0,
        series_index: 0,
    }
}

fn circle_center(canvas: &RecordingCanvas) -> (f64, f64) {
    canvas
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::FillOval { rect, .. } => {
                Some((rect.x + rect.width / 2.0, rect.y + rect.height / 2.0))
            }
            _ => None,
        })
        .expect("circle drawn")
}

#[test]
fn scatter_points_interpolate_from_baseline_to_settled_position() {
    let data = data_with_series(&["s"]);
    let x_axis = axis_0_to_10();
    let y_axis = axis_0_to_10();
    let font = ChartFont::default();
    let scatter =
        ScatterContent::new("s", vec![DataPoint::new(5.0, 10.0)]).with_symbol(Symbol::Circle);

    for (progress, expected_y) in [(0.0, 100.0), (0.5, 50.0), (1.0, 0.0)] {
        let mut canvas = RecordingCanvas::new();
        let ctx = context(progress, &data, &x_axis, &y_axis, &font);
        scatter.render(&mut canvas, &ctx).expect("scatter render");

        let (cx, cy) = circle_center(&canvas);
        assert_relative_eq!(cx, 50.0);
        assert_relative_eq!(cy, expected_y);
    }
}

#[test]
fn hidden_series_draws_nothing() {
    let data = data_with_series(&["s"]);
    data.cube().set_visible(0, 0, false).expect("hide");
    let x_axis = axis_0_to_10();
    let y_axis = axis_0_to_10();
    let font = ChartFont::default();
    let scatter = ScatterContent::new("s", vec![DataPoint::new(5.0, 5.0)]);

    let mut canvas = RecordingCanvas::new();
    let ctx = context(1.0, &data, &x_axis, &y_axis, &font);
    scatter.render(&mut canvas, &ctx).expect("scatter render");
    assert!(canvas.ops.is_empty());
}

#[test]
fn line_reveals_front_to_back_with_progress() {
    let data = data_with_series(&["s"]);
    let x_axis = axis_0_to_10();
    let y_axis = axis_0_to_10();
    let font = ChartFont::default();
    let line = LineContent::new(
        "s",
        vec![
            DataPoint::new(0.0, 0.0),
            DataPoint::new(5.0, 0.0),
            DataPoint::new(10.0, 0.0),
        ],
    );

    let segments_at = |progress: f64| {
        let mut canvas = RecordingCanvas::new();
        let ctx = context(progress, &data, &x_axis, &y_axis, &font);
        line.render(&mut canvas, &ctx).expect("line render");
        canvas
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .cloned()
            .collect::<Vec<_>>()
    };

    assert_eq!(segments_at(0.0).len(), 0);
    assert_eq!(segments_at(0.5).len(), 1, "exactly the first segment");
    let partial = segments_at(0.75);
    assert_eq!(partial.len(), 2, "first segment plus the frontier");
    match &partial[1] {
        DrawOp::Line { x1, x2, .. } => {
            assert_relative_eq!(*x1, 50.0);
            // Frontier covers half of the second segment.
            assert_relative_eq!(*x2, 75.0);
        }
        _ => unreachable!(),
    }
    assert_eq!(segments_at(1.0).len(), 2);
}

#[test]
fn render_does_not_mutate_the_cube() {
    let data = data_with_series(&["s"]);
    let x_axis = axis_0_to_10();
    let y_axis = axis_0_to_10();
    let font = ChartFont::default();
    let scatter = ScatterContent::new("s", vec![DataPoint::new(1.0, 2.0)]);

    let before = data.cube().snapshot();
    let mut canvas = RecordingCanvas::new();
    let ctx = context(0.7, &data, &x_axis, &y_axis, &font);
    scatter.render(&mut canvas, &ctx).expect("scatter render");
    assert_eq!(data.cube().snapshot(), before);
}

struct FailingLayer;

impl ContentLayer for FailingLayer {
    fn series_label(&self) -> &str {
        "broken"
    }

    fn add_measures_to_axes(&self, x_axis: &mut ValueAxis, y_axis: &mut ValueAxis) {
        x_axis.add_measure(Measure::new("broken", vec![0.0, 1.0]));
        y_axis.add_measure(Measure::new("broken", vec![0.0, 1.0]));
    }

    fn render(&self, _canvas: &mut dyn Canvas, _ctx: &ContentContext<'_>) -> ChartResult<()> {
        Err(ChartError::Render("backend rejected the path".to_owned()))
    }
}

#[test]
fn failing_layer_aborts_the_pass_and_keeps_earlier_output() {
    let mut chart = XYChart::new(Data::new(Theme::default()));
    chart.add_content(Box::new(ScatterContent::new(
        "good",
        vec![DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 2.0)],
    )));
    chart.add_content(Box::new(FailingLayer));
    chart.build_cubes().expect("build cubes");

    let mut canvas = RecordingCanvas::new();
    let err = chart
        .render_content(1.0, &mut canvas, 100.0, 100.0, &ChartFont::default(), 0.0, 0.0)
        .expect_err("pass must abort");

    match err {
        ChartError::Render(message) => assert!(message.contains("broken")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(
        !canvas.ops.is_empty(),
        "earlier layers' output is not rolled back"
    );
}
