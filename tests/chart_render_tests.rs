use cubechart::content::ScatterContent;
use cubechart::core::DataPoint;
use cubechart::data::{Data, Theme};
use cubechart::error::ChartError;
use cubechart::render::{Canvas, DrawOp, RecordingCanvas, Rect};
use cubechart::{ChartConfig, LegendPosition, XYChart};

fn sample_chart() -> XYChart {
    let mut chart = XYChart::new(Data::new(Theme::default()));
    chart.add_content(Box::new(ScatterContent::new(
        "north",
        vec![DataPoint::new(1.0, 2.0), DataPoint::new(3.0, 5.0)],
    )));
    chart.add_content(Box::new(ScatterContent::new(
        "south",
        vec![DataPoint::new(2.0, 1.0), DataPoint::new(4.0, 4.0)],
    )));
    chart
}

#[test]
fn full_render_paints_the_background_first() {
    let mut chart = sample_chart();
    let mut canvas = RecordingCanvas::new();
    chart.render(&mut canvas, 640.0, 480.0).expect("render");

    match canvas.ops.first().expect("ops recorded") {
        DrawOp::FillRect { rect, color } => {
            assert_eq!(*rect, Rect::new(0.0, 0.0, 640.0, 480.0));
            assert_eq!(*color, Theme::default().background);
        }
        other => panic!("expected background fill, got {other:?}"),
    }
}

#[test]
fn legend_on_the_right_registers_one_region_per_layer() {
    let mut chart = sample_chart();
    let mut canvas = RecordingCanvas::new();
    chart.render(&mut canvas, 640.0, 480.0).expect("render");

    assert_eq!(canvas.popups().len(), 2);
    for region in canvas.popups().regions() {
        assert!(
            region.x > 320.0,
            "legend regions live in the right half: {region:?}"
        );
    }
}

#[test]
fn disabling_the_legend_removes_all_regions() {
    let mut chart = sample_chart();
    chart.config_mut().legend_position = LegendPosition::None;
    let mut canvas = RecordingCanvas::new();
    chart.render(&mut canvas, 640.0, 480.0).expect("render");
    assert!(canvas.popups().is_empty());
}

#[test]
fn each_pass_supersedes_the_previous_regions() {
    let mut chart = sample_chart();
    let mut canvas = RecordingCanvas::new();
    chart.render(&mut canvas, 640.0, 480.0).expect("first pass");
    chart
        .render_at(1.0, &mut canvas, 640.0, 480.0)
        .expect("second pass");

    // Two layers, one region each; nothing accumulated across passes.
    assert_eq!(canvas.popups().len(), 2);
}

#[test]
fn invalid_viewport_is_rejected() {
    let mut chart = sample_chart();
    let mut canvas = RecordingCanvas::new();
    let err = chart
        .render(&mut canvas, 0.0, 480.0)
        .expect_err("zero width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn axis_titles_are_drawn_when_set() {
    let mut chart = sample_chart();
    chart.x_axis_mut().set_title("time");
    chart.y_axis_mut().set_title("value");
    let mut canvas = RecordingCanvas::new();
    chart.render(&mut canvas, 640.0, 480.0).expect("render");

    let titles: Vec<(&str, bool, f64)> = canvas
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text {
                text,
                rotated,
                angle,
                ..
            } if text == "time" || text == "value" => Some((text.as_str(), *rotated, *angle)),
            _ => None,
        })
        .collect();
    assert!(titles.contains(&("time", false, 0.0)));
    assert!(titles.contains(&("value", true, 270.0)));
}

#[test]
fn bottom_legend_sits_below_the_content_area() {
    let mut chart = sample_chart();
    chart.config_mut().legend_position = LegendPosition::Bottom;
    let mut canvas = RecordingCanvas::new();
    chart.render(&mut canvas, 640.0, 480.0).expect("render");

    for region in canvas.popups().regions() {
        assert!(
            region.y > 240.0,
            "legend regions live in the bottom half: {region:?}"
        );
    }
}

#[test]
fn config_defaults_enable_animation() {
    let chart = XYChart::new(Data::new(Theme::default()));
    assert!(chart.is_animation_enabled());
    assert_eq!(chart.config(), &ChartConfig::default());
}
