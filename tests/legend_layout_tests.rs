use approx::assert_relative_eq;
use cubechart::data::{Data, Theme};
use cubechart::legend::{Legend, LegendConfig, LegendFlow};
use cubechart::render::{Canvas, ChartFont, Color, RecordingCanvas, Rect};

/// Canvas where every glyph is exactly `0.1 em` wide, so a 20px font gives
/// 2px per character and entry extents are easy to construct.
fn canvas() -> RecordingCanvas {
    RecordingCanvas::new().with_char_width_em(0.1)
}

fn font() -> ChartFont {
    ChartFont::new("Sans", 20.0)
}

/// Entry extent = text width + symbol gap (4) + symbol box (text height).
/// With 2px glyphs, label lengths 8/18/3/13 give extents 40/60/30/50.
fn scenario_data() -> Data {
    let data = Data::new(Theme::default());
    data.cube().add_dimension(
        "series",
        ["a".repeat(8), "b".repeat(18), "c".repeat(3), "d".repeat(13)],
    );
    data
}

fn row_legend() -> Legend {
    Legend::new(LegendConfig {
        flow: LegendFlow::Row,
        padding: 6.0,
        spacing: 4.0,
        ..LegendConfig::default()
    })
}

#[test]
fn row_flow_scenario_wraps_into_three_rows() {
    let data = scenario_data();
    let legend = row_legend();
    let mut canvas = canvas();

    let (width, height) = legend
        .needed_size(&mut canvas, &data, 100.0, &font())
        .expect("needed size");

    // Entry 1 wraps (40 + 4 + 60 > 100); entries 2+3 share the middle row
    // (60 + 4 + 30 = 94); entry 4 wraps again (94 + 4 + 50 > 100).
    assert_relative_eq!(width, 94.0 + 2.0 * 6.0);
    assert_relative_eq!(height, 3.0 * 20.0 + 2.0 * 4.0 + 2.0 * 6.0);
}

#[test]
fn sizing_is_a_pure_function_of_its_inputs() {
    let data = scenario_data();
    let legend = row_legend();
    let mut canvas = canvas();

    let first = legend
        .needed_size(&mut canvas, &data, 100.0, &font())
        .expect("first sizing");
    let second = legend
        .needed_size(&mut canvas, &data, 100.0, &font())
        .expect("second sizing");
    assert_eq!(first, second);
}

#[test]
fn render_geometry_stays_inside_the_sized_bounding_box() {
    let data = scenario_data();
    let legend = row_legend();
    let mut canvas = canvas();

    let (width, height) = legend
        .needed_size(&mut canvas, &data, 100.0, &font())
        .expect("needed size");

    let (x, y) = (50.0, 30.0);
    legend
        .render(
            1.0,
            &mut canvas,
            &data,
            x,
            y,
            100.0,
            500.0,
            Color::rgb(0.0, 0.0, 0.0),
            Color::rgb(1.0, 1.0, 1.0),
            &font(),
        )
        .expect("render");

    let bounding = Rect::new(x, y, width, height);
    let drawn = canvas.drawn_bounds().expect("legend drew something");
    assert!(
        bounding.contains_rect(drawn),
        "drawn bounds {drawn:?} escape {bounding:?}"
    );
    for region in canvas.popups().regions() {
        assert!(
            bounding.contains_rect(region),
            "popup region {region:?} escapes {bounding:?}"
        );
    }
}

#[test]
fn column_flow_wraps_against_height() {
    let data = Data::new(Theme::default());
    data.cube()
        .add_dimension("series", ["aa", "bb", "cc", "dd", "ee"]);
    let legend = Legend::new(LegendConfig {
        flow: LegendFlow::Column,
        padding: 2.0,
        spacing: 4.0,
        ..LegendConfig::default()
    });
    let mut canvas = canvas();
    let font = font();

    // Each entry is 20 high; 2 entries per 44px column, so 5 entries need
    // 3 columns.
    let (width, height) = legend
        .needed_size(&mut canvas, &data, 45.0, &font)
        .expect("needed size");

    let entry_width = 2.0 * 20.0 * 0.1 + 4.0 + 20.0;
    assert_relative_eq!(height, 44.0 + 2.0 * 2.0);
    assert_relative_eq!(width, 3.0 * entry_width + 2.0 * 4.0 + 2.0 * 2.0);
}

#[test]
fn empty_legend_collapses_to_padding() {
    let data = Data::new(Theme::default());
    data.cube().add_dimension("series", Vec::<String>::new());
    let legend = row_legend();
    let mut canvas = canvas();

    let (width, height) = legend
        .needed_size(&mut canvas, &data, 100.0, &font())
        .expect("needed size");
    assert_relative_eq!(width, 12.0);
    assert_relative_eq!(height, 12.0);
}

#[test]
fn decorations_draw_background_shadow_and_border() {
    let data = scenario_data();
    let mut config = LegendConfig::default();
    config.background = Some(Color::rgb(0.95, 0.95, 0.95));
    config.shadow = Some(Color::rgba(0.0, 0.0, 0.0, 0.3));
    config.border = Some(Color::rgb(0.5, 0.5, 0.5));
    let legend = Legend::new(config);
    let mut canvas = canvas();

    legend
        .render(
            1.0,
            &mut canvas,
            &data,
            0.0,
            0.0,
            400.0,
            400.0,
            Color::rgb(0.0, 0.0, 0.0),
            Color::rgb(1.0, 1.0, 1.0),
            &font(),
        )
        .expect("render");

    use cubechart::render::DrawOp;
    let fills = canvas
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::FillRoundedRect { .. }))
        .count();
    let outlines = canvas
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::DrawRoundedRect { .. }))
        .count();
    assert_eq!(fills, 2, "shadow + background");
    assert_eq!(outlines, 1, "border");
}
