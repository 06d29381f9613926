use cubechart::data::{Data, Theme};
use cubechart::legend::{Legend, LegendConfig, LegendFlow};
use cubechart::render::{Canvas, ChartFont, Color, RecordingCanvas, Rect};
use proptest::prelude::*;

fn data_with_labels(labels: &[String]) -> Data {
    let data = Data::new(Theme::default());
    data.cube().add_dimension("series", labels.to_vec());
    data
}

proptest! {
    #[test]
    fn sizing_bounds_contain_all_render_geometry(
        labels in prop::collection::vec("[a-z]{1,12}", 1..24),
        max_extent in 40.0f64..400.0,
        column_flow in any::<bool>(),
        reverse in any::<bool>(),
    ) {
        let data = data_with_labels(&labels);
        let legend = Legend::new(LegendConfig {
            flow: if column_flow { LegendFlow::Column } else { LegendFlow::Row },
            reverse,
            ..LegendConfig::default()
        });
        let font = ChartFont::default();
        let mut canvas = RecordingCanvas::new();

        let (width, height) = legend
            .needed_size(&mut canvas, &data, max_extent, &font)
            .expect("needed size");
        legend
            .render(
                1.0,
                &mut canvas,
                &data,
                0.0,
                0.0,
                max_extent,
                max_extent,
                Color::rgb(0.0, 0.0, 0.0),
                Color::rgb(1.0, 1.0, 1.0),
                &font,
            )
            .expect("render");

        let bounding = Rect::new(0.0, 0.0, width, height);
        let drawn = canvas.drawn_bounds().expect("legend drew something");
        prop_assert!(
            bounding.contains_rect(drawn),
            "drawn {:?} escapes {:?}",
            drawn,
            bounding
        );
        for region in canvas.popups().regions() {
            prop_assert!(bounding.contains_rect(region));
        }
        prop_assert_eq!(canvas.popups().len(), labels.len());
    }

    #[test]
    fn sizing_is_deterministic(
        labels in prop::collection::vec("[a-z]{1,16}", 0..24),
        max_extent in 40.0f64..400.0,
        column_flow in any::<bool>(),
    ) {
        let data = data_with_labels(&labels);
        let legend = Legend::new(LegendConfig {
            flow: if column_flow { LegendFlow::Column } else { LegendFlow::Row },
            ..LegendConfig::default()
        });
        let font = ChartFont::default();
        let mut canvas = RecordingCanvas::new();

        let first = legend
            .needed_size(&mut canvas, &data, max_extent, &font)
            .expect("first sizing");
        let second = legend
            .needed_size(&mut canvas, &data, max_extent, &font)
            .expect("second sizing");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn double_toggle_restores_visibility(
        labels in prop::collection::vec("[a-z]{1,8}", 1..12),
        index in 0usize..12,
    ) {
        prop_assume!(index < labels.len());
        let data = data_with_labels(&labels);
        let cube = data.cube();
        let before = cube.is_visible(0, index);

        cube.toggle_visible(0, index).expect("first toggle");
        cube.toggle_visible(0, index).expect("second toggle");
        prop_assert_eq!(cube.is_visible(0, index), before);
    }
}
