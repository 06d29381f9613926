use cubechart::content::{LineContent, ScatterContent};
use cubechart::core::{DataPoint, Measure, ValueAxis};
use cubechart::data::{Data, Theme};
use cubechart::XYChart;

fn chart_with_two_layers() -> XYChart {
    let mut chart = XYChart::new(Data::new(Theme::default()));
    chart.add_content(Box::new(ScatterContent::new(
        "first",
        vec![DataPoint::new(0.0, 1.0), DataPoint::new(4.0, 3.0)],
    )));
    chart.add_content(Box::new(LineContent::new(
        "second",
        vec![DataPoint::new(-2.0, 5.0), DataPoint::new(6.0, 2.0)],
    )));
    chart
}

#[test]
fn build_cubes_registers_one_measure_per_layer_in_order() {
    let mut chart = chart_with_two_layers();
    chart.build_cubes().expect("build cubes");

    assert_eq!(chart.x_axis().measure_count(), 2);
    assert_eq!(chart.y_axis().measure_count(), 2);
    let names: Vec<&str> = chart
        .x_axis()
        .measures()
        .iter()
        .map(|measure| measure.name())
        .collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn rebuild_is_idempotent() {
    let mut chart = chart_with_two_layers();
    chart.build_cubes().expect("first build");
    let x_before = chart.x_axis().clone();
    let y_before = chart.y_axis().clone();

    chart.build_cubes().expect("second build");

    assert_eq!(chart.x_axis(), &x_before, "no measure accumulation");
    assert_eq!(chart.y_axis(), &y_before);
}

#[test]
fn build_cubes_populates_the_series_dimension() {
    let mut chart = chart_with_two_layers();
    chart.build_cubes().expect("build cubes");

    let cube = chart.data().cube();
    let dim = chart.series_dimension();
    assert_eq!(cube.sample_count(dim), 2);
    assert_eq!(cube.sample(dim, 0).expect("sample 0"), "first");
    assert_eq!(cube.sample(dim, 1).expect("sample 1"), "second");
}

#[test]
fn rebuild_preserves_visibility_across_passes() {
    let mut chart = chart_with_two_layers();
    chart.build_cubes().expect("first build");
    let dim = chart.series_dimension();
    chart
        .data()
        .cube()
        .set_visible(dim, 1, false)
        .expect("hide second");

    chart.build_cubes().expect("second build");
    assert!(!chart.data().cube().is_visible(dim, 1));
}

#[test]
fn range_aggregation_is_order_independent() {
    let first = Measure::new("a", vec![0.0, 10.0]);
    let second = Measure::new("b", vec![-5.0, 3.0]);

    let mut forward = ValueAxis::new();
    forward.add_measure(first.clone());
    forward.add_measure(second.clone());

    let mut backward = ValueAxis::new();
    backward.add_measure(second);
    backward.add_measure(first);

    assert_eq!(forward.range(), backward.range());
    assert_eq!(forward.range(), Some((-5.0, 10.0)));
}

#[test]
fn clear_then_readd_yields_an_equivalent_axis() {
    let measure = Measure::new("m", vec![1.0, 2.0, 3.0]);
    let mut axis = ValueAxis::new();
    axis.add_measure(measure.clone());
    let before = axis.clone();

    axis.clear_measures();
    assert_eq!(axis.measure_count(), 0);
    axis.add_measure(measure);
    assert_eq!(axis, before);
}

#[test]
fn scale_maps_domain_ends_onto_the_extent() {
    let mut axis = ValueAxis::new();
    axis.add_measure(Measure::new("m", vec![2.0, 8.0]));
    let scale = axis.scale().expect("scale");

    let low = scale.domain_to_pixel(2.0, 200.0).expect("low");
    let high = scale.domain_to_pixel(8.0, 200.0).expect("high");
    assert_eq!(low, 0.0);
    assert_eq!(high, 200.0);
}

#[test]
fn chart_axis_titles_carry_default_rotations() {
    let chart = XYChart::new(Data::new(Theme::default()));
    assert_eq!(chart.x_axis().title_rotation(), 0.0);
    assert_eq!(chart.y_axis().title_rotation(), 270.0);
}
