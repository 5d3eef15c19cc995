// File: crates/plot-core/tests/draw_order.rs
// Purpose: Pixel checks for series stacking, bar fill and outline, and the rose colour.

use wxplot_core::{Chart, PlotLine, PlotOptions, Rgb, ScaleHint, Vector2};

const RED: Rgb = Rgb::new(255, 0, 0);
const BLUE: Rgb = Rgb::new(0, 0, 255);

fn xs(v: &[f64]) -> Vec<Option<f64>> {
    v.iter().copied().map(Some).collect()
}

// Plot area is x 43..277 and y 18..147 at the default size; these scales map one data
// unit to one pixel, with y = -29 on the bottom edge.
fn pixel_chart() -> Chart {
    let mut chart = Chart::new(PlotOptions::default());
    chart.set_x_scale(ScaleHint::fixed(0.0, 234.0, 234.0));
    chart.set_y_scale(ScaleHint::fixed(-29.0, 100.0, 129.0));
    chart
}

fn pixel(chart: &Chart, x: u32, y: u32) -> Rgb {
    let rendered = chart.render().expect("render");
    let p = rendered.image.get_pixel(x, y).0;
    Rgb::new(p[0], p[1], p[2])
}

fn flat_line(color: Rgb) -> PlotLine {
    // y = 50 lands on row 68; a width of 5 covers rows 65.5..70.5.
    PlotLine::from_xy(&[(10.0, 50.0), (200.0, 50.0)]).with_color(color).with_width(5)
}

#[test]
fn first_added_series_is_on_top() {
    let mut chart = pixel_chart();
    chart.add_line(flat_line(RED)).expect("red");
    chart.add_line(flat_line(BLUE)).expect("blue");
    assert_eq!(pixel(&chart, 150, 67), RED);

    let mut chart = pixel_chart();
    chart.add_line(flat_line(BLUE)).expect("blue");
    chart.add_line(flat_line(RED)).expect("red");
    assert_eq!(pixel(&chart, 150, 67), BLUE);
}

#[test]
fn bar_fills_down_to_scale_minimum_with_outline() {
    let fill = Rgb::new(40, 200, 90);
    let outline = Rgb::new(120, 0, 140);
    let mut chart = pixel_chart();
    // Spans x 100.5..150.5 and y -29..71.5, i.e. columns 143.5..193.5 and rows 46.5..147.
    chart
        .add_line(PlotLine::bar(xs(&[150.5]), xs(&[71.5]), vec![50.0]).with_color(outline).with_fill_color(fill))
        .expect("bar");
    let rendered = chart.render().expect("render");
    let at = |x: u32, y: u32| {
        let p = rendered.image.get_pixel(x, y).0;
        Rgb::new(p[0], p[1], p[2])
    };

    assert_eq!(at(170, 100), fill);
    // Below the zero row (118) and just above the bottom edge.
    assert_eq!(at(170, 140), fill);
    assert_eq!(at(170, 145), fill);
    assert_eq!(at(170, 47), fill);
    // The outline straddles the top edge at 46.5 and the left edge at 143.5.
    assert_eq!(at(170, 46), outline);
    assert_eq!(at(143, 100), outline);
    assert_eq!(at(170, 40), chart.options().theme.chart_background);
}

#[test]
fn rose_takes_vector_series_color() {
    let green = Rgb::new(0, 160, 0);
    let mut chart = pixel_chart();
    assert!(chart.options().rose.color.is_none());
    chart
        .add_line(PlotLine::vector(xs(&[200.0]), vec![Some(Vector2::new(0.0, 5.0))]).with_color(green))
        .expect("vector");
    let rendered = chart.render().expect("render");
    assert!(rendered.rose_drawn);

    // Rose origin is (48, 126); its shaft runs down column 48 + 11.
    let p = rendered.image.get_pixel(59, 128).0;
    assert!(p[1] > p[0] && p[1] > p[2], "shaft pixel {p:?}");
}
