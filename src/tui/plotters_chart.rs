//! Plotters-powered mileage-vs-price scatter widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// High-contrast colors for terminal rendering, assigned to makes in order.
pub const MAKE_PALETTE: [RGBColor; 8] = [
    RGBColor(0, 255, 255),
    RGBColor(0, 255, 0),
    RGBColor(255, 0, 0),
    RGBColor(255, 255, 0),
    RGBColor(255, 0, 255),
    RGBColor(80, 160, 255),
    RGBColor(255, 160, 0),
    RGBColor(255, 255, 255),
];

/// Points of one make.
pub struct MakeSeries {
    pub make: String,
    pub points: Vec<(f64, f64)>,
}

/// A render-only chart description; series and bounds are computed by the caller.
pub struct ScatterChart<'a> {
    pub series: &'a [MakeSeries],
    /// X bounds (mileage).
    pub x_bounds: [f64; 2],
    /// Y bounds (price, dollars).
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for ScatterChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // `Circle` radii come out wrong through the ratatui backend; pixels render as clean dots.
            for (i, series) in self.series.iter().enumerate() {
                let color = MAKE_PALETTE[i % MAKE_PALETTE.len()];
                chart.draw_series(series.points.iter().map(|&(x, y)| Pixel::new((x, y), color)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Group scatter points by make, in first-seen order.
pub fn series_by_make(points: &[crate::domain::MileagePricePoint]) -> Vec<MakeSeries> {
    let mut out: Vec<MakeSeries> = Vec::new();
    for p in points {
        match out.iter_mut().find(|s| s.make == p.make) {
            Some(series) => series.points.push((p.mileage, p.price)),
            None => out.push(MakeSeries {
                make: p.make.clone(),
                points: vec![(p.mileage, p.price)],
            }),
        }
    }
    out
}

/// Axis bounds for the scatter: mileage from zero, price padded by 5%.
pub fn scatter_bounds(series: &[MakeSeries]) -> ([f64; 2], [f64; 2]) {
    let (mut x_max, mut y_min, mut y_max) = (0.0_f64, f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in series.iter().flat_map(|s| s.points.iter()) {
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if x_max <= 0.0 || !x_max.is_finite() {
        x_max = 1.0;
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        let mid = if y_min.is_finite() { y_min } else { 0.0 };
        y_min = mid - 1.0;
        y_max = mid + 1.0;
    }

    let pad = (y_max - y_min) * 0.05;
    ([0.0, x_max * 1.05], [y_min - pad, y_max + pad])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MileagePricePoint;

    fn point(make: &str, mileage: f64, price: f64) -> MileagePricePoint {
        MileagePricePoint {
            mileage,
            price,
            make: make.to_string(),
        }
    }

    #[test]
    fn groups_points_by_make_in_order() {
        let series = series_by_make(&[
            point("Toyota", 1000.0, 20000.0),
            point("BMW", 2000.0, 40000.0),
            point("Toyota", 3000.0, 22000.0),
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].make, "Toyota");
        assert_eq!(series[0].points, vec![(1000.0, 20000.0), (3000.0, 22000.0)]);
    }

    #[test]
    fn bounds_pad_price_range() {
        let series = series_by_make(&[point("A", 10000.0, 20000.0), point("A", 20000.0, 30000.0)]);
        let (x, y) = scatter_bounds(&series);
        assert_eq!(x, [0.0, 21000.0]);
        assert_eq!(y, [19500.0, 30500.0]);
    }

    #[test]
    fn bounds_survive_empty_and_flat_series() {
        let (x, y) = scatter_bounds(&[]);
        assert!(x[1] > x[0]);
        assert!(y[1] > y[0]);

        let series = series_by_make(&[point("A", 0.0, 5000.0)]);
        let (x, y) = scatter_bounds(&series);
        assert!(x[1] > x[0]);
        assert!(y[0] < 5000.0 && y[1] > 5000.0);
    }
}
