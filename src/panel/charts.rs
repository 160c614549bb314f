// External crates
use plotters::prelude::*;
use std::path::Path;

// Internal modules
use crate::error::{ForecastError, Result};
use crate::forecast::CellKind;

/// Stroke pattern of a chart line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Dash length and gap in pixels, `None` for a continuous line
    pub fn dash_pattern(self) -> Option<(u32, u32)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some((10, 6)),
            LineStyle::Dotted => Some((2, 4)),
        }
    }
}

/// Color and stroke pattern that identify a forecaster on every chart
pub fn forecaster_style(kind: CellKind) -> (RGBColor, LineStyle) {
    match kind {
        CellKind::SimpleRnn => (BLUE, LineStyle::Dashed),
        CellKind::Lstm => (RED, LineStyle::Dotted),
    }
}

/// One named line on a chart
pub struct ChartSeries<'a> {
    pub label: String,
    pub values: &'a [f64],
    pub color: RGBColor,
    pub stroke_width: u32,
    pub line_style: LineStyle,
}

impl<'a> ChartSeries<'a> {
    pub fn new(label: impl Into<String>, values: &'a [f64], color: RGBColor) -> Self {
        Self {
            label: label.into(),
            values,
            color,
            stroke_width: 2,
            line_style: LineStyle::Solid,
        }
    }

    /// A forecaster's line in its own color and pattern
    pub fn forecaster(kind: CellKind, suffix: &str, values: &'a [f64]) -> Self {
        let (color, line_style) = forecaster_style(kind);
        Self {
            line_style,
            ..Self::new(format!("{} {}", kind.label(), suffix), values, color)
        }
    }
}

/// Axis text and size of a line chart
pub struct ChartLayout<'a> {
    pub caption: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub width: u32,
    pub height: u32,
    /// Fixed y range; derived from the data when `None`
    pub y_range: Option<(f64, f64)>,
}

fn data_y_range(series: &[ChartSeries<'_>]) -> (f64, f64) {
    let (lo, hi) = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.1).max(1e-6);
    (lo.min(0.0), hi + pad)
}

fn draw_line_chart(path: &Path, layout: &ChartLayout<'_>, series: &[ChartSeries<'_>]) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (layout.width, layout.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = series.iter().map(|s| s.values.len()).max().unwrap_or(0).max(2) - 1;
    let (y_min, y_max) = layout.y_range.unwrap_or_else(|| data_y_range(series));

    let mut chart = ChartBuilder::on(&root)
        .caption(layout.caption, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0usize..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(layout.x_desc)
        .y_desc(layout.y_desc)
        .draw()?;

    for s in series {
        let color = s.color;
        let style = color.stroke_width(s.stroke_width);
        let points = s
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, &v)| (i, v));

        let anno = match s.line_style.dash_pattern() {
            None => chart.draw_series(LineSeries::new(points, style))?,
            Some((size, spacing)) => {
                chart.draw_series(DashedLineSeries::new(points, size, spacing, style))?
            }
        };
        anno.label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Renders a line chart to an SVG file
///
/// # Errors
/// Returns `ForecastError::Chart` if the file cannot be written or drawing fails
pub fn render_line_chart(path: &Path, layout: &ChartLayout<'_>, series: &[ChartSeries<'_>]) -> Result<()> {
    draw_line_chart(path, layout, series)
        .map_err(|e| ForecastError::Chart(format!("{}: {}", path.display(), e)))
}

/// Validation loss per epoch for every forecaster
pub fn render_loss_comparison(path: &Path, curves: &[(CellKind, &[f64])]) -> Result<()> {
    let series: Vec<ChartSeries<'_>> = curves
        .iter()
        .map(|&(kind, values)| ChartSeries::forecaster(kind, "Validation Loss", values))
        .collect();

    let layout = ChartLayout {
        caption: "Validation Loss Comparison: RNN vs LSTM",
        x_desc: "Epochs",
        y_desc: "MSE Loss",
        width: 1000,
        height: 500,
        y_range: None,
    };
    render_line_chart(path, &layout, &series)
}

/// The series drawn on the prediction chart: the actual output as a thick
/// solid black line, then each forecaster in its own style
pub fn prediction_series<'a>(
    actual: &'a [f64],
    predictions: &[(CellKind, &'a [f64])],
) -> Vec<ChartSeries<'a>> {
    let mut series = vec![ChartSeries {
        stroke_width: 3,
        ..ChartSeries::new("Actual Solar Output", actual, BLACK)
    }];
    series.extend(
        predictions
            .iter()
            .map(|&(kind, values)| ChartSeries::forecaster(kind, "Prediction", values)),
    );
    series
}

/// Actual panel output against each forecaster's prediction
pub fn render_prediction_comparison(
    path: &Path,
    actual: &[f64],
    predictions: &[(CellKind, &[f64])],
    y_max: f64,
) -> Result<()> {
    let series = prediction_series(actual, predictions);

    let layout = ChartLayout {
        caption: "Solar Power Output Prediction (Panel Scale) - RNN vs LSTM",
        x_desc: "Time Steps",
        y_desc: "Power Output (Watts)",
        width: 1200,
        height: 600,
        y_range: Some((0.0, y_max)),
    };
    render_line_chart(path, &layout, &series)
}
