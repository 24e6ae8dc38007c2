use anyhow::Result;
use log::info;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::{FontStyle, FontTransform};
use std::path::Path;

use crate::types::StrainMetric;

// Light pink to dark purple, after matplotlib's RdPu.
const RAMP_LOW: (u8, u8, u8) = (253, 224, 221);
const RAMP_HIGH: (u8, u8, u8) = (73, 0, 106);

/// Divides every value by the maximum. A non-positive maximum maps everything to zero.
pub fn normalize_by_max(values: &[f64]) -> Vec<f64> {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !(max > 0.0) {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / max).collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn ramp_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(
        lerp(RAMP_LOW.0, RAMP_HIGH.0),
        lerp(RAMP_LOW.1, RAMP_HIGH.1),
        lerp(RAMP_LOW.2, RAMP_HIGH.2),
    )
}

/// Marker area grows linearly with the value, so the radius goes with its square root.
fn marker_radius(t: f64) -> i32 {
    ((t.max(0.0) * 100.0).sqrt().round() as i32).max(2)
}

/// Scatter plot of max-normalized BiNI per strain with a dashed mean line.
pub fn plot_bini<P: AsRef<Path>>(metrics: &[StrainMetric], output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    let n_strains = metrics.len();
    let labels: Vec<&str> = metrics.iter().map(|m| m.strain.as_str()).collect();
    let raw: Vec<f64> = metrics.iter().map(|m| m.bini).collect();
    let normalized = normalize_by_max(&raw);
    let bini_mean = mean(&normalized);
    let y_min = normalized.iter().cloned().fold(0.0, f64::min);

    let width = (n_strains as u32 * 40).max(800);
    let root_area = BitMapBackend::new(output_path, (width, 800)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root_area)
        .margin(20)
        .x_label_area_size(150)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(n_strains as f64 - 0.5), (y_min * 1.1)..1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Strains")
        .y_desc("BiNI Complete BGC")
        .axis_desc_style(("sans-serif", 16).into_font().style(FontStyle::Bold))
        .x_labels(n_strains)
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .x_label_formatter(&|x| {
            let idx = x.round();
            if idx < 0.0 || (x - idx).abs() > 1e-6 {
                return String::new();
            }
            labels.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
        })
        .draw()?;

    chart
        .draw_series(DashedLineSeries::new(
            vec![(-0.5, bini_mean), (n_strains as f64 - 0.5, bini_mean)],
            8,
            4,
            GREEN.stroke_width(1),
        ))?
        .label("BiNI score mean")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    chart.draw_series(normalized.iter().enumerate().map(|(i, y)| {
        Circle::new(
            (i as f64, *y),
            marker_radius(*y),
            ramp_color(*y).mix(0.5).filled(),
        )
    }))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root_area.present()?;
    info!("Figure saved to {:?}", output_path);

    Ok(())
}
