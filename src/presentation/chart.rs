use std::fmt::Display;
use std::iter;
use std::path::Path;
use chrono_tz::Tz;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use crate::classifier::{classify, flat_rate_at, PointCategory};
use crate::config::TariffParameters;
use crate::errors::RenderError;
use crate::models::daily_series::DailySeries;

const ARTIFACT: &str = "price chart";

const BACKGROUND: RGBColor = RGBColor(0x11, 0x11, 0x11);
const GRID: RGBColor = RGBColor(0x80, 0x80, 0x80);
const PRICE_LINE: RGBColor = RGBColor(0x00, 0xbf, 0xff);
const FLAT_LINE: RGBColor = RGBColor(0x94, 0x00, 0xd3);
const FLAT_LABEL: RGBColor = RGBColor(0xee, 0x82, 0xee);
const THRESHOLD_LINE: RGBColor = RGBColor(0xff, 0xa5, 0x00);

/// Marker colour for a price point, Normal points are not highlighted
fn highlight(category: PointCategory) -> Option<RGBColor> {
    match category {
        PointCategory::Alert         => Some(RGBColor(0xff, 0x63, 0x47)),
        PointCategory::FreeOrPaid    => Some(RGBColor(0x00, 0xff, 0x00)),
        PointCategory::BelowFlatRate => Some(RGBColor(0xee, 0x82, 0xee)),
        PointCategory::Normal        => None,
    }
}

fn chart_error(e: impl Display) -> RenderError {
    RenderError::new(ARTIFACT, e)
}

/// Renders the day's inc VAT prices as a step chart together with the flat tariff's
/// rate and the alert threshold. Points are highlighted according to their category.
///
/// # Arguments
///
/// * 'series' - the day's prices
/// * 'params' - tariff parameters
/// * 'tz' - timezone for time labels
/// * 'path' - the PNG file to write
pub fn render_price_chart(series: &DailySeries, params: &TariffParameters, tz: &Tz, path: &Path) -> Result<(), RenderError> {
    if series.is_empty() {
        return Err(chart_error("no price points"));
    }

    let local_times = series.points()
        .iter()
        .map(|p| p.valid_from.with_timezone(tz))
        .collect::<Vec<_>>();
    let labels = local_times.iter().map(|t| t.format("%H:%M").to_string()).collect::<Vec<String>>();
    let prices = series.points().iter().map(|p| p.value_inc_vat).collect::<Vec<f64>>();
    let flat_rates = local_times.iter().map(|t| flat_rate_at(t.time(), params)).collect::<Vec<f64>>();
    let date = local_times[0].format("%Y-%m-%d");

    let (y_min, y_max) = y_range(&prices, params);
    let slots = prices.len() as i32;

    let root = BitMapBackend::new(path, (1200, 500)).into_drawing_area();
    root.fill(&BACKGROUND).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Agile Octopus prices for {}", date), ("sans-serif", 22).into_font().color(&WHITE))
        .margin(15)
        .x_label_area_size(55)
        .y_label_area_size(50)
        .build_cartesian_2d(0..slots, y_min..y_max)
        .map_err(chart_error)?;

    chart.configure_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|x| labels.get(*x as usize).cloned().unwrap_or_default())
        .x_label_style(("sans-serif", 11).into_font().transform(FontTransform::Rotate90).color(&WHITE))
        .y_label_style(("sans-serif", 12).into_font().color(&WHITE))
        .y_desc("p/kWh")
        .axis_desc_style(("sans-serif", 14).into_font().color(&WHITE))
        .axis_style(&WHITE)
        .bold_line_style(GRID.mix(0.3))
        .light_line_style(BACKGROUND)
        .draw()
        .map_err(chart_error)?;

    chart.draw_series(LineSeries::new(step_points(&prices), PRICE_LINE.stroke_width(2)))
        .map_err(chart_error)?;
    chart.draw_series(LineSeries::new(step_points(&flat_rates), FLAT_LINE.stroke_width(1)))
        .map_err(chart_error)?;
    chart.draw_series(LineSeries::new(
        vec![(0, params.alert_threshold), (slots, params.alert_threshold)],
        THRESHOLD_LINE.stroke_width(1)))
        .map_err(chart_error)?;

    chart.draw_series(iter::once(Text::new(
        format!("Flat rate: {}p peak / {}p off-peak", params.flat_peak_rate, params.flat_off_peak_rate),
        (0, params.flat_peak_rate + 0.5),
        ("sans-serif", 13).into_font().color(&FLAT_LABEL).pos(Pos::new(HPos::Left, VPos::Bottom)))))
        .map_err(chart_error)?;
    chart.draw_series(iter::once(Text::new(
        format!("Threshold: {}p", params.alert_threshold),
        (0, params.alert_threshold + 0.3),
        ("sans-serif", 13).into_font().color(&THRESHOLD_LINE).pos(Pos::new(HPos::Left, VPos::Bottom)))))
        .map_err(chart_error)?;

    for (i, &price) in prices.iter().enumerate() {
        if let Some(color) = highlight(classify(price, params)) {
            let x = i as i32;
            chart.draw_series(iter::once(Circle::new((x, price), 5, color.filled())))
                .map_err(chart_error)?;
            chart.draw_series(iter::once(Text::new(
                labels[i].clone(),
                (x, price + 0.3),
                ("sans-serif", 10).into_font().color(&color).pos(Pos::new(HPos::Center, VPos::Bottom)))))
                .map_err(chart_error)?;
        }
    }

    root.present().map_err(chart_error)?;

    Ok(())
}

/// Turns one value per slot into the corner points of a step line, each value
/// being held from the start of its slot to the start of the next
///
/// # Arguments
///
/// * 'values' - one value per slot
fn step_points(values: &[f64]) -> Vec<(i32, f64)> {
    values
        .iter()
        .enumerate()
        .flat_map(|(i, &v)| [(i as i32, v), (i as i32 + 1, v)])
        .collect()
}

/// Returns the y axis range, wide enough for prices, flat rates, the threshold and labels
///
/// # Arguments
///
/// * 'prices' - the prices to plot
/// * 'params' - tariff parameters
fn y_range(prices: &[f64], params: &TariffParameters) -> (f64, f64) {
    let min = prices.iter().copied().fold(0.0_f64, f64::min);
    let max = prices
        .iter()
        .copied()
        .fold(params.flat_peak_rate.max(params.alert_threshold), f64::max);

    (min - 2.0, max + 3.0)
}
