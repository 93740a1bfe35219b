use std::fmt::Display;
use std::iter;
use std::path::Path;
use chrono_tz::Tz;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use crate::errors::RenderError;
use crate::window_cost::TableRow;

const ARTIFACT: &str = "price table";

const CELL_WIDTH: i32 = 110;
const CELL_HEIGHT: i32 = 32;
const MARGIN: i32 = 12;
const TITLE_HEIGHT: i32 = 28;

const BACKGROUND: RGBColor = RGBColor(0x2e, 0x2e, 0x2e);
const HEADER: RGBColor = RGBColor(0x1f, 0x1f, 0x1f);

fn table_error(e: impl Display) -> RenderError {
    RenderError::new(ARTIFACT, e)
}

/// Title naming the timezone the start times are given in
fn table_title(tz: &Tz) -> String {
    format!("Start times in {}", tz.name())
}

/// Returns the pixel size of a table with the given number of data rows
fn table_size(rows: usize) -> (u32, u32) {
    let columns = TableRow::HEADERS.len() as i32;
    let width = columns * CELL_WIDTH + 2 * MARGIN;
    let height = TITLE_HEIGHT + (rows as i32 + 1) * CELL_HEIGHT + 2 * MARGIN;

    (width as u32, height as u32)
}

/// Renders the recommendation table as a dark mode PNG with a title and a bold header row
///
/// # Arguments
///
/// * 'rows' - one row per session duration
/// * 'tz' - timezone the row times are given in
/// * 'path' - the PNG file to write
pub fn render_window_table(rows: &[TableRow], tz: &Tz, path: &Path) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path, table_size(rows.len())).into_drawing_area();
    root.fill(&BACKGROUND).map_err(table_error)?;

    let title_style = ("sans-serif", 15).into_font().color(&WHITE).pos(Pos::new(HPos::Left, VPos::Center));
    root.draw(&Text::new(table_title(tz), (MARGIN, MARGIN + TITLE_HEIGHT / 2), title_style))
        .map_err(table_error)?;

    let header_style = ("sans-serif", 14, FontStyle::Bold).into_font().color(&WHITE).pos(Pos::new(HPos::Center, VPos::Center));
    let row_style = ("sans-serif", 14).into_font().color(&WHITE).pos(Pos::new(HPos::Center, VPos::Center));

    let header = TableRow::HEADERS.map(String::from);
    for (r, cells) in iter::once(header).chain(rows.iter().map(TableRow::cells)).enumerate() {
        let top = MARGIN + TITLE_HEIGHT + r as i32 * CELL_HEIGHT;
        let (fill, style) = if r == 0 { (HEADER, &header_style) } else { (BACKGROUND, &row_style) };

        for (c, text) in cells.iter().enumerate() {
            let left = MARGIN + c as i32 * CELL_WIDTH;
            let corners = [(left, top), (left + CELL_WIDTH, top + CELL_HEIGHT)];

            root.draw(&Rectangle::new(corners, fill.filled())).map_err(table_error)?;
            root.draw(&Rectangle::new(corners, WHITE.stroke_width(1))).map_err(table_error)?;
            root.draw(&Text::new(text.as_str(), (left + CELL_WIDTH / 2, top + CELL_HEIGHT / 2), style.clone()))
                .map_err(table_error)?;
        }
    }

    root.present().map_err(table_error)?;

    Ok(())
}
