//! Plain aligned-column table output, one header row with a dashed
//! underline. String columns are left-aligned, numeric ones right-aligned.

use std::io::{self, Write};

use crate::record::FilteredRecord;

pub const COLUMNS: [&str; 10] = [
    "brand",
    "model",
    "price",
    "year",
    "transmission",
    "engine",
    "fuel",
    "mileage",
    "body",
    "exchange",
];

// price, year, engine, mileage
const RIGHT_ALIGNED: [bool; 10] = [
    false, false, true, true, false, true, false, true, false, false,
];

fn cells(record: &FilteredRecord) -> [String; 10] {
    [
        record.brand.clone(),
        record.model.clone(),
        record.price.to_string(),
        record.year.to_string(),
        record.transmission.clone(),
        record.engine.to_string(),
        record.fuel.clone(),
        record.mileage.to_string(),
        record.body.clone(),
        record.exchange.to_string(),
    ]
}

// Width in code points, not bytes: the data is mostly Cyrillic.
fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn pad(cell: &str, to: usize, right: bool) -> String {
    let fill = to.saturating_sub(width(cell));
    if right {
        format!("{}{}", " ".repeat(fill), cell)
    } else {
        format!("{}{}", cell, " ".repeat(fill))
    }
}

/// Writes the records as a table. An empty record set still prints the
/// header so the caller can see the schema of what matched nothing.
pub fn write_table<W: Write>(output: &mut W, records: &[FilteredRecord]) -> io::Result<()> {
    let rows: Vec<[String; 10]> = records.iter().map(cells).collect();

    let mut widths: [usize; 10] = [0; 10];
    for (w, column) in widths.iter_mut().zip(COLUMNS) {
        *w = width(column);
    }
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let header: Vec<String> = COLUMNS
        .iter()
        .zip(widths)
        .zip(RIGHT_ALIGNED)
        .map(|((column, w), right)| pad(column, w, right))
        .collect();
    writeln!(output, "{}", header.join("  ").trim_end())?;

    let underline: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(output, "{}", underline.join("  "))?;

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .zip(RIGHT_ALIGNED)
            .map(|((cell, w), right)| pad(cell, w, right))
            .collect();
        writeln!(output, "{}", line.join("  ").trim_end())?;
    }
    Ok(())
}
