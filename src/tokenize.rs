use std::io::Read;

use crate::error::{EtlError, ExtractionError};
use crate::extract;
use crate::record::{RawRow, Record};

/// Source columns the extractors read. Checked once against the header so
/// a missing column fails fast instead of dropping every row.
pub const REQUIRED_COLUMNS: [&str; 4] = ["title", "price_secondary", "description", "exchange"];

/// One rejected row: the 1-based source line and the extractor failure
/// that rejected it.
#[derive(Debug, Clone)]
pub struct RowDrop {
    pub line: u64,
    pub error: ExtractionError,
}

/// Aggregate outcome of one tokenization pass. Per-row failures land here
/// as drops; they never abort the batch.
#[derive(Debug, Default)]
pub struct TokenizeStats {
    pub rows_read: usize,
    pub records_emitted: usize,
    pub drops: Vec<RowDrop>,
}

impl TokenizeStats {
    pub fn rows_dropped(&self) -> usize {
        self.drops.len()
    }
}

/// Runs every field extractor over one raw row.
pub fn tokenize_row(row: &RawRow) -> Result<Record, ExtractionError> {
    let title = row.get("title").unwrap_or("");
    let price = row.get("price_secondary").unwrap_or("");
    let description = row.get("description").unwrap_or("");
    let exchange = row.get("exchange").unwrap_or("");

    Ok(Record {
        brand: extract::extract_brand(title)?,
        model: extract::extract_model(title)?,
        price: extract::extract_price(price)?,
        year: extract::extract_year(description)?,
        transmission: extract::extract_transmission(description)?,
        engine: extract::extract_engine(description)?,
        fuel: extract::extract_fuel(description)?,
        mileage: extract::extract_mileage(description)?,
        body: extract::extract_body(description)?,
        exchange: extract::extract_exchange(exchange)?,
        searchable_blob: row.searchable_blob(),
    })
}

/// Tokenizes a whole delimited source. Records come out in input order;
/// rows any extractor rejects are counted in the stats and skipped.
pub fn tokenize<R: Read>(input: R) -> Result<(Vec<Record>, TokenizeStats), EtlError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(EtlError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    let mut stats = TokenizeStats::default();

    for result in reader.into_records() {
        let raw = result?;
        stats.rows_read += 1;
        let line = raw.position().map(|p| p.line()).unwrap_or(0);

        let row = RawRow::from_csv(&headers, &raw);
        match tokenize_row(&row) {
            Ok(record) => records.push(record),
            Err(error) => stats.drops.push(RowDrop { line, error }),
        }
    }

    stats.records_emitted = records.len();
    Ok((records, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Exchange;
    use std::io::Cursor;

    const SOURCE: &str = "\
card_id,title,price_secondary,description,exchange,scrap_date,location
1,\"Продажа Lada Vesta, седан\",≈ 7 500 $,\"2019 г., механика, 1.6 л, бензин, 45 000 км | седан\",Возможен обмен,2023-05-01,Минск
2,Продажа Nissan Leaf,≈ 9 000 $,\"2018 г., автомат, электро, 60 000 км | хэтчбек\",Обмен не интересует,2023-05-01,Гомель
3,\"Продажа Kia Rio, седан\",≈ 6 000 $,\"2015 г., механика, 1.4 л, бензин, 90 000 км | седан\",Только продажа,2023-05-01,Минск
";

    #[test]
    fn tokenizes_valid_rows_in_input_order() {
        let (records, stats) = tokenize(Cursor::new(SOURCE)).unwrap();

        assert_eq!(stats.rows_read, 3);
        assert_eq!(stats.records_emitted, 2);
        assert_eq!(records[0].brand, "Lada (ВАЗ)");
        assert_eq!(records[1].brand, "Nissan");
    }

    #[test]
    fn lada_vesta_row_extracts_every_attribute() {
        let (records, _) = tokenize(Cursor::new(SOURCE)).unwrap();
        let vesta = &records[0];

        assert_eq!(vesta.brand, "Lada (ВАЗ)");
        assert_eq!(vesta.model, "Vesta");
        assert_eq!(vesta.price, 7500);
        assert_eq!(vesta.year, 2019);
        assert_eq!(vesta.transmission, "механика");
        assert_eq!(vesta.engine, 1600);
        assert_eq!(vesta.fuel, "бензин");
        assert_eq!(vesta.mileage, 45000);
        assert_eq!(vesta.body, "седан");
        assert_eq!(vesta.exchange, Exchange::Yes);
    }

    #[test]
    fn electric_row_gets_zero_engine_and_sentinel_fuel() {
        let (records, _) = tokenize(Cursor::new(SOURCE)).unwrap();
        let leaf = &records[1];

        assert_eq!(leaf.engine, 0);
        assert_eq!(leaf.fuel, "электро");
        assert_eq!(leaf.exchange, Exchange::No);
    }

    #[test]
    fn bad_row_is_dropped_and_reported_not_fatal() {
        let (records, stats) = tokenize(Cursor::new(SOURCE)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(stats.rows_dropped(), 1);
        assert_eq!(stats.drops[0].error.field, "exchange");
    }

    #[test]
    fn blob_keeps_auxiliary_columns() {
        let (records, _) = tokenize(Cursor::new(SOURCE)).unwrap();

        assert!(records[0].searchable_blob.contains("седан"));
        assert!(records[0].searchable_blob.contains("Минск"));
        assert!(!records[0].searchable_blob.contains("2023-05-01"));
    }

    #[test]
    fn missing_required_column_fails_fast() {
        let source = "card_id,title\n1,Продажа Kia Rio\n";
        let err = tokenize(Cursor::new(source)).unwrap_err();
        assert!(matches!(err, EtlError::MissingColumn("price_secondary")));
    }
}
