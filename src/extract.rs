//! Pure field extractors: one raw free-text field in, one typed attribute
//! out. Every extractor is deterministic, trims its result, and reports an
//! `ExtractionError` naming the attribute instead of panicking on
//! irregular input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::error::ExtractionError;
use crate::record::Exchange;

/// Marker word that opens every listing title.
pub const TITLE_MARKER: &str = "Продажа";

/// Sentinel engine segment for electric vehicles.
pub const ELECTRIC_SENTINEL: &str = "электро";

/// Two-word brand names keyed by their first word as it appears in titles.
/// Brand and model extraction must consult the same table.
static TWO_WORD_BRANDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Lada", "Lada (ВАЗ)"),
        ("Alfa", "Alfa Romeo"),
        ("Dongfeng", "Dongfeng Honda"),
        ("Great", "Great Wall"),
        ("Iran", "Iran Khodro"),
        ("Land", "Land Rover"),
    ])
});

/// Exact source phrases for the exchange field. Anything else is an error,
/// never a silent drop.
static EXCHANGE_PHRASES: Lazy<HashMap<&'static str, Exchange>> = Lazy::new(|| {
    HashMap::from([
        ("Возможен обмен", Exchange::Yes),
        ("Возможен обмен с моей доплатой", Exchange::Yes),
        ("Возможен обмен с вашей доплатой", Exchange::Yes),
        ("Обмен не интересует", Exchange::No),
    ])
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}").unwrap());

/// The brand token as written in the title, before normalization.
fn raw_brand(title: &str) -> Result<&str, ExtractionError> {
    let rest = title.trim().strip_prefix(TITLE_MARKER).ok_or_else(|| {
        ExtractionError::new("brand", title, "title does not start with the listing marker")
    })?;
    let raw = rest
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(',');
    if raw.is_empty() {
        return Err(ExtractionError::new(
            "brand",
            title,
            "no brand token after the listing marker",
        ));
    }
    Ok(raw)
}

/// Brand: the first token after the marker word, normalized through the
/// two-word brand table.
pub fn extract_brand(title: &str) -> Result<String, ExtractionError> {
    let raw = raw_brand(title)?;
    Ok(TWO_WORD_BRANDS.get(raw).copied().unwrap_or(raw).to_string())
}

/// Model: the title after the marker and the brand span, minus the
/// trailing comma segment. May legitimately be empty.
pub fn extract_model(title: &str) -> Result<String, ExtractionError> {
    let raw = raw_brand(title)?;
    let rest = title
        .trim()
        .strip_prefix(TITLE_MARKER)
        .unwrap_or(title)
        .trim_start();
    let mut tail = rest.strip_prefix(raw).unwrap_or(rest).trim_start();

    // A two-word brand occupies two title words only when the second word
    // of the normalized name actually follows ("Alfa Romeo Giulia");
    // display-only suffixes like "(ВАЗ)" never appear in titles.
    if let Some(full) = TWO_WORD_BRANDS.get(raw) {
        if let Some(second) = full.split_whitespace().nth(1) {
            if let Some(after) = tail.strip_prefix(second) {
                tail = after.trim_start();
            }
        }
    }

    let model = match tail.rsplit_once(',') {
        Some((head, _)) => head,
        None => tail,
    };
    Ok(model.trim().to_string())
}

/// Price in USD: every ASCII digit of the field, e.g. "≈ 7 500 $" -> 7500.
pub fn extract_price(price_secondary: &str) -> Result<u32, ExtractionError> {
    let digits: String = price_secondary
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return Err(ExtractionError::new(
            "price",
            price_secondary,
            "no digits in price field",
        ));
    }
    digits
        .parse()
        .map_err(|e| ExtractionError::new("price", price_secondary, format!("{}", e)))
}

/// Year: the four leading digits of the description.
pub fn extract_year(description: &str) -> Result<u16, ExtractionError> {
    let matched = YEAR_RE.find(description).ok_or_else(|| {
        ExtractionError::new(
            "year",
            description,
            "description does not start with a 4-digit year",
        )
    })?;
    matched
        .as_str()
        .parse()
        .map_err(|e| ExtractionError::new("year", description, format!("{}", e)))
}

/// Description text before the `|` separator.
fn pre_pipe(description: &str) -> &str {
    description.split('|').next().unwrap_or(description)
}

/// Nth comma-separated segment before the `|` separator, trimmed.
fn segment<'a>(
    description: &'a str,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ExtractionError> {
    pre_pipe(description)
        .split(',')
        .nth(index)
        .map(str::trim)
        .ok_or_else(|| {
            ExtractionError::new(
                field,
                description,
                format!("missing comma segment {}", index + 1),
            )
        })
}

/// Transmission: the second comma segment of the description.
pub fn extract_transmission(description: &str) -> Result<String, ExtractionError> {
    segment(description, 1, "transmission").map(str::to_string)
}

/// Engine volume in cm³ from the third comma segment: "1.6 л" -> 16 -> 1600.
/// The electric sentinel and an empty segment both yield 0; an absent
/// optional field must not reject the whole row.
pub fn extract_engine(description: &str) -> Result<u32, ExtractionError> {
    let seg = segment(description, 2, "engine")?;
    if seg == ELECTRIC_SENTINEL {
        return Ok(0);
    }
    let digits: String = seg.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Ok(0);
    }
    let deciliters: u32 = digits
        .parse()
        .map_err(|e| ExtractionError::new("engine", description, format!("{}", e)))?;
    Ok(deciliters * 100)
}

/// Fuel: the fourth comma segment, or the electric sentinel which has no
/// separate fuel segment.
pub fn extract_fuel(description: &str) -> Result<String, ExtractionError> {
    if segment(description, 2, "fuel")? == ELECTRIC_SENTINEL {
        return Ok(ELECTRIC_SENTINEL.to_string());
    }
    segment(description, 3, "fuel").map(str::to_string)
}

/// Mileage: digits of the last comma segment before the `|` separator.
pub fn extract_mileage(description: &str) -> Result<u32, ExtractionError> {
    let (_, last) = pre_pipe(description).trim().rsplit_once(',').ok_or_else(|| {
        ExtractionError::new(
            "mileage",
            description,
            "expected a comma-separated mileage segment",
        )
    })?;
    let digits: String = last.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ExtractionError::new(
            "mileage",
            description,
            "no digits in mileage segment",
        ));
    }
    digits
        .parse()
        .map_err(|e| ExtractionError::new("mileage", description, format!("{}", e)))
}

/// Body: the first comma segment after the `|` separator.
pub fn extract_body(description: &str) -> Result<String, ExtractionError> {
    let (_, after) = description.split_once('|').ok_or_else(|| {
        ExtractionError::new("body", description, "missing '|' separator")
    })?;
    Ok(after.split(',').next().unwrap_or(after).trim().to_string())
}

/// Exchange: the phrase must be an exact key of the phrase table.
pub fn extract_exchange(phrase: &str) -> Result<Exchange, ExtractionError> {
    EXCHANGE_PHRASES
        .get(phrase.trim())
        .copied()
        .ok_or_else(|| ExtractionError::new("exchange", phrase, "unknown exchange phrase"))
}
