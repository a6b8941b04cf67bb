//! Filter pipeline: one named predicate per record attribute, evaluated in
//! a fixed order with short-circuit rejection. Each predicate reads only
//! its own attribute, so the order is a speed choice, not a semantic one.

use crate::criteria::Criteria;
use crate::record::{FilteredRecord, Record};

pub type Predicate = fn(&Record, &Criteria) -> bool;

/// Evaluation order, cheapest checks first. Every entry is independently
/// testable by name.
pub const PIPELINE: [(&str, Predicate); 11] = [
    ("brand", brand_matches),
    ("model", model_matches),
    ("price", price_in_range),
    ("year", year_in_range),
    ("transmission", transmission_matches),
    ("engine", engine_in_range),
    ("fuel", fuel_matches),
    ("mileage", mileage_within),
    ("body", body_matches),
    ("exchange", exchange_matches),
    ("keywords", keywords_hit),
];

fn matches_exact(bound: Option<&str>, value: &str) -> bool {
    bound.map_or(true, |want| want == value)
}

fn in_range(from: Option<u32>, to: Option<u32>, value: u32) -> bool {
    from.map_or(true, |f| value >= f) && to.map_or(true, |t| value <= t)
}

pub fn brand_matches(record: &Record, criteria: &Criteria) -> bool {
    matches_exact(criteria.brand.as_deref(), &record.brand)
}

pub fn model_matches(record: &Record, criteria: &Criteria) -> bool {
    matches_exact(criteria.model.as_deref(), &record.model)
}

pub fn price_in_range(record: &Record, criteria: &Criteria) -> bool {
    in_range(criteria.price_from, criteria.price_to, record.price)
}

pub fn year_in_range(record: &Record, criteria: &Criteria) -> bool {
    in_range(
        criteria.year_from.map(u32::from),
        criteria.year_to.map(u32::from),
        u32::from(record.year),
    )
}

pub fn transmission_matches(record: &Record, criteria: &Criteria) -> bool {
    matches_exact(criteria.transmission.as_deref(), &record.transmission)
}

pub fn engine_in_range(record: &Record, criteria: &Criteria) -> bool {
    in_range(criteria.engine_from, criteria.engine_to, record.engine)
}

pub fn fuel_matches(record: &Record, criteria: &Criteria) -> bool {
    matches_exact(criteria.fuel.as_deref(), &record.fuel)
}

pub fn mileage_within(record: &Record, criteria: &Criteria) -> bool {
    criteria.mileage_max.map_or(true, |max| record.mileage <= max)
}

pub fn body_matches(record: &Record, criteria: &Criteria) -> bool {
    matches_exact(criteria.body.as_deref(), &record.body)
}

pub fn exchange_matches(record: &Record, criteria: &Criteria) -> bool {
    criteria
        .exchange
        .map_or(true, |want| record.exchange == want)
}

/// At least one trimmed comma-separated term must be a literal substring
/// of the searchable blob. An unset or empty bound passes everything.
pub fn keywords_hit(record: &Record, criteria: &Criteria) -> bool {
    match criteria.keywords.as_deref() {
        None => true,
        Some(bound) => {
            let mut terms = bound
                .split(',')
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .peekable();
            if terms.peek().is_none() {
                return true;
            }
            terms.any(|term| record.searchable_blob.contains(term))
        }
    }
}

/// Applies every predicate in pipeline order, rejecting on the first
/// failure. Survivors keep their relative input order and lose the
/// searchable blob, which only keyword filtering needed.
pub fn filter(records: Vec<Record>, criteria: &Criteria) -> Vec<FilteredRecord> {
    records
        .into_iter()
        .filter(|record| PIPELINE.iter().all(|(_, predicate)| predicate(record, criteria)))
        .map(Record::into_filtered)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Exchange;

    fn vesta() -> Record {
        Record {
            brand: "Lada (ВАЗ)".to_string(),
            model: "Vesta".to_string(),
            price: 7500,
            year: 2019,
            transmission: "механика".to_string(),
            engine: 1600,
            fuel: "бензин".to_string(),
            mileage: 45000,
            body: "седан".to_string(),
            exchange: Exchange::Yes,
            searchable_blob: "Продажа Lada Vesta, седан,≈ 7 500 $,Минск".to_string(),
        }
    }

    fn leaf() -> Record {
        Record {
            brand: "Nissan".to_string(),
            model: "Leaf".to_string(),
            price: 9000,
            year: 2018,
            transmission: "автомат".to_string(),
            engine: 0,
            fuel: "электро".to_string(),
            mileage: 60000,
            body: "хэтчбек".to_string(),
            exchange: Exchange::No,
            searchable_blob: "Продажа Nissan Leaf,≈ 9 000 $,Гомель".to_string(),
        }
    }

    #[test]
    fn empty_criteria_passes_everything() {
        let result = filter(vec![vesta(), leaf()], &Criteria::default());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].model, "Vesta");
        assert_eq!(result[1].model, "Leaf");
    }

    #[test]
    fn price_lower_bound_rejects_cheaper_record() {
        let criteria = Criteria {
            price_from: Some(8000),
            ..Criteria::default()
        };
        assert!(!price_in_range(&vesta(), &criteria));
        let result = filter(vec![vesta(), leaf()], &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].model, "Leaf");
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let criteria = Criteria {
            price_from: Some(7500),
            price_to: Some(7500),
            ..Criteria::default()
        };
        assert!(price_in_range(&vesta(), &criteria));
    }

    #[test]
    fn mileage_is_a_single_inclusive_upper_bound() {
        let criteria = Criteria {
            mileage_max: Some(45000),
            ..Criteria::default()
        };
        assert!(mileage_within(&vesta(), &criteria));
        assert!(!mileage_within(&leaf(), &criteria));
    }

    #[test]
    fn keywords_use_or_semantics() {
        let criteria = Criteria {
            keywords: Some("седан,купе".to_string()),
            ..Criteria::default()
        };
        assert!(keywords_hit(&vesta(), &criteria));
        assert!(!keywords_hit(&leaf(), &criteria));
    }

    #[test]
    fn blank_keyword_bound_passes() {
        let criteria = Criteria {
            keywords: Some("  , ".to_string()),
            ..Criteria::default()
        };
        assert!(keywords_hit(&leaf(), &criteria));
    }

    #[test]
    fn exchange_bound_matches_enum() {
        let criteria = Criteria {
            exchange: Some(Exchange::Yes),
            ..Criteria::default()
        };
        let result = filter(vec![vesta(), leaf()], &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].brand, "Lada (ВАЗ)");
    }

    #[test]
    fn predicate_order_does_not_change_the_result() {
        let criteria = Criteria {
            brand: Some("Nissan".to_string()),
            price_to: Some(9500),
            keywords: Some("Гомель".to_string()),
            ..Criteria::default()
        };
        let records = vec![vesta(), leaf()];

        let forward: Vec<bool> = records
            .iter()
            .map(|r| PIPELINE.iter().all(|(_, p)| p(r, &criteria)))
            .collect();
        let backward: Vec<bool> = records
            .iter()
            .map(|r| PIPELINE.iter().rev().all(|(_, p)| p(r, &criteria)))
            .collect();

        assert_eq!(forward, backward);
        assert_eq!(forward, vec![false, true]);
    }

    #[test]
    fn tightening_a_bound_never_grows_the_result() {
        let records = vec![vesta(), leaf()];
        let loose = Criteria {
            price_to: Some(10000),
            ..Criteria::default()
        };
        let tight = Criteria {
            price_to: Some(8000),
            brand: Some("Lada (ВАЗ)".to_string()),
            ..Criteria::default()
        };

        let loose_len = filter(records.clone(), &loose).len();
        let tight_len = filter(records, &tight).len();
        assert!(tight_len <= loose_len);
    }
}
