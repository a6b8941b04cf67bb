use crate::record::FilteredRecord;

/// Sorts by price ascending, year descending, mileage ascending. The sort
/// is stable, so rows equal on all three keys keep their input order.
pub fn order(records: &mut [FilteredRecord]) {
    records.sort_by(|a, b| {
        a.price
            .cmp(&b.price)
            .then_with(|| b.year.cmp(&a.year))
            .then_with(|| a.mileage.cmp(&b.mileage))
    });
}

/// Truncates to at most `max` rows. Non-positive limits yield nothing; a
/// limit past the end returns everything.
pub fn limit(mut records: Vec<FilteredRecord>, max: i64) -> Vec<FilteredRecord> {
    if max <= 0 {
        return Vec::new();
    }
    records.truncate(max as usize);
    records
}
