use crate::error::CriteriaError;
use crate::record::Exchange;

/// The full set of optional filter bounds for one invocation. Every bound
/// is an `Option` so "unset" is never confused with a legitimate zero or
/// empty value; an unset bound always passes.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price_from: Option<u32>,
    pub price_to: Option<u32>,
    pub year_from: Option<u16>,
    pub year_to: Option<u16>,
    pub transmission: Option<String>,
    pub engine_from: Option<u32>,
    pub engine_to: Option<u32>,
    pub fuel: Option<String>,
    pub mileage_max: Option<u32>,
    pub body: Option<String>,
    pub exchange: Option<Exchange>,
    /// Comma-separated terms matched against the searchable blob with OR
    /// semantics.
    pub keywords: Option<String>,
}

impl Criteria {
    /// Rejects contradictory range bounds before any filtering runs.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        check_range("price", self.price_from, self.price_to)?;
        check_range(
            "year",
            self.year_from.map(u32::from),
            self.year_to.map(u32::from),
        )?;
        check_range("engine", self.engine_from, self.engine_to)?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    from: Option<u32>,
    to: Option<u32>,
) -> Result<(), CriteriaError> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(CriteriaError::InvertedRange { field, from, to });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_criteria_is_valid() {
        assert!(Criteria::default().validate().is_ok());
    }

    #[test]
    fn inverted_price_range_is_rejected() {
        let criteria = Criteria {
            price_from: Some(9000),
            price_to: Some(4000),
            ..Criteria::default()
        };
        let err = criteria.validate().unwrap_err();
        assert!(matches!(
            err,
            CriteriaError::InvertedRange { field: "price", .. }
        ));
    }

    #[test]
    fn equal_bounds_are_a_valid_range() {
        let criteria = Criteria {
            year_from: Some(2019),
            year_to: Some(2019),
            ..Criteria::default()
        };
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn half_open_ranges_are_valid() {
        let criteria = Criteria {
            engine_from: Some(1600),
            ..Criteria::default()
        };
        assert!(criteria.validate().is_ok());
    }
}
