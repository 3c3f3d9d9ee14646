use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// The active filter of one column.
///
/// Binder logic works on this type only; the string token form exists at the
/// codec boundary (`FilterValue::encode` / `FilterValue::decode`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    #[default]
    NoFilter,
    Text(String),
    /// Explicit values in option order
    Values(Vec<String>),
    DateFrom(NaiveDate),
    DateTo(NaiveDate),
    /// Inclusive range; written as `*ft*` for date columns and as display
    /// text for range-picker columns
    DateRange(NaiveDate, NaiveDate),
}

impl FilterValue {
    pub fn is_unset(&self) -> bool {
        match self {
            FilterValue::NoFilter => true,
            FilterValue::Text(text) => text.is_empty(),
            FilterValue::Values(values) => values.is_empty(),
            _ => false,
        }
    }

    /// Date bounds carried by this value, if it is a date filter
    pub fn date_bounds(&self) -> DateBounds {
        match self {
            FilterValue::DateFrom(from) => DateBounds::new(Some(*from), None),
            FilterValue::DateTo(to) => DateBounds::new(None, Some(*to)),
            FilterValue::DateRange(from, to) => DateBounds::new(Some(*from), Some(*to)),
            _ => DateBounds::default(),
        }
    }
}

/// Optional lower and upper date of a single-date column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateBounds {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateBounds {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unset(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn with_from(self, from: NaiveDate) -> Self {
        Self {
            from: Some(from),
            ..self
        }
    }

    pub fn with_to(self, to: NaiveDate) -> Self {
        Self {
            to: Some(to),
            ..self
        }
    }

    /// Err when both ends are set and `from` falls after `to`
    pub fn check_order(&self) -> Result<(), FilterError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => {
                Err(FilterError::InconsistentDateRange { from, to })
            }
            _ => Ok(()),
        }
    }
}

impl From<DateBounds> for FilterValue {
    fn from(bounds: DateBounds) -> Self {
        match (bounds.from, bounds.to) {
            (None, None) => FilterValue::NoFilter,
            (Some(from), None) => FilterValue::DateFrom(from),
            (None, Some(to)) => FilterValue::DateTo(to),
            (Some(from), Some(to)) => FilterValue::DateRange(from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_convert_to_tagged_values() {
        let a = ymd(2024, 1, 1);
        let b = ymd(2024, 1, 7);
        assert_eq!(FilterValue::from(DateBounds::default()), FilterValue::NoFilter);
        assert_eq!(FilterValue::from(DateBounds::new(Some(a), None)), FilterValue::DateFrom(a));
        assert_eq!(FilterValue::from(DateBounds::new(None, Some(b))), FilterValue::DateTo(b));
        assert_eq!(
            FilterValue::from(DateBounds::new(Some(a), Some(b))),
            FilterValue::DateRange(a, b)
        );
        assert_eq!(FilterValue::DateRange(a, b).date_bounds(), DateBounds::new(Some(a), Some(b)));
    }

    #[test]
    fn partial_updates_keep_other_half() {
        let bounds = DateBounds::new(Some(ymd(2024, 1, 1)), Some(ymd(2024, 1, 31)));
        let moved = bounds.with_from(ymd(2024, 1, 10));
        assert_eq!(moved.to, bounds.to);
        assert_eq!(moved.from, Some(ymd(2024, 1, 10)));
    }

    #[test]
    fn check_order_flags_backwards_ranges() {
        let backwards = DateBounds::new(Some(ymd(2024, 2, 1)), Some(ymd(2024, 1, 1)));
        assert!(backwards.check_order().is_err());
        assert!(DateBounds::new(Some(ymd(2024, 1, 1)), None).check_order().is_ok());
    }

    #[test]
    fn unset_values() {
        assert!(FilterValue::NoFilter.is_unset());
        assert!(FilterValue::Values(vec![]).is_unset());
        assert!(FilterValue::Text(String::new()).is_unset());
        assert!(!FilterValue::Text("abc".into()).is_unset());
    }
}
