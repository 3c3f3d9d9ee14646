//! Conversion between [`FilterValue`] and the search-string tokens a column
//! writes into its search input.

pub mod date_range;
pub mod selection;
pub mod single_date;

pub use date_range::{decode_date_range, encode_date_range, try_decode_date_range};
pub use selection::{
    NO_RESTRICTION, decode_selection, encode_selection, is_selection_token, try_decode_selection,
};
pub use single_date::{
    decode_single_date, encode_single_date, try_decode_single_date, update_from,
    update_single_date, update_to,
};

use tracing::warn;

use crate::core::{ColumnFilterSpec, DateFormat, FilterKind, FilterValue};

impl FilterValue {
    /// Token for this value in a column configured by `spec`.
    ///
    /// Values that do not fit the column kind are logged and written as the
    /// kind's unrestricted token.
    pub fn encode(&self, spec: &ColumnFilterSpec) -> String {
        match (spec.kind, self) {
            (FilterKind::Text, FilterValue::Text(text)) => text.clone(),
            (FilterKind::Text, FilterValue::NoFilter) => String::new(),

            (FilterKind::Select | FilterKind::MultiSelect, FilterValue::Values(values)) => {
                encode_selection(values.as_slice(), spec.option_values().as_slice())
            }
            (FilterKind::Select | FilterKind::MultiSelect, FilterValue::NoFilter) => {
                NO_RESTRICTION.to_string()
            }

            (
                FilterKind::Date,
                FilterValue::NoFilter
                | FilterValue::DateFrom(_)
                | FilterValue::DateTo(_)
                | FilterValue::DateRange(..),
            ) => {
                let bounds = self.date_bounds();
                encode_single_date(bounds.from, bounds.to)
            }

            (FilterKind::DateRange, FilterValue::DateRange(from, to)) => {
                match DateFormat::new(spec.date_format()) {
                    Ok(format) => encode_date_range(*from, *to, &format, spec.range_separator()),
                    Err(e) => {
                        warn!("cannot format date range: {e}");
                        String::new()
                    }
                }
            }
            (FilterKind::DateRange, FilterValue::NoFilter) => String::new(),

            (kind, value) => {
                warn!("{value:?} does not fit a {kind} column, writing no filter");
                FilterValue::NoFilter.encode(spec)
            }
        }
    }

    /// Decode a stored token for a column configured by `spec`.
    ///
    /// Never fails: anything unparseable becomes [`FilterValue::NoFilter`].
    pub fn decode(spec: &ColumnFilterSpec, token: &str) -> FilterValue {
        match spec.kind {
            FilterKind::Text => {
                if token.is_empty() {
                    FilterValue::NoFilter
                } else {
                    FilterValue::Text(token.to_string())
                }
            }
            FilterKind::Select | FilterKind::MultiSelect => {
                let values = decode_selection(token);
                if values.is_empty() {
                    FilterValue::NoFilter
                } else {
                    FilterValue::Values(values)
                }
            }
            FilterKind::Date => decode_single_date(token).into(),
            FilterKind::DateRange => {
                let format = match DateFormat::new(spec.date_format()) {
                    Ok(format) => format,
                    Err(e) => {
                        warn!("cannot parse date range: {e}");
                        return FilterValue::NoFilter;
                    }
                };
                let bounds = decode_date_range(token, spec.range_separator(), &format);
                match (bounds.from, bounds.to) {
                    (Some(from), Some(to)) => FilterValue::DateRange(from, to),
                    _ => FilterValue::NoFilter,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SelectOption;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn abc() -> ColumnFilterSpec {
        ColumnFilterSpec::multiselect(vec![
            SelectOption::new("A", "Alpha"),
            SelectOption::new("B", "Beta"),
            SelectOption::new("C", "Gamma"),
        ])
    }

    #[test]
    fn values_round_trip_through_select_column() {
        let spec = abc();
        let value = FilterValue::Values(vec!["C".into(), "A".into()]);
        let token = value.encode(&spec);
        assert_eq!(token, "^(A|C)$");
        assert_eq!(
            FilterValue::decode(&spec, &token),
            FilterValue::Values(vec!["A".into(), "C".into()])
        );
        assert_eq!(FilterValue::decode(&spec, NO_RESTRICTION), FilterValue::NoFilter);
    }

    #[test]
    fn date_range_value_depends_on_column_kind() {
        let value = FilterValue::DateRange(ymd(2024, 1, 1), ymd(2024, 1, 7));
        assert_eq!(
            value.encode(&ColumnFilterSpec::date()),
            "*ft*2024-01-01|2024-01-07"
        );
        let picker = ColumnFilterSpec::date_range();
        let token = value.encode(&picker);
        assert_eq!(token, "01 Jan 2024 - 07 Jan 2024");
        assert_eq!(FilterValue::decode(&picker, &token), value);
    }

    #[test]
    fn mismatched_value_writes_no_filter() {
        let value = FilterValue::Text("abc".into());
        assert_eq!(value.encode(&abc()), NO_RESTRICTION);
        assert_eq!(FilterValue::DateFrom(ymd(2024, 1, 1)).encode(&ColumnFilterSpec::date_range()), "");
    }

    #[test]
    fn text_is_passed_through() {
        let spec = ColumnFilterSpec::text();
        assert_eq!(FilterValue::decode(&spec, "smith"), FilterValue::Text("smith".into()));
        assert_eq!(FilterValue::Text("smith".into()).encode(&spec), "smith");
        assert_eq!(FilterValue::decode(&spec, ""), FilterValue::NoFilter);
    }

    #[test]
    fn bad_display_format_decodes_unset() {
        let spec = ColumnFilterSpec::date_range().with_date_format("MMM");
        assert_eq!(
            FilterValue::decode(&spec, "01 Jan 2024 - 07 Jan 2024"),
            FilterValue::NoFilter
        );
    }
}
