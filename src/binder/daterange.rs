use chrono::NaiveDate;
use tracing::{debug, warn};

use super::{FilterChange, FilterHost};
use crate::codec::{decode_date_range, encode_date_range};
use crate::core::presets::resolve_ranges;
use crate::core::types::DEFAULT_DATE_FORMAT;
use crate::core::{ColumnFilterSpec, DateFormat, FilterValue, RangePreset};
use crate::error::FilterError;

/// Popup range picker attached to a display element; the search input holds
/// the formatted range
#[derive(Debug, Clone)]
pub struct DateRangeBinding {
    format: DateFormat,
    separator: String,
    presets: Vec<RangePreset>,
    applied: Option<(NaiveDate, NaiveDate)>,
}

impl DateRangeBinding {
    pub fn new(spec: &ColumnFilterSpec, today: NaiveDate) -> Result<Self, FilterError> {
        let format = match DateFormat::new(spec.date_format()) {
            Ok(format) => format,
            Err(e) => {
                warn!("{e}; falling back to {DEFAULT_DATE_FORMAT}");
                DateFormat::new(DEFAULT_DATE_FORMAT)?
            }
        };
        Ok(Self {
            format,
            separator: spec.range_separator().to_string(),
            presets: resolve_ranges(&spec.ranges, today),
            applied: None,
        })
    }

    pub fn presets(&self) -> &[RangePreset] {
        &self.presets
    }

    /// Range last written to the search input
    pub fn applied(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.applied
    }

    pub fn bind<H: FilterHost>(&self, column: usize, host: &mut H) {
        host.set_range_presets(column, &self.presets);
    }

    /// Show a stored range token on the display element.
    pub fn restore<H: FilterHost>(&mut self, column: usize, token: &str, host: &mut H) -> bool {
        let bounds = decode_date_range(token, &self.separator, &self.format);
        let (Some(start), Some(end)) = (bounds.from, bounds.to) else {
            return false;
        };
        host.set_range_display(column, &self.encode(start, end));
        self.applied = Some((start, end));
        true
    }

    /// Apply from the picker. The search input is only rewritten, and a
    /// re-query triggered, when the range changed or the input was empty.
    pub fn on_apply<H: FilterHost>(
        &mut self,
        column: usize,
        start: NaiveDate,
        end: NaiveDate,
        host: &mut H,
    ) -> Option<FilterChange> {
        let (start, end) = if start > end {
            warn!(column, "{}; swapping ends", FilterError::InconsistentDateRange { from: start, to: end });
            (end, start)
        } else {
            (start, end)
        };

        let token = self.encode(start, end);
        host.set_range_display(column, &token);

        let unchanged = self.applied == Some((start, end));
        if unchanged && !host.search_value(column).is_empty() {
            debug!(column, "range unchanged, skipping re-query");
            return None;
        }

        host.set_search_value(column, &token);
        host.dispatch_change(column);
        self.applied = Some((start, end));

        Some(FilterChange {
            column,
            token,
            value: FilterValue::DateRange(start, end),
            combinator: None,
        })
    }

    /// Cancel from the picker: clear everything and re-query unfiltered.
    pub fn on_cancel<H: FilterHost>(&mut self, column: usize, host: &mut H) -> FilterChange {
        host.set_range_display(column, "");
        host.set_search_value(column, "");
        host.dispatch_change(column);
        self.applied = None;

        FilterChange {
            column,
            token: String::new(),
            value: FilterValue::NoFilter,
            combinator: None,
        }
    }

    fn encode(&self, start: NaiveDate, end: NaiveDate) -> String {
        encode_date_range(start, end, &self.format, &self.separator)
    }
}
