use chrono::NaiveDate;
use tracing::warn;

use super::{FilterChange, FilterHost};
use crate::codec::{decode_single_date, encode_single_date, update_single_date};
use crate::core::{DateBounds, FilterValue, PickerRole};

/// "From" and "to" pickers sharing one column's search input
#[derive(Debug, Clone, Default)]
pub struct DateBinding {
    latest: Option<NaiveDate>,
}

impl DateBinding {
    /// `latest` caps both pickers (typically today)
    pub fn new(latest: Option<NaiveDate>) -> Self {
        Self { latest }
    }

    pub fn bind<H: FilterHost>(&self, column: usize, host: &mut H) {
        if let Some(latest) = self.latest {
            host.set_picker_max(column, PickerRole::From, Some(latest));
            host.set_picker_max(column, PickerRole::To, Some(latest));
        }
    }

    /// Show a stored token in the pickers. Returns whether it carried a date.
    pub fn restore<H: FilterHost>(&self, column: usize, token: &str, host: &mut H) -> bool {
        let bounds = decode_single_date(token);
        if bounds.is_unset() {
            return false;
        }
        if let Some(from) = bounds.from {
            host.set_picker_date(column, PickerRole::From, Some(from));
        }
        if let Some(to) = bounds.to {
            host.set_picker_date(column, PickerRole::To, Some(to));
        }
        self.clamp(column, bounds, host);
        true
    }

    pub fn on_pick<H: FilterHost>(
        &self,
        column: usize,
        role: PickerRole,
        date: NaiveDate,
        host: &mut H,
    ) -> FilterChange {
        let current = host.search_value(column);
        let bounds = update_single_date(&current, role, date);
        if let Err(e) = bounds.check_order() {
            warn!(column, "{e}; keeping the edit and clamping the {} picker", role.paired());
        }

        let token = encode_single_date(bounds.from, bounds.to);
        host.set_search_value(column, &token);
        host.set_picker_date(column, role, Some(date));
        match role {
            PickerRole::From => host.set_picker_min(column, PickerRole::To, Some(date)),
            PickerRole::To => host.set_picker_max(column, PickerRole::From, Some(date)),
        }
        host.dispatch_change(column);

        FilterChange {
            column,
            token,
            value: FilterValue::from(bounds),
            combinator: None,
        }
    }

    fn clamp<H: FilterHost>(&self, column: usize, bounds: DateBounds, host: &mut H) {
        if let Some(from) = bounds.from {
            host.set_picker_min(column, PickerRole::To, Some(from));
        }
        if let Some(to) = bounds.to {
            host.set_picker_max(column, PickerRole::From, Some(to));
        }
    }
}
