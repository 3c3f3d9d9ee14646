use chrono::NaiveDate;

use crate::core::{PickerRole, RangePreset};

/// The page-side collaborator a [`FilterBinder`](super::FilterBinder) drives.
///
/// Implemented over the table widget and its filter row. Only the search
/// input methods are required; control hooks default to no-ops for hosts
/// whose columns lack that control.
pub trait FilterHost {
    /// Current content of the column's search input
    fn search_value(&self, column: usize) -> String;

    /// Overwrite the column's search input without notifying anyone
    fn set_search_value(&mut self, column: usize, value: &str);

    /// Fire the search input's change notification.
    ///
    /// The table widget listens for it and issues the next server query with
    /// the current search inputs.
    fn dispatch_change(&mut self, column: usize);

    /// Set the select control up as single or multiple choice, with or
    /// without the AND/OR toggle in its dropdown
    fn configure_select(&mut self, _column: usize, _multiple: bool, _include_and_or: bool) {}

    /// Mark `values` as selected in the column's select control
    fn select_options(&mut self, _column: usize, _values: &[String]) {}

    /// Show `date` (or nothing) as the picked value of a date picker
    fn set_picker_date(&mut self, _column: usize, _role: PickerRole, _date: Option<NaiveDate>) {}

    /// Earliest date the picker offers
    fn set_picker_min(&mut self, _column: usize, _role: PickerRole, _date: Option<NaiveDate>) {}

    /// Latest date the picker offers
    fn set_picker_max(&mut self, _column: usize, _role: PickerRole, _date: Option<NaiveDate>) {}

    /// Text of the decorative element the range picker is attached to
    fn set_range_display(&mut self, _column: usize, _text: &str) {}

    /// Shortcut table of the range picker
    fn set_range_presets(&mut self, _column: usize, _presets: &[RangePreset]) {}
}
