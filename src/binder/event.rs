use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::{Combinator, PickerRole};

/// User interactions with a column's filter control.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ControlEvent {
    /// An option was toggled; `selected` is the control's full selection
    /// afterwards, `combinator` the AND/OR switch if the control shows one
    SelectionChanged {
        column: usize,
        selected: Vec<String>,
        combinator: Option<Combinator>,
    },
    /// A date was picked in the "from" or "to" picker
    DatePicked {
        column: usize,
        role: PickerRole,
        date: NaiveDate,
    },
    /// The range picker's apply button
    RangeApplied {
        column: usize,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// The range picker's cancel button
    RangeCancelled { column: usize },
    /// Text typed into a text filter
    TextChanged { column: usize, text: String },
}

impl ControlEvent {
    pub fn column(&self) -> usize {
        match self {
            ControlEvent::SelectionChanged { column, .. }
            | ControlEvent::DatePicked { column, .. }
            | ControlEvent::RangeApplied { column, .. }
            | ControlEvent::RangeCancelled { column }
            | ControlEvent::TextChanged { column, .. } => *column,
        }
    }
}
