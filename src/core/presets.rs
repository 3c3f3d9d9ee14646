//! Preset shortcuts offered by the date-range picker.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// A resolved shortcut: label plus inclusive start/end dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePreset {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Shortcuts relative to the current day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum PresetName {
    #[strum(serialize = "Today")]
    #[serde(rename = "Today")]
    Today,
    #[strum(serialize = "Yesterday")]
    #[serde(rename = "Yesterday")]
    Yesterday,
    #[strum(serialize = "Tomorrow")]
    #[serde(rename = "Tomorrow")]
    Tomorrow,
    #[strum(serialize = "Last 7 Days")]
    #[serde(rename = "Last 7 Days")]
    Last7Days,
    #[strum(serialize = "Last 14 Days")]
    #[serde(rename = "Last 14 Days")]
    Last14Days,
    #[strum(serialize = "Last 30 Days")]
    #[serde(rename = "Last 30 Days")]
    Last30Days,
    #[strum(serialize = "Last 365 Days")]
    #[serde(rename = "Last 365 Days")]
    Last365Days,
    #[strum(serialize = "This Week")]
    #[serde(rename = "This Week")]
    ThisWeek,
    #[strum(serialize = "This Month")]
    #[serde(rename = "This Month")]
    ThisMonth,
    #[strum(serialize = "This Quarter")]
    #[serde(rename = "This Quarter")]
    ThisQuarter,
    #[strum(serialize = "This Year")]
    #[serde(rename = "This Year")]
    ThisYear,
    #[strum(serialize = "Last Week")]
    #[serde(rename = "Last Week")]
    LastWeek,
    #[strum(serialize = "Last Month")]
    #[serde(rename = "Last Month")]
    LastMonth,
    #[strum(serialize = "Last Quarter")]
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[strum(serialize = "Last Year")]
    #[serde(rename = "Last Year")]
    LastYear,
    #[strum(serialize = "Week To Date")]
    #[serde(rename = "Week To Date")]
    WeekToDate,
    #[strum(serialize = "Month To Date")]
    #[serde(rename = "Month To Date")]
    MonthToDate,
    #[strum(serialize = "Quarter To Date")]
    #[serde(rename = "Quarter To Date")]
    QuarterToDate,
    #[strum(serialize = "Year To Date")]
    #[serde(rename = "Year To Date")]
    YearToDate,
    #[strum(serialize = "Next Week")]
    #[serde(rename = "Next Week")]
    NextWeek,
    #[strum(serialize = "Next Month")]
    #[serde(rename = "Next Month")]
    NextMonth,
    #[strum(serialize = "Next Quarter")]
    #[serde(rename = "Next Quarter")]
    NextQuarter,
    #[strum(serialize = "Next Year")]
    #[serde(rename = "Next Year")]
    NextYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

fn period_start(date: NaiveDate, period: Period) -> Option<NaiveDate> {
    match period {
        // weeks start on Monday
        Period::Week => date.checked_sub_days(Days::new(u64::from(
            date.weekday().num_days_from_monday(),
        ))),
        Period::Month => date.with_day(1),
        Period::Quarter => NaiveDate::from_ymd_opt(date.year(), date.month0() / 3 * 3 + 1, 1),
        Period::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
    }
}

fn shift(date: NaiveDate, period: Period, forward: bool) -> Option<NaiveDate> {
    match (period, forward) {
        (Period::Week, true) => date.checked_add_days(Days::new(7)),
        (Period::Week, false) => date.checked_sub_days(Days::new(7)),
        (Period::Month, true) => date.checked_add_months(Months::new(1)),
        (Period::Month, false) => date.checked_sub_months(Months::new(1)),
        (Period::Quarter, true) => date.checked_add_months(Months::new(3)),
        (Period::Quarter, false) => date.checked_sub_months(Months::new(3)),
        (Period::Year, true) => date.checked_add_months(Months::new(12)),
        (Period::Year, false) => date.checked_sub_months(Months::new(12)),
    }
}

fn whole_period(date: NaiveDate, period: Period) -> Option<(NaiveDate, NaiveDate)> {
    let start = period_start(date, period)?;
    let end = shift(start, period, true)?.pred_opt()?;
    Some((start, end))
}

fn last_days(today: NaiveDate, n: u64) -> Option<(NaiveDate, NaiveDate)> {
    Some((today.checked_sub_days(Days::new(n - 1))?, today))
}

impl PresetName {
    pub fn all() -> Vec<PresetName> {
        PresetName::iter().collect()
    }

    /// Inclusive bounds of this shortcut as seen on `today`.
    pub fn bounds(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        use PresetName::*;
        match self {
            Today => Some((today, today)),
            Yesterday => today.pred_opt().map(|d| (d, d)),
            Tomorrow => today.succ_opt().map(|d| (d, d)),
            Last7Days => last_days(today, 7),
            Last14Days => last_days(today, 14),
            Last30Days => last_days(today, 30),
            Last365Days => last_days(today, 365),
            ThisWeek => whole_period(today, Period::Week),
            ThisMonth => whole_period(today, Period::Month),
            ThisQuarter => whole_period(today, Period::Quarter),
            ThisYear => whole_period(today, Period::Year),
            LastWeek => whole_period(shift(today, Period::Week, false)?, Period::Week),
            LastMonth => whole_period(shift(today, Period::Month, false)?, Period::Month),
            LastQuarter => whole_period(shift(today, Period::Quarter, false)?, Period::Quarter),
            LastYear => whole_period(shift(today, Period::Year, false)?, Period::Year),
            WeekToDate => Some((period_start(today, Period::Week)?, today)),
            MonthToDate => Some((period_start(today, Period::Month)?, today)),
            QuarterToDate => Some((period_start(today, Period::Quarter)?, today)),
            YearToDate => Some((period_start(today, Period::Year)?, today)),
            NextWeek => whole_period(shift(today, Period::Week, true)?, Period::Week),
            NextMonth => whole_period(shift(today, Period::Month, true)?, Period::Month),
            NextQuarter => whole_period(shift(today, Period::Quarter, true)?, Period::Quarter),
            NextYear => whole_period(shift(today, Period::Year, true)?, Period::Year),
        }
    }
}

/// A configured range shortcut: either a named preset or explicit dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeSpec {
    Named(PresetName),
    Explicit {
        label: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl RangeSpec {
    pub fn resolve(&self, today: NaiveDate) -> Option<RangePreset> {
        match self {
            RangeSpec::Named(name) => {
                let (start, end) = name.bounds(today)?;
                Some(RangePreset {
                    label: name.to_string(),
                    start,
                    end,
                })
            }
            RangeSpec::Explicit { label, start, end } => Some(RangePreset {
                label: label.clone(),
                start: *start,
                end: *end,
            }),
        }
    }
}

/// Resolve a column's shortcut table, skipping entries that fall off the calendar.
pub fn resolve_ranges(ranges: &[RangeSpec], today: NaiveDate) -> Vec<RangePreset> {
    ranges.iter().filter_map(|r| r.resolve(today)).collect()
}
