//! Sentinel-prefixed tokens shared by a column's "from" and "to" pickers.
//!
//! ```text
//! *f-*2024-01-01             from only
//! *-t*|2024-01-31            to only
//! *ft*2024-01-01|2024-01-31  from and to
//! ```

use chrono::NaiveDate;
use tracing::warn;

use crate::core::date_format::ISO_DATE;
use crate::core::{DateBounds, PickerRole};
use crate::error::FilterError;

const FROM_ONLY: &str = "*f-*";
const TO_ONLY: &str = "*-t*";
const FROM_TO: &str = "*ft*";

fn iso(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

fn parse_iso(token: &str, text: &str) -> Result<NaiveDate, FilterError> {
    NaiveDate::parse_from_str(text, ISO_DATE)
        .map_err(|e| FilterError::malformed(token, format!("bad date {text:?}: {e}")))
}

/// Encode a date filter; empty when neither end is set.
pub fn encode_single_date(from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    match (from, to) {
        (None, None) => String::new(),
        (Some(from), None) => format!("{FROM_ONLY}{}", iso(from)),
        (None, Some(to)) => format!("{TO_ONLY}|{}", iso(to)),
        (Some(from), Some(to)) => format!("{FROM_TO}{}|{}", iso(from), iso(to)),
    }
}

/// Strict decode; `Err` on an unknown sentinel or unparseable date.
pub fn try_decode_single_date(token: &str) -> Result<DateBounds, FilterError> {
    if token.is_empty() {
        return Ok(DateBounds::default());
    }

    let (prefix, rest) = match token.get(..4) {
        Some(prefix) if token.starts_with('*') => (prefix, &token[4..]),
        _ => return Err(FilterError::malformed(token, "missing date sentinel")),
    };

    match prefix {
        FROM_ONLY => Ok(DateBounds::new(Some(parse_iso(token, rest)?), None)),
        TO_ONLY => {
            let to = rest
                .strip_prefix('|')
                .ok_or_else(|| FilterError::malformed(token, "expected '|' before date"))?;
            Ok(DateBounds::new(None, Some(parse_iso(token, to)?)))
        }
        FROM_TO => {
            let (from, to) = rest
                .split_once('|')
                .ok_or_else(|| FilterError::malformed(token, "expected two dates"))?;
            Ok(DateBounds::new(
                Some(parse_iso(token, from)?),
                Some(parse_iso(token, to)?),
            ))
        }
        other => Err(FilterError::malformed(
            token,
            format!("unknown sentinel {other:?}"),
        )),
    }
}

/// Decode a date token; unset (and logged) on anything malformed.
pub fn decode_single_date(token: &str) -> DateBounds {
    match try_decode_single_date(token) {
        Ok(bounds) => bounds,
        Err(e) => {
            warn!("ignoring date token: {e}");
            DateBounds::default()
        }
    }
}

/// Replace one end of the filter stored in `token`, keeping the other end.
pub fn update_single_date(token: &str, role: PickerRole, date: NaiveDate) -> DateBounds {
    let current = decode_single_date(token);
    match role {
        PickerRole::From => current.with_from(date),
        PickerRole::To => current.with_to(date),
    }
}

pub fn update_from(token: &str, from: NaiveDate) -> String {
    let bounds = update_single_date(token, PickerRole::From, from);
    encode_single_date(bounds.from, bounds.to)
}

pub fn update_to(token: &str, to: NaiveDate) -> String {
    let bounds = update_single_date(token, PickerRole::To, to);
    encode_single_date(bounds.from, bounds.to)
}
