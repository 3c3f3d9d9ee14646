//! `"<start><separator><end>"` tokens written by the range picker.

use chrono::NaiveDate;
use tracing::warn;

use crate::core::{DateBounds, DateFormat};
use crate::error::FilterError;

pub fn encode_date_range(
    from: NaiveDate,
    to: NaiveDate,
    format: &DateFormat,
    separator: &str,
) -> String {
    format!("{}{}{}", format.format(from), separator, format.format(to))
}

/// Strict decode; `Err` unless the token splits into exactly two dates.
pub fn try_decode_date_range(
    token: &str,
    separator: &str,
    format: &DateFormat,
) -> Result<DateBounds, FilterError> {
    if token.trim().is_empty() {
        return Ok(DateBounds::default());
    }
    if separator.is_empty() {
        return Err(FilterError::malformed(token, "empty range separator"));
    }

    let pieces: Vec<&str> = token.split(separator).collect();
    let [start, end] = pieces.as_slice() else {
        return Err(FilterError::malformed(
            token,
            format!("expected two dates separated by {separator:?}, got {} pieces", pieces.len()),
        ));
    };

    Ok(DateBounds::new(
        Some(format.parse(start)?),
        Some(format.parse(end)?),
    ))
}

/// Decode a range token; unset (and logged) on anything malformed.
pub fn decode_date_range(token: &str, separator: &str, format: &DateFormat) -> DateBounds {
    match try_decode_date_range(token, separator, format) {
        Ok(bounds) => bounds,
        Err(e) => {
            warn!("ignoring date range token: {e}");
            DateBounds::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn display() -> DateFormat {
        DateFormat::new("DD MMM YYYY").unwrap()
    }

    #[test]
    fn encodes_display_range() {
        let token = encode_date_range(ymd(2024, 1, 1), ymd(2024, 1, 7), &display(), " - ");
        assert_eq!(token, "01 Jan 2024 - 07 Jan 2024");
    }

    #[test]
    fn decodes_display_range() {
        assert_eq!(
            decode_date_range("01 Jan 2024 - 07 Jan 2024", " - ", &display()),
            DateBounds::new(Some(ymd(2024, 1, 1)), Some(ymd(2024, 1, 7)))
        );
    }

    #[test]
    fn custom_separator_and_format() {
        let fmt = DateFormat::new("YYYY/MM/DD").unwrap();
        let token = encode_date_range(ymd(2023, 12, 30), ymd(2024, 1, 2), &fmt, " to ");
        assert_eq!(token, "2023/12/30 to 2024/01/02");
        assert_eq!(
            decode_date_range(&token, " to ", &fmt),
            DateBounds::new(Some(ymd(2023, 12, 30)), Some(ymd(2024, 1, 2)))
        );
    }

    #[test]
    fn wrong_piece_count_is_unset() {
        for token in [
            "01 Jan 2024",
            "01 Jan 2024 - 07 Jan 2024 - 09 Jan 2024",
            "01 Jan 2024 - someday",
        ] {
            assert!(try_decode_date_range(token, " - ", &display()).is_err());
            assert!(decode_date_range(token, " - ", &display()).is_unset());
        }
        assert!(decode_date_range("", " - ", &display()).is_unset());
    }
}
