//! Moment-style display formats (`DD MMM YYYY`) translated to chrono strftime.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// ISO date format used by the single-date token grammar.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// A display/parse format for range-picker dates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    strftime: String,
}

impl DateFormat {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        let strftime = translate(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            strftime,
        })
    }

    /// The moment-style pattern as configured
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The equivalent chrono format string
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.strftime).to_string()
    }

    pub fn parse(&self, text: &str) -> Result<NaiveDate, FilterError> {
        NaiveDate::parse_from_str(text.trim(), &self.strftime).map_err(|e| {
            FilterError::malformed(text, format!("expected date as {}: {e}", self.pattern))
        })
    }
}

impl FromStr for DateFormat {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn translate(pattern: &str) -> Result<String, FilterError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let (mut year, mut month, mut day) = (false, false, false);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // [text] is copied through untouched
        if c == '[' {
            let Some(len) = chars[i + 1..].iter().position(|&x| x == ']') else {
                return Err(FilterError::InvalidDateFormat(pattern.to_string()));
            };
            for &lit in &chars[i + 1..i + 1 + len] {
                push_literal(&mut out, lit);
            }
            i += len + 2;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let token = match (c, run) {
            ('Y', n) if n >= 4 => Some(("%Y", 4)),
            ('Y', n) if n >= 2 => Some(("%y", 2)),
            ('M', n) if n >= 4 => Some(("%B", 4)),
            ('M', 3) => Some(("%b", 3)),
            ('M', 2) => Some(("%m", 2)),
            ('M', 1) => Some(("%-m", 1)),
            ('D', n) if n >= 2 => Some(("%d", 2)),
            ('D', 1) => Some(("%-d", 1)),
            ('d', n) if n >= 4 => Some(("%A", 4)),
            ('d', 3) => Some(("%a", 3)),
            _ => None,
        };

        match token {
            Some((spec, used)) => {
                match c {
                    'Y' => year = true,
                    'M' => month = true,
                    'D' => day = true,
                    _ => {}
                }
                out.push_str(spec);
                i += used;
            }
            None => {
                push_literal(&mut out, c);
                i += 1;
            }
        }
    }

    if !(year && month && day) {
        return Err(FilterError::InvalidDateFormat(pattern.to_string()));
    }
    Ok(out)
}
