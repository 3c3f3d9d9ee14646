//! `^(v1|v2|...)$` tokens for select and multiselect columns.

use std::collections::HashSet;

use tracing::warn;

use crate::error::FilterError;

/// Token meaning "every value matches".
pub const NO_RESTRICTION: &str = "^(.*)$";

/// Empty alternation; never written, but read as no restriction.
const EMPTY_ALTERNATION: &str = "^()$";

/// True when the token has the shape of a selection token.
pub fn is_selection_token(token: &str) -> bool {
    token.starts_with('^')
}

/// Encode the selected option values of a column.
///
/// Values are listed in the order of `all_values` (the column's option list),
/// followed by any selected value the list does not know, in the order given.
/// An empty selection, or one covering every option, encodes as
/// [`NO_RESTRICTION`].
pub fn encode_selection<S, A>(selected: &[S], all_values: &[A]) -> String
where
    S: AsRef<str>,
    A: AsRef<str>,
{
    let all: Vec<&str> = all_values
        .iter()
        .map(|v| v.as_ref())
        .filter(|v| !v.is_empty())
        .collect();

    let mut chosen: Vec<&str> = Vec::with_capacity(selected.len());
    for value in selected {
        let value: &str = value.as_ref();
        if !value.is_empty() && !chosen.contains(&value) {
            chosen.push(value);
        }
    }
    if chosen.is_empty() {
        return NO_RESTRICTION.to_string();
    }

    let chosen_set: HashSet<&str> = chosen.iter().copied().collect();
    let all_set: HashSet<&str> = all.iter().copied().collect();
    if chosen_set == all_set {
        return NO_RESTRICTION.to_string();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let parts: Vec<String> = all
        .iter()
        .copied()
        .filter(|v| chosen_set.contains(v))
        .chain(chosen.iter().copied().filter(|v| !all_set.contains(v)))
        .filter(|v| seen.insert(*v))
        .map(regex::escape)
        .collect();

    format!("^({})$", parts.join("|"))
}

/// Strict decode; `Err` for tokens outside the alternation grammar.
pub fn try_decode_selection(token: &str) -> Result<Vec<String>, FilterError> {
    if token.is_empty() || token == NO_RESTRICTION || token == EMPTY_ALTERNATION {
        return Ok(Vec::new());
    }

    let inner = token
        .strip_prefix("^(")
        .and_then(|rest| rest.strip_suffix(")$"))
        .ok_or_else(|| FilterError::malformed(token, "expected ^(...)$"))?;

    let mut values: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => return Err(FilterError::malformed(token, "dangling escape")),
            },
            '|' => push_value(&mut values, std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    push_value(&mut values, current);

    Ok(values)
}

fn push_value(values: &mut Vec<String>, value: String) {
    if !value.is_empty() && !values.contains(&value) {
        values.push(value);
    }
}

/// Selected values of a stored token; empty on anything unparseable.
pub fn decode_selection(token: &str) -> Vec<String> {
    match try_decode_selection(token) {
        Ok(values) => values,
        Err(e) => {
            warn!("ignoring selection token: {e}");
            Vec::new()
        }
    }
}
