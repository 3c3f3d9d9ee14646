use tracing::{debug, warn};

use super::{FilterChange, FilterHost};
use crate::codec::{decode_selection, encode_selection, is_selection_token};
use crate::core::{ColumnFilterSpec, Combinator, FilterValue};

/// Select or multiselect control of one column
#[derive(Debug, Clone)]
pub struct SelectBinding {
    spec: ColumnFilterSpec,
    selected: Vec<String>,
    combinator: Option<Combinator>,
}

impl SelectBinding {
    pub fn new(spec: ColumnFilterSpec) -> Self {
        let combinator = spec.include_and_or.then(Combinator::default);
        Self {
            spec,
            selected: Vec::new(),
            combinator,
        }
    }

    /// Values currently applied; empty means every option ("all")
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn combinator(&self) -> Option<Combinator> {
        self.combinator
    }

    pub fn bind<H: FilterHost>(&self, column: usize, host: &mut H) {
        host.configure_select(column, self.spec.is_multiple(), self.spec.include_and_or);
    }

    /// Pre-select the options named by a stored token.
    ///
    /// Values the option list no longer offers are skipped. Returns whether
    /// anything was selected.
    pub fn restore<H: FilterHost>(&mut self, column: usize, token: &str, host: &mut H) -> bool {
        if !is_selection_token(token) {
            return false;
        }
        let mut values = decode_selection(token);
        values.retain(|v| {
            let known = self.spec.has_option(v);
            if !known {
                debug!(column, value = %v, "stored value is no longer an option");
            }
            known
        });
        if values.is_empty() {
            return false;
        }
        host.select_options(column, &values);
        self.selected = values;
        true
    }

    pub fn on_selection<H: FilterHost>(
        &mut self,
        column: usize,
        mut selected: Vec<String>,
        combinator: Option<Combinator>,
        host: &mut H,
    ) -> FilterChange {
        if !self.spec.is_multiple() && selected.len() > 1 {
            warn!(column, count = selected.len(), "single select reported several values, keeping the first");
            selected.truncate(1);
        }
        if self.spec.include_and_or {
            self.combinator = Some(combinator.unwrap_or_default());
        }

        let token = encode_selection(selected.as_slice(), self.spec.option_values().as_slice());
        let value = FilterValue::decode(&self.spec, &token);
        self.selected = match &value {
            FilterValue::Values(values) => values.clone(),
            _ => Vec::new(),
        };

        host.set_search_value(column, &token);
        host.dispatch_change(column);

        FilterChange {
            column,
            token,
            value,
            combinator: self.combinator,
        }
    }
}
