//! Binds each column's filter control to its search input.
//!
//! The binder turns [`ControlEvent`]s into tokens through the codec, writes
//! them into the host's search input and fires the input's change
//! notification. It never surfaces an error: failures are logged and leave
//! the affected column unfiltered.

pub mod date;
pub mod daterange;
pub mod event;
pub mod host;
pub mod select;

pub use date::DateBinding;
pub use daterange::DateRangeBinding;
pub use event::ControlEvent;
pub use host::FilterHost;
pub use select::SelectBinding;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::TableConfig;
use crate::core::{ColumnFilterSpec, Combinator, FilterKind, FilterValue};
use crate::error::FilterError;
use crate::state::PersistedState;

/// What a handled event wrote into a column's search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChange {
    pub column: usize,
    pub token: String,
    pub value: FilterValue,
    /// AND/OR switch of the select control, read fresh from the event
    pub combinator: Option<Combinator>,
}

/// Per-column control state
#[derive(Debug, Clone)]
pub enum ColumnBinding {
    Text,
    Select(SelectBinding),
    Date(DateBinding),
    DateRange(DateRangeBinding),
}

impl ColumnBinding {
    fn build(
        column: usize,
        spec: &ColumnFilterSpec,
        latest: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Option<Self> {
        match spec.kind {
            FilterKind::Text => Some(ColumnBinding::Text),
            FilterKind::Select | FilterKind::MultiSelect => {
                Some(ColumnBinding::Select(SelectBinding::new(spec.clone())))
            }
            FilterKind::Date => Some(ColumnBinding::Date(DateBinding::new(latest))),
            FilterKind::DateRange => match DateRangeBinding::new(spec, today) {
                Ok(binding) => Some(ColumnBinding::DateRange(binding)),
                Err(e) => {
                    warn!(column, "range filter disabled: {e}");
                    None
                }
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnBinding::Text => "text",
            ColumnBinding::Select(_) => "select",
            ColumnBinding::Date(_) => "date",
            ColumnBinding::DateRange(_) => "daterange",
        }
    }
}

/// Filter controls of one table
#[derive(Debug, Clone)]
pub struct FilterBinder {
    config: TableConfig,
    bindings: Vec<Option<ColumnBinding>>,
    today: NaiveDate,
}

impl FilterBinder {
    pub fn new(config: TableConfig) -> Self {
        Self::new_at(config, Local::now().date_naive())
    }

    /// Build with an explicit current day (picker caps and range presets
    /// are resolved against it)
    pub fn new_at(config: TableConfig, today: NaiveDate) -> Self {
        let latest = config.defaults.max_date_today.then_some(today);
        let bindings = config
            .columns
            .iter()
            .enumerate()
            .map(|(column, spec)| {
                spec.as_ref()
                    .and_then(|spec| ColumnBinding::build(column, spec, latest, today))
            })
            .collect();
        Self {
            config,
            bindings,
            today,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn binding(&self, column: usize) -> Option<&ColumnBinding> {
        self.bindings.get(column).and_then(Option::as_ref)
    }

    /// Configure controls on the host: select mode, date caps and range
    /// shortcuts.
    pub fn bind<H: FilterHost>(&self, host: &mut H) {
        for (column, binding) in self.bindings.iter().enumerate() {
            match binding {
                Some(ColumnBinding::Select(select)) => select.bind(column, host),
                Some(ColumnBinding::Date(date)) => date.bind(column, host),
                Some(ColumnBinding::DateRange(range)) => range.bind(column, host),
                Some(ColumnBinding::Text) | None => {}
            }
        }
    }

    /// Bind the host, then restore from the table's cookie when a `Cookie`
    /// header is available. Returns the number of controls restored.
    pub fn initialize<H: FilterHost>(&mut self, host: &mut H, cookie_header: Option<&str>) -> usize {
        self.bind(host);
        match cookie_header {
            Some(header) => self.restore_from_cookies(host, header),
            None => 0,
        }
    }

    /// Locate this table's persisted state among `cookie_header` and restore
    /// from it. Missing or malformed state restores nothing.
    pub fn restore_from_cookies<H: FilterHost>(&mut self, host: &mut H, cookie_header: &str) -> usize {
        let name = self.config.cookie_name();
        match PersistedState::from_cookie_header(cookie_header, &name) {
            Ok(state) => self.restore(host, &state),
            Err(e) => {
                info!(cookie = %name, "skipping filter restore: {e}");
                0
            }
        }
    }

    /// Put each control into the state its stored token describes.
    pub fn restore<H: FilterHost>(&mut self, host: &mut H, state: &PersistedState) -> usize {
        let mut restored = 0;
        for descriptor in state.descriptors() {
            if descriptor.token.is_empty() {
                continue;
            }
            let Some(Some(binding)) = self.bindings.get_mut(descriptor.index) else {
                continue;
            };
            let column = descriptor.index;
            let token = descriptor.token;
            let applied = match binding {
                ColumnBinding::Select(select) => select.restore(column, token, host),
                ColumnBinding::Date(date) => date.restore(column, token, host),
                ColumnBinding::DateRange(range) => range.restore(column, token, host),
                // the table widget restores its own text inputs
                ColumnBinding::Text => false,
            };
            if applied {
                restored += 1;
            }
        }
        info!(restored, "restored filter controls");
        restored
    }

    /// Route one control event. `None` when nothing was written, including
    /// when the event could not be applied (logged).
    pub fn handle_event<H: FilterHost>(&mut self, host: &mut H, event: ControlEvent) -> Option<FilterChange> {
        match self.try_handle_event(host, event) {
            Ok(Some(change)) => {
                debug!(
                    column = change.column,
                    token = %change.token,
                    cleared = change.value.is_unset(),
                    "filter changed"
                );
                Some(change)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("ignoring filter event: {e}");
                None
            }
        }
    }

    fn try_handle_event<H: FilterHost>(
        &mut self,
        host: &mut H,
        event: ControlEvent,
    ) -> Result<Option<FilterChange>, FilterError> {
        let column = event.column();
        let binding = self
            .bindings
            .get_mut(column)
            .and_then(Option::as_mut)
            .ok_or(FilterError::UnknownColumn(column))?;

        match (binding, event) {
            (
                ColumnBinding::Select(select),
                ControlEvent::SelectionChanged {
                    selected,
                    combinator,
                    ..
                },
            ) => Ok(Some(select.on_selection(column, selected, combinator, host))),
            (ColumnBinding::Date(date), ControlEvent::DatePicked { role, date: picked, .. }) => {
                Ok(Some(date.on_pick(column, role, picked, host)))
            }
            (ColumnBinding::DateRange(range), ControlEvent::RangeApplied { start, end, .. }) => {
                Ok(range.on_apply(column, start, end, host))
            }
            (ColumnBinding::DateRange(range), ControlEvent::RangeCancelled { .. }) => {
                Ok(Some(range.on_cancel(column, host)))
            }
            (ColumnBinding::Text, ControlEvent::TextChanged { text, .. }) => {
                host.set_search_value(column, &text);
                host.dispatch_change(column);
                let value = if text.is_empty() {
                    FilterValue::NoFilter
                } else {
                    FilterValue::Text(text.clone())
                };
                Ok(Some(FilterChange {
                    column,
                    token: text,
                    value,
                    combinator: None,
                }))
            }
            (binding, event) => Err(FilterError::UnexpectedEvent {
                column,
                kind: binding.name().to_string(),
                event: event.to_string(),
            }),
        }
    }

    /// Decoded filter currently held by a column's search input
    pub fn current_value<H: FilterHost>(&self, host: &H, column: usize) -> FilterValue {
        match self.config.column(column) {
            Some(spec) => FilterValue::decode(spec, &host.search_value(column)),
            None => FilterValue::NoFilter,
        }
    }

    /// Values a column's select control currently applies; empty means "all"
    pub fn selected(&self, column: usize) -> &[String] {
        match self.binding(column) {
            Some(ColumnBinding::Select(select)) => select.selected(),
            _ => &[],
        }
    }

    /// AND/OR switch last reported by a column's select control
    pub fn combinator(&self, column: usize) -> Option<Combinator> {
        match self.binding(column) {
            Some(ColumnBinding::Select(select)) => select.combinator(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PickerRole, SelectOption};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockHost {
        inputs: HashMap<usize, String>,
        dispatched: Vec<usize>,
        selected: HashMap<usize, Vec<String>>,
        maxes: HashMap<(usize, PickerRole), Option<NaiveDate>>,
        mins: HashMap<(usize, PickerRole), Option<NaiveDate>>,
    }

    impl FilterHost for MockHost {
        fn search_value(&self, column: usize) -> String {
            self.inputs.get(&column).cloned().unwrap_or_default()
        }

        fn set_search_value(&mut self, column: usize, value: &str) {
            self.inputs.insert(column, value.to_string());
        }

        fn dispatch_change(&mut self, column: usize) {
            self.dispatched.push(column);
        }

        fn select_options(&mut self, column: usize, values: &[String]) {
            self.selected.insert(column, values.to_vec());
        }

        fn set_picker_min(&mut self, column: usize, role: PickerRole, date: Option<NaiveDate>) {
            self.mins.insert((column, role), date);
        }

        fn set_picker_max(&mut self, column: usize, role: PickerRole, date: Option<NaiveDate>) {
            self.maxes.insert((column, role), date);
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn binder() -> FilterBinder {
        let config = TableConfig::new(
            "staff",
            vec![
                None,
                Some(ColumnFilterSpec::text()),
                Some(
                    ColumnFilterSpec::multiselect(vec![
                        SelectOption::new("A", "A"),
                        SelectOption::new("B", "B"),
                    ])
                    .with_and_or(),
                ),
                Some(ColumnFilterSpec::date()),
            ],
        );
        FilterBinder::new_at(config, ymd(2024, 6, 1))
    }

    #[test]
    fn bind_caps_date_pickers_at_today() {
        let binder = binder();
        let mut host = MockHost::default();
        binder.bind(&mut host);
        assert_eq!(host.maxes.get(&(3, PickerRole::From)), Some(&Some(ymd(2024, 6, 1))));
        assert_eq!(host.maxes.get(&(3, PickerRole::To)), Some(&Some(ymd(2024, 6, 1))));
    }

    #[test]
    fn text_is_written_verbatim() {
        let mut binder = binder();
        let mut host = MockHost::default();
        let change = binder
            .handle_event(&mut host, ControlEvent::TextChanged { column: 1, text: "smi".into() })
            .unwrap();
        assert_eq!(change.token, "smi");
        assert_eq!(host.search_value(1), "smi");
        assert_eq!(host.dispatched, vec![1]);
    }

    #[test]
    fn combinator_is_read_from_each_event() {
        let mut binder = binder();
        let mut host = MockHost::default();
        assert_eq!(binder.combinator(2), Some(Combinator::Or));

        let change = binder
            .handle_event(
                &mut host,
                ControlEvent::SelectionChanged {
                    column: 2,
                    selected: vec!["B".into()],
                    combinator: Some(Combinator::And),
                },
            )
            .unwrap();
        assert_eq!(change.combinator, Some(Combinator::And));
        assert_eq!(change.token, "^(B)$");
        assert_eq!(binder.combinator(2), Some(Combinator::And));
        assert_eq!(binder.combinator(1), None);
        assert_eq!(binder.selected(2), ["B".to_string()]);
    }

    #[test]
    fn unknown_column_and_wrong_event_are_ignored() {
        let mut binder = binder();
        let mut host = MockHost::default();
        assert!(binder
            .handle_event(&mut host, ControlEvent::RangeCancelled { column: 0 })
            .is_none());
        assert!(binder
            .handle_event(&mut host, ControlEvent::RangeCancelled { column: 9 })
            .is_none());
        assert!(binder
            .handle_event(
                &mut host,
                ControlEvent::DatePicked { column: 2, role: PickerRole::From, date: ymd(2024, 1, 1) },
            )
            .is_none());
        assert!(host.inputs.is_empty());
        assert!(host.dispatched.is_empty());
    }

    #[test]
    fn restore_selects_known_values_only() {
        let mut binder = binder();
        let mut host = MockHost::default();
        let state = PersistedState::from_json(
            r#"{"aoSearchCols": [
                {"sSearch": ""},
                {"sSearch": "smith"},
                {"sSearch": "^(B|Z)$"},
                {"sSearch": "*ft*2024-01-01|2024-01-31"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(binder.restore(&mut host, &state), 2);
        assert_eq!(host.selected.get(&2), Some(&vec!["B".to_string()]));
        assert_eq!(binder.selected(2), ["B".to_string()]);
        assert!(binder.selected(1).is_empty());
        assert_eq!(host.mins.get(&(3, PickerRole::To)), Some(&Some(ymd(2024, 1, 1))));
        assert_eq!(host.maxes.get(&(3, PickerRole::From)), Some(&Some(ymd(2024, 1, 31))));
        assert!(host.dispatched.is_empty());
    }

    #[test]
    fn current_value_decodes_host_input() {
        let binder = binder();
        let mut host = MockHost::default();
        host.set_search_value(3, "*-t*|2024-02-02");
        assert_eq!(binder.current_value(&host, 3), FilterValue::DateTo(ymd(2024, 2, 2)));
        assert_eq!(binder.current_value(&host, 0), FilterValue::NoFilter);
    }
}
