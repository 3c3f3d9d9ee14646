use std::{env, path::Path, path::PathBuf};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use derive_deref::{Deref, DerefMut};
use directories::BaseDirs;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::core::presets::{PresetName, RangeSpec};
use crate::core::types::{DEFAULT_DATE_FORMAT, DEFAULT_RANGE_SEPARATOR};
use crate::core::{ColumnFilterSpec, FilterKind};
use crate::state;

const CONFIG: &str = include_str!("../.config/config.json5");

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

/// Crate-wide defaults applied to every table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_range_separator")]
    pub range_separator: String,
    #[serde(default = "default_cookie_prefix")]
    pub cookie_prefix: String,
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
    #[serde(default = "default_true")]
    pub max_date_today: bool,
    #[serde(default = "default_ranges")]
    pub default_ranges: Vec<RangeSpec>,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_range_separator() -> String {
    DEFAULT_RANGE_SEPARATOR.to_string()
}

fn default_cookie_prefix() -> String {
    "dt-".to_string()
}

fn default_table_prefix() -> String {
    "listable-table-".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ranges() -> Vec<RangeSpec> {
    use PresetName::*;
    [Today, Yesterday, Last7Days, Last30Days, ThisMonth, LastMonth, YearToDate]
        .into_iter()
        .map(RangeSpec::Named)
        .collect()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            range_separator: default_range_separator(),
            cookie_prefix: default_cookie_prefix(),
            table_prefix: default_table_prefix(),
            max_date_today: true,
            default_ranges: default_ranges(),
        }
    }
}

impl FilterConfig {
    /// Embedded defaults, layered with a user file.
    ///
    /// The user file is `config_path` when given (and must exist), otherwise
    /// `$DTFILTER_CONFIG/config.json5` or `~/.dtfilter-config.json5` when present.
    pub fn from_path(config_path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        match config_path {
            Some(path) => {
                builder = builder.add_source(
                    config::File::from(path.to_path_buf())
                        .format(config::FileFormat::Json5)
                        .required(true),
                );
            }
            None => {
                let candidate = get_config_dir().join("config.json5");
                let selected = if candidate.exists() {
                    candidate
                } else {
                    default_home_config_path()
                };
                builder = builder.add_source(
                    config::File::from(selected)
                        .format(config::FileFormat::Json5)
                        .required(false),
                );
            }
        }

        builder.build()?.try_deserialize()
    }
}

fn default_home_config_path() -> PathBuf {
    if let Some(base) = BaseDirs::new() {
        return base.home_dir().join(".dtfilter-config.json5");
    }
    PathBuf::from(".dtfilter-config.json5")
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else {
        PathBuf::from(".").join(".config")
    }
}

/// Filter specs by column position; `None` for columns without a filter
#[derive(Clone, Debug, Default, PartialEq, Deref, DerefMut, Serialize, Deserialize)]
pub struct ColumnSpecs(pub Vec<Option<ColumnFilterSpec>>);

/// One table's filter configuration as supplied by the page
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// View name the table is served under
    pub view: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub columns: ColumnSpecs,
    #[serde(skip)]
    pub defaults: FilterConfig,
}

impl TableConfig {
    pub fn new(view: impl Into<String>, columns: Vec<Option<ColumnFilterSpec>>) -> Self {
        let mut table = Self {
            view: view.into(),
            namespace: None,
            user_id: None,
            columns: ColumnSpecs(columns),
            defaults: FilterConfig::default(),
        };
        table.apply_defaults(&FilterConfig::default());
        table
    }

    /// Parse a page-supplied JSON5 table description and fill unset column
    /// settings from `defaults`.
    pub fn from_json5(source: &str, defaults: &FilterConfig) -> Result<Self> {
        let mut table: TableConfig =
            json5::from_str(source).wrap_err("invalid table filter configuration")?;
        table.apply_defaults(defaults);
        Ok(table)
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn apply_defaults(&mut self, defaults: &FilterConfig) {
        self.defaults = defaults.clone();
        for spec in self.columns.iter_mut().flatten() {
            if spec.kind != FilterKind::DateRange {
                continue;
            }
            if spec.date_format.is_none() {
                spec.date_format = Some(defaults.date_format.clone());
            }
            if spec.range_separator.is_none() {
                spec.range_separator = Some(defaults.range_separator.clone());
            }
            if spec.ranges.is_empty() {
                spec.ranges = defaults.default_ranges.clone();
            }
        }
    }

    pub fn column(&self, index: usize) -> Option<&ColumnFilterSpec> {
        self.columns.get(index).and_then(Option::as_ref)
    }

    pub fn table_id(&self) -> String {
        state::table_id(
            &self.defaults.table_prefix,
            &self.view,
            self.namespace.as_deref(),
        )
    }

    /// Name of the cookie the table widget persists this table's state under.
    ///
    /// Keyed by the bare view name; the namespace only enters [`table_id`](Self::table_id).
    pub fn cookie_name(&self) -> String {
        let user = self.user_id.as_deref().unwrap_or(state::ANONYMOUS_USER);
        let table = format!("{}{}", self.defaults.table_prefix, self.view);
        state::cookie_name(&self.defaults.cookie_prefix, user, &table)
    }
}
