#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

pub mod binder;
pub mod codec;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod state;

// Re-export commonly used types
pub use crate::binder::{ControlEvent, FilterBinder, FilterChange, FilterHost};
pub use crate::config::{FilterConfig, TableConfig};
pub use crate::core::{
    ColumnFilterSpec, Combinator, DateBounds, DateFormat, FilterKind, FilterValue, PickerRole,
    SelectOption,
};
pub use crate::error::FilterError;
pub use crate::state::PersistedState;
