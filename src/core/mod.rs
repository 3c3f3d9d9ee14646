pub mod date_format;
pub mod presets;
pub mod types;
pub mod value;

pub use date_format::DateFormat;
pub use presets::{PresetName, RangePreset, RangeSpec};
pub use types::{ColumnFilterSpec, Combinator, FilterKind, PickerRole, SelectOption};
pub use value::{DateBounds, FilterValue};
