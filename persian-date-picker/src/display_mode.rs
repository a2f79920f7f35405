use std::fmt;

use crate::error::PickerError;

/// Whether a picker shows the calendar grid or the text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayMode {
    /// Calendar grid selection.
    #[default]
    Picker,
    /// Typed `yyyy/mm/dd` entry.
    Input,
}

impl DisplayMode {
    /// Integer value used when the mode is persisted.
    pub fn value(self) -> i32 {
        match self {
            DisplayMode::Picker => 0,
            DisplayMode::Input => 1,
        }
    }

    /// Decodes a persisted value.
    pub fn from_value(value: i32) -> Result<Self, PickerError> {
        match value {
            0 => Ok(DisplayMode::Picker),
            1 => Ok(DisplayMode::Input),
            _ => Err(PickerError::UnknownDisplayMode { value }),
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Picker => DisplayMode::Input,
            DisplayMode::Input => DisplayMode::Picker,
        }
    }
}

impl TryFrom<i32> for DisplayMode {
    type Error = PickerError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<DisplayMode> for i32 {
    fn from(mode: DisplayMode) -> Self {
        mode.value()
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplayMode::Picker => "Picker",
            DisplayMode::Input => "Input",
        })
    }
}
