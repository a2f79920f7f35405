/// Days of the Persian week, which starts on Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PersianWeekday {
    /// Saturday, the first day of the week.
    Shanbeh,
    /// Sunday.
    Yekshanbeh,
    /// Monday.
    Doshanbeh,
    /// Tuesday.
    Seshanbeh,
    /// Wednesday.
    Chaharshanbeh,
    /// Thursday.
    Panjshanbeh,
    /// Friday, the weekend.
    Jomeh,
    /// Returned by providers that cannot place a date in the week.
    Unknown,
}

impl PersianWeekday {
    /// The seven known weekdays in week order.
    pub const ALL: [PersianWeekday; 7] = [
        PersianWeekday::Shanbeh,
        PersianWeekday::Yekshanbeh,
        PersianWeekday::Doshanbeh,
        PersianWeekday::Seshanbeh,
        PersianWeekday::Chaharshanbeh,
        PersianWeekday::Panjshanbeh,
        PersianWeekday::Jomeh,
    ];

    /// Position in the week, 1 for Saturday through 7 for Friday, 0 for
    /// [`PersianWeekday::Unknown`].
    pub fn number(self) -> u8 {
        match self {
            PersianWeekday::Shanbeh => 1,
            PersianWeekday::Yekshanbeh => 2,
            PersianWeekday::Doshanbeh => 3,
            PersianWeekday::Seshanbeh => 4,
            PersianWeekday::Chaharshanbeh => 5,
            PersianWeekday::Panjshanbeh => 6,
            PersianWeekday::Jomeh => 7,
            PersianWeekday::Unknown => 0,
        }
    }

    /// Inverse of [`PersianWeekday::number`]; anything out of 1..=7 is unknown.
    pub fn from_number(number: u8) -> Self {
        match number {
            1..=7 => Self::ALL[usize::from(number - 1)],
            _ => PersianWeekday::Unknown,
        }
    }

    /// Returns true for the sentinel value.
    pub fn is_unknown(self) -> bool {
        self == PersianWeekday::Unknown
    }

    /// Full Persian name.
    pub fn display_name(self) -> &'static str {
        match self {
            PersianWeekday::Shanbeh => "شنبه",
            PersianWeekday::Yekshanbeh => "یکشنبه",
            PersianWeekday::Doshanbeh => "دوشنبه",
            PersianWeekday::Seshanbeh => "سه‌شنبه",
            PersianWeekday::Chaharshanbeh => "چهارشنبه",
            PersianWeekday::Panjshanbeh => "پنجشنبه",
            PersianWeekday::Jomeh => "جمعه",
            PersianWeekday::Unknown => "",
        }
    }

    /// Single-letter label used in the calendar header row.
    pub fn short_label(self) -> &'static str {
        match self {
            PersianWeekday::Shanbeh => "ش",
            PersianWeekday::Yekshanbeh => "ی",
            PersianWeekday::Doshanbeh => "د",
            PersianWeekday::Seshanbeh => "س",
            PersianWeekday::Chaharshanbeh => "چ",
            PersianWeekday::Panjshanbeh => "پ",
            PersianWeekday::Jomeh => "ج",
            PersianWeekday::Unknown => "",
        }
    }
}

impl From<chrono::Weekday> for PersianWeekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Sat => PersianWeekday::Shanbeh,
            chrono::Weekday::Sun => PersianWeekday::Yekshanbeh,
            chrono::Weekday::Mon => PersianWeekday::Doshanbeh,
            chrono::Weekday::Tue => PersianWeekday::Seshanbeh,
            chrono::Weekday::Wed => PersianWeekday::Chaharshanbeh,
            chrono::Weekday::Thu => PersianWeekday::Panjshanbeh,
            chrono::Weekday::Fri => PersianWeekday::Jomeh,
        }
    }
}
