use std::{fmt, str::FromStr};

use jiff::civil::Weekday;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekdays,
    Friday,
    Weekends,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Weekdays, DayType::Friday, DayType::Weekends];

    pub const fn index(self) -> usize {
        match self {
            DayType::Weekdays => 0,
            DayType::Friday => 1,
            DayType::Weekends => 2,
        }
    }

    /// Monday to Thursday share the weekday timetable.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Monday | Weekday::Tuesday | Weekday::Wednesday | Weekday::Thursday => {
                DayType::Weekdays
            }
            Weekday::Friday => DayType::Friday,
            Weekday::Saturday | Weekday::Sunday => DayType::Weekends,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekdays => "weekdays",
            DayType::Friday => "friday",
            DayType::Weekends => "weekends",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDayType(pub String);

impl fmt::Display for UnknownDayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown day type {}", self.0)
    }
}

impl std::error::Error for UnknownDayType {}

impl FromStr for DayType {
    type Err = UnknownDayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "weekdays" => Ok(DayType::Weekdays),
            "friday" => Ok(DayType::Friday),
            "weekends" => Ok(DayType::Weekends),
            other => Err(UnknownDayType(other.to_owned())),
        }
    }
}
