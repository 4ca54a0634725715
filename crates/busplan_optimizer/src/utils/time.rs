use jiff::{SignedDuration, civil::Time};
use serde::{Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

#[macro_export]
macro_rules! timer_debug {
    ($msg:literal,$block:expr) => {{
        let now = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(now);

        tracing::debug!("{}: Took {:?}", $msg, elapsed);

        result
    }};
}

/// Parses a zero-padded 24-hour `HH:MM` time of day.
pub fn parse_hh_mm(value: &str) -> Result<Time, jiff::Error> {
    Time::strptime("%H:%M", value.trim())
}

pub fn format_hh_mm(time: Time) -> String {
    time.strftime("%H:%M").to_string()
}

/// Rounded to whole seconds so that buffer comparisons stay exact.
pub fn from_minutes(minutes: f64) -> SignedDuration {
    SignedDuration::from_secs((minutes * 60.0).round() as i64)
}

pub fn as_minutes(duration: SignedDuration) -> f64 {
    duration.as_secs_f64() / 60.0
}

/// `serde_with` adapter writing and reading times as `HH:MM`.
pub struct HourMinute;

impl SerializeAs<Time> for HourMinute {
    fn serialize_as<S>(source: &Time, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&source.strftime("%H:%M"))
    }
}

impl<'de> DeserializeAs<'de, Time> for HourMinute {
    fn deserialize_as<D>(deserializer: D) -> Result<Time, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse_hh_mm(&value).map_err(serde::de::Error::custom)
    }
}
