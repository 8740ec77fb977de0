use std::ops::Deref;

use serde::Deserialize;

/// A duration in the human readable format `1d 2h 3m 4s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::str::FromStr for Duration {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(0u64, |total, part| {
                total.checked_add(parse_part(part)?).ok_or("Duration too large")
            })
            .map(|secs| Self(std::time::Duration::from_secs(secs)))
    }
}

fn parse_part(part: &str) -> Result<u64, &'static str> {
    let unit_len = part.chars().next_back().map_or(0, char::len_utf8);
    let (value, unit) = part.split_at(part.len() - unit_len);
    let value = value.parse::<u64>().map_err(|_| "Invalid duration")?;
    let factor = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return Err("Invalid duration unit"),
    };
    value.checked_mul(factor).ok_or("Duration too large")
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
