use crate::errors::DomainError;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Storage format shared by every timestamp column. Fixed width, so the
/// stored strings order the same way the instants do.
pub const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NEVER: &str = "infinity";
const NEVER_ALIASES: &[&str] = &["never", "infinite", "infinity", "indefinite"];
const MAX_INPUT_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expiry {
    Never,
    At(DateTime<Utc>),
}

impl Expiry {
    pub fn is_never(&self) -> bool {
        matches!(self, Expiry::Never)
    }

    /// A rule is live while its expiry is `Never` or strictly in the future.
    #[inline]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            Expiry::Never => true,
            Expiry::At(t) => *t > now,
        }
    }

    /// Parses administrative input: `never`/`infinite`, a relative duration
    /// such as `3 days` or `12h`, or an absolute UTC timestamp. The result
    /// must lie in the future.
    pub fn parse_input(input: &str, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DomainError::InvalidExpiry("an expiry is required".to_string()));
        }
        if input.len() > MAX_INPUT_LEN {
            return Err(DomainError::InvalidExpiry(format!(
                "expiry cannot exceed {} characters",
                MAX_INPUT_LEN
            )));
        }

        let lowered = input.to_ascii_lowercase();
        if NEVER_ALIASES.contains(&lowered.as_str()) {
            return Ok(Expiry::Never);
        }

        let at = match parse_relative(&lowered) {
            Some(delta) => now.checked_add_signed(delta).ok_or_else(|| {
                DomainError::InvalidExpiry(format!("expiry '{}' is out of range", input))
            })?,
            None => parse_absolute(input).ok_or_else(|| {
                DomainError::InvalidExpiry(format!("cannot parse expiry '{}'", input))
            })?,
        };

        let expiry = Expiry::At(at);
        expiry.ensure_future(now)?;
        Ok(expiry)
    }

    pub fn ensure_future(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_live_at(now) {
            Ok(())
        } else {
            Err(DomainError::InvalidExpiry(
                "expiry must be in the future".to_string(),
            ))
        }
    }

    pub fn to_db_string(&self) -> String {
        match self {
            Expiry::Never => NEVER.to_string(),
            Expiry::At(t) => t.format(DB_TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        if s == NEVER {
            return Some(Expiry::Never);
        }
        parse_absolute(s).map(Expiry::At)
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiry::Never => f.write_str(NEVER),
            Expiry::At(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl Serialize for Expiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Expiry::from_db_string(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid expiry '{}'", s)))
    }
}

pub fn format_db_timestamp(t: DateTime<Utc>) -> String {
    t.format(DB_TIMESTAMP_FORMAT).to_string()
}

pub fn parse_db_timestamp(s: &str) -> Option<DateTime<Utc>> {
    parse_absolute(s)
}

fn parse_absolute(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, DB_TIMESTAMP_FORMAT)
        .ok()
        .map(|t| t.and_utc())
}

fn parse_relative(s: &str) -> Option<TimeDelta> {
    let split = s.find(|c: char| !c.is_ascii_digit())?;
    if split == 0 {
        return None;
    }
    let amount: i64 = s[..split].parse().ok()?;
    let unit_secs: i64 = match s[split..].trim() {
        "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hour" | "hours" => 3_600,
        "d" | "day" | "days" => 86_400,
        "w" | "week" | "weeks" => 7 * 86_400,
        "month" | "months" => 30 * 86_400,
        "y" | "year" | "years" => 365 * 86_400,
        _ => return None,
    };
    TimeDelta::try_seconds(amount.checked_mul(unit_secs)?)
}
