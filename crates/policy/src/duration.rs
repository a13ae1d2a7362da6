use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::time;

// Unit multipliers in milliseconds, largest first. Years and weeks are
// only used when formatting if they divide the remainder exactly, as it
// is often easier to read 90d than 12w6d.
const MS_PER_YEAR: u64 = 1000 * 60 * 60 * 24 * 365;
const MS_PER_WEEK: u64 = 1000 * 60 * 60 * 24 * 7;
const MS_PER_DAY: u64 = 1000 * 60 * 60 * 24;
const MS_PER_HOUR: u64 = 1000 * 60 * 60;
const MS_PER_MINUTE: u64 = 1000 * 60;
const MS_PER_SECOND: u64 = 1000;

const UNITS: [(&str, u64, bool); 7] = [
    ("y", MS_PER_YEAR, true),
    ("w", MS_PER_WEEK, true),
    ("d", MS_PER_DAY, false),
    ("h", MS_PER_HOUR, false),
    ("m", MS_PER_MINUTE, false),
    ("s", MS_PER_SECOND, false),
    ("ms", 1, false),
];

lazy_static! {
    static ref DURATION_RE: Regex = Regex::new(
        r"^(?:(\d+)y)?(?:(\d+)w)?(?:(\d+)d)?(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?(?:(\d+)ms)?$"
    )
    .unwrap();
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseDurationError {
    #[error("empty duration string")]
    Empty,
    #[error("not a valid duration string: {0:?}")]
    Invalid(String),
    #[error("duration out of range: {0:?}")]
    Overflow(String),
}

/// Duration is a span of time carrying the short-unit text form used
/// throughout routing policies: a sequence of integer components in
/// strictly descending unit order (`y`, `w`, `d`, `h`, `m`, `s`, `ms`),
/// e.x. `30s`, `1m30s`, or `1d6h`. There is no implicit unit.
///
/// Formatting is canonical: parsing a string and formatting the result
/// always yields the same canonical text, so durations can be compared
/// byte-wise after a round-trip.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(time::Duration);

impl Duration {
    pub fn new(inner: time::Duration) -> Self {
        Self(inner)
    }

    pub fn from_secs(secs: u64) -> Self {
        Self(time::Duration::from_secs(secs))
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(time::Duration::from_millis(millis))
    }

    pub fn as_std(&self) -> time::Duration {
        self.0
    }
}

impl From<time::Duration> for Duration {
    fn from(inner: time::Duration) -> Self {
        Self(inner)
    }
}

impl From<Duration> for time::Duration {
    fn from(d: Duration) -> Self {
        d.0
    }
}

impl FromStr for Duration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => return Err(ParseDurationError::Empty),
            "0" => return Ok(Self::default()),
            _ => (),
        }
        let captures = DURATION_RE
            .captures(s)
            .ok_or_else(|| ParseDurationError::Invalid(s.to_string()))?;

        let mut millis: u64 = 0;
        for (index, (_, multiplier, _)) in UNITS.iter().enumerate() {
            let Some(m) = captures.get(index + 1) else {
                continue;
            };
            let value: u64 = m
                .as_str()
                .parse()
                .map_err(|_| ParseDurationError::Overflow(s.to_string()))?;
            millis = value
                .checked_mul(*multiplier)
                .and_then(|v| millis.checked_add(v))
                .ok_or_else(|| ParseDurationError::Overflow(s.to_string()))?;
        }
        Ok(Self(time::Duration::from_millis(millis)))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut millis = self.0.as_millis() as u64;
        if millis == 0 {
            return f.write_str("0s");
        }
        for (unit, multiplier, exact) in UNITS {
            if exact && millis % multiplier != 0 {
                continue;
            }
            let value = millis / multiplier;
            if value > 0 {
                write!(f, "{value}{unit}")?;
                millis -= value * multiplier;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}

impl serde::Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        format!("{self}").serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let str_val = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        Duration::from_str(str_val.as_ref()).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::{Duration, ParseDurationError};

    #[test]
    fn test_parse_and_canonical_format() {
        // (input, total seconds, canonical form)
        let table = vec![
            ("0", 0, "0s"),
            ("0s", 0, "0s"),
            ("30s", 30, "30s"),
            ("90s", 90, "1m30s"),
            ("5m", 300, "5m"),
            ("2m30s", 150, "2m30s"),
            ("1h", 3600, "1h"),
            ("24h", 86400, "1d"),
            ("30h", 108000, "1d6h"),
            ("7d", 604800, "1w"),
            // Weeks only appear when they divide the value exactly.
            ("90d", 7776000, "90d"),
            ("365d", 31536000, "1y"),
            // Years and weeks are skipped when they don't divide the
            // value exactly.
            ("1y30d12h", 34171200, "395d12h"),
        ];
        for (input, secs, canonical) in table {
            let parsed: Duration = input.parse().unwrap();
            assert_eq!(parsed.as_std().as_secs(), secs, "parsing {input:?}");
            assert_eq!(parsed.to_string(), canonical, "formatting {input:?}");

            // The canonical form is a fixed point.
            let reparsed: Duration = canonical.parse().unwrap();
            assert_eq!(reparsed.to_string(), canonical);
        }
    }

    #[test]
    fn test_millisecond_component() {
        let d: Duration = "1s500ms".parse().unwrap();
        assert_eq!(d.as_std().as_millis(), 1500);
        assert_eq!(d.to_string(), "1s500ms");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Duration>(), Err(ParseDurationError::Empty));

        for input in ["5", "1.5h", "-30s", "30x", "1h30", "s", "m5", "1h 30m"] {
            assert_eq!(
                input.parse::<Duration>(),
                Err(ParseDurationError::Invalid(input.to_string())),
                "expected {input:?} to be rejected"
            );
        }

        assert_eq!(
            "99999999999999999y".parse::<Duration>(),
            Err(ParseDurationError::Overflow("99999999999999999y".to_string()))
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let d: Duration = serde_json::from_value(serde_json::json!("1d6h")).unwrap();
        assert_eq!(d, Duration::from_secs(108000));
        assert_eq!(serde_json::to_value(d).unwrap(), serde_json::json!("1d6h"));

        let err = serde_json::from_value::<Duration>(serde_json::json!("notaduration"));
        assert!(err.is_err());
    }
}
