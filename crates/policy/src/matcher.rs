use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug)]
pub enum MatcherError {
    #[error("unknown match operator {0:?}")]
    UnknownOperator(String),
    #[error("invalid regular expression {value:?} for label {label:?}: {source}")]
    InvalidRegex {
        label: String,
        value: String,
        #[source]
        source: regex::Error,
    },
}

/// The comparison a matcher applies between a label's value and the
/// matcher's value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MatchOperator {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "=~")]
    Regexp,
    #[serde(rename = "!~")]
    NotRegexp,
}

impl MatchOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOperator::Equal => "=",
            MatchOperator::NotEqual => "!=",
            MatchOperator::Regexp => "=~",
            MatchOperator::NotRegexp => "!~",
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, MatchOperator::Regexp | MatchOperator::NotRegexp)
    }
}

impl fmt::Display for MatchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchOperator {
    type Err = MatcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(MatchOperator::Equal),
            "!=" => Ok(MatchOperator::NotEqual),
            "=~" => Ok(MatchOperator::Regexp),
            "!~" => Ok(MatchOperator::NotRegexp),
            other => Err(MatcherError::UnknownOperator(other.to_string())),
        }
    }
}

/// A single label predicate of a route: `label <op> value`.
/// Two matchers are equal iff their label, operator, and value are.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Matcher {
    pub label: String,
    pub op: MatchOperator,
    pub value: String,
}

impl Matcher {
    /// Build a matcher, validating that regex-kind values compile.
    /// Regex values are compiled fully anchored, matching the whole
    /// label value rather than any substring.
    pub fn new(
        op: MatchOperator,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, MatcherError> {
        let (label, value) = (label.into(), value.into());
        if op.is_regex() {
            if let Err(source) = regex::Regex::new(&format!("^(?:{value})$")) {
                return Err(MatcherError::InvalidRegex {
                    label,
                    value,
                    source,
                });
            }
        }
        Ok(Self { label, op, value })
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{:?}", self.label, self.op, self.value)
    }
}

/// A validated regular expression pattern. The pattern is compiled fully
/// anchored at construction, but serializes back to exactly the source
/// text it was built from.
#[derive(Clone, Debug)]
pub struct Pattern {
    re: regex::Regex,
    original: String,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let re = regex::Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self {
            re,
            original: source.to_string(),
        })
    }

    /// The canonical text form of this pattern.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.re.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl serde::Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.original.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let str_val = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        Pattern::new(str_val.as_ref())
            .map_err(|err| D::Error::custom(format!("invalid pattern: {err}")))
    }
}
