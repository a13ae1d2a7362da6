use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{from_value, json};

/// The wire form of a matcher's comparison operator. The four well-known
/// values are `=`, `!=`, `=~`, and `!~`. Anything else is preserved as
/// [`MatcherType::Unknown`] so that conversion can report it against the
/// exact field it arrived in, rather than failing the whole document at
/// deserialization time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatcherType {
    Equal,
    NotEqual,
    EqualRegex,
    NotEqualRegex,
    Unknown(String),
}

impl MatcherType {
    pub fn as_str(&self) -> &str {
        match self {
            MatcherType::Equal => "=",
            MatcherType::NotEqual => "!=",
            MatcherType::EqualRegex => "=~",
            MatcherType::NotEqualRegex => "!~",
            MatcherType::Unknown(other) => other,
        }
    }
}

impl std::fmt::Display for MatcherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MatcherType {
    fn from(s: &str) -> Self {
        match s {
            "=" => MatcherType::Equal,
            "!=" => MatcherType::NotEqual,
            "=~" => MatcherType::EqualRegex,
            "!~" => MatcherType::NotEqualRegex,
            other => MatcherType::Unknown(other.to_string()),
        }
    }
}

impl Serialize for MatcherType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MatcherType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let str_val = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        Ok(MatcherType::from(str_val.as_ref()))
    }
}

impl JsonSchema for MatcherType {
    fn schema_name() -> String {
        String::from("MatcherType")
    }

    fn json_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        from_value(json!({
            "type": "string",
            "enum": ["=", "!=", "=~", "!~"],
        }))
        .unwrap()
    }
}

/// A single label predicate of a route.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[schemars(example = "Matcher::example")]
pub struct Matcher {
    /// # Name of the label to compare.
    pub label: String,
    /// # Comparison operator.
    #[serde(rename = "type")]
    pub type_: MatcherType,
    /// # Value to compare the label's value against.
    pub value: String,
}

impl Matcher {
    pub fn example() -> Self {
        Self {
            label: "severity".to_string(),
            type_: MatcherType::Equal,
            value: "critical".to_string(),
        }
    }
}
