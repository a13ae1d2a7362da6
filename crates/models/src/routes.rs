use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Matcher;

/// Maximum nesting depth of `routes` entries a written resource may
/// carry, and the deepest nesting reads will emit. The bound is part of
/// the published schema contract and is enforced during conversion, not
/// by the type system.
pub const MAX_DEPTH: usize = 7;

/// One node of the routing tree as clients read and write it. The field
/// set mirrors the engine's route, with durations carried in their text
/// form and matchers flattened into a single typed list.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
#[schemars(example = "Route::example")]
pub struct Route {
    /// # Receiver to notify for alerts matching this route.
    /// If omitted, the parent route's receiver applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    /// # Label predicates deciding whether this route applies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matchers: Vec<Matcher>,
    /// # Whether evaluation continues after this route matches.
    /// If set, subsequent sibling routes are still considered even
    /// though this route already claimed the alert.
    #[serde(default, rename = "continue")]
    pub continue_matching: bool,
    /// # Label names to group matched alerts by.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    /// # Names of time intervals during which this route is muted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mute_time_intervals: Vec<String>,
    /// # Names of time intervals during which this route is active.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_time_intervals: Vec<String>,
    /// # How long to initially wait before notifying for a new alert group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "crate::duration_schema")]
    pub group_wait: Option<String>,
    /// # How long to wait before notifying about alerts added to a group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "crate::duration_schema")]
    pub group_interval: Option<String>,
    /// # How long to wait before re-sending a notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "crate::duration_schema")]
    pub repeat_interval: Option<String>,
    /// # Child routes, evaluated in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
}

impl Route {
    pub fn example() -> Self {
        Self {
            receiver: Some("on-call-slack".to_string()),
            matchers: vec![Matcher::example()],
            group_wait: Some("30s".to_string()),
            ..Default::default()
        }
    }
}

/// Root-level fallback settings of the routing tree: the receiver and
/// grouping behaviour that apply wherever no child route overrides them.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
#[schemars(example = "RouteDefaults::example")]
pub struct RouteDefaults {
    /// # Default receiver for alerts no child route claims.
    pub receiver: String,
    /// # Default label names to group alerts by.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    /// # Default initial wait before notifying for a new alert group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "crate::duration_schema")]
    pub group_wait: Option<String>,
    /// # Default wait before notifying about alerts added to a group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "crate::duration_schema")]
    pub group_interval: Option<String>,
    /// # Default wait before re-sending a notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "crate::duration_schema")]
    pub repeat_interval: Option<String>,
}

impl RouteDefaults {
    pub fn example() -> Self {
        Self {
            receiver: "on-call-slack".to_string(),
            group_by: vec!["alertname".to_string()],
            ..Default::default()
        }
    }
}

/// Specification of a routing tree resource.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RoutingTreeSpec {
    /// # Root-level fallback settings.
    pub defaults: RouteDefaults,
    /// # Top-level routes of the tree.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
}

#[cfg(test)]
mod test {
    use super::{Route, RouteDefaults, RoutingTreeSpec};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_spec_serde_round_trip() {
        let value = json!({
            "defaults": {
                "receiver": "default-email",
                "groupBy": ["alertname"],
                "groupWait": "30s",
            },
            "routes": [
                {
                    "receiver": "on-call-slack",
                    "continue": false,
                    "matchers": [
                        {"label": "severity", "type": "=", "value": "critical"},
                    ],
                    "repeatInterval": "1d6h",
                    "routes": [
                        {"continue": true, "muteTimeIntervals": ["weekends"]},
                    ],
                },
            ],
        });

        let spec: RoutingTreeSpec = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(spec.defaults.receiver, "default-email");
        assert_eq!(spec.routes[0].repeat_interval.as_deref(), Some("1d6h"));
        assert_eq!(spec.routes[0].routes[0].continue_matching, true);

        assert_eq!(serde_json::to_value(&spec).unwrap(), value);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = serde_json::from_value::<Route>(json!({"recviever": "oops"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_generation() {
        // The recursive `routes` field is expressed through a definition
        // reference rather than infinite inlining.
        let schema = schemars::schema_for!(RoutingTreeSpec);
        let text = serde_json::to_string(&schema).unwrap();
        assert!(text.contains("\"Route\""));
        assert!(text.contains("muteTimeIntervals"));

        let _ = schemars::schema_for!(RouteDefaults);
    }
}
