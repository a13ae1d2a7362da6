use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Duration, Matcher, Pattern};

/// Write-time compatibility inputs for the legacy matcher syntaxes.
/// New policies express every predicate through [`Route::matchers`];
/// these fields exist so that previously stored policies keep encoding
/// the matchers they were written with. They are consumed only when
/// encoding a route outward and are never produced when decoding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyMatchers {
    /// Exact-match entries, label to required value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub exact: BTreeMap<String, String>,
    /// Regex-match entries, label to required pattern.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub regex: BTreeMap<String, Pattern>,
    /// The deprecated object-matcher list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object: Vec<Matcher>,
}

impl LegacyMatchers {
    pub fn is_empty(&self) -> bool {
        let LegacyMatchers {
            exact,
            regex,
            object,
        } = self;
        exact.is_empty() && regex.is_empty() && object.is_empty()
    }
}

/// One node of the notification routing policy tree. A route matches
/// alerts by label and assigns them a receiver, optionally overriding
/// the grouping and timing behaviour inherited from its parent.
///
/// The root route is the tree's fallback policy: its receiver is the
/// default destination and its grouping fields apply wherever children
/// leave theirs unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Route {
    /// Receiver to notify. Empty means the parent's receiver applies.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub receiver: String,
    /// Label names to group matched alerts by.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    /// How long to initially wait before notifying for a new alert group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_wait: Option<Duration>,
    /// How long to wait before notifying about alerts added to a group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_interval: Option<Duration>,
    /// How long to wait before re-sending a notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<Duration>,
    /// If set, evaluation continues into subsequent sibling routes after
    /// this route matches.
    #[serde(default, rename = "continue")]
    pub continue_matching: bool,
    /// Label predicates deciding whether this route applies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matchers: Vec<Matcher>,
    /// Legacy matcher inputs kept for previously stored policies.
    #[serde(default, skip_serializing_if = "LegacyMatchers::is_empty")]
    pub legacy: LegacyMatchers,
    /// Names of time intervals during which this route is muted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mute_time_intervals: Vec<String>,
    /// Names of time intervals during which this route is active.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_time_intervals: Vec<String>,
    /// Child routes, evaluated in order. Unbounded depth.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
}

impl Route {
    /// Height of the tree rooted at this route. A route with no
    /// children has depth one.
    pub fn depth(&self) -> usize {
        1 + self
            .routes
            .iter()
            .map(Route::depth)
            .max()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::{LegacyMatchers, Route};
    use crate::{MatchOperator, Matcher};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_depth() {
        let mut route = Route::default();
        assert_eq!(route.depth(), 1);

        route.routes = vec![
            Route::default(),
            Route {
                routes: vec![Route {
                    routes: vec![Route::default()],
                    ..Default::default()
                }],
                ..Default::default()
            },
        ];
        assert_eq!(route.depth(), 4);
    }

    #[test]
    fn test_serde_round_trip() {
        let route = Route {
            receiver: "slack".to_string(),
            group_by: vec!["alertname".to_string()],
            group_wait: Some("30s".parse().unwrap()),
            continue_matching: true,
            matchers: vec![Matcher::new(MatchOperator::Equal, "severity", "critical").unwrap()],
            routes: vec![Route {
                receiver: "pagerduty".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let value = serde_json::to_value(&route).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "receiver": "slack",
                "group_by": ["alertname"],
                "group_wait": "30s",
                "continue": true,
                "matchers": [{"label": "severity", "op": "=", "value": "critical"}],
                "routes": [{"receiver": "pagerduty", "continue": false}],
            })
        );
        let back: Route = serde_json::from_value(value).unwrap();
        assert_eq!(back, route);
    }

    #[test]
    fn test_legacy_is_empty() {
        let mut legacy = LegacyMatchers::default();
        assert!(legacy.is_empty());
        legacy
            .exact
            .insert("team".to_string(), "platform".to_string());
        assert!(!legacy.is_empty());
    }
}
