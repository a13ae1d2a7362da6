use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{from_value, json};

use crate::RoutingTreeSpec;

/// Well-known name of the singleton routing tree resource. The routing
/// tree is not created or deleted through the API; it always exists
/// under this name, and deleting it resets it to the default policy.
pub const USER_DEFINED: &str = "user-defined";

/// Where the current state of a resource originated. `none` means the
/// resource is owned by the API and freely editable; any other value
/// identifies the external system that provisioned it, e.x. `api` or
/// `file`. Values round-trip verbatim; only absence and the empty
/// string normalize to `none`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Provenance(String);

impl Provenance {
    pub const NONE: &'static str = "none";
    pub const API: &'static str = "api";
    pub const FILE: &'static str = "file";

    pub fn none() -> Self {
        Self(Self::NONE.to_string())
    }

    /// Build a provenance value, normalizing the empty string to `none`.
    pub fn new(status: impl Into<String>) -> Self {
        let status = status.into();
        if status.is_empty() {
            Self::none()
        } else {
            Self(status)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }
}

impl Default for Provenance {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Provenance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Provenance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let str_val = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        Ok(Provenance::new(str_val.as_ref()))
    }
}

impl JsonSchema for Provenance {
    fn schema_name() -> String {
        String::from("Provenance")
    }

    fn json_schema(_: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        from_value(json!({
            "type": "string",
            "examples": [Provenance::NONE, Provenance::API, Provenance::FILE],
        }))
        .unwrap()
    }
}

/// Identifying metadata of an API resource.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ObjectMeta {
    /// # Name of the resource within its namespace.
    pub name: String,
    /// # Namespace the resource lives in.
    pub namespace: String,
    /// # Stable identifier derived from the resource's namespace and name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    /// # Opaque token identifying the revision this read observed.
    /// A write must present the token of the read it is based on; the
    /// store rejects it if the stored revision has since advanced.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_version: String,
    /// # Origin of the resource's current state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

/// The routing policy tree exposed as an API resource. It is converted
/// fresh from the engine's stored policy on every read and is never
/// independently persisted in this form.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RoutingTree {
    pub metadata: ObjectMeta,
    pub spec: RoutingTreeSpec,
}

#[cfg(test)]
mod test {
    use super::{ObjectMeta, Provenance, RoutingTree};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_provenance_normalization() {
        assert_eq!(Provenance::new("").as_str(), "none");
        assert_eq!(Provenance::default().as_str(), "none");
        assert!(Provenance::new("").is_none());

        // Caller casing is preserved.
        assert_eq!(Provenance::new("API").as_str(), "API");
        assert!(!Provenance::new("API").is_none());
    }

    #[test]
    fn test_resource_serde() {
        let resource = RoutingTree {
            metadata: ObjectMeta {
                name: super::USER_DEFINED.to_string(),
                namespace: "org-1".to_string(),
                resource_version: "42".to_string(),
                provenance: Some(Provenance::new("file")),
                ..Default::default()
            },
            ..Default::default()
        };

        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(
            value["metadata"],
            json!({
                "name": "user-defined",
                "namespace": "org-1",
                "resourceVersion": "42",
                "provenance": "file",
            })
        );
        let back: RoutingTree = serde_json::from_value(value).unwrap();
        assert_eq!(back, resource);
    }
}
