use std::fmt;

use models::Provenance;

/// Identifier of the tenant whose policy tree is being converted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TenantId(pub u64);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque optimistic-concurrency token. Conversions carry it between
/// the store and the resource's `resourceVersion` field verbatim; they
/// never inspect, compare, or advance it. Enforcement belongs to the
/// store's conditional write.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty token asks the store to write unconditionally.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Version {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the stable identifier of a resource from its cluster-scoped
/// identity. The identifier is a pure function of namespace and name,
/// so repeated reads agree without anything being persisted.
pub fn resource_uid(namespace: &str, name: &str) -> String {
    let digest = xxhash_rust::xxh3::xxh3_128(format!("{namespace}/{name}").as_bytes());
    format!("{digest:032x}")
}

/// Read a resource's provenance. Nil-safe: an absent resource, an
/// absent field, and an empty value all read as `none`.
pub fn provenance_status(resource: Option<&models::RoutingTree>) -> Provenance {
    match resource.and_then(|r| r.metadata.provenance.as_ref()) {
        Some(provenance) if !provenance.as_str().is_empty() => provenance.clone(),
        _ => Provenance::none(),
    }
}

/// Stamp a resource's provenance, normalizing empty input to `none`.
pub fn set_provenance_status(resource: &mut models::RoutingTree, provenance: Provenance) {
    resource.metadata.provenance = Some(Provenance::new(provenance.as_str()));
}

#[cfg(test)]
mod test {
    use super::{provenance_status, resource_uid, set_provenance_status};
    use models::{Provenance, RoutingTree};

    #[test]
    fn test_uid_is_stable_and_distinct() {
        let uid = resource_uid("org-1", models::USER_DEFINED);
        assert_eq!(uid, resource_uid("org-1", models::USER_DEFINED));
        assert_eq!(uid.len(), 32);

        assert_ne!(uid, resource_uid("org-2", models::USER_DEFINED));
        assert_ne!(uid, resource_uid("org-1", "another-name"));
    }

    #[test]
    fn test_provenance_defaults() {
        assert_eq!(provenance_status(None).as_str(), "none");

        let mut resource = RoutingTree::default();
        assert_eq!(provenance_status(Some(&resource)).as_str(), "none");

        set_provenance_status(&mut resource, Provenance::new(""));
        assert_eq!(provenance_status(Some(&resource)).as_str(), "none");

        set_provenance_status(&mut resource, Provenance::new("API"));
        assert_eq!(provenance_status(Some(&resource)).as_str(), "API");
    }
}
