use std::collections::BTreeMap;
use std::sync::Mutex;

use models::Provenance;

use crate::meta::{TenantId, Version};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("no routing policy exists for tenant {0}")]
    NotFound(TenantId),
    #[error("routing policy for tenant {0} changed since it was read")]
    Conflict(TenantId),
}

/// Interface to the alerting engine's policy store. Conversions sit on
/// top of this seam: reads hand back the tree together with the version
/// token identifying the revision read, and writes must present that
/// token again so the store can reject them once the stored revision
/// has advanced.
pub trait PolicyStore {
    fn read_policy(&self, tenant: TenantId) -> Result<(policy::Route, Version), StoreError>;

    /// Conditionally replace the tenant's policy tree. An empty version
    /// token writes unconditionally. On success, returns the stored
    /// tree and the token of the revision the write produced.
    fn write_policy(
        &self,
        tenant: TenantId,
        tree: policy::Route,
        version: Version,
    ) -> Result<(policy::Route, Version), StoreError>;

    /// Provenance of the tenant's stored policy.
    fn provenance(&self, tenant: TenantId) -> Result<Provenance, StoreError> {
        let _ = tenant;
        Ok(Provenance::none())
    }
}

#[derive(Debug)]
struct MemEntry {
    tree: policy::Route,
    revision: u64,
    provenance: Provenance,
}

/// In-memory [`PolicyStore`] with monotonically advancing version
/// tokens, used in tests and local development.
#[derive(Debug, Default)]
pub struct MemStore {
    entries: Mutex<BTreeMap<u64, MemEntry>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a tenant's policy tree, bypassing the version check.
    pub fn seed(&self, tenant: TenantId, tree: policy::Route) {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(tenant.0).or_insert_with(|| MemEntry {
            tree: policy::Route::default(),
            revision: 0,
            provenance: Provenance::none(),
        });
        entry.tree = tree;
        entry.revision += 1;
    }

    pub fn set_provenance(&self, tenant: TenantId, provenance: Provenance) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get_mut(&tenant.0) {
            entry.provenance = provenance;
        }
    }
}

impl PolicyStore for MemStore {
    fn read_policy(&self, tenant: TenantId) -> Result<(policy::Route, Version), StoreError> {
        let entries = self.entries.lock().unwrap();
        let entry = entries.get(&tenant.0).ok_or(StoreError::NotFound(tenant))?;
        Ok((entry.tree.clone(), Version::new(entry.revision.to_string())))
    }

    fn write_policy(
        &self,
        tenant: TenantId,
        tree: policy::Route,
        version: Version,
    ) -> Result<(policy::Route, Version), StoreError> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .get_mut(&tenant.0)
            .ok_or(StoreError::NotFound(tenant))?;

        if !version.is_empty() && version.as_str() != entry.revision.to_string() {
            return Err(StoreError::Conflict(tenant));
        }
        entry.tree = tree;
        entry.revision += 1;
        Ok((entry.tree.clone(), Version::new(entry.revision.to_string())))
    }

    fn provenance(&self, tenant: TenantId) -> Result<Provenance, StoreError> {
        let entries = self.entries.lock().unwrap();
        let entry = entries.get(&tenant.0).ok_or(StoreError::NotFound(tenant))?;
        Ok(entry.provenance.clone())
    }
}

#[cfg(test)]
mod test {
    use super::{MemStore, PolicyStore, StoreError};
    use crate::meta::{TenantId, Version};

    const TENANT: TenantId = TenantId(1);

    #[test]
    fn test_conditional_write() {
        let store = MemStore::new();
        store.seed(TENANT, policy::Route::default());

        let (_, version) = store.read_policy(TENANT).unwrap();

        // A stale token is rejected.
        let err = store
            .write_policy(TENANT, policy::Route::default(), Version::from("stale"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // The token from the read succeeds, and the returned token
        // differs from the one presented.
        let (_, next) = store
            .write_policy(TENANT, policy::Route::default(), version.clone())
            .unwrap();
        assert_ne!(next, version);

        // An empty token skips the check entirely.
        let (_, after) = store
            .write_policy(TENANT, policy::Route::default(), Version::default())
            .unwrap();
        assert_ne!(after, next);
    }

    #[test]
    fn test_missing_tenant() {
        let store = MemStore::new();
        assert!(matches!(
            store.read_policy(TENANT),
            Err(StoreError::NotFound(_))
        ));
    }
}
