use crate::errors::Errors;
use crate::meta::{set_provenance_status, TenantId};
use crate::store::{PolicyStore, StoreError};
use crate::tree::{decode_from_resource, encode_to_resource};

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid routing tree:\n{0}")]
    Invalid(#[from] Errors),
}

/// Serves a tenant's routing tree as an API resource over a
/// [`PolicyStore`]. The resource is converted fresh from the stored
/// policy on every call; nothing is cached, and the store's version
/// token is threaded through both directions untouched.
pub struct RoutingTreeService<S> {
    store: S,
    namespacer: fn(TenantId) -> String,
}

impl<S: PolicyStore> RoutingTreeService<S> {
    pub fn new(store: S, namespacer: fn(TenantId) -> String) -> Self {
        Self { store, namespacer }
    }

    #[tracing::instrument(skip(self))]
    pub fn get(&self, tenant: TenantId) -> Result<models::RoutingTree, ServiceError> {
        let (tree, version) = self.store.read_policy(tenant)?;
        let (mut resource, warnings) = encode_to_resource(tenant, &tree, &version, self.namespacer);
        for warning in warnings.iter() {
            tracing::warn!(%tenant, %warning, "stored routing tree was truncated for the API");
        }
        set_provenance_status(&mut resource, self.store.provenance(tenant)?);
        Ok(resource)
    }

    /// The routing tree is a singleton; listing returns it alone.
    #[tracing::instrument(skip(self))]
    pub fn list(&self, tenant: TenantId) -> Result<Vec<models::RoutingTree>, ServiceError> {
        Ok(vec![self.get(tenant)?])
    }

    /// Decode the written resource, write it conditionally on the
    /// version token it carries, and return the freshly encoded result
    /// of the write. Rejects the whole write if any field of the
    /// resource fails to decode.
    #[tracing::instrument(skip(self, resource))]
    pub fn update(
        &self,
        tenant: TenantId,
        resource: &models::RoutingTree,
    ) -> Result<models::RoutingTree, ServiceError> {
        let (tree, version) = decode_from_resource(resource)?;
        let (tree, version) = self.store.write_policy(tenant, tree, version)?;

        let (mut updated, warnings) = encode_to_resource(tenant, &tree, &version, self.namespacer);
        for warning in warnings.iter() {
            tracing::warn!(%tenant, %warning, "stored routing tree was truncated for the API");
        }
        set_provenance_status(&mut updated, self.store.provenance(tenant)?);
        Ok(updated)
    }
}
