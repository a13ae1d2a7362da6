mod durations;
mod errors;
mod matchers;
mod meta;
mod scope;
mod service;
mod store;
mod tree;

pub use durations::{decode_duration, encode_duration};
pub use errors::{Error, Errors};
pub use matchers::{decode_matchers, encode_matchers};
pub use meta::{
    provenance_status, resource_uid, set_provenance_status, TenantId, Version,
};
pub use scope::{Path, Scope, Segment};
pub use service::{RoutingTreeService, ServiceError};
pub use store::{MemStore, PolicyStore, StoreError};
pub use tree::{decode_from_resource, decode_tree, encode_to_resource, encode_tree};
