mod matchers;
mod meta;
mod routes;

pub use matchers::{Matcher, MatcherType};
pub use meta::{ObjectMeta, Provenance, RoutingTree, USER_DEFINED};
pub use routes::{Route, RouteDefaults, RoutingTreeSpec, MAX_DEPTH};

use schemars::schema;
use serde_json::{from_value, json};

// Durations are carried as their short-unit text form, e.x. "30s" or
// "1d6h". Parsing happens during conversion, not deserialization, so
// that every malformed field of a written resource can be reported in
// one pass.
fn duration_schema(_: &mut schemars::gen::SchemaGenerator) -> schema::Schema {
    from_value(json!({
        "type": ["string", "null"],
        "pattern": "^(\\d+y)?(\\d+w)?(\\d+d)?(\\d+h)?(\\d+m)?(\\d+s)?(\\d+ms)?$"
    }))
    .unwrap()
}
