use models::MAX_DEPTH;

use crate::durations::{decode_duration, encode_duration};
use crate::errors::{Error, Errors};
use crate::matchers::{decode_matchers, encode_matchers};
use crate::meta::{resource_uid, TenantId, Version};
use crate::scope::Scope;

/// Encode the engine's policy tree into the API spec shape.
///
/// The root route becomes `defaults` plus the top-level `routes`.
/// Encoding always yields a spec; the returned [`Errors`] carries one
/// [`Error::Truncated`] entry per `routes` field that was dropped
/// because it sits deeper than [`MAX_DEPTH`], so callers can surface
/// the loss instead of discovering it on a later read.
pub fn encode_tree(root: &policy::Route) -> (models::RoutingTreeSpec, Errors) {
    let mut errors = Errors::new();
    let scope = Scope::root();

    let defaults = models::RouteDefaults {
        receiver: root.receiver.clone(),
        group_by: root.group_by.clone(),
        group_wait: encode_duration(root.group_wait),
        group_interval: encode_duration(root.group_interval),
        repeat_interval: encode_duration(root.repeat_interval),
    };

    let routes_scope = scope.push_field("routes");
    let routes = root
        .routes
        .iter()
        .enumerate()
        .map(|(index, child)| encode_route(routes_scope.push_index(index), child, 1, &mut errors))
        .collect();

    (models::RoutingTreeSpec { defaults, routes }, errors)
}

fn encode_route(
    scope: Scope<'_>,
    route: &policy::Route,
    depth: usize,
    errors: &mut Errors,
) -> models::Route {
    let routes = if depth == MAX_DEPTH {
        if !route.routes.is_empty() {
            errors.push(Error::Truncated {
                path: scope.push_field("routes").flatten(),
                max: MAX_DEPTH,
            });
        }
        Vec::new()
    } else {
        let routes_scope = scope.push_field("routes");
        route
            .routes
            .iter()
            .enumerate()
            .map(|(index, child)| {
                encode_route(routes_scope.push_index(index), child, depth + 1, errors)
            })
            .collect()
    };

    models::Route {
        receiver: if route.receiver.is_empty() {
            None
        } else {
            Some(route.receiver.clone())
        },
        matchers: encode_matchers(route),
        continue_matching: route.continue_matching,
        group_by: route.group_by.clone(),
        mute_time_intervals: route.mute_time_intervals.clone(),
        active_time_intervals: route.active_time_intervals.clone(),
        group_wait: encode_duration(route.group_wait),
        group_interval: encode_duration(route.group_interval),
        repeat_interval: encode_duration(route.repeat_interval),
        routes,
    }
}

/// Decode the API spec shape back into the engine's policy tree.
///
/// Children are decoded before their parent, since domain routes own
/// their child vectors outright. Every field failure anywhere in the
/// tree is collected with the path it occurred at; if anything was
/// collected the whole decode is rejected and no partial tree escapes.
pub fn decode_tree(spec: &models::RoutingTreeSpec) -> Result<policy::Route, Errors> {
    let mut errors = Errors::new();
    let scope = Scope::root();

    // `defaults` is validated like any other level. Its duration paths
    // have no `.routes[]` prefix: it is the tree's root policy, not a
    // route entry.
    let group_wait = decode_duration(
        scope.push_field("groupWait"),
        spec.defaults.group_wait.as_ref(),
        &mut errors,
    );
    let group_interval = decode_duration(
        scope.push_field("groupInterval"),
        spec.defaults.group_interval.as_ref(),
        &mut errors,
    );
    let repeat_interval = decode_duration(
        scope.push_field("repeatInterval"),
        spec.defaults.repeat_interval.as_ref(),
        &mut errors,
    );

    let routes_scope = scope.push_field("routes");
    let routes = spec
        .routes
        .iter()
        .enumerate()
        .map(|(index, child)| decode_route(routes_scope.push_index(index), child, 1, &mut errors))
        .collect();

    let root = policy::Route {
        receiver: spec.defaults.receiver.clone(),
        group_by: spec.defaults.group_by.clone(),
        group_wait,
        group_interval,
        repeat_interval,
        routes,
        ..Default::default()
    };
    errors.into_result(root)
}

fn decode_route(
    scope: Scope<'_>,
    route: &models::Route,
    depth: usize,
    errors: &mut Errors,
) -> policy::Route {
    let routes = if depth == MAX_DEPTH {
        if !route.routes.is_empty() {
            errors.push(Error::DepthExceeded {
                path: scope.push_field("routes").flatten(),
                max: MAX_DEPTH,
            });
        }
        Vec::new()
    } else {
        let routes_scope = scope.push_field("routes");
        route
            .routes
            .iter()
            .enumerate()
            .map(|(index, child)| {
                decode_route(routes_scope.push_index(index), child, depth + 1, errors)
            })
            .collect()
    };

    policy::Route {
        receiver: route.receiver.clone().unwrap_or_default(),
        group_by: route.group_by.clone(),
        group_wait: decode_duration(
            scope.push_field("groupWait"),
            route.group_wait.as_ref(),
            errors,
        ),
        group_interval: decode_duration(
            scope.push_field("groupInterval"),
            route.group_interval.as_ref(),
            errors,
        ),
        repeat_interval: decode_duration(
            scope.push_field("repeatInterval"),
            route.repeat_interval.as_ref(),
            errors,
        ),
        continue_matching: route.continue_matching,
        matchers: decode_matchers(scope, &route.matchers, errors),
        legacy: policy::LegacyMatchers::default(),
        mute_time_intervals: route.mute_time_intervals.clone(),
        active_time_intervals: route.active_time_intervals.clone(),
        routes,
    }
}

/// Full outbound conversion: encode the tree and wrap it in resource
/// metadata. The version token is stamped verbatim; it is never
/// inspected here. The returned [`Errors`] carries truncation warnings
/// only -- see [`encode_tree`].
pub fn encode_to_resource(
    tenant: TenantId,
    tree: &policy::Route,
    version: &Version,
    namespacer: impl Fn(TenantId) -> String,
) -> (models::RoutingTree, Errors) {
    let (spec, errors) = encode_tree(tree);
    let namespace = namespacer(tenant);
    let metadata = models::ObjectMeta {
        name: models::USER_DEFINED.to_string(),
        uid: resource_uid(&namespace, models::USER_DEFINED),
        namespace,
        resource_version: version.as_str().to_string(),
        provenance: None,
    };
    (models::RoutingTree { metadata, spec }, errors)
}

/// Full inbound conversion: decode the tree and extract the version
/// token the caller must hand back to the store's conditional write.
pub fn decode_from_resource(
    resource: &models::RoutingTree,
) -> Result<(policy::Route, Version), Errors> {
    let tree = decode_tree(&resource.spec)?;
    Ok((
        tree,
        Version::new(resource.metadata.resource_version.clone()),
    ))
}
