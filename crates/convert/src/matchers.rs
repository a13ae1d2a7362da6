use models::MatcherType;
use policy::MatchOperator;

use crate::errors::{Error, Errors};
use crate::scope::Scope;

/// Flatten a route's matcher inputs into the single wire list.
///
/// Emission order is fixed so that repeated encodes of the same logical
/// inputs are byte-identical: legacy exact-match entries first (sorted
/// by label), then legacy regex entries (sorted by label, with the
/// pattern's canonical text as the value), then the structured list in
/// its original order, then the deprecated object list.
pub fn encode_matchers(route: &policy::Route) -> Vec<models::Matcher> {
    let mut out = Vec::with_capacity(
        route.legacy.exact.len()
            + route.legacy.regex.len()
            + route.matchers.len()
            + route.legacy.object.len(),
    );

    for (label, value) in &route.legacy.exact {
        out.push(models::Matcher {
            label: label.clone(),
            type_: MatcherType::Equal,
            value: value.clone(),
        });
    }
    for (label, pattern) in &route.legacy.regex {
        out.push(models::Matcher {
            label: label.clone(),
            type_: MatcherType::EqualRegex,
            value: pattern.as_str().to_string(),
        });
    }
    for matcher in route.matchers.iter().chain(&route.legacy.object) {
        out.push(models::Matcher {
            label: matcher.label.clone(),
            type_: match matcher.op {
                MatchOperator::Equal => MatcherType::Equal,
                MatchOperator::NotEqual => MatcherType::NotEqual,
                MatchOperator::Regexp => MatcherType::EqualRegex,
                MatchOperator::NotRegexp => MatcherType::NotEqualRegex,
            },
            value: matcher.value.clone(),
        });
    }
    out
}

/// Map wire matchers back into domain matchers. An unknown matcher type
/// or a matcher that fails to construct (e.x. an invalid regex) is
/// recorded against its own index and skipped; siblings keep decoding.
pub fn decode_matchers(
    scope: Scope<'_>,
    matchers: &[models::Matcher],
    errors: &mut Errors,
) -> Vec<policy::Matcher> {
    let mut out = Vec::with_capacity(matchers.len());
    let matchers_scope = scope.push_field("matchers");

    for (index, matcher) in matchers.iter().enumerate() {
        let scope = matchers_scope.push_index(index);

        let op = match &matcher.type_ {
            MatcherType::Equal => MatchOperator::Equal,
            MatcherType::NotEqual => MatchOperator::NotEqual,
            MatcherType::EqualRegex => MatchOperator::Regexp,
            MatcherType::NotEqualRegex => MatchOperator::NotRegexp,
            MatcherType::Unknown(other) => {
                errors.push(Error::UnknownMatcherType {
                    path: scope.flatten(),
                    type_: other.clone(),
                });
                continue;
            }
        };
        match policy::Matcher::new(op, &matcher.label, &matcher.value) {
            Ok(matcher) => out.push(matcher),
            Err(source) => errors.push(Error::InvalidMatcher {
                path: scope.flatten(),
                source,
            }),
        }
    }
    out
}
