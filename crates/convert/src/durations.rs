use crate::errors::{Error, Errors};
use crate::scope::Scope;

/// Format an optional duration into its canonical wire text. Unset stays
/// unset.
pub fn encode_duration(duration: Option<policy::Duration>) -> Option<String> {
    duration.map(|d| d.to_string())
}

/// Parse an optional wire text into a duration. Absent and empty input
/// both mean "unset, inherit the parent's value" and are not errors.
/// Unparseable input is recorded against `scope` and yields unset, so
/// the surrounding walk keeps collecting further failures.
pub fn decode_duration(
    scope: Scope<'_>,
    value: Option<&String>,
    errors: &mut Errors,
) -> Option<policy::Duration> {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => return None,
    };
    match value.parse() {
        Ok(duration) => Some(duration),
        Err(source) => {
            errors.push(Error::InvalidDuration {
                path: scope.flatten(),
                value: value.clone(),
                source,
            });
            None
        }
    }
}
