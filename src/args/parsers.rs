use crate::error::ValidationError;

/// Reads a presence flag from the environment.
///
/// Any non-empty value is true, including `0` and `false`.
pub(crate) fn parse_truthy_env(s: &str) -> Result<bool, ValidationError> {
    Ok(!s.is_empty())
}
