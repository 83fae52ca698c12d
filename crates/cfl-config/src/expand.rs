//! Environment variable expansion for configuration strings.

use std::env::VarError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// Values without `${` are returned unchanged, so passwords containing a
/// bare `$` survive as written.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |var: &str| match std::env::var(var) {
        Ok(resolved) => Ok(Some(resolved)),
        Err(VarError::NotPresent) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        }),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} is not valid unicode"),
        }),
    };

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(err) => Err(err.cause),
    }
}
