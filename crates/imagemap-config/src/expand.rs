//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Bare `$VAR` is left alone. An unset variable without a default is an
/// error naming both the variable and the config field.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |var: &str| match std::env::var(var) {
        Ok(val) => Ok(Some(val)),
        Err(std::env::VarError::NotPresent) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        }),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} is not valid UTF-8"),
        }),
    };

    let expanded = shellexpand::env_with_context(value, lookup).map_err(|e| e.cause)?;
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("IMAGEMAP_TEST_CDN", "cdn.example.com");
        }
        let result = expand_env("https://${IMAGEMAP_TEST_CDN}/jquery.js", "scripts.jquery_url");
        assert_eq!(result.unwrap(), "https://cdn.example.com/jquery.js");
        unsafe {
            std::env::remove_var("IMAGEMAP_TEST_CDN");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("IMAGEMAP_TEST_UNSET");
        }
        let result = expand_env("${IMAGEMAP_TEST_UNSET:-/files}", "attachments.url_prefix");
        assert_eq!(result.unwrap(), "/files");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("IMAGEMAP_TEST_MISSING");
        }
        let err = expand_env("${IMAGEMAP_TEST_MISSING}", "scripts.mapster_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("IMAGEMAP_TEST_MISSING"));
        assert!(msg.contains("scripts.mapster_url"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("/attachments", "f").unwrap(), "/attachments");
        assert_eq!(expand_env("/$page/files", "f").unwrap(), "/$page/files");
    }
}
