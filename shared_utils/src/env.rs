use std::path::PathBuf;

use thiserror::Error;

/// A variable the dashboard looks up is unset or not valid unicode.
#[derive(Debug, Error)]
#[error("Environment variable {0} is not set")]
pub struct MissingEnvVarError(pub String);

/// Value of the environment variable `name`.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Picks the configuration file to load.
///
/// An explicit path (usually a CLI flag) wins; otherwise the environment
/// variable `env_name` is consulted. Empty values count as unset.
pub fn resolve_config_path(explicit: Option<PathBuf>, env_name: &str) -> Option<PathBuf> {
    explicit.or_else(|| {
        get_env_var(env_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VAR: &str = "SHARED_UTILS_TEST_CONFIG";

    #[test]
    #[serial]
    fn missing_var_is_reported_by_name() {
        unsafe { std::env::remove_var(VAR) };
        let err = get_env_var(VAR).unwrap_err();
        assert_eq!(err.to_string(), format!("Environment variable {VAR} is not set"));
    }

    #[test]
    #[serial]
    fn explicit_path_beats_environment() {
        unsafe { std::env::set_var(VAR, "/from/env.toml") };
        let picked = resolve_config_path(Some(PathBuf::from("/from/flag.toml")), VAR);
        assert_eq!(picked, Some(PathBuf::from("/from/flag.toml")));

        let picked = resolve_config_path(None, VAR);
        assert_eq!(picked, Some(PathBuf::from("/from/env.toml")));
        unsafe { std::env::remove_var(VAR) };
    }

    #[test]
    #[serial]
    fn blank_environment_value_counts_as_unset() {
        unsafe { std::env::set_var(VAR, "   ") };
        assert_eq!(resolve_config_path(None, VAR), None);
        unsafe { std::env::remove_var(VAR) };
    }
}
