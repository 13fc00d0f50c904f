use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Reads an environment variable, falling back to `default` when it is unset
/// or blank.
pub fn get_env_var_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn missing_var_reports_its_name() {
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_MISSING") };
        let err = get_env_var("SHARED_UTILS_TEST_MISSING").unwrap_err();
        assert_eq!(err.to_string(), "Missing environment variable: SHARED_UTILS_TEST_MISSING");
    }

    #[test]
    #[serial]
    fn default_used_when_unset_or_blank() {
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_DEFAULT") };
        assert_eq!(get_env_var_or("SHARED_UTILS_TEST_DEFAULT", "neo4j"), "neo4j");

        unsafe { std::env::set_var("SHARED_UTILS_TEST_DEFAULT", "  ") };
        assert_eq!(get_env_var_or("SHARED_UTILS_TEST_DEFAULT", "neo4j"), "neo4j");

        unsafe { std::env::set_var("SHARED_UTILS_TEST_DEFAULT", "admin") };
        assert_eq!(get_env_var_or("SHARED_UTILS_TEST_DEFAULT", "neo4j"), "admin");
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_DEFAULT") };
    }
}
