//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable, falling back to `default`.
///
/// An unset variable is the expected case and returns `default` silently.
/// A set but unparsable value logs a warning and also returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Read a non-empty environment variable.
pub fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "POKEXP_TEST_ENV_PARSE_VALID_1151";
        unsafe { std::env::set_var(var_name, "42") };
        let result: usize = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "POKEXP_TEST_ENV_PARSE_INVALID_1152";
        unsafe { std::env::set_var(var_name, "pikachu") };
        let result: usize = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "POKEXP_TEST_ENV_PARSE_MISSING_1153";
        unsafe { std::env::remove_var(var_name) };
        let result: usize = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_non_empty_ignores_blank() {
        let var_name = "POKEXP_TEST_ENV_NON_EMPTY_1154";
        unsafe { std::env::set_var(var_name, "   ") };
        assert_eq!(env_non_empty(var_name), None);
        unsafe { std::env::set_var(var_name, " /tmp/pokexp.db ") };
        assert_eq!(env_non_empty(var_name).as_deref(), Some("/tmp/pokexp.db"));
        unsafe { std::env::remove_var(var_name) };
    }
}
