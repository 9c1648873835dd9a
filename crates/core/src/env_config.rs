//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently.
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
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

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns a unique variable name, so concurrent tests never race on one.

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "MALA_COUNTER_TEST_BODY_LIMIT_VALID";
        unsafe { std::env::set_var(var_name, "4096") };
        let result: usize = env_parse_with_default(var_name, 10);
        assert_eq!(result, 4096);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "MALA_COUNTER_TEST_BODY_LIMIT_INVALID";
        unsafe { std::env::set_var(var_name, "lots") };
        let result: usize = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "MALA_COUNTER_TEST_BODY_LIMIT_MISSING";
        unsafe { std::env::remove_var(var_name) };
        let result: usize = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_env_parse_negative_for_unsigned() {
        let var_name = "MALA_COUNTER_TEST_BODY_LIMIT_NEGATIVE";
        unsafe { std::env::set_var(var_name, "-1") };
        let result: usize = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        unsafe { std::env::remove_var(var_name) };
    }
}
