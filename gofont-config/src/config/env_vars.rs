//! Environment variable allowlist and substitution for config file processing.
//!
//! Only allowlisted variables (and `GOFONT_*` / `XDG_*` prefixed ones) are
//! resolved by default, so a shared config file cannot pull arbitrary
//! secrets out of the environment.

use regex::Regex;
use std::sync::LazyLock;

/// Matches `${VAR_NAME}` or `${VAR_NAME:-default_value}`.
static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-((?:[^}\\]|\\.)*))?}")
        .expect("env-var substitution regex is a compile-time constant and must be valid")
});

/// Detects `allow_all_env_vars: true` at the top level of YAML.
static ALLOW_ALL_ENV_VARS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^allow_all_env_vars:\s*true\s*$")
        .expect("allow_all_env_vars pre-scan regex is a compile-time constant and must be valid")
});

/// Environment variables that are safe to substitute in config files.
pub const ALLOWED_ENV_VARS: &[&str] = &[
    "HOME",
    "USER",
    "USERNAME",
    "LOGNAME",
    "USERPROFILE",
    "TMPDIR",
    "GOOGLE_FONTS_API_KEY",
];

/// A variable is allowed if it appears in [`ALLOWED_ENV_VARS`] or starts
/// with `GOFONT_` or `XDG_`.
pub fn is_env_var_allowed(var_name: &str) -> bool {
    ALLOWED_ENV_VARS.contains(&var_name)
        || var_name.starts_with("GOFONT_")
        || var_name.starts_with("XDG_")
}

/// Substitute allowlisted `${VAR}` patterns in a string.
///
/// - `${VAR}` is replaced with the value of `VAR`; an unset variable leaves
///   the placeholder unchanged.
/// - `${VAR:-default}` falls back to `default` when `VAR` is unset.
/// - `$${VAR}` is an escape and produces the literal `${VAR}`.
pub fn substitute_variables(input: &str) -> String {
    substitute_variables_with_allowlist(input, false)
}

/// Substitute variables, resolving every variable when `allow_all` is set.
pub fn substitute_variables_with_allowlist(input: &str, allow_all: bool) -> String {
    let escaped_placeholder = "\x00ESC_DOLLAR\x00";
    let working = input.replace("$${", escaped_placeholder);

    let result = ENV_VAR_PATTERN.replace_all(&working, |caps: &regex::Captures| {
        let var_name = &caps[1];

        if !allow_all && !is_env_var_allowed(var_name) {
            log::warn!(
                "Config references non-allowlisted environment variable ${{{var_name}}}, skipped. \
                 Add `allow_all_env_vars: true` to your config to allow all variables."
            );
            return caps[0].to_string();
        }

        match std::env::var(var_name) {
            Ok(val) => val,
            Err(_) => caps
                .get(2)
                .map(|m| m.as_str().replace("\\}", "}"))
                .unwrap_or_else(|| caps[0].to_string()),
        }
    });

    result.replace(escaped_placeholder, "${")
}

/// Pre-scan raw YAML for `allow_all_env_vars: true`.
///
/// Runs before substitution, and therefore before deserialization.
pub(crate) fn pre_scan_allow_all_env_vars(raw_yaml: &str) -> bool {
    ALLOW_ALL_ENV_VARS_PATTERN.is_match(raw_yaml)
}

/// True if `value` still contains an unresolved `${...}` reference.
pub fn has_unresolved_variable(value: &str) -> bool {
    ENV_VAR_PATTERN.is_match(value)
}
