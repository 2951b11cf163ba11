//! Browser configuration management.
//!
//! # Sub-modules
//!
//! - [`config_struct`]: Core `Config` struct and its `Default` impl
//! - [`persistence`]: `impl Config` methods for load/save, validation and path resolution
//! - [`env_vars`]: Environment-variable allowlist and `${VAR}` substitution

pub mod config_struct;
pub mod env_vars;
pub mod persistence;

pub use config_struct::Config;
pub use env_vars::{
    ALLOWED_ENV_VARS, is_env_var_allowed, substitute_variables, substitute_variables_with_allowlist,
};
pub use persistence::expand_home;
