use crate::utils::error::{ProvisionError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

// POSIX portable login-name rule, capped at 32 characters total.
const NAME_PATTERN: &str = r"^[a-z_][a-z0-9_-]{0,31}$";

fn name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(NAME_PATTERN).expect("name pattern is a valid regex"))
}

/// Pure predicate shared by account and group names.
pub fn is_valid_name(name: &str) -> bool {
    name_regex().is_match(name)
}

pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(ProvisionError::ValidationError {
            message: format!("invalid {} name '{}' (expected {})", kind, name, NAME_PATTERN),
        })
    }
}

pub fn validate_path_setting(field_name: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ProvisionError::ConfigError {
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}
