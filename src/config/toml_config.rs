use crate::utils::error::{ProvisionError, Result};
use crate::utils::validation::{validate_path_setting, Validate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional TOML settings file:
///
/// ```toml
/// [directory]
/// passwd_file = "/etc/passwd"
/// group_file = "/etc/group"
///
/// [audit]
/// log_path = "/var/log/user-provision.log"
/// ```
///
/// Every key is optional; unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub directory: DirectorySettings,
    #[serde(default)]
    pub audit: AuditSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectorySettings {
    #[serde(default = "default_passwd_file")]
    pub passwd_file: PathBuf,
    #[serde(default = "default_group_file")]
    pub group_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditSettings {
    #[serde(default = "default_audit_log")]
    pub log_path: PathBuf,
}

fn default_passwd_file() -> PathBuf {
    PathBuf::from("/etc/passwd")
}

fn default_group_file() -> PathBuf {
    PathBuf::from("/etc/group")
}

fn default_audit_log() -> PathBuf {
    PathBuf::from("/var/log/user-provision.log")
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            passwd_file: default_passwd_file(),
            group_file: default_group_file(),
        }
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            log_path: default_audit_log(),
        }
    }
}

impl Settings {
    /// Load and validate a settings file. A path given explicitly on the
    /// command line must exist; there is no silent fallback.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ProvisionError::ConfigError {
            message: format!("cannot read settings file '{}': {}", path.display(), e),
        })?;
        let settings: Settings =
            toml::from_str(&content).map_err(|e| ProvisionError::ConfigError {
                message: format!("invalid settings file '{}': {}", path.display(), e),
            })?;
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path_setting("directory.passwd_file", &self.directory.passwd_file)?;
        validate_path_setting("directory.group_file", &self.directory.group_file)?;
        validate_path_setting("audit.log_path", &self.audit.log_path)?;
        Ok(())
    }
}
