use crate::domain::ports::Directory;
use crate::utils::error::{ProvisionError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const DEFAULT_PASSWD_FILE: &str = "/etc/passwd";
const DEFAULT_GROUP_FILE: &str = "/etc/group";

/// Linux host directory: existence checks read the passwd/group databases,
/// mutations shell out to the shadow-utils commands (`useradd`, `usermod`,
/// `userdel`, `groupadd`, `groupdel`). Requires the privileges those
/// commands require.
#[derive(Debug, Clone)]
pub struct SystemDirectory {
    passwd_file: PathBuf,
    group_file: PathBuf,
}

impl Default for SystemDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemDirectory {
    pub fn new() -> Self {
        Self {
            passwd_file: PathBuf::from(DEFAULT_PASSWD_FILE),
            group_file: PathBuf::from(DEFAULT_GROUP_FILE),
        }
    }

    pub fn with_paths(passwd_file: PathBuf, group_file: PathBuf) -> Self {
        Self {
            passwd_file,
            group_file,
        }
    }

    /// True when `name` is the first colon-separated field of any line.
    fn name_listed(database: &Path, name: &str) -> bool {
        match fs::read_to_string(database) {
            Ok(content) => content
                .lines()
                .filter_map(|line| line.split(':').next())
                .any(|entry| entry == name),
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", database.display(), e);
                false
            }
        }
    }

    fn run(mut command: Command, operation: &str, name: &str) -> Result<()> {
        let output = command
            .output()
            .map_err(|e| ProvisionError::DirectoryError {
                operation: operation.to_string(),
                name: name.to_string(),
                detail: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            // shadow-utils 把原因寫在 stderr
            let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(ProvisionError::DirectoryError {
                operation: operation.to_string(),
                name: name.to_string(),
                detail: if detail.is_empty() {
                    format!("exit status {}", output.status)
                } else {
                    detail
                },
            })
        }
    }
}

impl Directory for SystemDirectory {
    fn account_exists(&self, name: &str) -> bool {
        Self::name_listed(&self.passwd_file, name)
    }

    fn create_account(&mut self, name: &str) -> Result<()> {
        let mut command = Command::new("useradd");
        command.arg("-m").arg(name);
        Self::run(command, "create account", name)
    }

    fn set_account_locked(&mut self, name: &str, locked: bool) -> Result<()> {
        let flag = if locked { "-L" } else { "-U" };
        let mut command = Command::new("usermod");
        command.arg(flag).arg(name);
        let operation = if locked { "lock account" } else { "unlock account" };
        Self::run(command, operation, name)
    }

    fn delete_account(&mut self, name: &str, remove_home: bool) -> Result<()> {
        let mut command = Command::new("userdel");
        if remove_home {
            command.arg("-r");
        }
        command.arg(name);
        Self::run(command, "delete account", name)
    }

    fn group_exists(&self, name: &str) -> bool {
        Self::name_listed(&self.group_file, name)
    }

    fn create_group(&mut self, name: &str) -> Result<()> {
        let mut command = Command::new("groupadd");
        command.arg(name);
        Self::run(command, "create group", name)
    }

    fn delete_group(&mut self, name: &str) -> Result<()> {
        let mut command = Command::new("groupdel");
        command.arg(name);
        Self::run(command, "delete group", name)
    }

    fn add_account_to_group(&mut self, account: &str, group: &str) -> Result<()> {
        // usermod -aG 對既有成員是冪等的
        let mut command = Command::new("usermod");
        command.arg("-aG").arg(group).arg(account);
        Self::run(command, "add to group", account)
    }
}
