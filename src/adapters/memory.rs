use crate::domain::ports::Directory;
use crate::utils::error::{ProvisionError, Result};
use std::collections::{BTreeMap, BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEntry {
    pub locked: bool,
    pub has_home: bool,
}

/// In-memory directory fake: the same contract as the real host directory
/// without touching `/etc` or running privileged commands. Used by the test
/// suite and by `batch --dry-run`. Named accounts/groups can be marked to
/// fail so tests can exercise the partial-failure paths.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    accounts: BTreeMap<String, AccountEntry>,
    groups: BTreeMap<String, BTreeSet<String>>,
    failing_accounts: HashSet<String>,
    failing_groups: HashSet<String>,
    failing_locks: HashSet<String>,
    failing_memberships: HashSet<(String, String)>,
}

impl MemoryDirectory {
    pub fn with_failing_account(mut self, name: &str) -> Self {
        self.failing_accounts.insert(name.to_string());
        self
    }

    pub fn with_failing_group(mut self, name: &str) -> Self {
        self.failing_groups.insert(name.to_string());
        self
    }

    pub fn with_failing_lock(mut self, name: &str) -> Self {
        self.failing_locks.insert(name.to_string());
        self
    }

    pub fn with_failing_membership(mut self, account: &str, group: &str) -> Self {
        self.failing_memberships
            .insert((account.to_string(), group.to_string()));
        self
    }

    /// Pre-populate an account, bypassing the failure injection.
    pub fn seed_account(&mut self, name: &str, locked: bool) {
        self.accounts.insert(
            name.to_string(),
            AccountEntry {
                locked,
                has_home: true,
            },
        );
    }

    pub fn seed_group(&mut self, name: &str) {
        self.groups.entry(name.to_string()).or_default();
    }

    pub fn is_locked(&self, name: &str) -> Option<bool> {
        self.accounts.get(name).map(|a| a.locked)
    }

    pub fn has_home(&self, name: &str) -> Option<bool> {
        self.accounts.get(name).map(|a| a.has_home)
    }

    pub fn is_member(&self, account: &str, group: &str) -> bool {
        self.groups
            .get(group)
            .is_some_and(|members| members.contains(account))
    }

    pub fn members(&self, group: &str) -> Vec<String> {
        self.groups
            .get(group)
            .map(|m| m.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn directory_error(operation: &str, name: &str, detail: &str) -> ProvisionError {
        ProvisionError::DirectoryError {
            operation: operation.to_string(),
            name: name.to_string(),
            detail: detail.to_string(),
        }
    }
}

impl Directory for MemoryDirectory {
    fn account_exists(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    fn create_account(&mut self, name: &str) -> Result<()> {
        if self.failing_accounts.contains(name) {
            return Err(Self::directory_error("create account", name, "injected failure"));
        }
        if self.accounts.contains_key(name) {
            return Err(Self::directory_error("create account", name, "account already exists"));
        }
        self.accounts.insert(
            name.to_string(),
            AccountEntry {
                locked: false,
                has_home: true,
            },
        );
        Ok(())
    }

    fn set_account_locked(&mut self, name: &str, locked: bool) -> Result<()> {
        if self.failing_locks.contains(name) {
            return Err(Self::directory_error("lock account", name, "injected failure"));
        }
        match self.accounts.get_mut(name) {
            Some(account) => {
                account.locked = locked;
                Ok(())
            }
            None => Err(Self::directory_error("lock account", name, "no such account")),
        }
    }

    fn delete_account(&mut self, name: &str, _remove_home: bool) -> Result<()> {
        if self.accounts.remove(name).is_none() {
            return Err(Self::directory_error("delete account", name, "no such account"));
        }
        // 同步移除所有群組成員資格
        for members in self.groups.values_mut() {
            members.remove(name);
        }
        Ok(())
    }

    fn group_exists(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    fn create_group(&mut self, name: &str) -> Result<()> {
        if self.failing_groups.contains(name) {
            return Err(Self::directory_error("create group", name, "injected failure"));
        }
        if self.groups.contains_key(name) {
            return Err(Self::directory_error("create group", name, "group already exists"));
        }
        self.groups.insert(name.to_string(), BTreeSet::new());
        Ok(())
    }

    fn delete_group(&mut self, name: &str) -> Result<()> {
        if self.groups.remove(name).is_none() {
            return Err(Self::directory_error("delete group", name, "no such group"));
        }
        Ok(())
    }

    fn add_account_to_group(&mut self, account: &str, group: &str) -> Result<()> {
        if self
            .failing_memberships
            .contains(&(account.to_string(), group.to_string()))
        {
            return Err(Self::directory_error("add to group", group, "injected failure"));
        }
        if !self.accounts.contains_key(account) {
            return Err(Self::directory_error("add to group", account, "no such account"));
        }
        match self.groups.get_mut(group) {
            Some(members) => {
                // 重複加入視為成功（冪等）
                members.insert(account.to_string());
                Ok(())
            }
            None => Err(Self::directory_error("add to group", group, "no such group")),
        }
    }
}
