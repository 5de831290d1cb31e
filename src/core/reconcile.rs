use crate::domain::model::{AccountOutcome, GroupOutcome, Record, RecordOutcome};
use crate::domain::ports::{AuditSink, Directory};
use crate::utils::validation::validate_name;

/// Per-record state machine: compares one desired record against the
/// directory and applies the minimal operations to close the gap.
///
/// Every failure is turned into an outcome value at this boundary; nothing
/// here propagates an error that could abort the batch loop.
pub struct Reconciler<D: Directory, A: AuditSink> {
    directory: D,
    audit: A,
}

impl<D: Directory, A: AuditSink> Reconciler<D, A> {
    pub fn new(directory: D, audit: A) -> Self {
        Self { directory, audit }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    /// Reconcile one record. The account outcome is decided before any group
    /// work; if the account cannot be created, no group or membership
    /// operations run for this record.
    pub fn reconcile(&mut self, record: &Record) -> RecordOutcome {
        // 1. 先驗證帳號名稱，不合法就整筆拒絕
        if let Err(e) = validate_name("account", &record.name) {
            return RecordOutcome {
                account: AccountOutcome::CreateFailed {
                    detail: e.to_string(),
                },
                groups: Vec::new(),
            };
        }

        let account = self.ensure_account(&record.name);
        if matches!(account, AccountOutcome::CreateFailed { .. }) {
            return RecordOutcome {
                account,
                groups: Vec::new(),
            };
        }

        let mut groups = Vec::new();
        for raw_group in &record.groups {
            let group = raw_group.trim();
            if group.is_empty() {
                continue;
            }
            groups.extend(self.ensure_membership(&record.name, group));
        }

        RecordOutcome { account, groups }
    }

    /// Ensure the account exists. A newly created account is locked
    /// immediately so it has no usable password; an existing account is left
    /// completely untouched, including its lock state.
    pub fn ensure_account(&mut self, name: &str) -> AccountOutcome {
        if self.directory.account_exists(name) {
            return AccountOutcome::AlreadyExists;
        }

        if let Err(e) = self.directory.create_account(name) {
            return AccountOutcome::CreateFailed {
                detail: e.to_string(),
            };
        }
        self.audit.record(&format!("Account '{}' created", name));

        // 鎖定失敗只警告：帳號已存在，後續群組處理照常進行
        match self.directory.set_account_locked(name, true) {
            Ok(()) => self.audit.record(&format!("Account '{}' locked", name)),
            Err(e) => tracing::warn!("Failed to lock new account '{}': {}", name, e),
        }

        AccountOutcome::Created
    }

    /// Ensure the group exists, then ensure the membership. One bad group
    /// never blocks the others: the caller keeps iterating regardless of
    /// what this returns.
    pub fn ensure_membership(&mut self, account: &str, group: &str) -> Vec<GroupOutcome> {
        let mut outcomes = Vec::new();

        if let Err(e) = validate_name("group", group) {
            outcomes.push(GroupOutcome::GroupCreateFailed {
                name: group.to_string(),
                detail: e.to_string(),
            });
            return outcomes;
        }

        if !self.directory.group_exists(group) {
            match self.directory.create_group(group) {
                Ok(()) => {
                    self.audit.record(&format!("Group '{}' created", group));
                    outcomes.push(GroupOutcome::GroupCreated {
                        name: group.to_string(),
                    });
                }
                Err(e) => {
                    // 群組建不出來就不要嘗試加入成員
                    outcomes.push(GroupOutcome::GroupCreateFailed {
                        name: group.to_string(),
                        detail: e.to_string(),
                    });
                    return outcomes;
                }
            }
        }

        match self.directory.add_account_to_group(account, group) {
            Ok(()) => {
                self.audit
                    .record(&format!("Added '{}' to group '{}'", account, group));
                outcomes.push(GroupOutcome::MembershipAdded {
                    group: group.to_string(),
                });
            }
            Err(e) => outcomes.push(GroupOutcome::MembershipAddFailed {
                group: group.to_string(),
                detail: e.to_string(),
            }),
        }

        outcomes
    }
}
