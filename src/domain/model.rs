use serde::{Deserialize, Serialize};

/// One parsed line of the batch input: an account and its target groups.
/// Produced fresh per line, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub groups: Vec<String>,
}

/// Result of parsing one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Blank line or `#` comment.
    Skip,
    /// The line has fields but no account name.
    MissingName,
    Record(Record),
}

/// Account-level result of reconciling one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountOutcome {
    Created,
    AlreadyExists,
    CreateFailed { detail: String },
}

/// Group-level result; one record yields zero or more of these, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    GroupCreated { name: String },
    GroupCreateFailed { name: String, detail: String },
    MembershipAdded { group: String },
    MembershipAddFailed { group: String, detail: String },
}

/// Everything reconciliation produced for a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub account: AccountOutcome,
    pub groups: Vec<GroupOutcome>,
}

/// Aggregate counts for one batch run, read-only once the loop ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub lines_read: usize,
    pub lines_skipped: usize,
    pub lines_missing_name: usize,
    pub accounts_created: usize,
    pub accounts_existing: usize,
    pub account_failures: usize,
    pub groups_created: usize,
    pub group_failures: usize,
    pub memberships_added: usize,
    pub membership_failures: usize,
}

impl BatchSummary {
    pub fn absorb(&mut self, outcome: &RecordOutcome) {
        match outcome.account {
            AccountOutcome::Created => self.accounts_created += 1,
            AccountOutcome::AlreadyExists => self.accounts_existing += 1,
            AccountOutcome::CreateFailed { .. } => self.account_failures += 1,
        }
        for group in &outcome.groups {
            match group {
                GroupOutcome::GroupCreated { .. } => self.groups_created += 1,
                GroupOutcome::GroupCreateFailed { .. } => self.group_failures += 1,
                GroupOutcome::MembershipAdded { .. } => self.memberships_added += 1,
                GroupOutcome::MembershipAddFailed { .. } => self.membership_failures += 1,
            }
        }
    }

    pub fn failures(&self) -> usize {
        self.lines_missing_name
            + self.account_failures
            + self.group_failures
            + self.membership_failures
    }
}
