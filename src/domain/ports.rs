use crate::utils::error::Result;

/// The account directory backing the host: the only thing the core mutates.
/// Existence checks are plain reads; mutations report failure detail through
/// the crate error type. `create_account` also provisions the home area.
pub trait Directory {
    fn account_exists(&self, name: &str) -> bool;
    fn create_account(&mut self, name: &str) -> Result<()>;
    fn set_account_locked(&mut self, name: &str, locked: bool) -> Result<()>;
    fn delete_account(&mut self, name: &str, remove_home: bool) -> Result<()>;
    fn group_exists(&self, name: &str) -> bool;
    fn create_group(&mut self, name: &str) -> Result<()>;
    fn delete_group(&mut self, name: &str) -> Result<()>;
    /// Must be a no-op success when the membership already exists.
    fn add_account_to_group(&mut self, account: &str, group: &str) -> Result<()>;
}

/// Receives one human-readable line per significant state change.
/// Implementations swallow their own write errors; a lost audit line is
/// never fatal to the batch.
pub trait AuditSink {
    fn record(&self, message: &str);
}
