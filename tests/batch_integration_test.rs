use std::fs;
use std::io::Cursor;
use tempfile::TempDir;
use user_provision::{
    AuditSink, BatchEngine, BatchSummary, Directory, FileAudit, MemoryDirectory, NullAudit,
    ProvisionError,
};

fn write_input(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("accounts.txt");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_end_to_end_batch_against_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "alice,dev,ops\nbob,admins\ncharlie\n# comment\n");

    let mut engine = BatchEngine::new(MemoryDirectory::default(), NullAudit);
    let summary = engine.run_file(&input).unwrap();

    assert_eq!(summary.lines_read, 4);
    assert_eq!(summary.lines_skipped, 1);
    assert_eq!(summary.accounts_created, 3);
    assert_eq!(summary.groups_created, 3);
    assert_eq!(summary.memberships_added, 3);
    assert_eq!(summary.failures(), 0);

    let directory = engine.directory();
    for account in ["alice", "bob", "charlie"] {
        assert!(directory.account_exists(account));
        assert_eq!(directory.is_locked(account), Some(true));
        // account creation also provisions the home area
        assert_eq!(directory.has_home(account), Some(true));
    }
    assert!(directory.is_member("alice", "dev"));
    assert!(directory.is_member("alice", "ops"));
    assert!(directory.is_member("bob", "admins"));
    assert!(directory.members("dev") == vec!["alice".to_string()]);
}

#[test]
fn test_malformed_lines_are_isolated() {
    let input = "\n# provisioning batch\n,dev\nalice,dev,\nbob,,admins\n9bad,ops\n";
    let mut engine = BatchEngine::new(MemoryDirectory::default(), NullAudit);
    let summary = engine.run(Cursor::new(input)).unwrap();

    assert_eq!(summary.lines_read, 6);
    assert_eq!(summary.lines_skipped, 2);
    assert_eq!(summary.lines_missing_name, 1);
    // '9bad' fails validation, alice and bob go through
    assert_eq!(summary.account_failures, 1);
    assert_eq!(summary.accounts_created, 2);
    assert_eq!(summary.memberships_added, 2);

    let directory = engine.directory();
    assert!(directory.account_exists("alice"));
    assert!(directory.account_exists("bob"));
    assert!(!directory.account_exists("9bad"));
    // the empty field in 'bob,,admins' is dropped, not an error
    assert!(directory.is_member("bob", "admins"));
}

#[test]
fn test_invalid_group_does_not_block_valid_ones() {
    let input = "alice,dev,BadGroup,ops\n";
    let mut engine = BatchEngine::new(MemoryDirectory::default(), NullAudit);
    let summary = engine.run(Cursor::new(input)).unwrap();

    assert_eq!(summary.accounts_created, 1);
    assert_eq!(summary.groups_created, 2);
    assert_eq!(summary.group_failures, 1);
    assert_eq!(summary.memberships_added, 2);

    let directory = engine.directory();
    assert!(directory.is_member("alice", "dev"));
    assert!(directory.is_member("alice", "ops"));
    assert!(!directory.group_exists("BadGroup"));
}

#[test]
fn test_failed_account_creation_produces_no_group_outcomes() {
    let directory = MemoryDirectory::default().with_failing_account("alice");
    let mut engine = BatchEngine::new(directory, NullAudit);
    let summary = engine.run(Cursor::new("alice,dev,ops\n")).unwrap();

    assert_eq!(summary.account_failures, 1);
    assert_eq!(summary.groups_created, 0);
    assert_eq!(summary.group_failures, 0);
    assert_eq!(summary.memberships_added, 0);
    assert_eq!(summary.membership_failures, 0);
    assert!(!engine.directory().group_exists("dev"));
}

#[test]
fn test_lock_failure_does_not_stop_group_processing() {
    let directory = MemoryDirectory::default().with_failing_lock("alice");
    let mut engine = BatchEngine::new(directory, NullAudit);
    let summary = engine.run(Cursor::new("alice,dev\n")).unwrap();

    assert_eq!(summary.accounts_created, 1);
    assert_eq!(summary.account_failures, 0);
    assert_eq!(summary.groups_created, 1);
    assert_eq!(summary.memberships_added, 1);
    assert_eq!(summary.failures(), 0);
    // created but left unlocked
    assert_eq!(engine.directory().is_locked("alice"), Some(false));
    assert!(engine.directory().is_member("alice", "dev"));
}

#[test]
fn test_membership_failure_is_local_to_one_group() {
    let directory = MemoryDirectory::default().with_failing_membership("alice", "dev");
    let mut engine = BatchEngine::new(directory, NullAudit);
    let summary = engine.run(Cursor::new("alice,dev,ops\n")).unwrap();

    assert_eq!(summary.accounts_created, 1);
    assert_eq!(summary.groups_created, 2);
    assert_eq!(summary.membership_failures, 1);
    assert_eq!(summary.memberships_added, 1);
    assert!(engine.directory().is_member("alice", "ops"));
    assert!(!engine.directory().is_member("alice", "dev"));
}

#[test]
fn test_missing_input_file_is_fatal() {
    let mut engine = BatchEngine::new(MemoryDirectory::default(), NullAudit);
    let err = engine
        .run_file(std::path::Path::new("/nonexistent/accounts.txt"))
        .unwrap_err();
    assert!(matches!(err, ProvisionError::StreamError { .. }));
    // nothing was processed
    assert_eq!(engine.directory().account_count(), 0);
}

#[test]
fn test_audit_log_records_state_changes() {
    let temp_dir = TempDir::new().unwrap();
    let audit_path = temp_dir.path().join("audit.log");
    let audit = FileAudit::new(audit_path.clone());
    audit.record("probe");

    let mut engine = BatchEngine::new(MemoryDirectory::default(), audit);
    engine.run(Cursor::new("alice,dev\n")).unwrap();

    let content = fs::read_to_string(&audit_path).unwrap();
    assert!(content.contains("Account 'alice' created"));
    assert!(content.contains("Account 'alice' locked"));
    assert!(content.contains("Group 'dev' created"));
    assert!(content.contains("Added 'alice' to group 'dev'"));
    assert!(content.contains("Batch complete"));
}

#[test]
fn test_summary_serializes_to_json() {
    let mut engine = BatchEngine::new(MemoryDirectory::default(), NullAudit);
    let summary = engine.run(Cursor::new("alice,dev\n")).unwrap();

    let json = serde_json::to_string(&summary).unwrap();
    let restored: BatchSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, summary);
    assert!(json.contains("\"accounts_created\":1"));
}
