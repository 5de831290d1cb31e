use std::io::Cursor;
use user_provision::{BatchEngine, MemoryDirectory, NullAudit};

const INPUT: &str = "alice,dev,ops\nbob,admins\ncharlie\n";

#[test]
fn test_second_run_changes_nothing() {
    let mut engine = BatchEngine::new(MemoryDirectory::default(), NullAudit);

    let first = engine.run(Cursor::new(INPUT)).unwrap();
    assert_eq!(first.accounts_created, 3);
    assert_eq!(first.groups_created, 3);
    assert_eq!(first.memberships_added, 3);
    assert_eq!(first.failures(), 0);

    let second = engine.run(Cursor::new(INPUT)).unwrap();
    assert_eq!(second.accounts_created, 0);
    assert_eq!(second.groups_created, 0);
    assert_eq!(second.accounts_existing, 3);
    // membership re-add is a no-op success, never a failure
    assert_eq!(second.memberships_added, 3);
    assert_eq!(second.failures(), 0);

    let directory = engine.directory();
    assert_eq!(directory.account_count(), 3);
    assert_eq!(directory.group_count(), 3);
    assert_eq!(directory.members("dev"), vec!["alice".to_string()]);
    assert_eq!(directory.members("admins"), vec!["bob".to_string()]);
}

#[test]
fn test_rerun_does_not_disturb_unlocked_existing_account() {
    let mut directory = MemoryDirectory::default();
    directory.seed_account("alice", false);

    let mut engine = BatchEngine::new(directory, NullAudit);
    let summary = engine.run(Cursor::new("alice,dev\n")).unwrap();

    assert_eq!(summary.accounts_existing, 1);
    assert_eq!(summary.accounts_created, 0);
    // an operator unlocked alice earlier; a re-run must not re-lock the account
    assert_eq!(engine.directory().is_locked("alice"), Some(false));
    assert!(engine.directory().is_member("alice", "dev"));
}

#[test]
fn test_duplicate_groups_in_one_record() {
    let mut engine = BatchEngine::new(MemoryDirectory::default(), NullAudit);
    let summary = engine.run(Cursor::new("alice,dev,dev\n")).unwrap();

    assert_eq!(summary.groups_created, 1);
    assert_eq!(summary.memberships_added, 2);
    assert_eq!(summary.failures(), 0);
    assert_eq!(engine.directory().members("dev"), vec!["alice".to_string()]);
}

#[test]
fn test_group_named_after_account_is_fine() {
    let mut engine = BatchEngine::new(MemoryDirectory::default(), NullAudit);
    let summary = engine.run(Cursor::new("alice,alice\n")).unwrap();

    assert_eq!(summary.accounts_created, 1);
    assert_eq!(summary.groups_created, 1);
    assert_eq!(summary.memberships_added, 1);
    assert_eq!(summary.failures(), 0);
    assert!(engine.directory().is_member("alice", "alice"));
}
