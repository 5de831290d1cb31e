use crate::core::parse::parse_line;
use crate::core::reconcile::Reconciler;
use crate::domain::model::{AccountOutcome, BatchSummary, GroupOutcome, ParsedLine, Record, RecordOutcome};
use crate::domain::ports::{AuditSink, Directory};
use crate::utils::error::{ProvisionError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Owns the line loop: reads the input stream, numbers lines for
/// diagnostics, delegates each line to the parser and the reconciler, and
/// accumulates the batch summary. Data problems never abort the loop; only
/// stream-level failures are fatal.
pub struct BatchEngine<D: Directory, A: AuditSink> {
    reconciler: Reconciler<D, A>,
}

impl<D: Directory, A: AuditSink> BatchEngine<D, A> {
    pub fn new(directory: D, audit: A) -> Self {
        Self {
            reconciler: Reconciler::new(directory, audit),
        }
    }

    pub fn directory(&self) -> &D {
        self.reconciler.directory()
    }

    /// Open `path` and run the batch. An unreadable path is fatal and
    /// reported before any line is processed.
    pub fn run_file(&mut self, path: &Path) -> Result<BatchSummary> {
        let file = File::open(path).map_err(|e| ProvisionError::StreamError {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        self.run(BufReader::new(file))
    }

    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            // 讀取中途壞掉也是串流層級的錯誤，直接中止
            let raw = line.map_err(|e| ProvisionError::StreamError {
                path: format!("line {}", line_number),
                detail: e.to_string(),
            })?;
            summary.lines_read += 1;

            match parse_line(&raw) {
                ParsedLine::Skip => {
                    summary.lines_skipped += 1;
                }
                ParsedLine::MissingName => {
                    summary.lines_missing_name += 1;
                    tracing::warn!("line {}: missing username, record skipped", line_number);
                }
                ParsedLine::Record(record) => {
                    let outcome = self.reconciler.reconcile(&record);
                    report_outcome(line_number, &record, &outcome);
                    summary.absorb(&outcome);
                }
            }
        }

        self.reconciler.audit().record(&format!(
            "Batch complete: {} accounts created, {} groups created, {} memberships added, {} failures",
            summary.accounts_created,
            summary.groups_created,
            summary.memberships_added,
            summary.failures()
        ));
        report_summary(&summary);

        Ok(summary)
    }
}

fn report_outcome(line_number: usize, record: &Record, outcome: &RecordOutcome) {
    match &outcome.account {
        AccountOutcome::Created => {
            tracing::info!("line {}: account '{}' created and locked", line_number, record.name);
        }
        AccountOutcome::AlreadyExists => {
            tracing::info!("line {}: account '{}' already exists", line_number, record.name);
        }
        AccountOutcome::CreateFailed { detail } => {
            tracing::error!(
                "line {}: account '{}' creation failed: {}",
                line_number,
                record.name,
                detail
            );
        }
    }

    for group in &outcome.groups {
        match group {
            GroupOutcome::GroupCreated { name } => {
                tracing::info!("line {}: group '{}' created", line_number, name);
            }
            GroupOutcome::GroupCreateFailed { name, detail } => {
                tracing::error!("line {}: group '{}' failed: {}", line_number, name, detail);
            }
            GroupOutcome::MembershipAdded { group } => {
                tracing::info!(
                    "line {}: '{}' added to group '{}'",
                    line_number,
                    record.name,
                    group
                );
            }
            GroupOutcome::MembershipAddFailed { group, detail } => {
                tracing::error!(
                    "line {}: adding '{}' to group '{}' failed: {}",
                    line_number,
                    record.name,
                    group,
                    detail
                );
            }
        }
    }
}

fn report_summary(summary: &BatchSummary) {
    tracing::info!(
        "Batch finished: {} lines read ({} skipped, {} missing username)",
        summary.lines_read,
        summary.lines_skipped,
        summary.lines_missing_name
    );
    tracing::info!(
        "Accounts: {} created, {} already existed, {} failed",
        summary.accounts_created,
        summary.accounts_existing,
        summary.account_failures
    );
    tracing::info!(
        "Groups: {} created, {} failed; memberships: {} added, {} failed",
        summary.groups_created,
        summary.group_failures,
        summary.memberships_added,
        summary.membership_failures
    );
}
