pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{FileAudit, MemoryDirectory, NullAudit, SystemDirectory};
pub use config::{Cli, ProvisionCommand, Settings};
pub use core::batch::BatchEngine;
pub use core::parse::parse_line;
pub use core::reconcile::Reconciler;
pub use domain::model::{
    AccountOutcome, BatchSummary, GroupOutcome, ParsedLine, Record, RecordOutcome,
};
pub use domain::ports::{AuditSink, Directory};
pub use utils::error::{ProvisionError, Result};
