pub mod batch;
pub mod parse;
pub mod reconcile;

pub use crate::domain::model::{
    AccountOutcome, BatchSummary, GroupOutcome, ParsedLine, Record, RecordOutcome,
};
pub use crate::domain::ports::{AuditSink, Directory};
pub use crate::utils::error::Result;
