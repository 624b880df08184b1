//! Bulk actions over the selection
//!
//! Per-message requests are fanned out on a dedicated rayon pool with one
//! worker per message and joined before the list is touched. Each request's
//! failure is captured on its own.

use log::error;
use rayon::ThreadPoolBuilder;

use crate::error::{ServiceError, ServiceResult};
use crate::models::MessageId;
use crate::view::prompts;

/// An action applied to every selected message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    MarkRead,
    MarkUnread,
    Archive,
}

impl BulkAction {
    /// Action text used in the confirmation dialog
    pub fn label(self) -> &'static str {
        match self {
            BulkAction::MarkRead => prompts::MARK_READ,
            BulkAction::MarkUnread => prompts::MARK_UNREAD,
            BulkAction::Archive => prompts::ARCHIVE,
        }
    }
}

/// Per-message results of a bulk action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    pub action: BulkAction,
    pub succeeded: Vec<MessageId>,
    pub failed: Vec<(MessageId, ServiceError)>,
}

impl BulkOutcome {
    pub fn new(action: BulkAction) -> Self {
        Self {
            action,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// How a bulk action ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkStatus {
    /// No checkbox was checked; nothing was sent
    NothingSelected,
    /// The user declined the confirmation; nothing was sent
    Cancelled,
    /// Requests were issued
    Completed(BulkOutcome),
}

impl BulkStatus {
    pub fn outcome(&self) -> Option<&BulkOutcome> {
        match self {
            BulkStatus::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Run `op` for every id at once, results in input order
///
/// Requests block on I/O, so every id gets its own worker thread.
pub(crate) fn fan_out<F>(ids: &[MessageId], op: F) -> Vec<ServiceResult<()>>
where
    F: Fn(&MessageId) -> ServiceResult<()> + Sync,
{
    if ids.is_empty() {
        return Vec::new();
    }

    let pool = match ThreadPoolBuilder::new()
        .num_threads(ids.len())
        .thread_name(|i| format!("bulk-request-{}", i))
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to start {} request workers: {}", ids.len(), e);
            let err = ServiceError::Transport(format!("no request worker: {}", e));
            return ids.iter().map(|_| Err(err.clone())).collect();
        }
    };

    let mut slots: Vec<Option<ServiceResult<()>>> = vec![None; ids.len()];
    let op = &op;
    pool.scope(|scope| {
        for (slot, id) in slots.iter_mut().zip(ids) {
            scope.spawn(move |_| *slot = Some(op(id)));
        }
    });

    slots
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| Err(ServiceError::Transport("request worker exited".to_string())))
        })
        .collect()
}
