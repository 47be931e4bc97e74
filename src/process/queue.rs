/*!
 * Queue Set
 * New, Ready, and Waiting queues of handles into the process store
 */

use super::store::ProcessId;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// Queue operation result
pub type QueueResult<T> = Result<T, QueueError>;

/// Queue errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum QueueError {
    #[error("Process handle {id} is not in the {queue} queue")]
    #[diagnostic(code(queue::not_queued))]
    NotQueued { id: ProcessId, queue: QueueKind },

    #[error("Process handle {id} is already in the {queue} queue")]
    #[diagnostic(code(queue::already_queued))]
    AlreadyQueued { id: ProcessId, queue: QueueKind },
}

/// The active queues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    /// Loaded processes, ordered by arrival
    New,
    /// FIFO of resident processes; the head runs
    Ready,
    /// Processes blocked on I/O, in blocking order
    Waiting,
}

impl QueueKind {
    pub const ALL: [QueueKind; 3] = [Self::New, Self::Ready, Self::Waiting];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Ready => "ready",
            Self::Waiting => "waiting",
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered queues holding non-owning handles
///
/// A handle is in at most one queue at a time. Membership is tracked per
/// handle so moves and removals are checked before any queue is touched.
#[derive(Debug, Clone, Default)]
pub struct QueueSet {
    new: VecDeque<ProcessId>,
    ready: VecDeque<ProcessId>,
    waiting: VecDeque<ProcessId>,
    location: Vec<Option<QueueKind>>,
}

impl QueueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            new: VecDeque::with_capacity(capacity),
            ready: VecDeque::with_capacity(capacity),
            waiting: VecDeque::with_capacity(capacity),
            location: Vec::with_capacity(capacity),
        }
    }

    fn queue(&self, kind: QueueKind) -> &VecDeque<ProcessId> {
        match kind {
            QueueKind::New => &self.new,
            QueueKind::Ready => &self.ready,
            QueueKind::Waiting => &self.waiting,
        }
    }

    fn queue_mut(&mut self, kind: QueueKind) -> &mut VecDeque<ProcessId> {
        match kind {
            QueueKind::New => &mut self.new,
            QueueKind::Ready => &mut self.ready,
            QueueKind::Waiting => &mut self.waiting,
        }
    }

    /// Queue currently holding `id`
    pub fn location(&self, id: ProcessId) -> Option<QueueKind> {
        self.location.get(id.index()).copied().flatten()
    }

    fn set_location(&mut self, id: ProcessId, kind: Option<QueueKind>) {
        if self.location.len() <= id.index() {
            self.location.resize(id.index() + 1, None);
        }
        self.location[id.index()] = kind;
    }

    pub fn contains(&self, id: ProcessId, kind: QueueKind) -> bool {
        self.location(id) == Some(kind)
    }

    /// Link an unqueued handle at the tail of `kind`
    pub fn push(&mut self, id: ProcessId, kind: QueueKind) -> QueueResult<()> {
        if let Some(queue) = self.location(id) {
            return Err(QueueError::AlreadyQueued { id, queue });
        }
        self.queue_mut(kind).push_back(id);
        self.set_location(id, Some(kind));
        Ok(())
    }

    /// Unlink `id` from any position of `from` and link it at the tail of `to`
    pub fn append(&mut self, id: ProcessId, from: QueueKind, to: QueueKind) -> QueueResult<()> {
        self.unlink(id, from)?;
        self.queue_mut(to).push_back(id);
        self.set_location(id, Some(to));
        Ok(())
    }

    /// Remove `id` from `queue` for good
    pub fn pop(&mut self, id: ProcessId, queue: QueueKind) -> QueueResult<()> {
        self.unlink(id, queue)?;
        self.set_location(id, None);
        Ok(())
    }

    fn unlink(&mut self, id: ProcessId, kind: QueueKind) -> QueueResult<()> {
        if !self.contains(id, kind) {
            return Err(QueueError::NotQueued { id, queue: kind });
        }
        let queue = self.queue_mut(kind);
        let position = queue
            .iter()
            .position(|&queued| queued == id)
            .ok_or(QueueError::NotQueued { id, queue: kind })?;
        queue.remove(position);
        Ok(())
    }

    pub fn front(&self, kind: QueueKind) -> Option<ProcessId> {
        self.queue(kind).front().copied()
    }

    /// Handles of `kind` from head to tail
    pub fn iter(&self, kind: QueueKind) -> impl Iterator<Item = ProcessId> + '_ {
        self.queue(kind).iter().copied()
    }

    pub fn len(&self, kind: QueueKind) -> usize {
        self.queue(kind).len()
    }

    pub fn is_empty(&self, kind: QueueKind) -> bool {
        self.queue(kind).is_empty()
    }

    /// Handles across all three queues
    pub fn total_len(&self) -> usize {
        self.new.len() + self.ready.len() + self.waiting.len()
    }

    /// True once every queue has drained
    pub fn is_idle(&self) -> bool {
        self.total_len() == 0
    }
}
