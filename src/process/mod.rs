/*!
 * Process Module
 * Process records, the arena that owns them, and the New/Ready/Waiting queues
 */

mod queue;
mod store;
pub mod types;

pub use queue::{QueueError, QueueKind, QueueResult, QueueSet};
pub use store::{ProcessId, ProcessStore};
pub use types::{ProcessDescriptor, ProcessRecord, ProcessState};
