/*!
 * Monitoring Module
 *
 * Two separate channels:
 * - **Event sink**: the simulation's output, an ordered log of state
 *   transitions and memory snapshots
 * - **Tracing**: diagnostic logs for operators, never part of the output
 */

pub mod sink;
mod tracer;

pub use sink::{EventLog, EventSink, TransitionEvent};
pub use tracer::{generate_run_id, init_tracing, TRACE_JSON_ENV};
