/*!
 * Reports
 * Text tables and JSON export of a finished simulation
 */

mod tables;
mod writer;

pub use tables::{render_execution_log, render_memory_log, render_process_table, Table};
pub use writer::{to_json, write_outputs, OutputError, OutputResult};
