/*!
 * Table Rendering
 * Bordered, right-aligned text tables for the execution and memory logs
 */

use crate::core::types::Pid;
use crate::memory::MemorySnapshot;
use crate::monitoring::TransitionEvent;
use crate::scheduler::SimulationSummary;
use std::fmt::Write;

/// Marker printed for a partition with no occupant
const FREE_MARKER: &str = "-1";

/// Minimal bordered table
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, H>(headers: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render empty, extra cells are dropped
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                self.rows
                    .iter()
                    .map(|row| row[column].len())
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let border: String = widths.iter().fold(String::from("+"), |mut line, &w| {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
            line
        });

        let mut out = String::new();
        let _ = writeln!(out, "{}", border);
        let _ = write!(out, "|");
        for (header, &width) in self.headers.iter().zip(&widths) {
            let _ = write!(out, " {:<width$} |", header, width = width);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", border);

        for row in &self.rows {
            let _ = write!(out, "|");
            for (cell, &width) in row.iter().zip(&widths) {
                let _ = write!(out, " {:>width$} |", cell, width = width);
            }
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "{}", border);
        out
    }
}

/// One row per state transition
pub fn render_execution_log(events: &[TransitionEvent]) -> String {
    let mut table = Table::new(["Time (ms)", "PID", "Old State", "New State"]);
    for event in events {
        table.push_row(vec![
            event.time.to_string(),
            event.pid.to_string(),
            event.old_state.to_string(),
            event.new_state.to_string(),
        ]);
    }
    table.render()
}

/// One row per memory snapshot; free partitions print as -1
pub fn render_memory_log(snapshots: &[MemorySnapshot]) -> String {
    let mut table = Table::new([
        "Time (ms)",
        "Total Free Mem",
        "Usable Free Mem",
        "Partition Status",
    ]);
    for snapshot in snapshots {
        table.push_row(vec![
            snapshot.time.to_string(),
            snapshot.total_free.to_string(),
            snapshot.usable_free.to_string(),
            partition_status(&snapshot.occupants),
        ]);
    }
    table.render()
}

fn partition_status(occupants: &[Option<Pid>]) -> String {
    occupants
        .iter()
        .map(|occupant| match occupant {
            Some(pid) => format!("{:>2}", pid),
            None => FREE_MARKER.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Final per-process statistics followed by run averages
pub fn render_process_table(summary: &SimulationSummary) -> String {
    let mut table = Table::new([
        "PID",
        "Arrival",
        "CPU",
        "Memory",
        "State",
        "Wait",
        "Turnaround",
        "Response",
    ]);
    for process in &summary.processes {
        table.push_row(vec![
            process.pid.to_string(),
            process.arrival_time.to_string(),
            process.total_cpu_time.to_string(),
            process.memory_size.to_string(),
            process.state.to_string(),
            process.wait_time.to_string(),
            optional(process.turnaround_time),
            optional(process.response_time),
        ]);
    }

    let mut out = table.render();
    let _ = writeln!(out, "Policy:                  {}", summary.policy.as_str());
    let _ = writeln!(out, "Completed:               {}", summary.completed);
    let _ = writeln!(out, "Makespan:                {}", summary.makespan);
    let _ = writeln!(out, "Average wait time:       {:.2}", summary.average_wait);
    let _ = writeln!(out, "Average turnaround time: {:.2}", summary.average_turnaround);
    let _ = writeln!(out, "Average response time:   {:.2}", summary.average_response);
    let _ = writeln!(out, "Throughput:              {:.3} processes/tick", summary.throughput);
    out
}

fn optional(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
