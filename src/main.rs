/*!
 * Simulator - Main Entry Point
 *
 * Loads a process trace, runs the FCFS scheduler to completion, and
 * writes the execution, memory, and process reports.
 *
 * Usage: simulator [TRACE_FILE]
 * The trace path falls back to SIM_TRACE_FILE when no argument is given.
 */

use miette::{miette, IntoDiagnostic};
use tracing::info;

use partition_sched_sim::config::ENV_TRACE_FILE;
use partition_sched_sim::{init_tracing, load_trace, write_outputs, OutputConfig, Scheduler, SimulationConfig};

fn main() -> miette::Result<()> {
    init_tracing();

    let trace_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(ENV_TRACE_FILE).ok())
        .ok_or_else(|| miette!("No trace file given; pass a path or set {}", ENV_TRACE_FILE))?;

    let config = SimulationConfig::from_env()?;
    let output = OutputConfig::from_env()?;
    info!(
        trace = %trace_path,
        partitions = ?config.partitions(),
        policy = config.policy().as_str(),
        output_dir = %output.output_dir.display(),
        "Configuration loaded"
    );

    let descriptors = load_trace(&trace_path)?;
    let mut scheduler = Scheduler::new(config, descriptors)?;
    let summary = scheduler.run()?;
    let log = scheduler.into_sink();

    let written = write_outputs(&output, &log, &summary)?;
    for path in &written {
        info!(path = %path.display(), "Wrote report");
    }

    println!(
        "Simulated {} processes in {} ticks (avg wait {:.2}, avg turnaround {:.2})",
        summary.processes.len(),
        summary.makespan,
        summary.average_wait,
        summary.average_turnaround
    );
    std::io::Write::flush(&mut std::io::stdout()).into_diagnostic()?;
    Ok(())
}
