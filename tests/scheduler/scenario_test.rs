/*!
 * Scheduler Scenario Tests
 * End-to-end runs with hand-checked event and memory logs
 */

use partition_sched_sim::{
    parse_trace, render_execution_log, EventLog, EventSink, MemorySnapshot, ProcessDescriptor,
    ProcessState, Scheduler, SimulationConfig, SimulationSummary, TransitionEvent,
};
use pretty_assertions::assert_eq;
use ProcessState::*;

const TWO_PROCESS_TRACE: &str = "\
# pid, arrival, cpu, io frequency, io duration, memory
1, 0, 4, 2, 1, 5
2, 0, 2, 0, 0, 5
";

fn run(descriptors: Vec<ProcessDescriptor>) -> (Scheduler, SimulationSummary) {
    let mut scheduler = Scheduler::new(SimulationConfig::default(), descriptors).unwrap();
    let summary = scheduler.run().unwrap();
    (scheduler, summary)
}

fn rows(rendered: &str) -> Vec<Vec<String>> {
    rendered
        .lines()
        .filter(|line| line.starts_with('|'))
        .skip(1)
        .map(|line| {
            line.trim_matches('|')
                .split('|')
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .collect()
}

#[test]
fn test_two_process_trace_execution_log() {
    let (scheduler, summary) = run(parse_trace(TWO_PROCESS_TRACE).unwrap());

    let expected: Vec<Vec<String>> = [
        ("0", "1", "NEW", "READY"),
        ("0", "2", "NEW", "READY"),
        ("0", "1", "READY", "RUNNING"),
        ("1", "1", "RUNNING", "WAITING"),
        ("2", "1", "WAITING", "READY"),
        ("2", "2", "READY", "RUNNING"),
        ("3", "2", "RUNNING", "TERMINATED"),
        ("4", "1", "READY", "RUNNING"),
        ("5", "1", "RUNNING", "TERMINATED"),
    ]
    .iter()
    .map(|(t, p, a, b)| vec![t.to_string(), p.to_string(), a.to_string(), b.to_string()])
    .collect();

    assert_eq!(rows(&render_execution_log(scheduler.sink().transitions())), expected);
    assert_eq!(summary.makespan, 6);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.average_wait, 2.0);
    assert_eq!(summary.average_turnaround, 4.0);
    assert_eq!(summary.average_response, 1.0);
}

#[test]
fn test_memory_pressure_serializes_admission() {
    // Each process only fits the 40 MB partition
    let (scheduler, summary) = run(vec![
        ProcessDescriptor::new(1, 0, 2, 30),
        ProcessDescriptor::new(2, 0, 2, 30),
        ProcessDescriptor::new(3, 0, 2, 30),
    ]);
    let log = scheduler.sink();

    assert_eq!(log.first_entry(1, Ready), Some(0));
    assert_eq!(log.first_entry(2, Ready), Some(2));
    assert_eq!(log.first_entry(3, Ready), Some(4));
    assert_eq!(log.first_entry(3, Terminated), Some(5));

    let snapshots = log.memory();
    assert_eq!(snapshots.len(), 6);
    for (snapshot, expected_time) in snapshots.iter().zip(0..) {
        assert_eq!(snapshot.time, expected_time);
        if expected_time % 2 == 0 {
            assert!(snapshot.occupants[0].is_some());
            assert_eq!((snapshot.total_free, snapshot.usable_free), (70, 60));
        } else {
            assert!(snapshot.occupants.iter().all(Option::is_none));
            assert_eq!((snapshot.total_free, snapshot.usable_free), (100, 100));
        }
    }

    // Time spent in New is not waiting time
    for (pid, turnaround, response) in [(1, 1, 0), (2, 3, 2), (3, 5, 4)] {
        let stats = summary.process(pid).unwrap();
        assert_eq!(stats.wait_time, 0);
        assert_eq!(stats.turnaround_time, Some(turnaround));
        assert_eq!(stats.response_time, Some(response));
    }
}

#[test]
fn test_response_time_is_set_once() {
    let (scheduler, summary) = run(vec![ProcessDescriptor::new(1, 1, 3, 4).with_io(1, 2)]);

    let runs: Vec<u64> = scheduler
        .sink()
        .transitions_for(1)
        .filter(|e| e.new_state == Running)
        .map(|e| e.time)
        .collect();
    assert_eq!(runs, vec![1, 3, 5]);
    assert_eq!(summary.process(1).unwrap().response_time, Some(0));
    assert_eq!(summary.process(1).unwrap().turnaround_time, Some(4));
}

#[test]
fn test_cpu_bound_process_keeps_cpu() {
    let (scheduler, _) = run(vec![
        ProcessDescriptor::new(1, 0, 3, 1),
        ProcessDescriptor::new(2, 0, 1, 1),
    ]);

    let running: Vec<&TransitionEvent> = scheduler
        .sink()
        .transitions()
        .iter()
        .filter(|e| e.new_state == Running)
        .collect();
    assert_eq!(running.len(), 2);
    assert_eq!((running[0].pid, running[0].time), (1, 0));
    assert_eq!((running[1].pid, running[1].time), (2, 3));
}

#[test]
fn test_best_fit_picks_tightest_partition() {
    let (scheduler, _) = run(vec![
        ProcessDescriptor::new(1, 0, 1, 9),
        ProcessDescriptor::new(2, 0, 1, 12),
        ProcessDescriptor::new(3, 0, 1, 2),
    ]);
    let snapshots = scheduler.sink().memory();

    // 9 MB -> 10 MB partition, 12 MB -> 15 MB, 2 MB -> 2 MB
    assert_eq!(snapshots[0].occupants[3], Some(1));
    assert_eq!(snapshots[1].occupants[2], Some(2));
    assert_eq!(snapshots[2].occupants[5], Some(3));
    assert_eq!(snapshots[2].total_free, 100 - 9 - 12 - 2);
    assert_eq!(snapshots[2].usable_free, 100 - 10 - 15 - 2);
}

#[test]
fn test_run_is_idempotent_once_finished() {
    let (mut scheduler, first) = run(vec![ProcessDescriptor::new(1, 0, 2, 3)]);
    let events = scheduler.sink().clone();

    let second = scheduler.run().unwrap();
    scheduler.step().unwrap();

    assert_eq!(first, second);
    assert_eq!(scheduler.clock(), 2);
    assert_eq!(scheduler.sink(), &events);
}

#[test]
fn test_custom_sink_receives_events() {
    #[derive(Default)]
    struct Counter {
        transitions: usize,
        snapshots: usize,
    }

    impl EventSink for Counter {
        fn record_transition(&mut self, _event: TransitionEvent) {
            self.transitions += 1;
        }

        fn record_memory(&mut self, _snapshot: MemorySnapshot) {
            self.snapshots += 1;
        }
    }

    let descriptors = parse_trace(TWO_PROCESS_TRACE).unwrap();
    let mut scheduler =
        Scheduler::with_sink(SimulationConfig::default(), descriptors, Counter::default()).unwrap();
    scheduler.run().unwrap();

    let counter = scheduler.into_sink();
    assert_eq!(counter.transitions, 9);
    assert_eq!(counter.snapshots, 4);
}

#[test]
fn test_event_log_is_empty_before_first_tick() {
    let scheduler = Scheduler::new(SimulationConfig::default(), parse_trace(TWO_PROCESS_TRACE).unwrap()).unwrap();
    assert_eq!(scheduler.sink(), &EventLog::default());
    assert_eq!(scheduler.clock(), 0);
}
