/*!
 * Scheduler Property Tests
 * Invariants that must hold for arbitrary traces
 */

use partition_sched_sim::{ProcessDescriptor, ProcessState, Scheduler, SimulationConfig};
use proptest::prelude::*;

fn workload() -> impl Strategy<Value = Vec<ProcessDescriptor>> {
    prop::collection::vec((0u64..20, 1u64..10, 0u64..5, 0u64..5, 1u32..=40), 1..25).prop_map(|rows| {
        rows.into_iter()
            .zip(1u32..)
            .map(|((arrival, cpu, frequency, duration, memory), pid)| {
                ProcessDescriptor::new(pid, arrival, cpu, memory).with_io(frequency, duration)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_process_terminates(descriptors in workload()) {
        let mut scheduler = Scheduler::new(SimulationConfig::default(), descriptors.clone()).unwrap();
        let summary = scheduler.run().unwrap();
        let log = scheduler.sink();

        prop_assert_eq!(summary.completed, descriptors.len());
        for descriptor in &descriptors {
            let stats = summary.process(descriptor.pid).unwrap();
            prop_assert_eq!(stats.state, ProcessState::Terminated);

            let terminated_at = log.first_entry(descriptor.pid, ProcessState::Terminated).unwrap();
            let first_run = log.first_entry(descriptor.pid, ProcessState::Running).unwrap();
            prop_assert_eq!(stats.turnaround_time, Some(terminated_at - descriptor.arrival_time));
            prop_assert_eq!(stats.response_time, Some(first_run - descriptor.arrival_time));
            prop_assert!(terminated_at + 1 >= descriptor.arrival_time + descriptor.total_cpu_time);
        }
    }

    #[test]
    fn prop_conservation_every_tick(descriptors in workload()) {
        let total = descriptors.len();
        let mut scheduler = Scheduler::new(SimulationConfig::default(), descriptors).unwrap();

        while !scheduler.is_finished() {
            scheduler.step().unwrap();
            prop_assert!(scheduler.check_invariants().is_ok());
            prop_assert_eq!(scheduler.queues().total_len() + scheduler.terminated_count(), total);

            let status = scheduler.partitions().status();
            prop_assert!(status.usable_free <= status.total_free);
            prop_assert!(status.total_free <= 100);
        }
    }

    #[test]
    fn prop_runs_are_deterministic(descriptors in workload()) {
        let mut first = Scheduler::new(SimulationConfig::default(), descriptors.clone()).unwrap();
        let mut second = Scheduler::new(SimulationConfig::default(), descriptors).unwrap();

        prop_assert_eq!(first.run().unwrap(), second.run().unwrap());
        prop_assert_eq!(first.sink(), second.sink());
    }

    #[test]
    fn prop_running_process_is_never_preempted(descriptors in workload()) {
        let mut scheduler = Scheduler::new(SimulationConfig::default(), descriptors).unwrap();
        scheduler.run().unwrap();

        let mut holder = None;
        for event in scheduler.sink().transitions() {
            if event.new_state == ProcessState::Running {
                prop_assert_eq!(holder, None, "pid {} dispatched over a running process", event.pid);
                holder = Some(event.pid);
            }
            if event.old_state == ProcessState::Running {
                prop_assert_eq!(holder, Some(event.pid));
                prop_assert!(matches!(
                    event.new_state,
                    ProcessState::Waiting | ProcessState::Terminated
                ));
                holder = None;
            }
        }
        prop_assert_eq!(holder, None);
    }

    #[test]
    fn prop_partitions_hold_one_process(descriptors in workload()) {
        let mut scheduler = Scheduler::new(SimulationConfig::default(), descriptors).unwrap();
        scheduler.run().unwrap();

        for snapshot in scheduler.sink().memory() {
            let mut occupants: Vec<u32> = snapshot.occupants.iter().flatten().copied().collect();
            let before = occupants.len();
            occupants.sort_unstable();
            occupants.dedup();
            prop_assert_eq!(occupants.len(), before);
        }
        let last = scheduler.sink().memory().last().unwrap();
        prop_assert_eq!((last.total_free, last.usable_free), (100, 100));
    }
}
