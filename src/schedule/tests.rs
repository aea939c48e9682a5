use super::*;
use crate::error::ConfigError;
use crate::image::{load_grid, ImageView};

fn ramp(width: usize, height: usize) -> Grid {
    let data = (0..width * height)
        .map(|i| ((i * 31 + (i / width) * 17) % 256) as u16)
        .collect();
    load_grid(width, height, 255, data).unwrap()
}

fn run(input: &Grid, num_chunks: usize, workers: usize, policy: Policy) -> ScheduleRun {
    let options = ScheduleOptions::new(num_chunks)
        .with_workers(workers)
        .with_policy(policy);
    Scheduler::new(options).run(input).unwrap()
}

#[test]
fn uniform_grid_is_all_zero_under_both_policies() {
    let input = load_grid(5, 5, 255, vec![100; 25]).unwrap();
    let (stat, _) = run_static(&input, 2).unwrap();
    let (dyna, _) = run_dynamic(&input, 2).unwrap();
    assert!(stat.as_slice().unwrap().iter().all(|&v| v == 0));
    assert_eq!(stat, dyna);
}

#[test]
fn policies_produce_identical_output() {
    let input = ramp(37, 53);
    let reference = run(&input, 1, 1, Policy::Static).output;
    for workers in [1, 2, 3, 8] {
        for num_chunks in [1, 2, 7, 53, 200] {
            for policy in [Policy::Static, Policy::Dynamic] {
                let got = run(&input, num_chunks, workers, policy);
                assert_eq!(
                    got.output, reference,
                    "policy={policy} workers={workers} chunks={num_chunks}"
                );
            }
        }
    }
}

#[test]
fn static_assignment_is_round_robin() {
    let input = ramp(4, 10);
    let result = run(&input, 5, 2, Policy::Static);
    assert_eq!(result.partition.chunk_size(), 2);
    assert_eq!(result.log.rows(0), &[0, 1, 4, 5, 8, 9]);
    assert_eq!(result.log.rows(1), &[2, 3, 6, 7]);
    assert_eq!(result.log.claimed_chunks(0), &[0, 2, 4]);

    let report = result.log.report();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].chunk_starts, vec![0, 4, 8]);
    assert_eq!(report[1].chunk_starts, vec![2, 6]);
}

#[test]
fn static_assignment_is_reproducible() {
    let input = ramp(6, 31);
    let first = run(&input, 6, 3, Policy::Static).log;
    for _ in 0..5 {
        assert_eq!(run(&input, 6, 3, Policy::Static).log, first);
    }
}

#[test]
fn idle_static_workers_have_no_entry() {
    let input = ramp(4, 4);
    let result = run(&input, 2, 6, Policy::Static);
    assert_eq!(result.log.workers().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn every_row_is_attributed_exactly_once() {
    let input = ramp(9, 41);
    for policy in [Policy::Static, Policy::Dynamic] {
        for num_chunks in [1, 3, 10, 41, 90] {
            let result = run(&input, num_chunks, 4, policy);
            let mut rows: Vec<usize> = result
                .log
                .workers()
                .flat_map(|w| result.log.rows(w).to_vec())
                .collect();
            rows.sort_unstable();
            assert_eq!(rows, (0..41).collect::<Vec<_>>(), "{policy} n={num_chunks}");
        }
    }
}

#[test]
fn dynamic_chunks_are_claimed_once_each() {
    let input = ramp(16, 64);
    let result = run(&input, 16, 4, Policy::Dynamic);
    let total = result.partition.len();
    let mut claimed = Vec::new();
    for worker in result.log.workers() {
        let chunks = result.log.claimed_chunks(worker);
        assert!(chunks.len() <= total);
        // Claims come off the queue in order, so each worker sees ascending indices.
        assert!(chunks.windows(2).all(|w| w[0] < w[1]));
        claimed.extend_from_slice(chunks);
    }
    claimed.sort_unstable();
    assert_eq!(claimed, (0..total).collect::<Vec<_>>());
}

#[test]
fn dynamic_rows_within_a_chunk_are_contiguous_and_ascending() {
    let input = ramp(5, 30);
    let result = run(&input, 4, 3, Policy::Dynamic);
    let size = result.partition.chunk_size();
    for worker in result.log.workers() {
        let rows = result.log.rows(worker);
        for chunk in rows.chunks(size) {
            assert_eq!(chunk[0] % size, 0);
            assert!(chunk.windows(2).all(|w| w[1] == w[0] + 1));
        }
    }
}

#[test]
fn single_worker_dynamic_claims_everything_in_order() {
    let input = ramp(3, 12);
    let result = run(&input, 4, 1, Policy::Dynamic);
    assert_eq!(result.log.rows(0), (0..12).collect::<Vec<_>>().as_slice());
    assert_eq!(result.log.report()[0].chunk_starts, vec![0, 3, 6, 9]);
}

#[test]
fn configuration_errors_are_reported_before_start() {
    let input = ramp(4, 4);
    let mut scheduler = Scheduler::new(ScheduleOptions::new(0).with_workers(2));
    let err = scheduler.run(&input).unwrap_err();
    assert!(matches!(err, RunError::Config(ConfigError::ZeroChunks)));
    assert_eq!(scheduler.state(), RunState::NotStarted);

    let err = Scheduler::new(ScheduleOptions::new(2).with_workers(0))
        .run(&input)
        .unwrap_err();
    assert!(matches!(err, RunError::Config(ConfigError::ZeroWorkers)));
}

#[test]
fn scheduler_runs_only_once() {
    let input = ramp(4, 4);
    let mut scheduler = Scheduler::new(ScheduleOptions::new(2).with_workers(2));
    assert_eq!(scheduler.state(), RunState::NotStarted);
    scheduler.run(&input).unwrap();
    assert_eq!(scheduler.state(), RunState::Completed);
    assert!(matches!(
        scheduler.run(&input),
        Err(RunError::AlreadyStarted)
    ));
}

#[test]
fn worker_panic_fails_the_whole_run() {
    let input = ramp(4, 12);
    let faulty = |input: &Grid, row: usize, out: &mut [u16]| {
        if row == 7 {
            panic!("row {row} exploded");
        }
        compute_row(input, row, out);
    };
    for policy in [Policy::Static, Policy::Dynamic] {
        let options = ScheduleOptions::new(4).with_workers(3).with_policy(policy);
        let mut scheduler = Scheduler::new(options);
        match scheduler.run_with(&input, &faulty) {
            Err(RunError::WorkerPanicked(msg)) => assert!(msg.contains("row 7"), "{msg}"),
            other => panic!("expected worker failure, got {other:?}"),
        }
        assert_eq!(scheduler.state(), RunState::Failed);
    }
}
