use super::timing::TimingBreakdown;
use crate::schedule::{Policy, ScheduleRun, WorkerReport};
use serde::Serialize;
use std::fmt;

/// Serializable summary of one scheduling run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub width: usize,
    pub height: usize,
    pub policy: Policy,
    pub workers: usize,
    pub chunk_size: usize,
    pub chunk_count: usize,
    pub attribution: Vec<WorkerReport>,
    pub timing: TimingBreakdown,
}

impl RunReport {
    pub fn from_run(run: &ScheduleRun, timing: TimingBreakdown) -> Self {
        Self {
            width: run.output.width(),
            height: run.output.height(),
            policy: run.policy,
            workers: run.workers,
            chunk_size: run.partition.chunk_size(),
            chunk_count: run.partition.len(),
            attribution: run.log.report(),
            timing,
        }
    }
}

/// One block of `Thread <id> -> Processing Chunk starting at Row <row>` lines
/// per worker, each block followed by a blank line.
impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for worker in &self.attribution {
            for row in &worker.chunk_starts {
                writeln!(
                    f,
                    "Thread {} -> Processing Chunk starting at Row {}",
                    worker.worker, row
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::load_grid;
    use crate::schedule::{ScheduleOptions, Scheduler};

    #[test]
    fn display_lists_chunk_starts_per_worker() {
        let input = load_grid(3, 6, 255, vec![0; 18]).unwrap();
        let run = Scheduler::new(ScheduleOptions::new(3).with_workers(2))
            .run(&input)
            .unwrap();
        let report = RunReport::from_run(&run, TimingBreakdown::with_total(1.0));
        assert_eq!(report.chunk_size, 2);
        assert_eq!(report.chunk_count, 3);
        assert_eq!(
            report.to_string(),
            "Thread 0 -> Processing Chunk starting at Row 0\n\
             Thread 0 -> Processing Chunk starting at Row 4\n\
             \n\
             Thread 1 -> Processing Chunk starting at Row 2\n\
             \n"
        );
    }

    #[test]
    fn serializes_camel_case() {
        let input = load_grid(3, 3, 255, vec![0; 9]).unwrap();
        let run = Scheduler::new(ScheduleOptions::new(1).with_workers(1))
            .run(&input)
            .unwrap();
        let mut timing = TimingBreakdown::with_total(2.5);
        timing.push("compute", 1.5);
        let json = serde_json::to_value(RunReport::from_run(&run, timing)).unwrap();
        assert_eq!(json["chunkSize"], 3);
        assert_eq!(json["policy"], "static");
        assert_eq!(json["attribution"][0]["chunkStarts"][0], 0);
        assert_eq!(json["timing"]["stages"][0]["elapsedMs"], 1.5);
    }
}
