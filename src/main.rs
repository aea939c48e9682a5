use log::info;
use prewitt_sched::config::{load_config, RunConfig, ScheduleConfig};
use prewitt_sched::diagnostics::{RunReport, TimingBreakdown};
use prewitt_sched::image::io::{load_grid_file, save_grid_file, write_json_file};
use prewitt_sched::{ConfigError, Error, Policy, Scheduler};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let config = parse_args(env::args().skip(1).collect())?;
    let options = config.schedule.to_options();
    let total_start = Instant::now();
    let mut timing = TimingBreakdown::default();

    println!(
        "Detect edges in {} using {} worker threads\n",
        config.input.display(),
        options.workers
    );

    let stage = Instant::now();
    let input = load_grid_file(&config.input)?;
    timing.push("load", ms_since(stage));

    let run = Scheduler::new(options).run(&input)?;
    timing.push("compute", run.elapsed_ms);
    println!("Took {} second(s).\n", run.elapsed_ms / 1000.0);

    let stage = Instant::now();
    save_grid_file(&run.output, &config.output)?;
    timing.push("save", ms_since(stage));
    timing.total_ms = ms_since(total_start);

    let report = RunReport::from_run(&run, timing);
    print!("{report}");

    if let Some(path) = &config.report_json {
        write_json_file(path, &report)?;
        info!("wrote run report to {}", path.display());
    }
    info!(
        "{} run of {}x{} finished in {:.3} ms",
        run.policy,
        input.width(),
        input.height(),
        report.timing.total_ms
    );
    Ok(())
}

/// `<config.json>` or `<input> <output> <num_chunks> <policy> [workers]`.
fn parse_args(args: Vec<String>) -> Result<RunConfig, Error> {
    match args.as_slice() {
        [config] => Ok(load_config(Path::new(config))?),
        [input, output, chunks, policy, rest @ ..] if rest.len() <= 1 => {
            let num_chunks = parse_positive(chunks, ConfigError::InvalidChunkCount)?;
            let workers = rest
                .first()
                .map(|w| parse_positive(w, ConfigError::InvalidWorkerCount))
                .transpose()?;
            let policy: Policy = policy.parse()?;
            Ok(RunConfig {
                input: PathBuf::from(input),
                output: PathBuf::from(output),
                schedule: ScheduleConfig {
                    num_chunks,
                    workers,
                    policy,
                },
                report_json: None,
            })
        }
        _ => Err(ConfigError::Usage(usage()).into()),
    }
}

fn parse_positive(value: &str, err: fn(String) -> ConfigError) -> Result<usize, ConfigError> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(err(value.to_string())),
    }
}

fn ms_since(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn usage() -> String {
    "Usage: prewitt <input> <output> <num_chunks> <static|dynamic|a1|a2> [workers]\n       prewitt <config.json>"
        .to_string()
}
