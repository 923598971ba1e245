mod result;
mod scenario;

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use result::BenchError;
use result::BenchResult;
use scenario::Replay;
use scenario::Scenario;
use tempus::convert_case::Case;
use tempus::rand::rngs::SmallRng;
use tempus::rand::SeedableRng;
use tempus::statistics::configure_statistic_logging;
use tempus::statistics::log_statistic_postfix;
use tempus::statistics::StatisticLogger;
use tempus::Backend;
use tempus::NetworkOptions;
use tempus::TimePoint;

const CSV_HEADER: &str = "scenario,points,constraints,checks,backend,apply_ms,copy_ms,rejected,consistent";

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about
)]
struct Args {
    /// The seed used to generate the scenarios.
    ///
    /// Possible values: u64
    #[arg(short = 'r', long = "random-seed", default_value_t = 42)]
    random_seed: u64,

    /// The numbers of time points of the generated scenarios, separated by commas.
    ///
    /// Every size is combined with every density.
    #[arg(long, value_delimiter = ',', default_values_t = [20, 40])]
    sizes: Vec<usize>,

    /// The densities of the generated scenarios, separated by commas.
    ///
    /// A scenario with `n` time points and density `d` contains `d * n * n / 10` constraints.
    #[arg(long, value_delimiter = ',', default_values_t = [1, 2])]
    densities: Vec<usize>,

    /// The number of scenarios generated for every combination of size and density.
    #[arg(long = "scenarios", default_value_t = 3)]
    num_scenarios: usize,

    /// The number of deep copies interleaved with the other events of a scenario.
    #[arg(long = "copies", default_value_t = 10)]
    num_copies: usize,

    /// The backend on which the scenarios are replayed. All backends are used if it is not
    /// given, or if `--cross-check` is set.
    #[arg(short = 'b', long, value_enum)]
    backend: Option<Backend>,

    /// Verify that all backends accept the same constraints and end up with the same bounds
    /// between every pair of time points.
    #[arg(long = "cross-check")]
    cross_check: bool,

    /// The file to which the CSV lines are written; stdout is used if it is not given.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enables log message output from the benchmark.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Enables logging of the statistics of every replayed network to stderr.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging(
            "%% tempus-stat:",
            Some("%% tempus-stat-end"),
            Some(Case::Snake),
            Some(Box::new(std::io::stderr())),
        );
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> BenchResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics)?;

    if tempus::asserts::TEMPUS_ASSERT_LEVEL_DEFINITION >= tempus::asserts::TEMPUS_ASSERT_MODERATE {
        warn!(
            "Potential performance degradation: the Tempus assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            tempus::asserts::TEMPUS_ASSERT_LEVEL_DEFINITION
        );
    }

    if args.sizes.is_empty() || args.densities.is_empty() {
        return Err(BenchError::invalid_arguments(
            "at least one size and one density are required",
        ));
    }
    if let Some(size) = args.sizes.iter().find(|&&size| size < 2) {
        return Err(BenchError::invalid_arguments(format!(
            "scenarios need at least 2 time points, got {size}"
        )));
    }

    let backends = match args.backend {
        Some(backend) if !args.cross_check => vec![backend],
        _ => vec![Backend::DenseMatrix, Backend::IncrementalBellmanFord],
    };

    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };
    writeln!(output, "{CSV_HEADER}")?;

    let mut random = SmallRng::seed_from_u64(args.random_seed);
    let mut next_id = 0;

    for &size in &args.sizes {
        for &density in &args.densities {
            for _ in 0..args.num_scenarios {
                let scenario =
                    Scenario::generate(next_id, size, density, args.num_copies, &mut random);
                next_id += 1;

                let replays = backends
                    .iter()
                    .map(|&backend| {
                        scenario.replay(NetworkOptions {
                            backend,
                            ..Default::default()
                        })
                    })
                    .collect::<Vec<_>>();

                for replay in &replays {
                    write_line(&mut output, &scenario, replay)?;
                    if args.log_statistics {
                        replay.network.log_statistics(StatisticLogger::new([
                            format!("scenario_{}", scenario.id),
                            replay.network.backend().to_string(),
                        ]));
                        log_statistic_postfix();
                    }
                }

                if args.cross_check {
                    cross_check(&scenario, &replays)?;
                }
            }
        }
    }

    output.flush()?;
    Ok(())
}

fn write_line(output: &mut impl Write, scenario: &Scenario, replay: &Replay) -> BenchResult<()> {
    writeln!(
        output,
        "{},{},{},{},{},{:.3},{:.3},{},{}",
        scenario.id,
        scenario.num_time_points,
        scenario.num_constraints,
        scenario.num_checks,
        replay.network.backend(),
        replay.apply_time.as_secs_f64() * 1000.0,
        replay.copy_time.as_secs_f64() * 1000.0,
        replay.num_rejected(),
        replay.network.is_consistent(),
    )?;
    Ok(())
}

fn cross_check(scenario: &Scenario, replays: &[Replay]) -> BenchResult<()> {
    let Some((reference, others)) = replays.split_first() else {
        return Ok(());
    };

    for other in others {
        if let Some(index) = reference
            .accepted
            .iter()
            .zip(&other.accepted)
            .position(|(first, second)| first != second)
        {
            return Err(BenchError::BackendsDisagreeOnFeasibility {
                scenario: scenario.id,
                index,
            });
        }

        let first_points = all_time_points(reference);
        let second_points = all_time_points(other);

        for (&from, &second_from) in first_points.iter().zip(&second_points) {
            for (&to, &second_to) in first_points.iter().zip(&second_points) {
                let first_lower = reference.network.lower_bound(from, to);
                let first_upper = reference.network.upper_bound(from, to);
                let second_lower = other.network.lower_bound(second_from, second_to);
                let second_upper = other.network.upper_bound(second_from, second_to);

                if first_lower != second_lower || first_upper != second_upper {
                    return Err(BenchError::BackendsDisagree {
                        scenario: scenario.id,
                        from,
                        to,
                        first: reference.network.backend(),
                        first_lower,
                        first_upper,
                        second: other.network.backend(),
                        second_lower,
                        second_upper,
                    });
                }
            }
        }
    }

    info!("Backends agree on scenario {}", scenario.id);
    Ok(())
}

/// The global start and end followed by the inserted time points; replays of the same scenario
/// list corresponding time points at the same position.
fn all_time_points(replay: &Replay) -> Vec<TimePoint> {
    [replay.network.global_start(), replay.network.global_end()]
        .into_iter()
        .chain(replay.time_points.iter().copied())
        .collect()
}
