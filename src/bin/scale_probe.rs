use std::env;
use std::time::{Duration, Instant};

use approx_subsetsum::{SolveError, SolverBuilder, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    #[cfg(feature = "tracing")]
    init_logging(options.verbosity);

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Subset-Sum Scaling Probe: Performance and Correctness Testing");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Random weights in [1, 1000000) are solved against a grid of capacities");
    eprintln!("with a per-call deadline of {:.1}s, for each reachability strategy.", options.timeout.as_secs_f64());
    eprintln!("  • Correctness: selected sums match a full-table DP (n up to {})", options.verify_limit);
    eprintln!("  • Performance: wall-clock time and memory delta per call");
    eprintln!();
    eprintln!("Metrics explained:");
    eprintln!("  • wall_s: Wall-clock time in seconds (lower is better)");
    eprintln!("  • rss_delta_kib: Memory delta in KiB");
    eprintln!("  • status: 'passed' = matches baseline, 'not_checked' = too large to verify,");
    eprintln!("            'timeout' = deadline elapsed");
    eprintln!();
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/2] Dense array strategy...");
    measurements.extend(run_grid(Strategy::Dense, &options, &mut sys));
    eprintln!();

    eprintln!("[2/2] Sparse map strategy...");
    measurements.extend(run_grid(Strategy::Sparse, &options, &mut sys));
    eprintln!();

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("scale_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    timeout: Duration,
    seed: u64,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    verbosity: u8,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 50_000usize;
        let mut timeout = Duration::from_secs(10);
        let mut seed = 42u64;
        let mut verbosity = 0u8;

        while let Some(arg) = args.next() {
            let arg: String = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if arg.starts_with("-v") && arg.chars().skip(1).all(|c| c == 'v') {
                verbosity = verbosity.saturating_add((arg.len() - 1) as u8);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = next_value(&mut args, "--format")?;
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_verify_limit(value)?;
            } else if arg == "--verify-limit" {
                verify_limit = parse_verify_limit(&next_value(&mut args, "--verify-limit")?)?;
            } else if let Some(value) = arg.strip_prefix("--timeout=") {
                timeout = parse_timeout(value)?;
            } else if arg == "--timeout" {
                timeout = parse_timeout(&next_value(&mut args, "--timeout")?)?;
            } else if let Some(value) = arg.strip_prefix("--seed=") {
                seed = parse_seed(value)?;
            } else if arg == "--seed" {
                seed = parse_seed(&next_value(&mut args, "--seed")?)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
            timeout,
            seed,
            verbosity,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin scale_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest sample count verified against a full-table DP (default: 50000)
  --timeout <SECONDS>           Per-call deadline (default: 10)
  --seed <N>                    Seed for the weight generator (default: 42)
  -v, -vv, -vvv                 Log verbosity (with the `tracing` feature; RUST_LOG overrides)
  -h, --help                    Print this help message

Examples:
  cargo run --release --bin scale_probe
  cargo run --release --features tracing --bin scale_probe -- -vv --format table --timeout 2
"
        );
    }
}

fn next_value<I, T>(args: &mut I, flag: &str) -> Result<String, String>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    args.next()
        .map(Into::into)
        .ok_or_else(|| format!("missing value after {flag}"))
}

fn parse_verify_limit(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "verify limit must be a positive integer".to_string())
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let secs = value
        .parse::<f64>()
        .map_err(|_| "timeout must be a number of seconds".to_string())?;
    Duration::try_from_secs_f64(secs).map_err(|_| "timeout must be non-negative".to_string())
}

fn parse_seed(value: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| "seed must be an unsigned integer".to_string())
}

#[cfg(feature = "tracing")]
fn init_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("approx_subsetsum={level},scale_probe={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    n: usize,
    capacity: u64,
    selected_sum: Option<u64>,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
    TimedOut,
}

/// What one solve call produced, as judged against the baseline.
struct Verdict {
    status: VerificationStatus,
    selected_sum: Option<u64>,
    detail: Option<String>,
}

impl Verdict {
    fn new(status: VerificationStatus, selected_sum: Option<u64>, detail: Option<String>) -> Self {
        Self {
            status,
            selected_sum,
            detail,
        }
    }
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
            VerificationStatus::TimedOut => "timeout",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
            VerificationStatus::TimedOut => "⧗",
        }
    }
}

fn run_grid(strategy: Strategy, options: &Options, sys: &mut System) -> Vec<Measurement> {
    const SAMPLES: &[usize] = &[10_000, 50_000, 100_000, 500_000, 1_000_000];
    const CAPACITIES: &[u64] = &[10_000, 50_000, 100_000, 316_227];
    let scenario = match strategy {
        Strategy::Sparse => "sparse",
        _ => "dense",
    };
    let total = SAMPLES.len() * CAPACITIES.len();
    let mut out = Vec::with_capacity(total);

    for (row, &n) in SAMPLES.iter().enumerate() {
        let weights = random_weights(n, options.seed);
        for (col, &capacity) in CAPACITIES.iter().enumerate() {
            eprint!(
                "      [{}/{}] n={} capacity={}... ",
                row * CAPACITIES.len() + col + 1,
                total,
                n,
                capacity
            );
            let m = measure(scenario, n, capacity, sys, || {
                let solver = SolverBuilder::new(capacity)
                    .with_strategy(strategy)
                    .with_deadline(options.timeout)
                    .build()
                    .map_err(|e| e.to_string());
                let result = solver.and_then(|s| s.solve(&weights).map_err(|e| match e {
                    SolveError::Timeout { .. } => String::new(),
                    other => other.to_string(),
                }));
                match result {
                    Ok(selection) => {
                        let sum = selection.selected_sum();
                        let actual: u64 = selection.indices().iter().map(|&i| weights[i]).sum();
                        if actual != sum {
                            Verdict::new(
                                VerificationStatus::Failed,
                                Some(sum),
                                Some(format!("indices sum to {actual}, reported {sum}")),
                            )
                        } else if n <= options.verify_limit {
                            let baseline = full_table_best(&weights, capacity);
                            if baseline == sum {
                                Verdict::new(VerificationStatus::Passed, Some(sum), None)
                            } else {
                                Verdict::new(
                                    VerificationStatus::Failed,
                                    Some(sum),
                                    Some(format!("expected {baseline}, got {sum}")),
                                )
                            }
                        } else {
                            Verdict::new(VerificationStatus::NotChecked, Some(sum), None)
                        }
                    }
                    Err(detail) if detail.is_empty() => {
                        Verdict::new(VerificationStatus::TimedOut, None, None)
                    }
                    Err(detail) => Verdict::new(VerificationStatus::Failed, None, Some(detail)),
                }
            });
            eprintln!(
                "{} sum={}, time={:.3}s, status={}",
                m.verification_status.icon(),
                selected_cell(m.selected_sum),
                m.wall_s,
                m.verification_status.label()
            );
            out.push(m);
        }
    }
    out
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Test Summary");
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    let mut timed_out = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
            VerificationStatus::TimedOut => timed_out += 1,
        }
    }

    let total = measurements.len().max(1);
    let pct = |count: usize| 100.0 * count as f64 / total as f64;
    eprintln!("Verification Results:");
    eprintln!("  Total runs: {}", measurements.len());
    eprintln!("  ✓ Passed: {} ({:.1}%)", passed, pct(passed));
    eprintln!("  ✗ Failed: {} ({:.1}%)", failed, pct(failed));
    eprintln!(
        "  ○ Not checked (n > {}): {} ({:.1}%)",
        options.verify_limit,
        not_checked,
        pct(not_checked)
    );
    eprintln!("  ⧗ Timed out: {} ({:.1}%)", timed_out, pct(timed_out));
    eprintln!();

    if failed > 0 {
        eprintln!("Failed Runs:");
        for m in measurements {
            if matches!(m.verification_status, VerificationStatus::Failed) {
                eprintln!("  ✗ {} (n={}, capacity={})", m.scenario, m.n, m.capacity);
                if let Some(ref detail) = m.verification_detail {
                    eprintln!("     Error: {}", detail);
                }
            }
        }
        eprintln!();
    }

    eprintln!("Performance Statistics by Strategy:");
    eprintln!();
    for scenario in ["dense", "sparse"] {
        let ms: Vec<&Measurement> = measurements
            .iter()
            .filter(|m| m.scenario == scenario)
            .collect();
        if ms.is_empty() {
            continue;
        }
        let min_time = ms.iter().map(|m| m.wall_s).fold(f64::INFINITY, f64::min);
        let max_time = ms.iter().map(|m| m.wall_s).fold(0.0, f64::max);
        let avg_time = ms.iter().map(|m| m.wall_s).sum::<f64>() / ms.len() as f64;
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        let avg_mem = ms.iter().map(|m| m.rss_delta_kib).sum::<u64>() as f64 / ms.len() as f64;

        eprintln!("  {}:", scenario);
        eprintln!("    Runs: {}", ms.len());
        eprintln!("    Time: min={:.3}s, max={:.3}s, avg={:.3}s", min_time, max_time, avg_time);
        eprintln!("    Memory: max_delta={} KiB, avg_delta={:.1} KiB", max_mem, avg_mem);
        eprintln!();
    }

    eprintln!("{}", "=".repeat(80));
    if failed == 0 {
        eprintln!("✓ All verified runs passed.");
    } else {
        eprintln!("✗ {} run(s) failed. Please review the errors above.", failed);
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(
    scenario: &'static str,
    n: usize,
    capacity: u64,
    sys: &mut System,
    compute: F,
) -> Measurement
where
    F: FnOnce() -> Verdict,
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let verdict = compute();
    let wall_s = start.elapsed().as_secs_f64();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        n,
        capacity,
        selected_sum: verdict.selected_sum,
        wall_s,
        rss_delta_kib: after.saturating_sub(before),
        verification_status: verdict.status,
        verification_detail: verdict.detail,
    }
}

fn selected_cell(sum: Option<u64>) -> String {
    sum.map_or_else(|| "-".to_string(), |s| s.to_string())
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("strategy,n,capacity,selected_sum,gap,wall_s,rss_delta_kib,status,detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.n,
            m.capacity,
            m.selected_sum.map(|s| s.to_string()).unwrap_or_default(),
            m.selected_sum
                .map(|s| m.capacity.abs_diff(s).to_string())
                .unwrap_or_default(),
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    println!(
        "{:<8}  {:>9}  {:>9}  {:>12}  {:>10}  {:>13}  {:>11}  {}",
        "strategy", "n", "capacity", "selected_sum", "wall_s", "rss_delta_kib", "status", "detail",
    );
    println!("{}", "-".repeat(96));
    for m in measurements {
        println!(
            "{:<8}  {:>9}  {:>9}  {:>12}  {:>10.3}  {:>13}  {:>11}  {}",
            m.scenario,
            m.n,
            m.capacity,
            selected_cell(m.selected_sum),
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m
            .verification_detail
            .as_ref()
            .map_or_else(|| "null".to_string(), |d| format!("\"{}\"", d.replace('"', "'")));
        let selected = m
            .selected_sum
            .map_or_else(|| "null".to_string(), |s| s.to_string());
        println!(
            "  {{\"strategy\":\"{}\",\"n\":{},\"capacity\":{},\"selected_sum\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"status\":\"{}\",\"detail\":{}}}{}",
            m.scenario,
            m.n,
            m.capacity,
            selected,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail,
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    let Ok(pid) = get_current_pid() else {
        return 0;
    };
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    sys.process(pid).map_or(0, |process| process.memory() / 1024)
}

/// Uniform weights in `[1, 1_000_000)` from a seeded generator.
fn random_weights(len: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(1..1_000_000)).collect()
}

/// Best sum at or below `capacity`, by a plain boolean table.
fn full_table_best(weights: &[u64], capacity: u64) -> u64 {
    let cap = capacity as usize;
    let mut reachable = vec![false; cap + 1];
    reachable[0] = true;
    for &w in weights {
        let w = w as usize;
        if w > cap {
            continue;
        }
        for s in (w..=cap).rev() {
            if reachable[s - w] {
                reachable[s] = true;
            }
        }
        if reachable[cap] {
            return capacity;
        }
    }
    (0..=cap).rev().find(|&s| reachable[s]).unwrap_or(0) as u64
}
