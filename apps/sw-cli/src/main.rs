use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sw_control::{OverrideCommand, OverrideQueue, SystemState};
use sw_core::MemoryLog;
use sw_dashboard::{
    ControlLoop, ControlLoopConfig, Dashboard, DashboardConfig, DashboardError, DashboardResult,
    Dialogs, LogRegistry, config, default_charts,
};
use tracing_subscriber::EnvFilter;

/// Virtual time step used when not running in real time.
const SIM_STEP_S: f64 = 0.5;

#[derive(Parser)]
#[command(name = "sw-cli")]
#[command(about = "SolarWatch CLI - solar panel monitoring dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard and print metric updates and the event log
    Simulate {
        /// Dashboard config file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// RNG seed, overrides the config file
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated duration in seconds
        #[arg(long, default_value_t = 20.0)]
        duration: f64,
        /// Follow the wall clock instead of stepping virtual time
        #[arg(long)]
        realtime: bool,
        /// Press "start cleaning" at this time (seconds)
        #[arg(long)]
        clean_at: Option<f64>,
        /// Press "reset" at this time (seconds)
        #[arg(long)]
        reset_at: Option<f64>,
        /// Answer yes to confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the static chart configuration
    Charts {
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Run the panel control loop on simulated sensors
    Control {
        /// Dashboard config file (YAML or JSON) supplying the control settings
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of control iterations
        #[arg(long, default_value_t = 100)]
        iterations: u32,
        /// RNG seed for the simulated sensors, overrides the config file
        #[arg(long)]
        seed: Option<u64>,
        /// Queue a forced water cleaning before the first iteration
        #[arg(long)]
        force_clean: bool,
    },
    /// Create or check config files
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the default configuration
    Init {
        /// Output path (YAML)
        path: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        /// Path to the config file (YAML or JSON)
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> DashboardResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            seed,
            duration,
            realtime,
            clean_at,
            reset_at,
            yes,
        } => {
            let actions = ScheduledActions {
                clean_at,
                reset_at,
                assume_yes: yes,
            };
            cmd_simulate(config.as_deref(), seed, duration, realtime, actions)
        }
        Commands::Charts { format } => cmd_charts(format),
        Commands::Control {
            config,
            iterations,
            seed,
            force_clean,
        } => cmd_control(config.as_deref(), iterations, seed, force_clean),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init { path } => cmd_config_init(&path),
            ConfigCommands::Validate { path } => cmd_config_validate(&path),
        },
    }
}

struct ScheduledActions {
    clean_at: Option<f64>,
    reset_at: Option<f64>,
    assume_yes: bool,
}

/// Notices go to stdout, confirmations read a line from stdin.
struct TerminalDialogs {
    assume_yes: bool,
}

impl Dialogs for TerminalDialogs {
    fn notify(&mut self, message: &str) {
        println!("[notice] {message}");
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            println!("[confirm] {prompt} yes");
            return true;
        }
        match ask_yes_no(&mut io::stdin().lock(), &mut io::stdout(), prompt) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "confirmation prompt failed, treating as no");
                false
            }
        }
    }
}

/// Print `prompt` and read one answer line. Only an explicit yes counts.
fn ask_yes_no(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> io::Result<bool> {
    write!(output, "[confirm] {prompt} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn load_config(path: Option<&Path>) -> DashboardResult<DashboardConfig> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            config::load(path)
        }
        None => Ok(DashboardConfig::default()),
    }
}

fn cmd_simulate(
    config_path: Option<&Path>,
    seed: Option<u64>,
    duration: f64,
    realtime: bool,
    mut actions: ScheduledActions,
) -> DashboardResult<()> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(DashboardError::InvalidInput(format!(
            "duration must be non-negative, got {duration}"
        )));
    }
    let mut config = load_config(config_path)?;
    if seed.is_some() {
        config.seed = seed;
    }

    let mut dashboard = Dashboard::from_config(config)?;
    let mut dialogs = TerminalDialogs {
        assume_yes: actions.assume_yes,
    };

    let mut out = io::stdout().lock();
    writeln!(out, "Starting dashboard for {duration:.1} s")?;
    let started = Instant::now();
    if dashboard.startup(0.0).is_some() {
        print_metrics(&mut out, 0.0, &dashboard)?;
    }

    let mut now = 0.0;
    while now < duration {
        now = if realtime {
            let wait = dashboard.next_wakeup(now).unwrap_or(SIM_STEP_S);
            std::thread::sleep(Duration::from_secs_f64(wait.min(duration - now).max(0.0)));
            started.elapsed().as_secs_f64()
        } else {
            (now + SIM_STEP_S).min(duration)
        };

        if actions.clean_at.is_some_and(|t| now >= t) {
            actions.clean_at = None;
            dashboard.start_cleaning(&mut dialogs);
        }
        if actions.reset_at.is_some_and(|t| now >= t) {
            actions.reset_at = None;
            dashboard.reset_system(&mut dialogs);
        }

        let summary = dashboard.update(now);
        if !summary.snapshots.is_empty() {
            print_metrics(&mut out, now, &dashboard)?;
        }
        for step in summary.steps.iter().filter(|s| s.changed()) {
            writeln!(out, "  t={now:>7.1}s  panel: {} -> {}", step.from, step.to)?;
        }
        out.flush()?;
    }
    dashboard.shutdown();

    writeln!(out)?;
    print_log(&mut out, dashboard.log())?;
    if let Some(report) = dashboard.control_report() {
        writeln!(out)?;
        writeln!(out, "Control state: {}", report.current_state)?;
    }
    out.flush()?;
    Ok(())
}

fn print_metrics(out: &mut impl Write, now: f64, dashboard: &Dashboard) -> io::Result<()> {
    let display = dashboard.display();
    writeln!(
        out,
        "  t={now:>7.1}s  energy={:>10}  tilt={:>4}  status={}",
        display.energy, display.tilt, display.status
    )
}

fn print_log(out: &mut impl Write, log: &LogRegistry) -> io::Result<()> {
    writeln!(out, "Event log ({} entries, newest first):", log.len())?;
    for entry in log.entries() {
        writeln!(out, "  {:>11}  {}", entry.timestamp, entry.message)?;
    }
    Ok(())
}

fn cmd_charts(format: Format) -> DashboardResult<()> {
    let charts = default_charts();
    let text = match format {
        Format::Yaml => serde_yaml::to_string(&charts)?,
        Format::Json => serde_json::to_string_pretty(&charts)?,
    };
    println!("{text}");
    Ok(())
}

/// Control settings and sensor seed from the config file; `seed` wins over the file.
fn control_settings(
    config_path: Option<&Path>,
    seed: Option<u64>,
) -> DashboardResult<(ControlLoopConfig, Option<u64>)> {
    let config = load_config(config_path)?;
    Ok((config.control, seed.or(config.seed)))
}

fn cmd_control(
    config_path: Option<&Path>,
    iterations: u32,
    seed: Option<u64>,
    force_clean: bool,
) -> DashboardResult<()> {
    let (control_config, seed) = control_settings(config_path, seed)?;
    let period = control_config.period_s;
    let mut control = ControlLoop::from_config(&control_config, seed)?;
    let mut log = MemoryLog::new();
    let mut queue = OverrideQueue::new();
    if force_clean {
        queue.push(OverrideCommand::ForceClean);
    }

    println!("Running {iterations} control iterations ({period:.1} s period)");
    control.start(0.0);
    let mut now = 0.0;
    let mut transitions = 0u32;
    for _ in 0..iterations {
        now += period;
        let outcomes = control.poll(now, &mut queue, &mut log);
        for outcome in outcomes.iter().filter(|o| o.changed()) {
            transitions += 1;
            println!(
                "  t={now:>8.1}s  dust={:>5.1}%  wind={:>5.1} m/s  {} -> {}",
                outcome.readings.dust_pct,
                outcome.readings.wind_speed_mps,
                outcome.from,
                outcome.to
            );
        }
    }

    let cleaning = control.manager().cleaning();
    let pose = control.manager().actuator().pose();
    println!("✓ {} iterations, {transitions} state changes", control.steps());
    println!("  Water cleans: {}", cleaning.water_cleans());
    println!(
        "  Water remaining: {:.3} L",
        sw_core::units::in_liters(cleaning.water_remaining())
    );
    println!("  Panel: base={:.1}° tilt={:.1}°", pose.base_deg, pose.tilt_deg);
    if control.state() != SystemState::SunTracking {
        println!("  Ended in state {}", control.state());
    }
    for message in &log.messages {
        println!("  log: {message}");
    }
    println!("{}", serde_json::to_string(&control.report())?);
    Ok(())
}

fn cmd_config_init(path: &Path) -> DashboardResult<()> {
    config::save_yaml(path, &DashboardConfig::default())?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_config_validate(path: &Path) -> DashboardResult<()> {
    println!("Validating config: {}", path.display());
    let config = config::load(path)?;
    println!("✓ Config is valid");
    println!("  Tick period: {:.1} s", config.tick_period_s);
    match config.seed {
        Some(seed) => println!("  Seed: {seed}"),
        None => println!("  Seed: entropy"),
    }
    match config.log_capacity {
        Some(cap) => println!("  Log capacity: {cap}"),
        None => println!("  Log capacity: unbounded"),
    }
    println!(
        "  Control loop: {}",
        if config.control.enabled {
            format!("enabled, {:.1} s period", config.control.period_s)
        } else {
            "disabled".to_string()
        }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn only_explicit_yes_confirms() {
        let mut out = Vec::new();
        let yes = ask_yes_no(&mut io::Cursor::new("yes\n"), &mut out, "Confirm system reset?");
        assert!(yes.unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "[confirm] Confirm system reset? [y/N] ");

        assert!(!ask_yes_no(&mut io::Cursor::new("\n"), &mut Vec::new(), "?").unwrap());
        assert!(!ask_yes_no(&mut io::Cursor::new(""), &mut Vec::new(), "?").unwrap());
    }

    #[test]
    fn prompt_write_failure_is_reported() {
        let err = ask_yes_no(&mut io::Cursor::new("y\n"), &mut BrokenPipe, "?").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        let log = LogRegistry::new(Box::new(sw_core::SystemClock));
        assert!(print_log(&mut BrokenPipe, &log).is_err());

        let err: DashboardError = err.into();
        assert!(matches!(err, DashboardError::Io(_)));
    }

    #[test]
    fn control_settings_come_from_config_file() {
        let path =
            std::env::temp_dir().join(format!("sw_cli_{}_control.yaml", std::process::id()));
        let mut file_config = DashboardConfig {
            seed: Some(42),
            ..DashboardConfig::default()
        };
        file_config.control.period_s = 5.0;
        file_config.control.decision.dust_threshold_pct = 35.0;
        config::save_yaml(&path, &file_config).unwrap();

        let (control, seed) = control_settings(Some(&path), None).unwrap();
        assert_eq!(control.period_s, 5.0);
        assert_eq!(control.decision.dust_threshold_pct, 35.0);
        assert_eq!(seed, Some(42));

        let (_, seed) = control_settings(Some(&path), Some(7)).unwrap();
        assert_eq!(seed, Some(7));
        std::fs::remove_file(&path).unwrap();

        let (control, seed) = control_settings(None, None).unwrap();
        assert_eq!(control, DashboardConfig::default().control);
        assert_eq!(seed, None);
    }
}
