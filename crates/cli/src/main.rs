mod config;
mod pretty;

use config::Config;

use std::io::{self, BufRead, IsTerminal};

use clap::Parser;
use colored::{control::set_override, Colorize};
use subnetcalc_core::{calculate_with_hint, CalculationError, FamilyHint, SubnetResult};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::pretty::{pretty_json, render_result, PrettyConfig};

const LONG_ABOUT: &str = r##"
subnetcalc derives network boundaries, address counts and usable ranges
from an address/prefix expression. IPv4 and IPv6 are detected automatically.

INPUT:
  <address>/<prefix>     Prefix length for either family (192.168.1.0/24, 2001:db8::/64)
  <address>/<mask>       Dotted mask for IPv4 (10.1.2.3/255.255.0.0)

  Non-contiguous IPv4 masks (e.g. 255.0.255.0) are rejected.
  IPv6 counts above 2^53 are shown symbolically (2^64) rather than rounded.

EXAMPLES:
  subnetcalc 192.168.1.0/24             Classic /24
  subnetcalc 10.0.0.0/31                Point-to-point link
  subnetcalc 172.16.5.4/255.240.0.0     Dotted mask
  subnetcalc 2001:db8::/64              IPv6 subnet
  subnetcalc -f v6 ::1/128              Insist on IPv6
  subnetcalc -j 10.0.0.0/8              JSON output

PIPED INPUT:
  echo 10.0.0.0/8 | subnetcalc          First non-empty line of stdin

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting  | CLI flag        | Env var              | Default
  ---------|-----------------|----------------------|---------
  family   | -f, --family    | SUBNETCALC_FAMILY    | auto
  json     | -j, --json      | SUBNETCALC_JSON      | false
  compact  | -c, --compact   |                      | false
  no_color | -C, --no-color  | SUBNETCALC_NO_COLOR  | false

  Config file location: subnetcalc --config-path
  Generate default config: subnetcalc --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"##;

#[derive(Parser)]
#[command(name = "subnetcalc")]
#[command(version)]
#[command(about = "IPv4/IPv6 subnet calculator")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// The expression to evaluate, e.g. 192.168.1.0/24
    ///
    /// Reads the first non-empty line of stdin when omitted and stdin is piped.
    #[arg(value_name = "EXPRESSION")]
    input: Option<String>,

    /// Address family: auto, v4 or v6
    ///
    /// With v4 or v6, an address of the other shape is an error instead of
    /// being detected.
    #[arg(long, short = 'f', value_name = "FAMILY")]
    family: Option<FamilyHint>,

    /// Output results as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// Compact JSON output (single line)
    #[arg(long, short = 'c')]
    compact: bool,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages, -vv shows trace messages.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Show config file path
    #[arg(long)]
    config_path: bool,

    /// Generate default config file (see --config-path for location)
    #[arg(long)]
    config_init: bool,
}

/// Settings after merging CLI, environment and config file.
struct Settings {
    family: FamilyHint,
    json: bool,
    pretty: PrettyConfig,
}

fn main() {
    let cli = Cli::parse();

    // Handle --config-path
    if cli.config_path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => {
                eprintln!(
                    "{}: Cannot determine config directory",
                    "error".red().bold()
                );
                std::process::exit(1);
            }
        }
        return;
    }

    // Handle --config-init
    if cli.config_init {
        match config::init_config() {
            Ok(path) => println!("Created config file: {}", path.display()),
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    init_tracing(cli.verbose);

    let settings = merge_settings(&cli, &Config::load());
    set_override(settings.pretty.color);

    let input = match cli.input.clone() {
        Some(input) => input,
        None => match read_stdin_line() {
            Some(line) => line,
            None => {
                eprintln!("{}: No input provided", "error".red().bold());
                eprintln!("Usage: subnetcalc <EXPRESSION>  (see --help)");
                std::process::exit(1);
            }
        },
    };

    let outcome = calculate_with_hint(&input, settings.family);
    if let Err(ref e) = outcome {
        tracing::debug!(kind = e.kind(), "calculation failed");
    }

    let ok = outcome.is_ok();
    if settings.json {
        print_json(&outcome, &settings.pretty);
    } else {
        print_human(&outcome, &settings.pretty);
    }

    if !ok {
        std::process::exit(1);
    }
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level == LevelFilter::OFF {
        return;
    }

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge settings with source logging.
/// Precedence: CLI args > Environment vars > Config file > Defaults
fn merge_settings(cli: &Cli, file_config: &Config) -> Settings {
    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    let family = if let Some(f) = cli.family {
        tracing::debug!("family = {} (from CLI)", f);
        f
    } else {
        let f = file_config.family();
        let source = if std::env::var("SUBNETCALC_FAMILY").is_ok() {
            "env SUBNETCALC_FAMILY"
        } else if file_config.family.is_some() {
            "config file"
        } else {
            "default"
        };
        tracing::debug!("family = {} (from {})", f, source);
        f
    };

    let json = cli.json || file_config.json();
    let compact = cli.compact || file_config.compact();
    tracing::debug!(json, compact, "output mode");

    let no_color = cli.no_color || file_config.no_color() || !io::stdout().is_terminal();
    tracing::debug!("no_color = {}", no_color);

    Settings {
        family,
        json,
        pretty: PrettyConfig {
            color: !no_color,
            compact,
            ..Default::default()
        },
    }
}

/// First non-empty line of piped stdin, if any.
fn read_stdin_line() -> Option<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }

    stdin
        .lock()
        .lines()
        .map_while(Result::ok)
        .map(|line| line.trim().to_string())
        .find(|line| !line.is_empty())
}

fn print_human(outcome: &Result<SubnetResult, CalculationError>, config: &PrettyConfig) {
    match outcome {
        Ok(result) => print!("{}", render_result(result, config)),
        Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
    }
}

/// Errors are printed to stdout too, so scripts get one JSON document either way.
fn print_json(outcome: &Result<SubnetResult, CalculationError>, config: &PrettyConfig) {
    let value = match outcome {
        Ok(result) => serde_json::to_value(result),
        Err(e) => serde_json::to_value(e),
    };

    match value {
        Ok(value) => println!("{}", pretty_json(&value, config)),
        Err(e) => {
            eprintln!("{}: Failed to serialize output: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}
