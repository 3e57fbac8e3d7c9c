//! FlowRunner CLI Entry Point
//!
//! Runs a registered flow, or the built-in test suite.
//!
//! # Usage
//!
//! ```bash
//! # Run the default flow (greets the world)
//! flowrunner
//!
//! # Run a named flow with arguments
//! flowrunner hello rustaceans
//!
//! # Run the test suite
//! flowrunner --test
//!
//! # Load configuration from YAML
//! flowrunner --config flows.yaml countdown
//! ```

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use colored::Colorize;
use log::{error, info};

use flowrunner::context::{load_config, FlowConfig, FlowContext};
use flowrunner::flows::{FlowRegistry, DEFAULT_FLOW};
use flowrunner::output::ConsoleSink;
use flowrunner::testing::builtin_suite;
use flowrunner::{APP_NAME, VERSION};

/// Command-line configuration parsed from arguments.
#[derive(Debug)]
struct Config {
    flow: String,
    flow_args: Vec<String>,
    config_path: Option<String>,
    test_mode: bool,
    list: bool,
    verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flow: DEFAULT_FLOW.to_string(),
            flow_args: Vec::new(),
            config_path: None,
            test_mode: false,
            list: false,
            verbose: false,
        }
    }
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME.bold(), VERSION);
    println!("Concurrent Flow Sections");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: flowrunner [OPTIONS] [FLOW] [ARGS...]");
    println!();
    println!("Arguments:");
    println!("  [FLOW]              Flow to run (default: {})", DEFAULT_FLOW);
    println!("  [ARGS...]           Arguments passed to the flow");
    println!();
    println!("Options:");
    println!("  --test              Run the built-in test suite");
    println!("  --config PATH       Load configuration from a YAML file");
    println!("  --list              List registered flows");
    println!("  --verbose           Enable debug logging");
    println!("  --help              Show this help message");
    println!("  --version           Show version information");
    println!();
    println!("Examples:");
    println!("  flowrunner");
    println!("  flowrunner hello world");
    println!("  flowrunner --test");
}

/// Parses command-line arguments into a Config struct.
fn parse_arguments(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut positional_index = 0;
    let mut i = 1; // Skip program name

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--test" | "-test" => {
                config.test_mode = true;
            }
            "--list" => {
                config.list = true;
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("--config requires a path argument".to_string());
                }
                config.config_path = Some(args[i].clone());
            }
            arg if arg.starts_with('-') && positional_index == 0 => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                match positional_index {
                    0 => config.flow = arg.clone(),
                    _ => config.flow_args.push(arg.clone()),
                }
                positional_index += 1;
            }
        }
        i += 1;
    }

    Ok(config)
}

/// Prints every registered flow with its arity and description.
fn print_flows(registry: &FlowRegistry) {
    println!("Registered flows:");
    for entry in registry.entries() {
        println!(
            "  {:12} ({} arg{}) {}",
            entry.name,
            entry.arity,
            if entry.arity == 1 { "" } else { "s" },
            entry.description
        );
    }
}

/// Main application entry point.
async fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let config = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    setup_logging(config.verbose);

    if config.verbose {
        print_banner();
    }

    let registry = FlowRegistry::with_defaults();

    if config.list {
        print_flows(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    let flow_config = match config.config_path {
        Some(ref path) => load_config(path).map_err(|e| {
            error!("Failed to load config: {}", e);
            e
        })?,
        None => FlowConfig::default(),
    };

    let ctx = FlowContext::new(Arc::new(ConsoleSink::new()), flow_config);

    if config.test_mode {
        println!("testing flows...");
        let mut suite = builtin_suite(&ctx);
        let report = suite.run(ctx.sink().clone()).await;

        println!();
        println!("{}", report.summary());

        if report.is_success() {
            println!("{}", "All tests passed".green().bold());
            return Ok(ExitCode::SUCCESS);
        }
        println!("{}", "Some tests failed".red().bold());
        return Ok(ExitCode::FAILURE);
    }

    match registry.invoke(&config.flow, &ctx, &config.flow_args).await? {
        Some(value) => info!("Flow '{}' returned {}", config.flow, value),
        None => info!("Flow '{}' returned no value", config.flow),
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("flowrunner")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = parse_arguments(&args(&[])).unwrap();
        assert_eq!(config.flow, DEFAULT_FLOW);
        assert!(config.flow_args.is_empty());
        assert!(!config.test_mode);
    }

    #[test]
    fn test_test_flag_variants() {
        assert!(parse_arguments(&args(&["--test"])).unwrap().test_mode);
        assert!(parse_arguments(&args(&["-test"])).unwrap().test_mode);
    }

    #[test]
    fn test_flow_and_arguments() {
        let config = parse_arguments(&args(&["hello", "world"])).unwrap();
        assert_eq!(config.flow, "hello");
        assert_eq!(config.flow_args, vec!["world"]);
    }

    #[test]
    fn test_config_path() {
        let config = parse_arguments(&args(&["--config", "flows.yaml", "countdown"])).unwrap();
        assert_eq!(config.config_path.as_deref(), Some("flows.yaml"));
        assert_eq!(config.flow, "countdown");
    }

    #[test]
    fn test_missing_config_path() {
        assert!(parse_arguments(&args(&["--config"])).is_err());
    }

    #[test]
    fn test_unknown_option() {
        let err = parse_arguments(&args(&["--bogus"])).unwrap_err();
        assert!(err.contains("--bogus"));
    }

    #[test]
    fn test_dash_arguments_after_flow_are_passed_through() {
        let config = parse_arguments(&args(&["hello", "-world-"])).unwrap();
        assert_eq!(config.flow_args, vec!["-world-"]);
    }
}
