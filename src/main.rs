//! liqctl - liquidctl-backed cooling control tool
//!
//! A command-line tool for reading cooling telemetry and setting fan/pump
//! duty cycles through the external liquidctl utility.

use clap::Parser;
use liqctl::cli::args::{generate_completions, Cli, Commands};
use liqctl::commands::{resolve_config, run_list, run_set, run_status, run_watch};
use liqctl::error::{AppError, UtilityError};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = resolve_config(cli.config.as_deref())?;
    let exe = cli.exe.as_deref();

    match &cli.command {
        Commands::List => run_list(&config, exe, cli.format),

        Commands::Status => run_status(&config, exe, cli.format),

        Commands::Set(args) => run_set(args, &config, exe, cli.format),

        Commands::Watch(args) => run_watch(args, &config, exe, cli.format),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Utility(UtilityError::Unreachable(_)) => {
            eprintln!();
            eprintln!("Hint: Make sure liquidctl is installed and on PATH");
            eprintln!("      (e.g. 'pip install liquidctl'), or set [utility]");
            eprintln!("      path in the liqctl configuration file.");
        }
        AppError::NoDevicesFound => {
            eprintln!();
            eprintln!("Hint: Check device connections and permissions.");
            eprintln!("      'liquidctl list' shows what the utility can see.");
        }
        AppError::WriteFailed(_) => {
            eprintln!();
            eprintln!("Hint: Some devices only accept writes after an");
            eprintln!("      initialization pass ('liquidctl initialize all').");
        }
        _ => {}
    }
}
