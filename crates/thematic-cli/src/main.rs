//! `thematic` command line tool.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use thematic_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use thematic_cli::commands::{
    load_registry, run_config, run_dump, run_list, run_resolve, run_themes, run_view,
};
use thematic_cli::logging::{LogConfig, LogFormat, init_logging};

mod summary;

use crate::summary::{
    print_config, print_dump, print_json, print_listing, print_resource, print_themes,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Run the selected command. `Ok(1)` means the identifier did not resolve.
fn run(cli: &Cli) -> Result<i32> {
    let registry = load_registry(cli.settings.as_deref())?;
    match &cli.command {
        Command::Resolve(args) => match run_resolve(&registry, args)? {
            Some(resource) => {
                if args.json {
                    print_json(&resource)?;
                } else {
                    print_resource(&resource);
                }
                Ok(0)
            }
            None => {
                eprintln!("not found: {}", args.identifier);
                Ok(1)
            }
        },
        Command::View(args) => match run_view(&registry, args)? {
            Some(path) => {
                if args.json {
                    print_json(&path)?;
                } else {
                    println!("{}", path.display());
                }
                Ok(0)
            }
            None => {
                eprintln!("no view file: {}", args.identifier);
                Ok(1)
            }
        },
        Command::List(args) => {
            let resources = run_list(&registry, args)?;
            if args.json {
                print_json(&resources)?;
            } else {
                print_listing(&resources);
            }
            Ok(0)
        }
        Command::Dump(args) => {
            let summary = run_dump(&registry, args)?;
            print_dump(&summary);
            Ok(0)
        }
        Command::Config(args) => {
            let report = run_config(&registry, args)?;
            if args.json {
                print_json(&report)?;
            } else {
                print_config(&report)?;
            }
            Ok(0)
        }
        Command::Themes(args) => {
            let themes = run_themes(&registry);
            if args.json {
                print_json(&themes)?;
            } else {
                print_themes(&themes);
            }
            Ok(0)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
